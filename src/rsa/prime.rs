// Prime Testing and Generation
// Miller-Rabin probable-prime test and random prime search

use log::debug;
use num_bigint::RandBigInt;
use num_integer::Integer;
use num_traits::One;
use rand::{CryptoRng, RngCore};

use super::bigint::{mod_pow, RsaBigInt};
use super::error::{Result, RsaError};

/// Default number of Miller-Rabin rounds
pub const DEFAULT_ROUNDS: u32 = 5;

/// Miller-Rabin primality test
/// Returns true if n is probably prime.
///
/// A composite passes with probability at most 4^-rounds; a prime never fails.
/// Witnesses are drawn uniformly from [2, n-2] using `rng`.
pub fn is_probable_prime<R>(n: &RsaBigInt, rounds: u32, rng: &mut R) -> bool
where
    R: RngCore + CryptoRng + ?Sized,
{
    let two = RsaBigInt::from(2u8);
    if n < &two {
        return false;
    }
    if n == &two || n == &RsaBigInt::from(3u8) {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one: RsaBigInt = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    'witness: for _ in 0..rounds {
        // Upper bound is exclusive, so witnesses land in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);

        let mut x = mod_pow(&a, &d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = mod_pow(&x, &two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        // Composite
        return false;
    }

    // Probably prime
    true
}

/// Generate a random probable prime of exactly `bit_length` bits.
///
/// Candidates have their top bit set and are forced odd. Gives up with
/// `PrimeGenerationExhausted` after `max_attempts` candidates.
pub fn random_prime<R>(
    bit_length: u32,
    rounds: u32,
    max_attempts: u32,
    rng: &mut R,
) -> Result<RsaBigInt>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if bit_length < 2 {
        return Err(RsaError::InvalidConfig(format!(
            "prime bit length must be at least 2, got {}",
            bit_length
        )));
    }

    let top_bit = RsaBigInt::one() << (bit_length - 1);

    for attempt in 1..=max_attempts {
        let candidate = rng.gen_biguint(u64::from(bit_length)) | &top_bit | RsaBigInt::one();

        if is_probable_prime(&candidate, rounds, rng) {
            debug!("found {}-bit probable prime after {} attempts", bit_length, attempt);
            return Ok(candidate);
        }
    }

    Err(RsaError::PrimeGenerationExhausted {
        bits: bit_length,
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    const PRIMES: &[u64] = &[
        2, 3, 5, 7, 11, 13, 61, 53, 97, 7919, 65537, 104_729, 2_147_483_647,
        1_000_000_007, 18_446_744_073_709_551_557,
    ];

    // Includes Carmichael numbers and strong pseudoprimes to small bases
    const COMPOSITES: &[u64] = &[
        0, 1, 4, 9, 15, 21, 561, 1105, 1729, 2047, 3215031751, 3233, 1_000_000_008,
        4_294_967_297,
    ];

    #[test]
    fn test_is_probable_prime() {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        for &p in PRIMES {
            assert!(is_probable_prime(&from_u64(p), DEFAULT_ROUNDS, &mut rng), "{} is prime", p);
        }
    }

    #[test]
    fn test_rejects_composites() {
        let mut rng = ChaCha8Rng::from_seed([7; 32]);
        for &c in COMPOSITES {
            assert!(!is_probable_prime(&from_u64(c), 20, &mut rng), "{} is composite", c);
        }
    }

    #[test]
    fn test_large_known_prime() {
        // 2^127 - 1 (Mersenne prime) and 2^128 + 1 (composite)
        let mut rng = ChaCha8Rng::from_seed([1; 32]);
        let m127 = (from_u64(1) << 127) - 1u8;
        assert!(is_probable_prime(&m127, DEFAULT_ROUNDS, &mut rng));
        let f7 = (from_u64(1) << 128) + 1u8;
        assert!(!is_probable_prime(&f7, DEFAULT_ROUNDS, &mut rng));
    }

    #[test]
    fn test_random_prime_bit_length() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        for bits in [2u32, 3, 8, 16, 64, 256] {
            let p = random_prime(bits, DEFAULT_ROUNDS, 100_000, &mut rng).unwrap();
            assert_eq!(p.bits(), u64::from(bits));
            assert!(p.is_odd());
            assert!(is_probable_prime(&p, 20, &mut rng));
        }
    }

    #[test]
    fn test_random_prime_rejects_tiny_bit_length() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        assert!(matches!(
            random_prime(1, DEFAULT_ROUNDS, 10, &mut rng),
            Err(RsaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_random_prime_exhausted() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        assert_eq!(
            random_prime(512, DEFAULT_ROUNDS, 0, &mut rng),
            Err(RsaError::PrimeGenerationExhausted { bits: 512, attempts: 0 })
        );
    }
}
