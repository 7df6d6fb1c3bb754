// RSA Key Generation
// Implements RSA key pair generation (public and private keys)

use std::fmt;

use log::{debug, info, warn};
use num_bigint::RandBigInt;
use num_traits::One;
use rand::{CryptoRng, RngCore};

use super::bigint::{gcd, mod_inverse, RsaBigInt};
use super::error::{Result, RsaError};
use super::prime::random_prime;
use crate::config::BlindRsaConfig;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: RsaBigInt, // Modulus
    pub e: RsaBigInt, // Public exponent
}

/// RSA Private Key
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: RsaBigInt, // Modulus (same as public)
    pub d: RsaBigInt, // Private exponent
}

/// RSA Key Pair (both public and private keys)
///
/// The totient used to derive `d` is dropped once generation finishes.
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

impl RsaPublicKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

impl RsaPrivateKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.n)
            .field("d", &"<redacted>")
            .finish()
    }
}

impl RsaKeyPair {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }

    /// Build a key pair from two known primes and a public exponent.
    ///
    /// The caller vouches for the primality of `p` and `q`. Fails if they are
    /// equal, if `e` is outside (1, phi) or if `e` has no inverse mod phi.
    pub fn from_primes(p: &RsaBigInt, q: &RsaBigInt, e: &RsaBigInt) -> Result<Self> {
        let two = RsaBigInt::from(2u8);
        if p < &two || q < &two {
            return Err(RsaError::InvalidInput("primes must be at least 2".into()));
        }
        if p == q {
            return Err(RsaError::InvalidInput("p and q must be distinct".into()));
        }

        let phi = totient(p, q);
        if e <= &RsaBigInt::one() || e >= &phi {
            return Err(RsaError::InvalidInput(format!(
                "public exponent must lie in (1, {})",
                phi
            )));
        }

        let d = private_exponent(e, &phi).ok_or(RsaError::NoInverseExists)?;
        Ok(Self::assemble(p * q, e.clone(), d))
    }

    fn assemble(n: RsaBigInt, e: RsaBigInt, d: RsaBigInt) -> Self {
        Self {
            public_key: RsaPublicKey { n: n.clone(), e },
            private_key: RsaPrivateKey { n, d },
        }
    }
}

/// phi(N) = (p-1)(q-1)
fn totient(p: &RsaBigInt, q: &RsaBigInt) -> RsaBigInt {
    (p - 1u8) * (q - 1u8)
}

/// d = e^(-1) mod phi, provided gcd(e, phi) = 1
fn private_exponent(e: &RsaBigInt, phi: &RsaBigInt) -> Option<RsaBigInt> {
    if !gcd(e, phi).is_one() {
        return None;
    }
    mod_inverse(e, phi)
}

/// Generate RSA key pair from the given configuration and random source.
///
/// Two distinct `prime_bits`-bit probable primes are drawn, then a random
/// `exponent_bits`-bit public exponent is drawn until one is invertible
/// mod phi. Both searches are bounded by the configured attempt limits.
pub fn generate_keypair<R>(config: &BlindRsaConfig, rng: &mut R) -> Result<RsaKeyPair>
where
    R: RngCore + CryptoRng + ?Sized,
{
    config.validate()?;

    let rounds = config.miller_rabin_rounds;
    let attempts = config.max_prime_attempts;

    // Step 1: Generate two distinct random primes p and q
    let p = random_prime(config.prime_bits, rounds, attempts, rng)?;
    let mut q = random_prime(config.prime_bits, rounds, attempts, rng)?;
    let mut redraws = 0u32;
    while q == p {
        redraws += 1;
        if redraws > attempts {
            return Err(RsaError::PrimeGenerationExhausted {
                bits: config.prime_bits,
                attempts,
            });
        }
        warn!("drew the same prime twice, redrawing q");
        q = random_prime(config.prime_bits, rounds, attempts, rng)?;
    }

    // Step 2: Compute n = p * q and φ(n) = (p-1)(q-1)
    let n = &p * &q;
    let phi = totient(&p, &q);

    // Step 3: Draw e from [2^(k-1) + 1, min(2^k, φ(n))) until it is invertible
    let low = (RsaBigInt::one() << (config.exponent_bits - 1)) + 1u8;
    let high = std::cmp::min(RsaBigInt::one() << config.exponent_bits, phi.clone());
    if low >= high {
        return Err(RsaError::InvalidConfig(format!(
            "no {}-bit public exponent fits below phi",
            config.exponent_bits
        )));
    }

    for attempt in 1..=config.max_exponent_attempts {
        let e = rng.gen_biguint_range(&low, &high);
        if let Some(d) = private_exponent(&e, &phi) {
            debug!("public exponent accepted after {} attempts", attempt);
            let keypair = RsaKeyPair::assemble(n, e, d);
            info!("generated {}-bit RSA key pair", keypair.bit_length());
            return Ok(keypair);
        }
    }

    Err(RsaError::KeyGenerationExhausted(config.max_exponent_attempts))
}
