// Coprime Pair Search
// Finds num1 + num2 = N with gcd(num1, num2) = 1, scanning down from N / 2

use num_traits::One;

use super::bigint::{gcd, RsaBigInt};
use super::error::{Result, RsaError};

/// A pair of coprime integers that sum to a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoprimePair {
    pub num1: RsaBigInt,
    pub num2: RsaBigInt,
}

/// Search for the coprime pair closest to the midpoint of `n`.
///
/// num1 starts at n / 2 and walks down to 2; the first num1 with
/// gcd(num1, n - num1) = 1 wins. The result depends only on `n`.
/// Since num1 + num2 = n, num1 is also coprime to n.
///
/// Fails for n < 5 and for n = 6, the only larger target without a pair.
pub fn coprime_pair_from_mid(n: &RsaBigInt) -> Result<CoprimePair> {
    let two = RsaBigInt::from(2u8);
    let mut num1: RsaBigInt = n >> 1;

    while num1 >= two {
        let num2 = n - &num1;
        if gcd(&num1, &num2).is_one() {
            return Ok(CoprimePair { num1, num2 });
        }
        num1 -= 1u8;
    }

    Err(RsaError::NoCoprimePairFound(n.to_string()))
}
