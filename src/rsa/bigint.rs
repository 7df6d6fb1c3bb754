// RSA Big Integer Operations
// Wrapper around num-bigint for modular arithmetic

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm
///
/// `modulus` must be non-zero.
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    debug_assert!(!modulus.is_zero(), "modulus must be positive");
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd = gcd(a, b)
pub fn extended_gcd(a: &RsaBigInt, b: &RsaBigInt) -> (RsaBigInt, BigInt, BigInt) {
    let mut old_r = BigInt::from(a.clone());
    let mut r = BigInt::from(b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &q * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &q * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    (old_r.magnitude().clone(), old_x, old_y)
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if inverse doesn't exist or m <= 1
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Option<RsaBigInt> {
    if m <= &RsaBigInt::one() {
        return None;
    }

    let (g, x, _) = extended_gcd(&(a % m), m);
    if !g.is_one() {
        return None;
    }

    x.mod_floor(&BigInt::from(m.clone())).to_biguint()
}

/// Number of bits needed to represent `n`, i.e. ceil(log2(n + 1)).
/// Zero needs zero bits.
pub fn bit_length(n: &RsaBigInt) -> u64 {
    n.bits()
}

/// Keep only the lowest `bits` bits of `n`
pub fn low_bits(n: &RsaBigInt, bits: u64) -> RsaBigInt {
    let mask = (RsaBigInt::one() << bits) - 1u8;
    n & &mask
}
