// RSA Private-Key Operation
// Raw (unpadded) decryption and signing: x^d mod n

use super::bigint::{mod_pow, RsaBigInt};
use super::error::{Result, RsaError};
use super::keygen::RsaPrivateKey;

impl RsaPrivateKey {
    /// Raw private-key operation, rejecting inputs outside [0, n)
    pub fn apply(&self, x: &RsaBigInt) -> Result<RsaBigInt> {
        if x >= &self.n {
            return Err(RsaError::InvalidInput(format!(
                "value must be smaller than the {}-bit modulus",
                self.bit_length()
            )));
        }
        Ok(mod_pow(x, &self.d, &self.n))
    }

    /// Decrypt an integer ciphertext: m = c^d mod n
    pub fn decrypt(&self, ciphertext: &RsaBigInt) -> Result<RsaBigInt> {
        self.apply(ciphertext)
    }

    /// Sign an integer message directly: s = m^d mod n
    pub fn sign(&self, message: &RsaBigInt) -> Result<RsaBigInt> {
        self.apply(message)
    }
}
