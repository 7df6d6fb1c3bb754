// RSA Public-Key Operation
// Raw (unpadded) encryption and signature recovery: x^e mod n

use super::bigint::{mod_pow, RsaBigInt};
use super::error::{Result, RsaError};
use super::keygen::RsaPublicKey;

impl RsaPublicKey {
    /// Raw public-key operation, rejecting inputs outside [0, n)
    pub fn apply(&self, x: &RsaBigInt) -> Result<RsaBigInt> {
        if x >= &self.n {
            return Err(RsaError::InvalidInput(format!(
                "value must be smaller than the {}-bit modulus",
                self.bit_length()
            )));
        }
        Ok(mod_pow(x, &self.e, &self.n))
    }

    /// Encrypt an integer message: c = m^e mod n
    pub fn encrypt(&self, message: &RsaBigInt) -> Result<RsaBigInt> {
        self.apply(message)
    }

    /// Recover the message a signature was made over: m = s^e mod n
    pub fn recover(&self, signature: &RsaBigInt) -> Result<RsaBigInt> {
        self.apply(signature)
    }
}
