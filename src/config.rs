// Key Generation Configuration
// Bit sizes, Miller-Rabin confidence and retry bounds

use std::env;

use crate::rsa::prime::DEFAULT_ROUNDS;
use crate::rsa::{Result, RsaError};

pub const PRIME_BITS_VAR: &str = "BLIND_RSA_PRIME_BITS";
pub const EXPONENT_BITS_VAR: &str = "BLIND_RSA_EXPONENT_BITS";
pub const ROUNDS_VAR: &str = "BLIND_RSA_MR_ROUNDS";

pub const MIN_PRIME_BITS: u32 = 8;
pub const MAX_PRIME_BITS: u32 = 16_384;

/// Configuration for key generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlindRsaConfig {
    /// Bit length of each of the two primes
    pub prime_bits: u32,
    /// Bit length of the random public exponent
    pub exponent_bits: u32,
    /// Miller-Rabin rounds per candidate
    pub miller_rabin_rounds: u32,
    /// Candidates tried per prime before giving up
    pub max_prime_attempts: u32,
    /// Public exponents tried before giving up
    pub max_exponent_attempts: u32,
}

impl Default for BlindRsaConfig {
    fn default() -> Self {
        Self {
            prime_bits: 1000,
            exponent_bits: 512,
            miller_rabin_rounds: DEFAULT_ROUNDS,
            max_prime_attempts: 100_000,
            max_exponent_attempts: 10_000,
        }
    }
}

impl BlindRsaConfig {
    pub fn with_prime_bits(mut self, bits: u32) -> Self {
        self.prime_bits = bits;
        self
    }

    pub fn with_exponent_bits(mut self, bits: u32) -> Self {
        self.exponent_bits = bits;
        self
    }

    pub fn with_miller_rabin_rounds(mut self, rounds: u32) -> Self {
        self.miller_rabin_rounds = rounds;
        self
    }

    pub fn with_max_prime_attempts(mut self, attempts: u32) -> Self {
        self.max_prime_attempts = attempts;
        self
    }

    pub fn with_max_exponent_attempts(mut self, attempts: u32) -> Self {
        self.max_exponent_attempts = attempts;
        self
    }

    /// Defaults overridden by `BLIND_RSA_PRIME_BITS`, `BLIND_RSA_EXPONENT_BITS`
    /// and `BLIND_RSA_MR_ROUNDS` when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(bits) = read_var(PRIME_BITS_VAR)? {
            config.prime_bits = bits;
        }
        if let Some(bits) = read_var(EXPONENT_BITS_VAR)? {
            config.exponent_bits = bits;
        }
        if let Some(rounds) = read_var(ROUNDS_VAR)? {
            config.miller_rabin_rounds = rounds;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings can produce a keypair.
    ///
    /// The exponent range must sit below phi, which has at least
    /// 2 * prime_bits - 2 bits.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PRIME_BITS..=MAX_PRIME_BITS).contains(&self.prime_bits) {
            return Err(RsaError::InvalidConfig(format!(
                "prime_bits must be in [{}, {}], got {}",
                MIN_PRIME_BITS, MAX_PRIME_BITS, self.prime_bits
            )));
        }
        let max_exponent_bits = 2 * u64::from(self.prime_bits) - 3;
        if self.exponent_bits < 2 || u64::from(self.exponent_bits) > max_exponent_bits {
            return Err(RsaError::InvalidConfig(format!(
                "exponent_bits must be in [2, {}], got {}",
                max_exponent_bits, self.exponent_bits
            )));
        }
        if self.miller_rabin_rounds == 0 {
            return Err(RsaError::InvalidConfig("miller_rabin_rounds must be positive".into()));
        }
        if self.max_prime_attempts == 0 || self.max_exponent_attempts == 0 {
            return Err(RsaError::InvalidConfig("retry bounds must be positive".into()));
        }
        Ok(())
    }
}

fn read_var(name: &str) -> Result<Option<u32>> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|e| RsaError::InvalidConfig(format!("{}={:?}: {}", name, value, e))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = BlindRsaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.prime_bits, 1000);
        assert_eq!(config.exponent_bits, 512);
        assert_eq!(config.miller_rabin_rounds, 5);
    }

    #[test]
    fn test_builders() {
        let config = BlindRsaConfig::default()
            .with_prime_bits(64)
            .with_exponent_bits(32)
            .with_miller_rabin_rounds(10)
            .with_max_prime_attempts(5)
            .with_max_exponent_attempts(6);
        assert_eq!(config.prime_bits, 64);
        assert_eq!(config.exponent_bits, 32);
        assert_eq!(config.miller_rabin_rounds, 10);
        assert_eq!(config.max_prime_attempts, 5);
        assert_eq!(config.max_exponent_attempts, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_settings() {
        let base = BlindRsaConfig::default().with_prime_bits(64).with_exponent_bits(32);
        assert!(base.clone().with_prime_bits(4).validate().is_err());
        assert!(base.clone().with_exponent_bits(1).validate().is_err());
        assert!(base.clone().with_exponent_bits(126).validate().is_err());
        assert!(base.clone().with_exponent_bits(125).validate().is_ok());
        assert!(base.clone().with_miller_rabin_rounds(0).validate().is_err());
        assert!(base.clone().with_max_prime_attempts(0).validate().is_err());
        assert!(base.with_max_exponent_attempts(0).validate().is_err());
    }

    #[test]
    fn test_huge_prime_bits_rejected() {
        for bits in [MAX_PRIME_BITS + 1, u32::MAX / 2 + 2, 3_000_000_000, u32::MAX] {
            let config = BlindRsaConfig::default().with_prime_bits(bits);
            assert!(matches!(config.validate(), Err(RsaError::InvalidConfig(_))));
        }
        let config = BlindRsaConfig::default()
            .with_prime_bits(MAX_PRIME_BITS)
            .with_exponent_bits(u32::MAX);
        assert!(matches!(config.validate(), Err(RsaError::InvalidConfig(_))));
        assert!(BlindRsaConfig::default().with_prime_bits(MAX_PRIME_BITS).validate().is_ok());
    }
}
