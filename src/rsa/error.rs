// RSA Error Types

use thiserror::Error;

/// Result type for RSA operations
pub type Result<T, E = RsaError> = std::result::Result<T, E>;

/// Errors raised by key generation and the blind signature protocol.
/// Every variant aborts the current operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RsaError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no modular inverse exists")]
    NoInverseExists,

    #[error("no coprime pair found for modulus {0}")]
    NoCoprimePairFound(String),

    #[error("no valid public exponent found after {0} attempts")]
    KeyGenerationExhausted(u32),

    #[error("no probable prime of {bits} bits found after {attempts} attempts")]
    PrimeGenerationExhausted { bits: u32, attempts: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
