// Blind RSA library
// Key generation, blinding, signing, unblinding and verification

pub mod cli;
pub mod config;
pub mod rsa;

pub use config::BlindRsaConfig;
pub use rsa::{RsaError, Result};
