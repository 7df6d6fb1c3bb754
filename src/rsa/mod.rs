// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod blind;
pub mod coprime;
pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod keygen;
pub mod prime;

pub use blind::{blind, run_session, unblind, verify, BlindSigner, BlindingContext, SessionTranscript, Verification};
pub use coprime::{coprime_pair_from_mid, CoprimePair};
pub use error::{Result, RsaError};
pub use keygen::{generate_keypair, RsaKeyPair, RsaPrivateKey, RsaPublicKey};
pub use prime::{is_probable_prime, random_prime};
