// RSA Blind Signatures
// Blind -> sign -> unblind -> verify, each step taking its inputs explicitly

use log::{debug, info};

use super::bigint::{bit_length, low_bits, mod_inverse, mod_pow, RsaBigInt};
use super::coprime::{coprime_pair_from_mid, CoprimePair};
use super::error::{Result, RsaError};
use super::keygen::{RsaKeyPair, RsaPrivateKey, RsaPublicKey};

/// State kept by the requester between blinding and unblinding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlindingContext {
    /// Coprime pair of the modulus the factor was derived from
    pub pair: CoprimePair,
    /// num1^(-1) mod n
    pub blind_factor: RsaBigInt,
    /// What the signer sees: m * blind_factor^e mod n
    pub blind_message: RsaBigInt,
    /// ceil(log2(m + 1)); display only
    pub message_bits: u64,
}

/// Result of checking an unblinded signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub verified: bool,
    /// signature^e mod n
    pub decrypted: RsaBigInt,
    /// `decrypted` truncated to the message's bit length
    pub extracted: RsaBigInt,
}

/// Holder of the private key. Only ever sees blinded messages.
#[derive(Debug, Clone)]
pub struct BlindSigner {
    private_key: RsaPrivateKey,
}

impl BlindSigner {
    pub fn new(private_key: RsaPrivateKey) -> Self {
        Self { private_key }
    }

    /// signer_raw = blind_message^d mod n
    pub fn sign_blinded(&self, blind_message: &RsaBigInt) -> Result<RsaBigInt> {
        let signed = self.private_key.sign(blind_message)?;
        debug!("signed blinded message");
        Ok(signed)
    }
}

/// Blind `message` for the holder of `public_key`'s private half.
///
/// Rejects messages outside [0, n).
pub fn blind(public_key: &RsaPublicKey, message: &RsaBigInt) -> Result<BlindingContext> {
    let n = &public_key.n;
    if message >= n {
        return Err(RsaError::InvalidInput(format!(
            "message must be smaller than the {}-bit modulus",
            public_key.bit_length()
        )));
    }

    let pair = coprime_pair_from_mid(n)?;
    let blind_factor = mod_inverse(&pair.num1, n).ok_or(RsaError::NoInverseExists)?;
    let blind_message = (message * mod_pow(&blind_factor, &public_key.e, n)) % n;
    let message_bits = bit_length(message);

    info!("blinded {}-bit message", message_bits);
    Ok(BlindingContext {
        pair,
        blind_factor,
        blind_message,
        message_bits,
    })
}

/// Strip the blinding factor from the signer's output:
/// signature = signer_raw * blind_factor^(-1) mod n
pub fn unblind(
    public_key: &RsaPublicKey,
    context: &BlindingContext,
    signer_raw: &RsaBigInt,
) -> Result<RsaBigInt> {
    let n = &public_key.n;
    if signer_raw >= n {
        return Err(RsaError::InvalidInput("signer output exceeds the modulus".into()));
    }

    let unblinder = mod_inverse(&context.blind_factor, n).ok_or(RsaError::NoInverseExists)?;
    Ok((signer_raw * unblinder) % n)
}

/// Check `signature` against `message` with the public exponent.
pub fn verify(
    public_key: &RsaPublicKey,
    message: &RsaBigInt,
    signature: &RsaBigInt,
    message_bits: u64,
) -> Result<Verification> {
    let decrypted = public_key.recover(signature)?;
    let extracted = low_bits(&decrypted, message_bits);
    let verified = &decrypted == message;

    info!("signature verification: {}", if verified { "ok" } else { "failed" });
    Ok(Verification {
        verified,
        decrypted,
        extracted,
    })
}

/// Everything produced by one blind signing exchange
#[derive(Debug, Clone)]
pub struct SessionTranscript {
    pub context: BlindingContext,
    pub signer_raw: RsaBigInt,
    pub signature: RsaBigInt,
    pub verification: Verification,
}

/// Run blind, sign, unblind and verify for `message` under `keypair`.
pub fn run_session(keypair: &RsaKeyPair, message: &RsaBigInt) -> Result<SessionTranscript> {
    let public_key = &keypair.public_key;
    let signer = BlindSigner::new(keypair.private_key.clone());

    let context = blind(public_key, message)?;
    let signer_raw = signer.sign_blinded(&context.blind_message)?;
    let signature = unblind(public_key, &context, &signer_raw)?;
    let verification = verify(public_key, message, &signature, context.message_bits)?;

    Ok(SessionTranscript {
        context,
        signer_raw,
        signature,
        verification,
    })
}
