// Command-line front end
// Prompts for a message, runs one blind signing session and prints the transcript

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use num_bigint::{BigInt, Sign};
use rand::rngs::OsRng;

use crate::config::BlindRsaConfig;
use crate::rsa::bigint::RsaBigInt;
use crate::rsa::{generate_keypair, run_session, RsaError, RsaKeyPair, SessionTranscript};

/// Parse a decimal message, rejecting negatives and garbage
pub fn parse_message(input: &str) -> Result<RsaBigInt, RsaError> {
    let value: BigInt = input
        .trim()
        .parse()
        .map_err(|e| RsaError::InvalidInput(format!("{:?} is not an integer: {}", input.trim(), e)))?;

    if value.sign() == Sign::Minus {
        return Err(RsaError::InvalidInput("the message must not be negative".into()));
    }
    Ok(value.magnitude().clone())
}

/// Print the key pair
pub fn write_keys<W: Write>(out: &mut W, keypair: &RsaKeyPair) -> io::Result<()> {
    writeln!(
        out,
        "Public key pair (e, N): ({}, {})",
        keypair.public_key.e, keypair.public_key.n
    )?;
    writeln!(
        out,
        "Private key pair (d, N): ({}, {})",
        keypair.private_key.d, keypair.private_key.n
    )
}

/// Print the outcome of a session
pub fn write_transcript<W: Write>(out: &mut W, transcript: &SessionTranscript) -> io::Result<()> {
    let context = &transcript.context;
    let verification = &transcript.verification;

    writeln!(out, "Message Bits: {}", context.message_bits)?;
    writeln!(
        out,
        "Blind message: {} (0x{})",
        context.blind_message,
        hex::encode(context.blind_message.to_bytes_be())
    )?;

    if verification.verified {
        writeln!(
            out,
            "The Signer is Authenticated. Decrypted Message: {}",
            verification.decrypted
        )?;
    } else {
        writeln!(out, "The Signer is not Authenticated.")?;
    }
    writeln!(
        out,
        "Truncated Decrypted Message ({}-bit): {}",
        context.message_bits,
        verification.extracted
    )
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> io::Result<String> {
    write!(out, "{}", text)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Run one session against the given streams
pub fn run_with<R: BufRead, W: Write>(
    config: &BlindRsaConfig,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    let keypair = generate_keypair(config, &mut OsRng).context("key generation failed")?;
    write_keys(out, &keypair)?;

    let line = prompt(input, out, "Enter the message: ")?;
    let message = parse_message(&line)?;

    let transcript = run_session(&keypair, &message).context("blind signing failed")?;
    write_transcript(out, &transcript)?;

    if !transcript.verification.verified {
        bail!("signature verification failed");
    }
    Ok(())
}

/// Entry point used by the binary
pub fn run() -> anyhow::Result<()> {
    let config = BlindRsaConfig::from_env().context("invalid configuration")?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(&config, &mut stdin.lock(), &mut stdout.lock())
}
