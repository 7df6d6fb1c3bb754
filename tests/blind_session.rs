use blind_rsa::rsa::bigint::RsaBigInt;
use blind_rsa::rsa::{generate_keypair, run_session, RsaError, RsaKeyPair};
use blind_rsa::BlindRsaConfig;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn textbook_key_roundtrip() {
    let keypair = RsaKeyPair::from_primes(
        &RsaBigInt::from(61u8),
        &RsaBigInt::from(53u8),
        &RsaBigInt::from(17u8),
    )
    .unwrap();
    assert_eq!(keypair.public_key.n, RsaBigInt::from(3233u32));
    assert_eq!(keypair.private_key.d, RsaBigInt::from(2753u32));

    let m = RsaBigInt::from(65u8);
    let c = keypair.public_key.encrypt(&m).unwrap();
    assert_eq!(keypair.private_key.decrypt(&c).unwrap(), m);
}

#[test]
fn session_with_generated_key() {
    let mut rng = ChaCha8Rng::from_seed([11; 32]);
    let config = BlindRsaConfig::default()
        .with_prime_bits(256)
        .with_exponent_bits(128);
    let keypair = generate_keypair(&config, &mut rng).unwrap();

    for m in [0u64, 1, 1023, u64::MAX] {
        let m = RsaBigInt::from(m);
        let transcript = run_session(&keypair, &m).unwrap();
        assert!(transcript.verification.verified);
        assert_eq!(transcript.verification.extracted, m);
        assert_eq!(transcript.context.message_bits, m.bits());
    }

    let largest = &keypair.public_key.n - 1u8;
    assert!(run_session(&keypair, &largest).unwrap().verification.verified);

    assert!(matches!(
        run_session(&keypair, &keypair.public_key.n),
        Err(RsaError::InvalidInput(_))
    ));
}
