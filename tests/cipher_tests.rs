// tests/cipher_tests.rs
mod common;

use credential_guard::consts::{NONCE_LEN, TAG_LEN};
use credential_guard::{CredError, EncryptedPayload, SymmetricCipherService};

#[test]
fn test_encrypt_decrypt_roundtrip_in_memory() {
    common::setup();
    let cipher = SymmetricCipherService::new();
    let key = common::key(0x42);

    for plaintext in [
        b"x".to_vec(),
        b"Attack at dawn!".to_vec(),
        vec![0u8; 4096],
        (0..=255u8).collect::<Vec<_>>(),
    ] {
        let payload = cipher.encrypt(&plaintext, &key).unwrap();
        assert_eq!(cipher.decrypt(&payload, &key).unwrap(), plaintext);
    }
}

#[test]
fn test_fresh_nonce_every_call() {
    let cipher = SymmetricCipherService::new();
    let key = common::key(1);

    let a = cipher.encrypt(b"same message", &key).unwrap();
    let b = cipher.encrypt(b"same message", &key).unwrap();

    assert_ne!(a, b);
    assert_ne!(a.nonce(), b.nonce());
}

#[test]
fn test_empty_plaintext_is_invalid_argument() {
    let err = SymmetricCipherService::new()
        .encrypt(b"", &common::key(1))
        .unwrap_err();
    assert!(matches!(err, CredError::InvalidArgument(_)));
}

#[test]
fn test_decrypt_fails_with_wrong_key() {
    let cipher = SymmetricCipherService::new();
    let payload = cipher.encrypt(b"secret", &common::key(1)).unwrap();

    let wrong = cipher.decrypt(&payload, &common::key(2));
    assert!(matches!(wrong, Err(CredError::Decryption)));
}

#[test]
fn test_short_payload_fails() {
    let cipher = SymmetricCipherService::new();
    let key = common::key(1);

    for len in [0, 1, NONCE_LEN - 1, NONCE_LEN, NONCE_LEN + TAG_LEN - 1] {
        let payload = EncryptedPayload::from_bytes(vec![0u8; len]);
        assert!(
            matches!(cipher.decrypt(&payload, &key), Err(CredError::Decryption)),
            "len {len}"
        );
    }
}

#[test]
fn test_tampered_payload_fails() {
    let cipher = SymmetricCipherService::new();
    let key = common::key(7);
    let payload = cipher.encrypt(b"do not touch", &key).unwrap();

    // flip one bit in nonce, body and tag in turn
    for idx in [0, NONCE_LEN + 1, payload.len() - 1] {
        let mut bytes = payload.as_bytes().to_vec();
        bytes[idx] ^= 0x01;
        let tampered = EncryptedPayload::from_bytes(bytes);
        assert!(matches!(
            cipher.decrypt(&tampered, &key),
            Err(CredError::Decryption)
        ));
    }
}

#[test]
fn test_error_text_reveals_nothing() {
    let cipher = SymmetricCipherService::new();
    let payload = cipher.encrypt(b"top secret", &common::key(1)).unwrap();
    let err = cipher.decrypt(&payload, &common::key(2)).unwrap_err();
    assert_eq!(err.to_string(), "decryption failed");
}

#[test]
fn test_string_helpers_use_base64() {
    let cipher = SymmetricCipherService::new();
    let key = common::key(3);

    let encoded = cipher.encrypt_str("4111-1111-1111-1111", &key).unwrap();
    assert!(!encoded.contains("4111"));
    assert_eq!(cipher.decrypt_str(&encoded, &key).unwrap(), "4111-1111-1111-1111");

    let payload = EncryptedPayload::from_base64(&encoded).unwrap();
    assert_eq!(payload.to_base64(), encoded);
    assert!(matches!(
        cipher.decrypt_str("not base64 at all!", &key),
        Err(CredError::Decryption)
    ));
}
