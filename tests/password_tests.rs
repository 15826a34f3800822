// tests/password_tests.rs
mod common;

use credential_guard::{CredError, PasswordCredentialService, PasswordHash, PasswordPolicy};

#[test]
fn test_hash_then_verify_succeeds() {
    common::setup();
    let service = common::fast_passwords();

    for password in ["a", "correct horse battery staple", "pässwörd ✓", " spaces "] {
        let hash = service.hash_password(password).unwrap();
        assert!(service.verify_password(password, &hash), "{password:?}");
    }
}

#[test]
fn test_wrong_password_fails() {
    let service = common::fast_passwords();
    let hash = service.hash_password("hunter2").unwrap();

    assert!(!service.verify_password("hunter3", &hash));
    assert!(!service.verify_password("Hunter2", &hash));
    assert!(!service.verify_password("hunter2 ", &hash));
    assert!(!service.verify_password("", &hash));
}

#[test]
fn test_same_password_gets_fresh_salt() {
    let service = common::fast_passwords();
    let first = service.hash_password("same").unwrap();
    let second = service.hash_password("same").unwrap();

    assert_ne!(first.encode(), second.encode());
    assert!(service.verify_password("same", &first));
    assert!(service.verify_password("same", &second));
}

#[test]
fn test_empty_password_is_invalid_argument() {
    let err = common::fast_passwords().hash_password("").unwrap_err();
    assert!(matches!(err, CredError::InvalidArgument(_)));
}

#[test]
fn test_encoded_roundtrip_through_storage() {
    let service = common::fast_passwords();
    let stored = service.hash_password("s3cret").unwrap().encode();

    assert!(service.verify_encoded("s3cret", &stored));
    assert!(!service.verify_encoded("nope", &stored));

    let parsed: PasswordHash = stored.parse().unwrap();
    assert_eq!(parsed.iterations(), 1_000);
    assert_eq!(parsed.salt_len(), 16);
}

#[test]
fn test_malformed_stored_value_is_false_not_error() {
    let service = common::fast_passwords();
    for stored in [
        "",
        "garbage",
        "pbkdf2-sha256$abc$xxx$yyy",
        "pbkdf2-sha256$1000$!!!$???",
        "md5$1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
    ] {
        assert!(!service.verify_encoded("anything", stored), "{stored:?}");
    }
}

#[test]
fn test_truncated_hash_rejected() {
    let service = common::fast_passwords();
    let mut stored = service.hash_password("pw").unwrap().encode();
    stored.truncate(stored.len() - 4);
    assert!(!service.verify_encoded("pw", &stored));
}

#[test]
fn test_verify_uses_stored_iterations() {
    let old = common::fast_passwords();
    let stored = old.hash_password("migrate-me").unwrap();

    let newer = PasswordCredentialService::new(2_000, 32).unwrap();
    assert!(newer.verify_password("migrate-me", &stored));
    assert!(newer.needs_rehash(&stored));

    let rehashed = newer.hash_password("migrate-me").unwrap();
    assert!(!newer.needs_rehash(&rehashed));
    assert_eq!(rehashed.iterations(), 2_000);
}

#[test]
fn test_default_service_uses_production_iterations() {
    let service = PasswordCredentialService::default();
    assert_eq!(
        service.iterations(),
        credential_guard::consts::DEFAULT_PASSWORD_ITERATIONS
    );
}

#[test]
fn test_hashing_does_not_enforce_strength() {
    let service = common::fast_passwords();
    let policy = PasswordPolicy::default();

    assert!(!policy.is_acceptable("123"));
    assert!(service.hash_password("123").is_ok());
}
