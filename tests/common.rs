// tests/common.rs
//! Shared test utilities — logging setup and fast fixtures
#![allow(dead_code)]

use credential_guard::{KeyMaterial, PasswordCredentialService};

#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize test-friendly logging
/// Call once at the start of any test that needs logs
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer()) // works in `cargo test`
        .with(EnvFilter::from_default_env()) // respects RUST_LOG=
        .try_init()
        .ok(); // idempotent, safe to call multiple times

    #[cfg(not(feature = "logging"))]
    { /* no-op */ }
}

/// Low iteration count keeps the suite quick; production defaults are untouched
pub fn fast_passwords() -> PasswordCredentialService {
    PasswordCredentialService::new(1_000, 16).expect("valid test parameters")
}

pub fn key(byte: u8) -> KeyMaterial {
    KeyMaterial::new([byte; 32])
}

/// Environment lookup backed by a fixed list, so tests never touch the real env
pub fn env_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |name| {
        vars.iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.to_string())
    }
}
