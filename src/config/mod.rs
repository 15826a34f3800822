// src/config/mod.rs
//! Configuration system for credential-guard
//!
//! TOML file + environment overrides. Secret material has no built-in
//! default: if nothing is configured, key resolution fails closed.

pub use app::{Config, Keys, PasswordSettings, TokenSettings};
pub use defaults::{
    ENV_CONFIG, ENV_ENCRYPTION_KEY, ENV_KEY_KDF_ITERATIONS, ENV_KEY_PASSPHRASE, ENV_KEY_SALT,
    ENV_PASSWORD_ITERATIONS, ENV_TOKEN_TTL_SECS,
};

mod app;
mod defaults;

/// Load config from `CREDGUARD_CONFIG` (or the default path) plus process env
pub fn load() -> crate::error::Result<Config> {
    Config::load()
}
