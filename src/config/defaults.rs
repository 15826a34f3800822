// src/config/defaults.rs
use crate::consts::{
    DEFAULT_CLEANUP_EVERY, DEFAULT_KEY_KDF_ITERATIONS, DEFAULT_PASSWORD_ITERATIONS,
    DEFAULT_SALT_LEN, DEFAULT_TOKEN_TTL_SECS,
};

pub const ENV_CONFIG: &str = "CREDGUARD_CONFIG";
pub const ENV_ENCRYPTION_KEY: &str = "CREDGUARD_ENCRYPTION_KEY";
pub const ENV_KEY_PASSPHRASE: &str = "CREDGUARD_KEY_PASSPHRASE";
pub const ENV_KEY_SALT: &str = "CREDGUARD_KEY_SALT";
pub const ENV_KEY_KDF_ITERATIONS: &str = "CREDGUARD_KEY_KDF_ITERATIONS";
pub const ENV_PASSWORD_ITERATIONS: &str = "CREDGUARD_PASSWORD_ITERATIONS";
pub const ENV_TOKEN_TTL_SECS: &str = "CREDGUARD_TOKEN_TTL_SECS";

pub fn default_key_kdf_iterations() -> u32 {
    DEFAULT_KEY_KDF_ITERATIONS
}

pub fn default_password_iterations() -> u32 {
    DEFAULT_PASSWORD_ITERATIONS
}

pub fn default_salt_len() -> usize {
    DEFAULT_SALT_LEN
}

pub fn default_token_ttl_secs() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

pub fn default_cleanup_every() -> u64 {
    DEFAULT_CLEANUP_EVERY
}
