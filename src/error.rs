// src/error.rs
//! Public error type for the entire crate
//!
//! No variant ever carries plaintext, key bytes, hashes or token values.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredError {
    /// Caller-supplied input was empty or malformed
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Missing or malformed secret material / settings, fatal at startup
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Generic on purpose: never says whether the nonce, key or tag was wrong
    #[error("decryption failed")]
    Decryption,

    #[error("encryption failed")]
    Encryption,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CredError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        CredError::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CredError>;
