// src/lib.rs
//! credential-guard — password hashing, field encryption and session tokens
//!
//! Features:
//! - PBKDF2-HMAC-SHA256 password hashes with per-call random salt
//! - AES-256-GCM field encryption with per-call random nonce
//! - In-memory session tokens with expiry and constant-time validation
//! - Key material from config/env only, fails closed
//! - Full secure-gate integration for key bytes

pub mod aliases;
pub mod config;
pub mod consts;
pub mod core;
pub mod error;
pub mod services;
pub mod strength;
pub mod tokens;

// Re-export everything users need at the crate root
pub use aliases::KeyMaterial;
pub use config::{load as load_config, Config};
pub use crate::core::{
    EncryptedPayload, KeyMaterialProvider, PasswordCredentialService, PasswordHash,
    SymmetricCipherService,
};
pub use error::{CredError, Result};
pub use services::Services;
pub use strength::{PasswordPolicy, StrengthIssue};
pub use tokens::{Clock, ManualClock, SystemClock, TokenInfo, TokenLifecycleManager, TokenSweeper};
