// src/core/mod.rs
pub mod cipher;
pub mod compare;
pub mod keys;
pub mod password;
pub mod util;

pub use cipher::{EncryptedPayload, SymmetricCipherService};
pub use compare::{constant_time_digest_eq, constant_time_eq};
pub use keys::KeyMaterialProvider;
pub use password::{PasswordCredentialService, PasswordHash};
