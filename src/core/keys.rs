//! Encryption key resolution
//!
//! Key material comes from configuration only (file or `CREDGUARD_*` env).
//! Either a raw 32-byte key (hex or base64) or a passphrase + salt pair that
//! is stretched with PBKDF2-HMAC-SHA256. Nothing is hardcoded; a missing or
//! malformed secret fails closed with [`CredError::Configuration`].

use std::fmt;

use once_cell::sync::OnceCell;
use sha2::Sha256;
use tracing::debug;

use crate::aliases::{KeyMaterial, KeySalt, Passphrase, RawKey};
use crate::config::{Config, Keys};
use crate::consts::KEY_LEN;
use crate::core::util::decode_key_text;
use crate::error::{CredError, Result};

enum KeySource {
    Raw(RawKey),
    Derived {
        passphrase: Passphrase,
        salt: KeySalt,
        iterations: u32,
    },
    Missing,
}

/// Resolves the field encryption key once and memoizes it for the process
pub struct KeyMaterialProvider {
    source: KeySource,
    resolved: OnceCell<KeyMaterial>,
}

impl KeyMaterialProvider {
    /// Build from the `[keys]` section. A raw key wins over a passphrase.
    pub fn from_keys(keys: &Keys) -> Self {
        let source = match (&keys.encryption_key, &keys.key_passphrase) {
            (Some(raw), _) => KeySource::Raw(RawKey::new(raw.clone())),
            (None, Some(passphrase)) => KeySource::Derived {
                passphrase: Passphrase::new(passphrase.clone()),
                salt: KeySalt::new(keys.key_salt.clone().unwrap_or_default()),
                iterations: keys.kdf_iterations,
            },
            (None, None) => KeySource::Missing,
        };
        Self {
            source,
            resolved: OnceCell::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::from_keys(&config.keys)
    }

    /// Return the 256-bit key, resolving it on first use
    pub fn get_encryption_key(&self) -> Result<&KeyMaterial> {
        self.resolved.get_or_try_init(|| {
            let key = self.resolve()?;
            debug!(source = self.source_name(), "encryption key resolved");
            Ok(key)
        })
    }

    fn resolve(&self) -> Result<KeyMaterial> {
        match &self.source {
            KeySource::Missing => Err(CredError::config(
                "no encryption key configured (set keys.encryption_key or keys.key_passphrase)",
            )),
            KeySource::Raw(raw) => {
                let text = raw.expose_secret();
                if text.trim().is_empty() {
                    return Err(CredError::config("keys.encryption_key is empty"));
                }
                let bytes = decode_key_text(text).ok_or_else(|| {
                    CredError::config("keys.encryption_key is not valid hex or base64")
                })?;
                let arr: [u8; KEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
                    CredError::config(format!(
                        "keys.encryption_key must decode to exactly {KEY_LEN} bytes"
                    ))
                })?;
                Ok(KeyMaterial::new(arr))
            }
            KeySource::Derived {
                passphrase,
                salt,
                iterations,
            } => {
                if passphrase.expose_secret().is_empty() {
                    return Err(CredError::config("keys.key_passphrase is empty"));
                }
                if salt.expose_secret().is_empty() {
                    return Err(CredError::config(
                        "keys.key_salt is required with keys.key_passphrase",
                    ));
                }
                if *iterations == 0 {
                    return Err(CredError::config("keys.kdf_iterations must be non-zero"));
                }
                Ok(derive_key(
                    passphrase.expose_secret().as_bytes(),
                    salt.expose_secret().as_bytes(),
                    *iterations,
                ))
            }
        }
    }

    fn source_name(&self) -> &'static str {
        match self.source {
            KeySource::Raw(_) => "raw",
            KeySource::Derived { .. } => "passphrase",
            KeySource::Missing => "missing",
        }
    }
}

impl fmt::Debug for KeyMaterialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterialProvider")
            .field("source", &self.source_name())
            .field("resolved", &self.resolved.get().is_some())
            .finish()
    }
}

/// PBKDF2-HMAC-SHA256 stretch of a passphrase into a 256-bit key
pub fn derive_key(passphrase: &[u8], salt: &[u8], iterations: u32) -> KeyMaterial {
    let mut out = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(passphrase, salt, iterations, &mut out);
    KeyMaterial::new(out)
}
