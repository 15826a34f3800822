//! Password hashing and verification
//!
//! PBKDF2-HMAC-SHA256 with a fresh random salt per hash. The stored form is
//! a single string:
//!
//! ```text
//! pbkdf2-sha256$<iterations>$<salt b64>$<hash b64>
//! ```
//!
//! (standard base64 alphabet, no padding). Verification re-derives with the
//! stored salt and iteration count and compares in constant time.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use sha2::Sha256;
use tracing::warn;

use crate::config::PasswordSettings;
use crate::consts::{
    DEFAULT_PASSWORD_ITERATIONS, DEFAULT_SALT_LEN, MAX_PASSWORD_ITERATIONS, MAX_SALT_LEN,
    MIN_SALT_LEN, PASSWORD_HASH_LEN, PASSWORD_SCHEME,
};
use crate::core::compare::constant_time_eq;
use crate::core::util::random_vec;
use crate::error::{CredError, Result};

/// Salt, derived hash and iteration count of one stored password
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    iterations: u32,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl PasswordHash {
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn salt_len(&self) -> usize {
        self.salt.len()
    }

    /// Storage encoding; parse back with [`PasswordHash::parse`]
    pub fn encode(&self) -> String {
        format!(
            "{PASSWORD_SCHEME}${}${}${}",
            self.iterations,
            STANDARD_NO_PAD.encode(&self.salt),
            STANDARD_NO_PAD.encode(&self.hash)
        )
    }

    /// Parse a stored value, rejecting anything implausible
    pub fn parse(encoded: &str) -> Result<Self> {
        let malformed = || CredError::InvalidArgument("malformed password hash");

        let mut parts = encoded.trim().split('$');
        let (Some(scheme), Some(iterations), Some(salt), Some(hash), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(malformed());
        };

        if scheme != PASSWORD_SCHEME {
            return Err(malformed());
        }
        let iterations: u32 = iterations.parse().map_err(|_| malformed())?;
        if iterations == 0 || iterations > MAX_PASSWORD_ITERATIONS {
            return Err(malformed());
        }
        let salt = STANDARD_NO_PAD.decode(salt).map_err(|_| malformed())?;
        if !(MIN_SALT_LEN..=MAX_SALT_LEN).contains(&salt.len()) {
            return Err(malformed());
        }
        let hash = STANDARD_NO_PAD.decode(hash).map_err(|_| malformed())?;
        if hash.len() != PASSWORD_HASH_LEN {
            return Err(malformed());
        }

        Ok(Self {
            iterations,
            salt,
            hash,
        })
    }
}

impl FromStr for PasswordHash {
    type Err = CredError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Never print salt or hash bytes
impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash")
            .field("iterations", &self.iterations)
            .field("salt_len", &self.salt.len())
            .finish_non_exhaustive()
    }
}

/// Hashes new passwords and checks candidates against stored hashes
#[derive(Debug, Clone)]
pub struct PasswordCredentialService {
    iterations: u32,
    salt_len: usize,
}

impl Default for PasswordCredentialService {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_PASSWORD_ITERATIONS,
            salt_len: DEFAULT_SALT_LEN,
        }
    }
}

impl PasswordCredentialService {
    pub fn new(iterations: u32, salt_len: usize) -> Result<Self> {
        if iterations == 0 || iterations > MAX_PASSWORD_ITERATIONS {
            return Err(CredError::InvalidArgument("iteration count out of range"));
        }
        if !(MIN_SALT_LEN..=MAX_SALT_LEN).contains(&salt_len) {
            return Err(CredError::InvalidArgument("salt length out of range"));
        }
        Ok(Self {
            iterations,
            salt_len,
        })
    }

    pub fn from_settings(settings: &PasswordSettings) -> Result<Self> {
        Self::new(settings.iterations, settings.salt_len)
            .map_err(|e| CredError::config(format!("password settings: {e}")))
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Derive a salted hash. Two calls on the same input never match.
    pub fn hash_password(&self, plaintext: &str) -> Result<PasswordHash> {
        if plaintext.is_empty() {
            return Err(CredError::InvalidArgument("password must not be empty"));
        }
        let salt = random_vec(self.salt_len);
        let hash = derive(plaintext.as_bytes(), &salt, self.iterations);
        Ok(PasswordHash {
            iterations: self.iterations,
            salt,
            hash,
        })
    }

    /// Constant-time check of `plaintext` against `stored`. Never errors.
    pub fn verify_password(&self, plaintext: &str, stored: &PasswordHash) -> bool {
        if plaintext.is_empty() {
            return false;
        }
        let candidate = derive(plaintext.as_bytes(), &stored.salt, stored.iterations);
        constant_time_eq(&candidate, &stored.hash)
    }

    /// Verify against the storage encoding; a corrupt value yields `false`
    pub fn verify_encoded(&self, plaintext: &str, stored: &str) -> bool {
        match PasswordHash::parse(stored) {
            Ok(hash) => self.verify_password(plaintext, &hash),
            Err(_) => {
                warn!("password verification failed");
                false
            }
        }
    }

    /// True when `stored` has fewer iterations or a different salt length than ours
    pub fn needs_rehash(&self, stored: &PasswordHash) -> bool {
        stored.iterations < self.iterations || stored.salt.len() != self.salt_len
    }
}

fn derive(password: &[u8], salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut out = vec![0u8; PASSWORD_HASH_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out);
    out
}
