//! Field encryption with AES-256-GCM, no I/O
//!
//! Every call draws a fresh 96-bit nonce and emits
//! `nonce || ciphertext || tag` as one opaque payload. All decryption
//! failures collapse into [`CredError::Decryption`] with no detail.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::warn;

use crate::aliases::KeyMaterial;
use crate::consts::{NONCE_LEN, TAG_LEN};
use crate::core::util::random_bytes;
use crate::error::{CredError, Result};

/// `nonce || ciphertext || tag`, consumed whole by decryption
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedPayload(Vec<u8>);

impl EncryptedPayload {
    /// Wrap bytes read back from storage. Validation happens on decrypt.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The IV prefix, if the payload is long enough to have one
    pub fn nonce(&self) -> Option<&[u8]> {
        self.0.get(..NONCE_LEN)
    }

    /// Standard base64 for string columns / transport
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    pub fn from_base64(text: &str) -> Result<Self> {
        STANDARD
            .decode(text.trim())
            .map(Self)
            .map_err(|_| CredError::Decryption)
    }
}

impl fmt::Debug for EncryptedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedPayload")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Stateless; share freely across threads
#[derive(Debug, Clone, Copy, Default)]
pub struct SymmetricCipherService;

impl SymmetricCipherService {
    pub fn new() -> Self {
        Self
    }

    pub fn encrypt(&self, plaintext: &[u8], key: &KeyMaterial) -> Result<EncryptedPayload> {
        if plaintext.is_empty() {
            return Err(CredError::InvalidArgument("plaintext must not be empty"));
        }

        let cipher =
            Aes256Gcm::new_from_slice(key.expose_secret()).map_err(|_| CredError::Encryption)?;
        let nonce_bytes: [u8; NONCE_LEN] = random_bytes();
        let sealed = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
            .map_err(|_| CredError::Encryption)?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&sealed);
        Ok(EncryptedPayload(out))
    }

    pub fn decrypt(&self, payload: &EncryptedPayload, key: &KeyMaterial) -> Result<Vec<u8>> {
        let bytes = payload.as_bytes();
        if bytes.len() < NONCE_LEN + TAG_LEN {
            warn!(op = "decrypt", "decryption failed");
            return Err(CredError::Decryption);
        }
        let (nonce, sealed) = bytes.split_at(NONCE_LEN);

        let cipher =
            Aes256Gcm::new_from_slice(key.expose_secret()).map_err(|_| CredError::Decryption)?;
        cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| {
                warn!(op = "decrypt", "decryption failed");
                CredError::Decryption
            })
    }

    /// Encrypt a UTF-8 field and return base64 text
    pub fn encrypt_str(&self, plaintext: &str, key: &KeyMaterial) -> Result<String> {
        self.encrypt(plaintext.as_bytes(), key)
            .map(|payload| payload.to_base64())
    }

    /// Inverse of [`SymmetricCipherService::encrypt_str`]
    pub fn decrypt_str(&self, encoded: &str, key: &KeyMaterial) -> Result<String> {
        let payload = EncryptedPayload::from_base64(encoded)?;
        let bytes = self.decrypt(&payload, key)?;
        String::from_utf8(bytes).map_err(|_| CredError::Decryption)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_layout() {
        let key = KeyMaterial::new([9u8; 32]);
        let payload = SymmetricCipherService::new().encrypt(b"abc", &key).unwrap();
        assert_eq!(payload.len(), NONCE_LEN + 3 + TAG_LEN);
        assert_eq!(payload.nonce().unwrap().len(), NONCE_LEN);
    }

    #[test]
    fn test_debug_shows_only_length() {
        let payload = EncryptedPayload::from_bytes(vec![0xde, 0xad]);
        assert_eq!(format!("{payload:?}"), "EncryptedPayload { len: 2 }");
    }

    #[test]
    fn test_bad_base64_is_decryption_error() {
        let err = EncryptedPayload::from_base64("%%%").unwrap_err();
        assert!(matches!(err, CredError::Decryption));
    }
}
