//! Token issuance, validation and eviction

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::store::{ShardedStore, TokenRecord};
use crate::config::TokenSettings;
use crate::consts::{
    DEFAULT_CLEANUP_EVERY, DEFAULT_TOKEN_TTL_SECS, TOKEN_BYTES, TOKEN_STORE_SHARDS,
};
use crate::core::compare::constant_time_digest_eq;
use crate::core::util::{random_bytes, sha256};
use crate::error::{CredError, Result};

/// Public metadata of a live token. Never includes the token itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub principal_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Owns the in-memory token store. Construct one and share it via `Arc`.
pub struct TokenLifecycleManager {
    store: ShardedStore,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
    cleanup_every: u64,
    issued: AtomicU64,
}

impl Default for TokenLifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenLifecycleManager {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: ShardedStore::new(TOKEN_STORE_SHARDS),
            clock,
            default_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            cleanup_every: DEFAULT_CLEANUP_EVERY,
            issued: AtomicU64::new(0),
        }
    }

    pub fn from_settings(settings: &TokenSettings, clock: Arc<dyn Clock>) -> Result<Self> {
        if settings.ttl_secs == 0 {
            return Err(CredError::config("tokens.ttl_secs must be greater than zero"));
        }
        Ok(Self::with_clock(clock)
            .with_default_ttl(settings.ttl())
            .with_cleanup_every(settings.cleanup_every))
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Run an incidental cleanup pass every `n` issues (minimum 1)
    pub fn with_cleanup_every(mut self, n: u64) -> Self {
        self.cleanup_every = n.max(1);
        self
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Mint a token for `principal_id`, replacing any live one
    pub fn issue_token(&self, principal_id: &str, ttl: Duration) -> Result<String> {
        if principal_id.is_empty() {
            return Err(CredError::InvalidArgument("principal id must not be empty"));
        }
        if ttl.is_zero() {
            return Err(CredError::InvalidArgument("ttl must be greater than zero"));
        }
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|_| CredError::InvalidArgument("ttl out of range"))?;
        let issued_at = self.clock.now();
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(CredError::InvalidArgument("ttl out of range"))?;

        let raw: [u8; TOKEN_BYTES] = random_bytes();
        let token = URL_SAFE_NO_PAD.encode(raw);
        let record = TokenRecord {
            digest: sha256(token.as_bytes()),
            issued_at,
            expires_at,
        };

        let replaced = self.store.insert(principal_id, record).is_some();
        debug!(principal = principal_id, replaced, %expires_at, "token issued");

        let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        if n % self.cleanup_every == 0 {
            self.cleanup_expired();
        }

        Ok(token)
    }

    /// Issue with the configured default TTL
    pub fn issue_default(&self, principal_id: &str) -> Result<String> {
        self.issue_token(principal_id, self.default_ttl)
    }

    /// `true` only for the principal's current, unexpired token. Never errors.
    ///
    /// The candidate is hashed first so the comparison always runs over two
    /// 32-byte digests, whatever the candidate's length.
    pub fn validate_token(&self, principal_id: &str, candidate: &str) -> bool {
        if principal_id.is_empty() || candidate.is_empty() {
            return false;
        }
        let candidate_digest = sha256(candidate.as_bytes());
        let now = self.clock.now();

        self.store.with_entry(principal_id, |entries| {
            let Some(record) = entries.get(principal_id) else {
                return false;
            };
            if record.is_expired(now) {
                entries.remove(principal_id);
                debug!(principal = principal_id, "expired token evicted on validate");
                return false;
            }
            constant_time_digest_eq(&record.digest, &candidate_digest)
        })
    }

    /// Idempotent; no error if nothing was issued
    pub fn revoke_token(&self, principal_id: &str) {
        if self.store.remove(principal_id).is_some() {
            debug!(principal = principal_id, "token revoked");
        }
    }

    /// Evict every expired entry, returning how many went
    pub fn cleanup_expired(&self) -> usize {
        let evicted = self.store.evict_expired(self.clock.now());
        if evicted > 0 {
            debug!(evicted, "expired tokens cleaned up");
        }
        evicted
    }

    /// Metadata of the principal's live token, if any
    pub fn lookup(&self, principal_id: &str) -> Option<TokenInfo> {
        let now = self.clock.now();
        self.store
            .get(principal_id)
            .filter(|record| !record.is_expired(now))
            .map(|record| TokenInfo {
                principal_id: principal_id.to_string(),
                issued_at: record.issued_at,
                expires_at: record.expires_at,
            })
    }

    /// Stored entries, including expired ones not yet cleaned up
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
