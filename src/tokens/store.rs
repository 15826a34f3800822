//! Sharded principal → token map
//!
//! Each shard has its own lock so operations on principals that hash to
//! different shards never contend.

use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::BuildHasher;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// Stored state of a live token. Only the SHA-256 of the token is kept.
#[derive(Clone)]
pub(crate) struct TokenRecord {
    pub digest: [u8; 32],
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

pub(crate) struct ShardedStore {
    shards: Box<[Mutex<HashMap<String, TokenRecord>>]>,
    hasher: RandomState,
}

impl ShardedStore {
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| Mutex::new(HashMap::new()))
            .collect();
        Self {
            shards,
            hasher: RandomState::new(),
        }
    }

    fn shard(&self, principal_id: &str) -> &Mutex<HashMap<String, TokenRecord>> {
        let idx = self.hasher.hash_one(principal_id) as usize % self.shards.len();
        &self.shards[idx]
    }

    /// Insert or replace; returns the superseded record
    pub fn insert(&self, principal_id: &str, record: TokenRecord) -> Option<TokenRecord> {
        self.shard(principal_id)
            .lock()
            .insert(principal_id.to_string(), record)
    }

    /// Run `f` on the principal's entry while holding only its shard lock
    pub fn with_entry<R>(
        &self,
        principal_id: &str,
        f: impl FnOnce(&mut HashMap<String, TokenRecord>) -> R,
    ) -> R {
        let mut shard = self.shard(principal_id).lock();
        f(&mut shard)
    }

    pub fn remove(&self, principal_id: &str) -> Option<TokenRecord> {
        self.shard(principal_id).lock().remove(principal_id)
    }

    pub fn get(&self, principal_id: &str) -> Option<TokenRecord> {
        self.shard(principal_id).lock().get(principal_id).cloned()
    }

    /// Drop every record expired at `now`, one shard at a time
    pub fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        self.shards
            .iter()
            .map(|shard| {
                let mut map = shard.lock();
                let before = map.len();
                map.retain(|_, record| !record.is_expired(now));
                before - map.len()
            })
            .sum()
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }
}
