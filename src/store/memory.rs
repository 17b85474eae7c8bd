//! Memory Store Module
//!
//! Process-local store with TTL expiration, speaking the same primitives as the
//! remote store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::store::{KvStore, StoredEntry};

// == Memory Store ==
/// HashMap-backed store. Expired entries read as absent and are dropped lazily
/// or by `cleanup_expired`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == TTL ==
    /// Remaining lifetime of `key` in seconds, `None` when absent or expired.
    pub async fn ttl(&self, key: &str) -> Option<u64> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(StoredEntry::ttl_remaining)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.values().filter(|entry| !entry.is_expired()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: drop it unless a writer replaced it in the meantime
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(StoredEntry::is_expired) {
            entries.remove(key);
            debug!(key, "memory store: dropped expired entry");
        }
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        if ttl_secs == 0 {
            return Err(CacheError::InvalidRequest(
                "invalid expire time in 'set' command".to_string(),
            ));
        }

        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), StoredEntry::new(value.to_string(), ttl_secs));
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<u64> {
        let mut entries = self.entries.write().await;
        match entries.remove(key) {
            Some(entry) if !entry.is_expired() => Ok(1),
            _ => Ok(0),
        }
    }
}
