//! Cache-Aside Module
//!
//! `remember`, `remember_json` and `invalidate_caches` over any `KvStore`.
//!
//! Concurrent misses on the same key are not coordinated: every caller that
//! misses runs its producer and writes its own result, last write wins.

use std::future::Future;

use futures::future::join_all;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::{HelperStats, StatsSnapshot};
use crate::error::{CacheError, Result};
use crate::store::KvStore;

// == Cache Aside ==
/// Wraps a store handle with cache-aside helpers.
///
/// Build one per process and share it behind an `Arc`.
#[derive(Debug)]
pub struct CacheAside<S> {
    store: S,
    stats: HelperStats,
}

impl<S: KvStore> CacheAside<S> {
    // == Constructor ==
    pub fn new(store: S) -> Self {
        Self {
            store,
            stats: HelperStats::new(),
        }
    }

    /// The wrapped store, for raw `get`/`set`/`del`.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current helper counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    // == Remember ==
    /// Returns the value stored under `key`, or runs `producer`, stores its
    /// output with expiration `ttl` (seconds) and returns it.
    ///
    /// An empty stored string counts as a miss. Errors from the store or the
    /// producer propagate; a failed producer writes nothing.
    pub async fn remember<F, Fut>(&self, key: &str, ttl: u64, producer: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        if key.is_empty() {
            return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
        }

        match self.store.get(key).await? {
            Some(value) if !value.is_empty() => {
                self.stats.record_hit();
                debug!(key, "cache hit");
                return Ok(value);
            }
            _ => {
                self.stats.record_miss();
                debug!(key, "cache miss");
            }
        }

        let value = producer().await?;
        self.store.set(key, &value, ttl).await?;
        self.stats.record_write();
        debug!(key, ttl, "cache populated");

        Ok(value)
    }

    // == Remember JSON ==
    /// `remember` for structured values: the produced `T` is stored as JSON
    /// and whatever string `remember` returns is decoded back into `T`.
    ///
    /// Fails with `CacheError::Encode` when `T` cannot be serialized and with
    /// `CacheError::Decode` when the stored text is not valid for `T`.
    pub async fn remember_json<T, F, Fut>(&self, key: &str, ttl: u64, producer: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let raw = self
            .remember(key, ttl, || async move {
                let value = producer().await?;
                serde_json::to_string(&value).map_err(CacheError::Encode)
            })
            .await?;

        serde_json::from_str(&raw).map_err(CacheError::Decode)
    }

    // == Invalidate Caches ==
    /// Deletes every key concurrently and waits for all deletions to settle.
    ///
    /// If any deletion fails, the first failure (in argument order) is
    /// returned. Nothing is rolled back and no deletion is cancelled, so the
    /// other keys may already be gone.
    pub async fn invalidate_caches<K: AsRef<str>>(&self, keys: &[K]) -> Result<()> {
        let results = join_all(keys.iter().map(|key| self.store.del(key.as_ref()))).await;

        let mut first_error = None;
        for (key, result) in keys.iter().zip(results) {
            match result {
                Ok(removed) => self.stats.record_invalidated(removed),
                Err(err) => {
                    warn!(key = key.as_ref(), error = %err, "cache invalidation failed");
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => {
                debug!(count = keys.len(), "caches invalidated");
                Ok(())
            }
        }
    }
}
