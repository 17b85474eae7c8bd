//! Test doubles for the cache helpers.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CacheError, Result};
use crate::store::{KvStore, MemoryStore};

/// Memory-backed store that records writes and injects failures or delays per key.
#[derive(Debug, Default)]
pub struct ScriptedStore {
    inner: MemoryStore,
    writes: Mutex<Vec<(String, String, u64)>>,
    failing_gets: Mutex<HashSet<String>>,
    failing_dels: Mutex<HashSet<String>>,
    del_delays: Mutex<HashMap<String, Duration>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `set` seen so far as `(key, value, ttl)`.
    pub fn writes(&self) -> Vec<(String, String, u64)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn fail_get(&self, key: &str) {
        self.failing_gets.lock().unwrap().insert(key.to_string());
    }

    pub fn fail_del(&self, key: &str) {
        self.failing_dels.lock().unwrap().insert(key.to_string());
    }

    pub fn delay_del(&self, key: &str, delay: Duration) {
        self.del_delays.lock().unwrap().insert(key.to_string(), delay);
    }
}

#[async_trait]
impl KvStore for ScriptedStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.failing_gets.lock().unwrap().contains(key) {
            return Err(CacheError::Store(format!("injected get failure for '{}'", key)));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string(), ttl_secs));
        self.inner.set(key, value, ttl_secs).await
    }

    async fn del(&self, key: &str) -> Result<u64> {
        let delay = self.del_delays.lock().unwrap().get(key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_dels.lock().unwrap().contains(key) {
            return Err(CacheError::Store(format!("injected del failure for '{}'", key)));
        }
        self.inner.del(key).await
    }
}
