//! Store Module
//!
//! The key-value primitives the cache-aside helpers are built on, and the
//! stores that provide them.

mod entry;
mod memory;
mod rest;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Backend, Config};
use crate::error::Result;

pub use entry::StoredEntry;
pub use memory::MemoryStore;
pub use rest::RestStore;

// == KvStore Trait ==
/// Primitive operations of a remote key-value store.
///
/// Implementations must be safe to call concurrently; each call is an
/// independent request.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Reads `key`, returning `None` when it is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, expiring after `ttl_secs` seconds.
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;

    /// Removes `key`, returning how many keys were deleted (0 or 1).
    async fn del(&self, key: &str) -> Result<u64>;
}

#[async_trait]
impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        (**self).set(key, value, ttl_secs).await
    }

    async fn del(&self, key: &str) -> Result<u64> {
        (**self).del(key).await
    }
}

/// Type-erased store handle shared across the service.
pub type SharedStore = Arc<dyn KvStore>;

/// A store built from configuration.
///
/// The memory variant is kept concrete so the caller can start its expiry sweep.
pub enum ConfiguredStore {
    Rest(Arc<RestStore>),
    Memory(Arc<MemoryStore>),
}

impl ConfiguredStore {
    /// Builds the store selected by `config.backend`.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.backend {
            Backend::Rest => Ok(ConfiguredStore::Rest(Arc::new(RestStore::from_config(config)?))),
            Backend::Memory => Ok(ConfiguredStore::Memory(Arc::new(MemoryStore::new()))),
        }
    }

    /// Erases the concrete store type.
    pub fn shared(&self) -> SharedStore {
        match self {
            ConfiguredStore::Rest(store) => store.clone() as SharedStore,
            ConfiguredStore::Memory(store) => store.clone() as SharedStore,
        }
    }
}
