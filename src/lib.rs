//! REST Cache - cache-aside helpers over a REST key-value store
//!
//! One `CacheAside` handle per process wraps the configured store and is
//! shared with request handlers through axum state.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::{AppState, Cache, SharedCache};
pub use cache::CacheAside;
pub use config::Config;
pub use error::{CacheError, Result};
pub use store::{ConfiguredStore, KvStore, MemoryStore, RestStore, SharedStore};
pub use tasks::spawn_cleanup_task;
