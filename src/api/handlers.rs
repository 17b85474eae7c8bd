//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::extract::Cache;
use crate::cache::CacheAside;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, InvalidateRequest, InvalidateResponse,
    RememberRequest, RememberResponse, SetRequest, SetResponse, StatsResponse,
};
use crate::store::{KvStore, SharedStore};

/// The one cache handle of the process.
pub type SharedCache = Arc<CacheAside<SharedStore>>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside helpers over the configured store
    pub cache: SharedCache,
    /// TTL in seconds for writes that do not name one
    pub default_ttl: u64,
}

impl AppState {
    /// Wraps `store` in the cache-aside helpers.
    pub fn new(store: SharedStore, default_ttl: u64) -> Self {
        Self {
            cache: Arc::new(CacheAside::new(store)),
            default_ttl,
        }
    }

    /// Creates the state from loaded configuration and an already built store.
    pub fn from_config(config: &Config, store: SharedStore) -> Self {
        Self::new(store, config.default_ttl)
    }
}

/// Handler for PUT /set
///
/// Writes a value straight to the store.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl.unwrap_or(state.default_ttl);
    state.cache.store().set(&req.key, &req.value, ttl).await?;

    Ok(Json(SetResponse::new(req.key, ttl)))
}

/// Handler for GET /get/:key
pub async fn get_handler(cache: Cache, Path(key): Path<String>) -> Result<Json<GetResponse>> {
    match cache.store().get(&key).await? {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    cache: Cache,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if cache.store().del(&key).await? == 0 {
        return Err(CacheError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for POST /remember
///
/// Returns the cached value for the key, or stores and returns the request's
/// value when the key misses.
pub async fn remember_handler(
    State(state): State<AppState>,
    Json(req): Json<RememberRequest>,
) -> Result<Json<RememberResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl.unwrap_or(state.default_ttl);
    let produced = AtomicBool::new(false);
    let value = state
        .cache
        .remember(&req.key, ttl, || async {
            produced.store(true, Ordering::Relaxed);
            Ok(req.value.clone())
        })
        .await?;

    Ok(Json(RememberResponse {
        key: req.key,
        value,
        cached: !produced.load(Ordering::Relaxed),
    }))
}

/// Handler for POST /invalidate
pub async fn invalidate_handler(
    cache: Cache,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    cache.invalidate_caches(&req.keys).await?;

    Ok(Json(InvalidateResponse {
        invalidated: req.keys.len(),
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(cache: Cache) -> Json<StatsResponse> {
    Json(cache.stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
