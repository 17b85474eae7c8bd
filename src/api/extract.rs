//! Per-request access to the shared cache handle.

use std::convert::Infallible;
use std::ops::Deref;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use super::handlers::{AppState, SharedCache};

/// Extractor yielding the process-wide cache handle.
///
/// Clones the `Arc` held in `AppState`; no per-request client is created.
#[derive(Clone)]
pub struct Cache(pub SharedCache);

#[async_trait]
impl<S> FromRequestParts<S> for Cache
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Cache(AppState::from_ref(state).cache))
    }
}

impl Deref for Cache {
    type Target = SharedCache;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
