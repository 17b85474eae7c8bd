//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache helpers, store adapters and HTTP surface.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in the store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote store answered with an error
    #[error("Store error: {0}")]
    Store(String),

    /// Transport failure talking to the remote store
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A produced value could not be encoded as JSON
    #[error("Encoding error: {0}")]
    Encode(#[source] serde_json::Error),

    /// A stored or produced string is not valid JSON for the requested type
    #[error("Decoding error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The value producer of a cache-aside call failed
    #[error("Producer failed: {0}")]
    Producer(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// HTTP status the error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Store(_) | CacheError::Http(_) => StatusCode::BAD_GATEWAY,
            CacheError::Encode(_) | CacheError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::Config(_) | CacheError::Producer(_) | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            CacheError::NotFound(msg) | CacheError::InvalidRequest(msg) => msg.clone(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
