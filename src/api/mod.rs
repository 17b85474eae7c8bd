//! API Module
//!
//! HTTP handlers and routing exposing the shared cache handle.
//!
//! Handlers reach the handle either through `State<AppState>` or through the
//! `Cache` extractor; both see the same `Arc`.

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::Cache;
pub use handlers::*;
pub use routes::create_router;
