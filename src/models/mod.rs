//! Request and Response models for the cache service API

pub mod requests;
pub mod responses;

pub use requests::{InvalidateRequest, RememberRequest, SetRequest};
pub use responses::{
    DeleteResponse, ErrorResponse, GetResponse, HealthResponse, InvalidateResponse,
    RememberResponse, SetResponse, StatsResponse,
};
