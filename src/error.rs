//! Error types for the cache service
//!
//! Provides unified error handling using thiserror.
//!
//! Two layers of errors exist on purpose. `StoreError` covers the durable
//! tier and never crosses the cache's public boundary: the cache logs it and
//! degrades to a miss. `ApiError` is the HTTP surface's taxonomy.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Failure of the durable persistence substrate.
///
/// Always soft: callers of the cache observe absence, never these variants.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The substrate could not be read or written (quota, I/O, permissions)
    #[error("durable tier failure: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted value failed structural decoding
    #[error("malformed persisted entry: {0}")]
    Malformed(String),
}

// == Api Error Enum ==
/// Error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key not cached (absent or expired)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
