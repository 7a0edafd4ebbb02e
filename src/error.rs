//! Error taxonomy for the URL shortener API
//!
//! Handlers return `Result<_, ApiError>` and propagate failures with `?`;
//! the `IntoResponse` impl maps each variant to its HTTP status and JSON
//! body. Storage failures are logged and collapsed into an opaque 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input (400); the caller must correct the request
    #[error("{0}")]
    Validation(String),

    /// Unknown user or short identifier (404)
    #[error("{0}")]
    NotFound(String),

    /// Duplicate username or preferred short identifier already taken (409)
    #[error("{0}")]
    Conflict(String),

    /// Tier limit reached (429); carries the remaining-request count so the
    /// caller can back off intelligently
    #[error("Request limit reached for your tier")]
    QuotaExceeded { remaining: u64 },

    /// Unexpected storage failure (500)
    #[error("storage error: {0}")]
    Storage(#[from] redb::Error),

    /// Record (de)serialization failure (500)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// redb surfaces distinct error types per operation; funnel them all
// through the umbrella `redb::Error` so handlers can use `?` directly.
impl From<redb::TransactionError> for ApiError {
    fn from(err: redb::TransactionError) -> Self {
        ApiError::Storage(err.into())
    }
}

impl From<redb::TableError> for ApiError {
    fn from(err: redb::TableError) -> Self {
        ApiError::Storage(err.into())
    }
}

impl From<redb::StorageError> for ApiError {
    fn from(err: redb::StorageError) -> Self {
        ApiError::Storage(err.into())
    }
}

impl From<redb::CommitError> for ApiError {
    fn from(err: redb::CommitError) -> Self {
        ApiError::Storage(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message, "code": "bad_request" })),
            )
                .into_response(),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": message, "code": "not_found" })),
            )
                .into_response(),
            ApiError::Conflict(message) => (
                StatusCode::CONFLICT,
                Json(json!({ "error": message, "code": "conflict" })),
            )
                .into_response(),
            ApiError::QuotaExceeded { remaining } => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({
                    "message": "Request limit reached for your tier",
                    "remainingRequests": remaining
                })),
            )
                .into_response(),
            ApiError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                internal_error()
            }
            ApiError::Serialization(err) => {
                tracing::error!(error = %err, "record serialization failure");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error", "code": "internal_error" })),
    )
        .into_response()
}
