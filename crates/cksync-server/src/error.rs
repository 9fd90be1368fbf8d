//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cksync_storage::StorageError;
use serde::Serialize;

/// Error body: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure of a single API request.
///
/// The message of each variant is exactly what the client sees.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed identifier or unparseable request body.
    #[error("{0}")]
    InvalidKey(&'static str),

    #[error("not found")]
    NotFound,

    /// The storage medium failed. The cause is logged, not returned.
    #[error("{0}")]
    StorageUnavailable(&'static str),

    #[error("invalid endpoint")]
    UnknownOperation,
}

impl ApiError {
    /// Map a store failure. `invalid` is the client message for a rejected
    /// key, `failure` the one for a fault of the storage medium itself.
    pub fn from_storage(err: StorageError, invalid: &'static str, failure: &'static str) -> Self {
        match err {
            StorageError::NotFound(_) => Self::NotFound,
            StorageError::InvalidKey(_) => Self::InvalidKey(invalid),
            err => {
                tracing::error!(error = %err, "Storage operation failed");
                Self::StorageUnavailable(failure)
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidKey(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnknownOperation => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
