//! Error types for cricket-api
//!
//! Only request-level failures end up here. Per-file ingestion problems are
//! classified inside the batch processor and never reach the HTTP boundary.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upload request carried no files (400)
    #[error("No files provided.")]
    NoFiles,

    /// Invalid request parameter (400)
    #[error("{0}")]
    BadRequest(String),

    /// An uploaded file exceeded the per-file size limit (400)
    #[error("File too large")]
    FileTooLarge,

    /// Multipart body could not be read
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Storage or other unexpected failure (500, detail is logged only)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// cricket-common error
    #[error("Common error: {0}")]
    Common(#[from] cricket_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NoFiles => (StatusCode::BAD_REQUEST, "No files provided.".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::FileTooLarge => (StatusCode::BAD_REQUEST, "File too large".to_string()),
            ApiError::Multipart(ref err) => (err.status(), err.body_text()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(ref detail) => {
                tracing::error!(error = %detail, "Request failed");
                internal_error()
            }
            ApiError::Common(ref err) => {
                tracing::error!(error = %err, "Request failed");
                internal_error()
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

fn internal_error() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
