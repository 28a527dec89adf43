//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use vface_media::MediaError;
use vface_storage::StorageError;
use vface_vision::VisionError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No media uploaded: {0}")]
    NoMedia(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Detection error: {0}")]
    Detection(#[from] VisionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Image processing error: {0}")]
    Media(#[from] MediaError),

    #[error("Unexpected detection data: {0}")]
    DataContract(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn no_media(field: &str) -> Self {
        Self::NoMedia(format!("expected a file in the '{}' field", field))
    }

    pub fn invalid_upload(msg: impl Into<String>) -> Self {
        Self::InvalidUpload(msg.into())
    }

    pub fn data_contract(msg: impl Into<String>) -> Self {
        Self::DataContract(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoMedia(_) | ApiError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            ApiError::Detection(e) if e.is_data_contract() => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Detection(e) if e.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Detection(_) | ApiError::Storage(_) => StatusCode::BAD_GATEWAY,
            ApiError::Media(_) | ApiError::DataContract(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NoMedia(_) => "no_media",
            ApiError::InvalidUpload(_) => "invalid_upload",
            ApiError::Detection(e) if e.is_data_contract() => "data_contract_violation",
            ApiError::Detection(e) if e.is_unavailable() => "detection_unavailable",
            ApiError::Detection(_) => "detection_failed",
            ApiError::Storage(_) => "storage_failed",
            ApiError::Media(_) | ApiError::DataContract(_) => "data_contract_violation",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        if status.is_server_error() {
            error!(code = code, status = status.as_u16(), "Request failed: {}", self);
        } else {
            warn!(code = code, status = status.as_u16(), "Request rejected: {}", self);
        }

        // Don't expose internal error details in production
        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR
            && std::env::var("ENVIRONMENT").unwrap_or_default().to_lowercase() == "production"
        {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { detail, code })).into_response()
    }
}
