//! Vision client error types.

use thiserror::Error;

pub type VisionResult<T> = Result<T, VisionError>;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Rate limited, retry after {0}ms")]
    RateLimited(u64),

    #[error("Server error ({0}): {1}")]
    ServerError(u16, String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Operation failed with code {code}: {message}")]
    Operation { code: i32, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VisionError {
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    /// Map a non-success HTTP status to an error.
    pub fn from_http_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => Self::Auth(body),
            429 => Self::RateLimited(1000),
            503 => Self::ServiceUnavailable(body),
            500..=599 => Self::ServerError(status, body),
            _ => Self::RequestFailed(format!("HTTP {}: {}", status, body)),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VisionError::ServiceUnavailable(_)
                | VisionError::RateLimited(_)
                | VisionError::ServerError(..)
                | VisionError::Network(_)
        )
    }

    /// Suggested wait before retrying, when the service provided one.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            VisionError::RateLimited(ms) => Some(*ms),
            _ => None,
        }
    }

    /// True when the service returned data that does not match its contract.
    pub fn is_data_contract(&self) -> bool {
        matches!(self, VisionError::InvalidResponse(_) | VisionError::Json(_))
    }

    /// True when the service could not be reached in time.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            VisionError::Timeout(_) | VisionError::ServiceUnavailable(_) | VisionError::RateLimited(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        assert!(matches!(VisionError::from_http_status(429, ""), VisionError::RateLimited(_)));
        assert!(matches!(VisionError::from_http_status(503, ""), VisionError::ServiceUnavailable(_)));
        assert!(matches!(VisionError::from_http_status(500, ""), VisionError::ServerError(500, _)));
        assert!(matches!(VisionError::from_http_status(403, ""), VisionError::Auth(_)));
        assert!(matches!(VisionError::from_http_status(400, ""), VisionError::RequestFailed(_)));
    }

    #[test]
    fn test_retryable() {
        assert!(VisionError::from_http_status(502, "bad gateway").is_retryable());
        assert!(VisionError::from_http_status(429, "slow down").is_retryable());
        assert!(!VisionError::from_http_status(400, "bad request").is_retryable());
        assert!(!VisionError::Timeout(600).is_retryable());
        assert!(!VisionError::invalid_response("missing").is_retryable());
    }

    #[test]
    fn test_classification() {
        assert!(VisionError::invalid_response("x").is_data_contract());
        assert!(VisionError::Timeout(1).is_unavailable());
        assert!(!VisionError::Operation { code: 3, message: "bad video".into() }.is_unavailable());
    }
}
