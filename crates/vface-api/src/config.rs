//! API configuration.

use std::time::Duration;

use crate::error::{ApiError, ApiResult};

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Rate limit requests per second
    pub rate_limit_rps: u32,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// `LOG_FORMAT`, when set
    pub log_format: Option<String>,
    pub metrics_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec!["http://localhost:5173".to_string()],
            rate_limit_rps: 10,
            max_body_size: 256 * 1024 * 1024, // 256MB
            environment: "development".to_string(),
            log_format: None,
            metrics_enabled: true,
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .or_else(|_| std::env::var("PORT"))
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rate_limit_rps),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_format: std::env::var("LOG_FORMAT").ok().filter(|v| !v.trim().is_empty()),
            metrics_enabled: std::env::var("METRICS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.metrics_enabled),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }

    /// JSON logs when `LOG_FORMAT=json`, or in production when unset.
    pub fn json_logs(&self) -> bool {
        match &self.log_format {
            Some(format) => format.to_lowercase() == "json",
            None => self.is_production(),
        }
    }
}

/// Destination buckets for stored faces, one per endpoint.
#[derive(Debug, Clone)]
pub struct BucketConfig {
    /// Thumbnails from `/api/videointelligence`
    pub video_faces: String,
    /// Crops from `/api/vision`
    pub image_faces: String,
    /// Thumbnails from `/api/combined`
    pub combined_faces: String,
    /// Lifetime of issued read URLs
    pub signed_url_ttl: Duration,
}

impl BucketConfig {
    pub fn from_env() -> ApiResult<Self> {
        Ok(Self {
            video_faces: required("VIDEO_FACES_BUCKET")?,
            image_faces: required("IMAGE_FACES_BUCKET")?,
            combined_faces: required("COMBINED_FACES_BUCKET")?,
            signed_url_ttl: Duration::from_secs(
                std::env::var("SIGNED_URL_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(15 * 60),
            ),
        })
    }
}

fn required(name: &str) -> ApiResult<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::internal(format!("{} not set", name)))
}
