//! Detection client configuration.

use std::time::Duration;

use crate::retry::RetryConfig;

pub const DEFAULT_VIDEO_INTELLIGENCE_URL: &str = "https://videointelligence.googleapis.com";
pub const DEFAULT_VISION_URL: &str = "https://vision.googleapis.com";

/// Configuration shared by the Video Intelligence and Vision clients.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Video Intelligence base URL
    pub video_intelligence_url: String,
    /// Vision base URL
    pub vision_url: String,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// Upper bound for a long-running annotation operation
    pub operation_timeout: Duration,
    /// Delay between operation polls
    pub poll_interval: Duration,
    pub retry: RetryConfig,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            video_intelligence_url: DEFAULT_VIDEO_INTELLIGENCE_URL.to_string(),
            vision_url: DEFAULT_VISION_URL.to_string(),
            // Uploads carry the whole video inline
            request_timeout: Duration::from_secs(120),
            operation_timeout: Duration::from_secs(600),
            poll_interval: Duration::from_secs(5),
            retry: RetryConfig::default(),
        }
    }
}

impl VisionConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            video_intelligence_url: std::env::var("VIDEO_INTELLIGENCE_URL")
                .unwrap_or(defaults.video_intelligence_url),
            vision_url: std::env::var("VISION_URL").unwrap_or(defaults.vision_url),
            request_timeout: Duration::from_secs(
                std::env::var("DETECTION_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
            operation_timeout: Duration::from_secs(
                std::env::var("DETECTION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
            poll_interval: Duration::from_secs(
                std::env::var("DETECTION_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            retry: RetryConfig::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = VisionConfig::default();
        assert_eq!(config.video_intelligence_url, DEFAULT_VIDEO_INTELLIGENCE_URL);
        assert_eq!(config.operation_timeout, Duration::from_secs(600));
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.retry.max_retries, 2);
    }
}
