//! Bounded retry with exponential backoff.
//!
//! Retries network errors, 429 and 5xx responses. Honors the service's
//! suggested delay when one is known.

use std::time::Duration;

use tracing::{info_span, warn, Instrument};

use crate::error::{VisionError, VisionResult};
use crate::metrics::record_retry;

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay cap (in milliseconds).
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 500,
            max_delay_ms: 8000,
        }
    }
}

impl RetryConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: std::env::var("DETECTION_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_retries),
            ..defaults
        }
    }
}

/// Execute an async operation with retry.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, operation: &str, op: F) -> VisionResult<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = VisionResult<T>>,
{
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        let span = info_span!("vision_retry", operation = %operation, attempt = attempt + 1);

        match op().instrument(span).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < config.max_retries => {
                let delay = calculate_delay(config, attempt, e.retry_after_ms());

                warn!(
                    operation = %operation,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    "Detection request failed, retrying: {}",
                    e
                );

                record_retry(operation);
                tokio::time::sleep(delay).await;
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or_else(|| VisionError::request_failed("Unknown error")))
}

/// Backoff delay: `base * 2^attempt`, capped, or the service-provided delay.
fn calculate_delay(config: &RetryConfig, attempt: u32, retry_after_ms: Option<u64>) -> Duration {
    if let Some(after) = retry_after_ms {
        return Duration::from_millis(after.min(config.max_delay_ms));
    }

    let exp_delay = config
        .base_delay_ms
        .saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(exp_delay.min(config.max_delay_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            base_delay_ms: 1,
            max_delay_ms: 5,
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let config = RetryConfig::default();
        assert_eq!(calculate_delay(&config, 0, None), Duration::from_millis(500));
        assert_eq!(calculate_delay(&config, 1, None), Duration::from_millis(1000));
        assert_eq!(calculate_delay(&config, 10, None), Duration::from_millis(8000));
        assert_eq!(calculate_delay(&config, 0, Some(2000)), Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&fast_config(3), "test", || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(VisionError::from_http_status(503, "busy"))
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let result: VisionResult<()> = with_retry(&fast_config(2), "test", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(VisionError::from_http_status(500, "boom"))
        })
        .await;

        assert!(matches!(result, Err(VisionError::ServerError(500, _))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_does_not_retry_client_errors() {
        let calls = AtomicU32::new(0);
        let result: VisionResult<()> = with_retry(&fast_config(3), "test", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(VisionError::from_http_status(400, "bad"))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
