//! Detection client metrics.

use metrics::{counter, histogram};

/// Metric name constants.
pub mod names {
    /// Total detection requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "vface_vision_requests_total";

    /// Total retry attempts by operation.
    pub const RETRIES_TOTAL: &str = "vface_vision_retries_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "vface_vision_latency_seconds";

    /// Operation polls until completion.
    pub const OPERATION_POLLS_TOTAL: &str = "vface_vision_operation_polls_total";
}

/// Record metrics for a completed request.
pub fn record_request(operation: &str, status: u16, latency_secs: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation.to_string()
    )
    .record(latency_secs);
}

/// Record a retry attempt.
pub fn record_retry(operation: &str) {
    counter!(
        names::RETRIES_TOTAL,
        "operation" => operation.to_string()
    )
    .increment(1);
}

/// Record one poll of a long-running operation.
pub fn record_operation_poll() {
    counter!(names::OPERATION_POLLS_TOTAL).increment(1);
}
