//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return its render handle.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "vface_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "vface_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "vface_http_requests_in_flight";

    // Analysis metrics
    pub const DETECTION_DURATION_SECONDS: &str = "vface_detection_duration_seconds";
    pub const STORAGE_DURATION_SECONDS: &str = "vface_storage_duration_seconds";
    pub const FACES_DETECTED_TOTAL: &str = "vface_faces_detected_total";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "vface_rate_limit_hits_total";
}

/// Known routes; anything else is reported as `other`.
const ROUTES: &[&str] = &[
    "/api/videointelligence",
    "/api/combined",
    "/api/vision",
    "/health",
    "/healthz",
    "/ready",
    "/metrics",
];

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", route_label(path).to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record one analysis run for an endpoint variant.
pub fn record_analysis(variant: &'static str, detection_secs: f64, storage_secs: f64, faces: usize) {
    let labels = [("variant", variant)];
    histogram!(names::DETECTION_DURATION_SECONDS, &labels).record(detection_secs);
    histogram!(names::STORAGE_DURATION_SECONDS, &labels).record(storage_secs);
    counter!(names::FACES_DETECTED_TOTAL, &labels).increment(faces as u64);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", route_label(endpoint).to_string())];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

fn route_label(path: &str) -> &'static str {
    ROUTES
        .iter()
        .find(|route| **route == path)
        .copied()
        .unwrap_or("other")
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
