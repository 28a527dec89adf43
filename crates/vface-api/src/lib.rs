//! Axum HTTP API server.
//!
//! This crate provides:
//! - Video and image face analysis endpoints
//! - The face analysis orchestrator with injected collaborators
//! - Rate limiting and security headers
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::{ApiConfig, BucketConfig};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::{FaceAnalysisService, FaceStores};
pub use state::AppState;
