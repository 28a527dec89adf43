//! Google Cloud face detection clients.
//!
//! Talks to the Video Intelligence REST API (long-running `videos:annotate`
//! operations) and the Vision REST API (`images:annotate`). Both clients
//! authenticate with service-account bearer tokens and retry transient
//! failures with exponential backoff.
//!
//! Callers depend on the [`VideoFaceAnnotator`] and [`ImageFaceDetector`]
//! traits so the HTTP layer can run against in-memory fakes.

pub mod config;
pub mod error;
pub mod http;
pub mod image;
pub mod metrics;
pub mod retry;
pub mod token;
pub mod types;
pub mod video;

use async_trait::async_trait;

pub use config::VisionConfig;
pub use error::{VisionError, VisionResult};
pub use image::VisionClient;
pub use retry::RetryConfig;
pub use token::{AccessTokenSource, StaticToken, TokenCache};
pub use types::{BoundingPoly, FaceAnnotation, FaceDetectionAnnotation, Vertex};
pub use video::VideoIntelligenceClient;

/// Face detection over a whole video.
#[async_trait]
pub trait VideoFaceAnnotator: Send + Sync {
    /// One annotation per tracked face; empty when none were found.
    async fn annotate_faces(&self, video: &[u8]) -> VisionResult<Vec<FaceDetectionAnnotation>>;
}

/// Face detection on a single still image.
#[async_trait]
pub trait ImageFaceDetector: Send + Sync {
    async fn detect_faces(&self, image: &[u8]) -> VisionResult<Vec<FaceAnnotation>>;
}
