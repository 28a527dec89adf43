//! Application state.

use std::sync::Arc;

use vface_storage::{GcsClient, GcsConfig, SignedUrlStore};
use vface_vision::{VideoIntelligenceClient, VisionClient};

use crate::config::{ApiConfig, BucketConfig};
use crate::services::{FaceAnalysisService, FaceStores};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub faces: Arc<FaceAnalysisService>,
}

impl AppState {
    /// Create application state with clients configured from the environment.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let buckets = BucketConfig::from_env()?;
        let gcs_config = GcsConfig::from_env()?;

        let client = GcsClient::new(&gcs_config, &buckets.video_faces);
        let store = |bucket: &str| -> Arc<SignedUrlStore> {
            Arc::new(SignedUrlStore::new(client.with_bucket(bucket), buckets.signed_url_ttl))
        };

        let stores = FaceStores {
            video: store(&buckets.video_faces),
            image: store(&buckets.image_faces),
            combined: store(&buckets.combined_faces),
        };

        let video = VideoIntelligenceClient::from_env()?;
        let image = VisionClient::from_env()?;

        let faces = FaceAnalysisService::new(Arc::new(video), Arc::new(image), stores);
        Ok(Self::with_services(config, faces))
    }

    /// Create state around an already-built service.
    pub fn with_services(config: ApiConfig, faces: FaceAnalysisService) -> Self {
        Self {
            config,
            faces: Arc::new(faces),
        }
    }
}
