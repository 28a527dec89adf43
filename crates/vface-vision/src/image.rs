//! Vision API still-image face detection client.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::VisionConfig;
use crate::error::{VisionError, VisionResult};
use crate::http::GoogleApiTransport;
use crate::token::{AccessTokenSource, TokenCache};
use crate::types::{BatchAnnotateImagesRequest, BatchAnnotateImagesResponse, FaceAnnotation};
use crate::ImageFaceDetector;

/// Client for `images:annotate`.
#[derive(Clone)]
pub struct VisionClient {
    transport: GoogleApiTransport,
    config: VisionConfig,
}

impl VisionClient {
    pub fn new(config: VisionConfig, tokens: Arc<dyn AccessTokenSource>) -> VisionResult<Self> {
        let transport = GoogleApiTransport::new(tokens, config.request_timeout, config.retry.clone())?;
        Ok(Self { transport, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> VisionResult<Self> {
        let tokens = TokenCache::from_env("VISION_CREDENTIALS")?;
        Self::new(VisionConfig::from_env(), Arc::new(tokens))
    }

    pub async fn annotate(&self, request: &BatchAnnotateImagesRequest) -> VisionResult<BatchAnnotateImagesResponse> {
        let url = format!("{}/v1/images:annotate", self.config.vision_url);
        self.transport.post_json("annotate_image", &url, request).await
    }
}

/// Faces of the single image in a batch response.
pub fn image_faces(response: BatchAnnotateImagesResponse) -> VisionResult<Vec<FaceAnnotation>> {
    let first = response
        .responses
        .into_iter()
        .next()
        .ok_or_else(|| VisionError::invalid_response("Batch response has no entries"))?;

    if let Some(status) = first.error {
        return Err(status.into());
    }

    Ok(first.face_annotations)
}

#[async_trait]
impl ImageFaceDetector for VisionClient {
    async fn detect_faces(&self, image: &[u8]) -> VisionResult<Vec<FaceAnnotation>> {
        let response = self
            .annotate(&BatchAnnotateImagesRequest::face_detection(image))
            .await?;
        let faces = image_faces(response)?;
        debug!(faces = faces.len(), bytes = image.len(), "Image face detection completed");
        Ok(faces)
    }
}
