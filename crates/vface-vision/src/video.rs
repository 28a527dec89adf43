//! Video Intelligence face detection client.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::VisionConfig;
use crate::error::{VisionError, VisionResult};
use crate::http::GoogleApiTransport;
use crate::metrics::record_operation_poll;
use crate::token::{AccessTokenSource, TokenCache};
use crate::types::{AnnotateVideoRequest, FaceDetectionAnnotation, Operation};
use crate::VideoFaceAnnotator;

/// Client for `videos:annotate` with operation polling.
#[derive(Clone)]
pub struct VideoIntelligenceClient {
    transport: GoogleApiTransport,
    config: VisionConfig,
}

impl VideoIntelligenceClient {
    pub fn new(config: VisionConfig, tokens: Arc<dyn AccessTokenSource>) -> VisionResult<Self> {
        let transport = GoogleApiTransport::new(tokens, config.request_timeout, config.retry.clone())?;
        Ok(Self { transport, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> VisionResult<Self> {
        let tokens = TokenCache::from_env("VIDEO_INTELLIGENCE_CREDENTIALS")?;
        Self::new(VisionConfig::from_env(), Arc::new(tokens))
    }

    /// Start an annotation operation.
    pub async fn start_annotation(&self, request: &AnnotateVideoRequest) -> VisionResult<Operation> {
        let url = format!("{}/v1/videos:annotate", self.config.video_intelligence_url);
        self.transport.post_json("annotate_video", &url, request).await
    }

    /// Fetch the current state of an operation.
    pub async fn get_operation(&self, name: &str) -> VisionResult<Operation> {
        let url = format!("{}/v1/{}", self.config.video_intelligence_url, name);
        self.transport.get_json("get_operation", &url).await
    }

    /// Poll until the operation is done or the operation timeout elapses.
    pub async fn wait_for_operation(&self, operation: Operation) -> VisionResult<Operation> {
        let timeout = self.config.operation_timeout;

        let poll = async {
            let mut current = operation;
            while !current.done {
                tokio::time::sleep(self.config.poll_interval).await;
                record_operation_poll();
                current = self.get_operation(&current.name).await?;
                debug!(operation = %current.name, done = current.done, "Polled annotation operation");
            }
            Ok(current)
        };

        tokio::time::timeout(timeout, poll)
            .await
            .map_err(|_| VisionError::Timeout(timeout.as_secs()))?
    }
}

/// Pull face annotations out of a finished operation.
pub fn face_annotations(operation: Operation) -> VisionResult<Vec<FaceDetectionAnnotation>> {
    if let Some(status) = operation.error {
        return Err(status.into());
    }

    let response = operation
        .response
        .ok_or_else(|| VisionError::invalid_response("Operation finished without a response"))?;

    let result = response
        .annotation_results
        .into_iter()
        .next()
        .ok_or_else(|| VisionError::invalid_response("Response has no annotation results"))?;

    if let Some(status) = result.error {
        return Err(status.into());
    }

    Ok(result.face_detection_annotations)
}

#[async_trait]
impl VideoFaceAnnotator for VideoIntelligenceClient {
    async fn annotate_faces(&self, video: &[u8]) -> VisionResult<Vec<FaceDetectionAnnotation>> {
        let start = Instant::now();
        let request = AnnotateVideoRequest::face_detection(video);

        let operation = self.start_annotation(&request).await?;
        info!(operation = %operation.name, bytes = video.len(), "Started video annotation");

        let finished = self.wait_for_operation(operation).await?;
        let faces = face_annotations(finished)?;

        info!(
            faces = faces.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Video annotation completed"
        );
        Ok(faces)
    }
}
