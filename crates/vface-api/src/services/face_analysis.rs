//! Face analysis orchestration.
//!
//! Each endpoint runs the same sequence: one detection call, a sequential
//! per-face enrichment loop (classification and storage), then grouping.
//! The detection call and the enrichment loop are timed separately.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};
use vface_media::FaceCropper;
use vface_models::{
    classify, format_elapsed, format_segment_timestamp, group_by_attribute, group_by_emotion,
    AttributeGroup, EmotionGroups, EmotionLabel, FaceObservation,
};
use vface_storage::{
    image_face_key, image_folder, video_face_key, video_stem, ThumbnailStore, JPEG_CONTENT_TYPE,
};
use vface_vision::{FaceDetectionAnnotation, ImageFaceDetector, VideoFaceAnnotator};

use crate::error::{ApiError, ApiResult};
use crate::metrics::record_analysis;

/// One object store per endpoint.
#[derive(Clone)]
pub struct FaceStores {
    pub video: Arc<dyn ThumbnailStore>,
    pub image: Arc<dyn ThumbnailStore>,
    pub combined: Arc<dyn ThumbnailStore>,
}

impl FaceStores {
    /// Named stores, for readiness checks.
    pub fn all(&self) -> [(&'static str, &Arc<dyn ThumbnailStore>); 3] {
        [
            ("video_faces", &self.video),
            ("image_faces", &self.image),
            ("combined_faces", &self.combined),
        ]
    }
}

/// Attribute-grouped result of `/api/videointelligence`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeReport {
    pub api_time_taken: String,
    pub storage_time_taken: String,
    pub data: Vec<AttributeGroup>,
}

/// One cropped face of `/api/vision`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFace {
    pub face_id: u32,
    pub emotion: EmotionLabel,
    pub detection_confidence: f64,
    pub image_url: String,
}

impl From<&FaceObservation> for ImageFace {
    fn from(face: &FaceObservation) -> Self {
        Self {
            face_id: face.id,
            emotion: face.emotion.unwrap_or(EmotionLabel::CannotDetect),
            detection_confidence: face.detection_confidence.unwrap_or_default(),
            image_url: face.image_ref(),
        }
    }
}

/// Flat result of `/api/vision`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReport {
    pub api_time_taken: String,
    pub storage_time_taken: String,
    pub faces: Vec<ImageFace>,
}

/// Runs detection, enrichment and grouping for every endpoint.
pub struct FaceAnalysisService {
    video: Arc<dyn VideoFaceAnnotator>,
    image: Arc<dyn ImageFaceDetector>,
    stores: FaceStores,
}

impl FaceAnalysisService {
    pub fn new(
        video: Arc<dyn VideoFaceAnnotator>,
        image: Arc<dyn ImageFaceDetector>,
        stores: FaceStores,
    ) -> Self {
        Self { video, image, stores }
    }

    pub fn stores(&self) -> &FaceStores {
        &self.stores
    }

    /// Detect faces in a video and group them by attribute name.
    pub async fn analyze_video_attributes(
        &self,
        video: &[u8],
        filename: Option<&str>,
    ) -> ApiResult<AttributeReport> {
        let (annotations, api_time) = self.annotate_video(video).await?;

        let start = Instant::now();
        let stem = video_stem(filename);
        let mut faces = Vec::with_capacity(annotations.len());

        for (id, annotation) in (0u32..).zip(&annotations) {
            let mut face = observe(id, annotation)?;
            let key = video_face_key(&stem, id);
            face.stored_image_ref = Some(
                self.stores
                    .video
                    .store(&key, &face.thumbnail, JPEG_CONTENT_TYPE)
                    .await?,
            );
            faces.push(face);
        }
        let storage_time = start.elapsed();

        record_analysis("video", api_time.as_secs_f64(), storage_time.as_secs_f64(), faces.len());
        info!(
            faces = faces.len(),
            folder = %stem,
            api_ms = api_time.as_millis() as u64,
            storage_ms = storage_time.as_millis() as u64,
            "Video attribute analysis completed"
        );

        Ok(AttributeReport {
            api_time_taken: format_elapsed(api_time),
            storage_time_taken: format_elapsed(storage_time),
            data: group_by_attribute(&faces),
        })
    }

    /// Detect faces in a video, re-analyze each thumbnail for emotion and
    /// group the faces by emotion label.
    pub async fn analyze_video_emotions(
        &self,
        video: &[u8],
        filename: Option<&str>,
    ) -> ApiResult<EmotionGroups> {
        let (annotations, api_time) = self.annotate_video(video).await?;

        let start = Instant::now();
        let stem = video_stem(filename);
        let mut faces = Vec::with_capacity(annotations.len());

        for (id, annotation) in (0u32..).zip(&annotations) {
            let mut face = observe(id, annotation)?;

            // Only the first face found in the thumbnail counts
            let found = self.image.detect_faces(&face.thumbnail).await?;
            match found.first() {
                Some(best) => {
                    face.emotion = Some(classify(&best.likelihoods()));
                    face.detection_confidence = Some(best.detection_confidence);
                }
                None => {
                    debug!(face = id, "No face found in thumbnail");
                    face.emotion = Some(EmotionLabel::CannotDetect);
                }
            }

            let key = video_face_key(&stem, id);
            face.stored_image_ref = Some(
                self.stores
                    .combined
                    .store(&key, &face.thumbnail, JPEG_CONTENT_TYPE)
                    .await?,
            );
            faces.push(face);
        }
        let storage_time = start.elapsed();

        record_analysis("combined", api_time.as_secs_f64(), storage_time.as_secs_f64(), faces.len());
        info!(
            faces = faces.len(),
            folder = %stem,
            api_ms = api_time.as_millis() as u64,
            storage_ms = storage_time.as_millis() as u64,
            "Video emotion analysis completed"
        );

        Ok(group_by_emotion(&faces))
    }

    /// Detect faces in a still image, crop and classify each one.
    pub async fn analyze_image(&self, image: &[u8]) -> ApiResult<ImageReport> {
        let detect_start = Instant::now();
        let annotations = self.image.detect_faces(image).await?;
        let api_time = detect_start.elapsed();

        let start = Instant::now();
        let folder = image_folder(Utc::now().timestamp_millis());
        let mut faces = Vec::with_capacity(annotations.len());

        if !annotations.is_empty() {
            let cropper = FaceCropper::new(image)?;

            for (id, annotation) in (0u32..).zip(&annotations) {
                let vertices = annotation
                    .bounding_poly
                    .as_ref()
                    .map(|poly| poly.vertices.as_slice())
                    .ok_or_else(|| ApiError::data_contract(format!("face {} has no bounding polygon", id)))?;

                let emotion = classify(&annotation.likelihoods());
                let mut face = FaceObservation::new(id, cropper.crop(vertices)?).with_emotion(emotion);
                face.detection_confidence = Some(annotation.detection_confidence);

                let key = image_face_key(&folder, emotion, id);
                face.stored_image_ref = Some(
                    self.stores
                        .image
                        .store(&key, &face.thumbnail, JPEG_CONTENT_TYPE)
                        .await?,
                );
                faces.push(face);
            }
        }
        let storage_time = start.elapsed();

        record_analysis("image", api_time.as_secs_f64(), storage_time.as_secs_f64(), faces.len());
        info!(
            faces = faces.len(),
            folder = %folder,
            api_ms = api_time.as_millis() as u64,
            storage_ms = storage_time.as_millis() as u64,
            "Image emotion analysis completed"
        );

        Ok(ImageReport {
            api_time_taken: format_elapsed(api_time),
            storage_time_taken: format_elapsed(storage_time),
            faces: faces.iter().map(ImageFace::from).collect(),
        })
    }

    async fn annotate_video(&self, video: &[u8]) -> ApiResult<(Vec<FaceDetectionAnnotation>, Duration)> {
        let start = Instant::now();
        let annotations = self.video.annotate_faces(video).await?;
        Ok((annotations, start.elapsed()))
    }
}

/// Build the observation for one tracked face.
fn observe(id: u32, annotation: &FaceDetectionAnnotation) -> ApiResult<FaceObservation> {
    let thumbnail = annotation.decode_thumbnail()?;
    let timestamp = format_segment_timestamp(annotation.first_segment_start()?);

    Ok(FaceObservation::new(id, thumbnail)
        .with_attributes(annotation.attributes())
        .with_timestamp(timestamp))
}
