//! Per-face observation model.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::emotion::EmotionLabel;

/// A named attribute observed on a face (e.g. `glasses`, `smiling`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FaceAttribute {
    pub name: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
}

impl FaceAttribute {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// One detected face, scoped to a single request.
///
/// `id` is the position of the face in the source detection list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceObservation {
    pub id: u32,
    /// Raw thumbnail bytes, never interpreted
    pub thumbnail: Vec<u8>,
    pub attributes: Vec<FaceAttribute>,
    /// `<seconds>.<millis>sec` of the first tracked segment
    pub timestamp: String,
    pub emotion: Option<EmotionLabel>,
    pub detection_confidence: Option<f64>,
    /// Reference (signed URL) returned by the object store
    pub stored_image_ref: Option<String>,
}

impl FaceObservation {
    pub fn new(id: u32, thumbnail: Vec<u8>) -> Self {
        Self {
            id,
            thumbnail,
            ..Default::default()
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<FaceAttribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn with_emotion(mut self, emotion: EmotionLabel) -> Self {
        self.emotion = Some(emotion);
        self
    }

    /// Image reference for responses: the stored URL when present, otherwise
    /// the base64-encoded thumbnail.
    pub fn image_ref(&self) -> String {
        match &self.stored_image_ref {
            Some(url) => url.clone(),
            None => STANDARD.encode(&self.thumbnail),
        }
    }
}
