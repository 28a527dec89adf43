//! Request/response types for the Video Intelligence and Vision REST APIs.
//!
//! Only the fields used for face analysis are modelled. Proto3 JSON omits
//! empty repeated fields and zero values, so most fields default.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use vface_models::{parse_duration, EmotionLikelihoods, FaceAttribute, LikelihoodLevel};

use crate::error::{VisionError, VisionResult};

pub const FACE_DETECTION: &str = "FACE_DETECTION";

// =============================================================================
// Shared
// =============================================================================

/// `google.rpc.Status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl From<Status> for VisionError {
    fn from(status: Status) -> Self {
        VisionError::Operation {
            code: status.code,
            message: status.message,
        }
    }
}

// =============================================================================
// Video Intelligence
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateVideoRequest {
    /// Base64-encoded video bytes
    pub input_content: String,
    pub features: Vec<String>,
    pub video_context: VideoContext,
}

impl AnnotateVideoRequest {
    /// Face detection with bounding boxes and attributes.
    pub fn face_detection(video: &[u8]) -> Self {
        Self {
            input_content: STANDARD.encode(video),
            features: vec![FACE_DETECTION.to_string()],
            video_context: VideoContext {
                face_detection_config: FaceDetectionConfig {
                    include_bounding_boxes: true,
                    include_attributes: true,
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContext {
    pub face_detection_config: FaceDetectionConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceDetectionConfig {
    pub include_bounding_boxes: bool,
    pub include_attributes: bool,
}

/// `google.longrunning.Operation` carrying an `AnnotateVideoResponse`.
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub error: Option<Status>,
    pub response: Option<AnnotateVideoResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateVideoResponse {
    #[serde(default)]
    pub annotation_results: Vec<VideoAnnotationResults>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAnnotationResults {
    #[serde(default)]
    pub face_detection_annotations: Vec<FaceDetectionAnnotation>,
    pub error: Option<Status>,
}

/// One tracked face across the video.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceDetectionAnnotation {
    #[serde(default)]
    pub tracks: Vec<Track>,
    /// Base64-encoded JPEG thumbnail
    #[serde(default)]
    pub thumbnail: String,
}

impl FaceDetectionAnnotation {
    /// Decode the thumbnail bytes.
    pub fn decode_thumbnail(&self) -> VisionResult<Vec<u8>> {
        STANDARD
            .decode(self.thumbnail.as_bytes())
            .map_err(|e| VisionError::invalid_response(format!("Invalid thumbnail encoding: {}", e)))
    }

    /// Start offset of the first tracked segment; zero when absent.
    pub fn first_segment_start(&self) -> VisionResult<Duration> {
        let offset = self
            .tracks
            .first()
            .and_then(|t| t.segment.as_ref())
            .and_then(|s| s.start_time_offset.as_deref());

        match offset {
            Some(raw) => parse_duration(raw)
                .map_err(|e| VisionError::invalid_response(format!("Invalid segment offset: {}", e))),
            None => Ok(Duration::ZERO),
        }
    }

    /// Attributes of the first timestamped object of every track.
    pub fn attributes(&self) -> Vec<FaceAttribute> {
        self.tracks
            .iter()
            .filter_map(|t| t.timestamped_objects.first())
            .flat_map(|o| o.attributes.iter())
            .map(|a| FaceAttribute::new(a.name.clone(), a.confidence))
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub segment: Option<VideoSegment>,
    #[serde(default)]
    pub timestamped_objects: Vec<TimestampedObject>,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSegment {
    pub start_time_offset: Option<String>,
    pub end_time_offset: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampedObject {
    pub time_offset: Option<String>,
    #[serde(default)]
    pub attributes: Vec<DetectedAttribute>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedAttribute {
    pub name: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub value: String,
}

// =============================================================================
// Vision
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BatchAnnotateImagesRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

impl BatchAnnotateImagesRequest {
    pub fn face_detection(image: &[u8]) -> Self {
        Self {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: vec![Feature {
                    feature_type: FACE_DETECTION.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnotateImageRequest {
    pub image: ImageContent,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageContent {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchAnnotateImagesResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default)]
    pub face_annotations: Vec<FaceAnnotation>,
    pub error: Option<Status>,
}

/// One face found in a still image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceAnnotation {
    pub bounding_poly: Option<BoundingPoly>,
    #[serde(default)]
    pub detection_confidence: f64,
    #[serde(default)]
    pub joy_likelihood: LikelihoodLevel,
    #[serde(default)]
    pub sorrow_likelihood: LikelihoodLevel,
    #[serde(default)]
    pub anger_likelihood: LikelihoodLevel,
    #[serde(default)]
    pub surprise_likelihood: LikelihoodLevel,
}

impl FaceAnnotation {
    pub fn likelihoods(&self) -> EmotionLikelihoods {
        EmotionLikelihoods {
            joy: self.joy_likelihood,
            sorrow: self.sorrow_likelihood,
            anger: self.anger_likelihood,
            surprise: self.surprise_likelihood,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

/// Pixel vertex; omitted coordinates are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_annotate_video_request_shape() {
        let request = AnnotateVideoRequest::face_detection(b"abc");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "inputContent": "YWJj",
                "features": ["FACE_DETECTION"],
                "videoContext": {
                    "faceDetectionConfig": {"includeBoundingBoxes": true, "includeAttributes": true}
                }
            })
        );
    }

    #[test]
    fn test_image_request_shape() {
        let value = serde_json::to_value(BatchAnnotateImagesRequest::face_detection(b"abc")).unwrap();
        assert_eq!(value["requests"][0]["features"][0]["type"], "FACE_DETECTION");
        assert_eq!(value["requests"][0]["image"]["content"], "YWJj");
    }

    #[test]
    fn test_face_annotation_extraction() {
        let annotation: FaceDetectionAnnotation = serde_json::from_value(json!({
            "thumbnail": "aGVsbG8=",
            "tracks": [
                {
                    "segment": {"startTimeOffset": "1.250s", "endTimeOffset": "3s"},
                    "timestampedObjects": [
                        {"attributes": [{"name": "glasses", "confidence": 0.9}]},
                        {"attributes": [{"name": "ignored", "confidence": 0.1}]}
                    ]
                },
                {
                    "segment": {"startTimeOffset": "8s"},
                    "timestampedObjects": [{"attributes": [{"name": "smiling", "confidence": 0.7}]}]
                }
            ]
        }))
        .unwrap();

        assert_eq!(annotation.decode_thumbnail().unwrap(), b"hello");
        assert_eq!(annotation.first_segment_start().unwrap(), Duration::from_millis(1250));

        let names: Vec<String> = annotation.attributes().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["glasses", "smiling"]);
    }

    #[test]
    fn test_face_annotation_without_tracks() {
        let annotation = FaceDetectionAnnotation::default();
        assert_eq!(annotation.first_segment_start().unwrap(), Duration::ZERO);
        assert!(annotation.attributes().is_empty());
    }

    #[test]
    fn test_bad_thumbnail_is_invalid_response() {
        let annotation = FaceDetectionAnnotation {
            thumbnail: "***".to_string(),
            ..Default::default()
        };
        assert!(annotation.decode_thumbnail().unwrap_err().is_data_contract());
    }

    #[test]
    fn test_attribute_without_name_is_rejected() {
        let parsed: Result<DetectedAttribute, _> = serde_json::from_value(json!({"confidence": 0.5}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_vision_face_annotation_defaults() {
        let face: FaceAnnotation = serde_json::from_value(json!({
            "boundingPoly": {"vertices": [{"y": 4}, {"x": 10, "y": 4}, {"x": 10, "y": 20}, {"y": 20}]},
            "detectionConfidence": 0.98,
            "joyLikelihood": "LIKELY"
        }))
        .unwrap();

        let poly = face.bounding_poly.as_ref().unwrap();
        assert_eq!(poly.vertices[0], Vertex { x: 0, y: 4 });
        assert_eq!(face.likelihoods().joy, LikelihoodLevel::Likely);
        assert_eq!(face.likelihoods().anger, LikelihoodLevel::Unknown);
    }
}
