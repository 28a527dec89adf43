//! HTTP-level tests for the detection clients against a mock server.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use vface_vision::{
    ImageFaceDetector, RetryConfig, StaticToken, VideoFaceAnnotator, VideoIntelligenceClient,
    VisionClient, VisionConfig, VisionError,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OPERATION: &str = "projects/test/locations/us-east1/operations/42";

fn test_config(server: &MockServer) -> VisionConfig {
    VisionConfig {
        video_intelligence_url: server.uri(),
        vision_url: server.uri(),
        request_timeout: Duration::from_secs(5),
        operation_timeout: Duration::from_secs(5),
        poll_interval: Duration::from_millis(10),
        retry: RetryConfig {
            max_retries: 2,
            base_delay_ms: 1,
            max_delay_ms: 5,
        },
    }
}

fn token() -> Arc<StaticToken> {
    Arc::new(StaticToken("test-token".to_string()))
}

fn finished_operation() -> serde_json::Value {
    json!({
        "name": OPERATION,
        "done": true,
        "response": {
            "annotationResults": [{
                "faceDetectionAnnotations": [{
                    "thumbnail": "aGVsbG8=",
                    "tracks": [{
                        "segment": {"startTimeOffset": "2.500s", "endTimeOffset": "4s"},
                        "timestampedObjects": [{
                            "timeOffset": "2.500s",
                            "attributes": [{"name": "smiling", "confidence": 0.8}]
                        }]
                    }]
                }]
            }]
        }
    })
}

#[tokio::test]
async fn test_video_annotation_polls_until_done() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/videos:annotate"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({"features": ["FACE_DETECTION"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": OPERATION})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/{}", OPERATION)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": OPERATION})))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/{}", OPERATION)))
        .respond_with(ResponseTemplate::new(200).set_body_json(finished_operation()))
        .mount(&server)
        .await;

    let client = VideoIntelligenceClient::new(test_config(&server), token()).unwrap();
    let faces = client.annotate_faces(b"video-bytes").await.unwrap();

    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].decode_thumbnail().unwrap(), b"hello");
    assert_eq!(faces[0].first_segment_start().unwrap(), Duration::from_millis(2500));
    assert_eq!(faces[0].attributes()[0].name, "smiling");
}

#[tokio::test]
async fn test_video_annotation_retries_transient_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/videos:annotate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/videos:annotate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(finished_operation()))
        .mount(&server)
        .await;

    let client = VideoIntelligenceClient::new(test_config(&server), token()).unwrap();
    let faces = client.annotate_faces(b"video-bytes").await.unwrap();
    assert_eq!(faces.len(), 1);
}

#[tokio::test]
async fn test_video_annotation_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/videos:annotate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": OPERATION})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/{}", OPERATION)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": OPERATION, "done": false})))
        .mount(&server)
        .await;

    let mut config = test_config(&server);
    config.operation_timeout = Duration::from_millis(100);

    let client = VideoIntelligenceClient::new(config, token()).unwrap();
    let err = client.annotate_faces(b"video-bytes").await.unwrap_err();
    assert!(matches!(err, VisionError::Timeout(_)));
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_video_annotation_rejects_bad_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/videos:annotate"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid input"))
        .expect(1)
        .mount(&server)
        .await;

    let client = VideoIntelligenceClient::new(test_config(&server), token()).unwrap();
    let err = client.annotate_faces(b"not-a-video").await.unwrap_err();
    assert!(matches!(err, VisionError::RequestFailed(_)));
}

#[tokio::test]
async fn test_image_detection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/images:annotate"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responses": [{
                "faceAnnotations": [{
                    "boundingPoly": {"vertices": [{"x": 1, "y": 2}, {"x": 11, "y": 2}, {"x": 11, "y": 22}, {"x": 1, "y": 22}]},
                    "detectionConfidence": 0.93,
                    "joyLikelihood": "VERY_LIKELY",
                    "sorrowLikelihood": "VERY_UNLIKELY"
                }]
            }]
        })))
        .mount(&server)
        .await;

    let client = VisionClient::new(test_config(&server), token()).unwrap();
    let faces = client.detect_faces(b"jpeg").await.unwrap();

    assert_eq!(faces.len(), 1);
    assert!((faces[0].detection_confidence - 0.93).abs() < f64::EPSILON);
    assert_eq!(faces[0].bounding_poly.as_ref().unwrap().vertices.len(), 4);
}

#[tokio::test]
async fn test_image_detection_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/images:annotate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = VisionClient::new(test_config(&server), token()).unwrap();
    let err = client.detect_faces(b"jpeg").await.unwrap_err();
    assert!(err.is_data_contract());
}
