//! Upload-then-sign behaviour of `SignedUrlStore` against a mock bucket.

use std::time::Duration;

use vface_storage::{
    GcsClient, GcsConfig, SignedUrlStore, StorageError, ThumbnailStore, JPEG_CONTENT_TYPE,
};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUCKET: &str = "video-faces";
const KEY: &str = "clip/0.jpg";

fn store_for(server: &MockServer) -> SignedUrlStore {
    let config = GcsConfig {
        endpoint_url: server.uri(),
        access_key_id: "GOOGTESTKEY".to_string(),
        secret_access_key: "secret".to_string(),
        region: "auto".to_string(),
    };
    SignedUrlStore::new(GcsClient::new(&config, BUCKET), Duration::from_secs(900))
}

#[tokio::test]
async fn test_store_uploads_before_returning_url() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/{}/{}", BUCKET, KEY)))
        .and(header("content-type", JPEG_CONTENT_TYPE))
        .and(header_exists("content-encoding"))
        .and(header_exists("cache-control"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let url = store
        .store(KEY, &[0xFF, 0xD8, 0xFF, 0xE0], JPEG_CONTENT_TYPE)
        .await
        .unwrap();

    // The write has landed by the time the URL is handed back
    server.verify().await;

    assert!(url.starts_with(&format!("{}/{}/{}?", server.uri(), BUCKET, KEY)));
    assert!(url.contains("X-Amz-Expires=900"));
    assert!(url.contains("X-Amz-Signature="));
}

#[tokio::test]
async fn test_rejected_upload_yields_no_url() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/{}/{}", BUCKET, KEY)))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("content-type", "application/xml")
                .set_body_string(
                    "<?xml version='1.0' encoding='UTF-8'?>\
                     <Error><Code>AccessDenied</Code><Message>Access denied.</Message></Error>",
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let result = store.store(KEY, b"jpeg", JPEG_CONTENT_TYPE).await;

    match result {
        Err(StorageError::UploadFailed(msg)) => assert!(msg.starts_with(KEY)),
        other => panic!("expected UploadFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_check_reports_unreachable_bucket() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path(format!("/{}", BUCKET)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = store_for(&server);
    assert!(matches!(store.check().await, Err(StorageError::Unreachable(_))));
}
