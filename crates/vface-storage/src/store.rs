//! Upload-then-sign thumbnail store.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use crate::client::GcsClient;
use crate::error::StorageResult;

pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Persists face images and hands back a readable reference.
#[async_trait]
pub trait ThumbnailStore: Send + Sync {
    /// Write `data` at `key`, then return a time-limited read URL for it.
    ///
    /// The URL is only issued after the write has completed.
    async fn store(&self, key: &str, data: &[u8], content_type: &str) -> StorageResult<String>;

    /// Verify the backing bucket is reachable.
    async fn check(&self) -> StorageResult<()>;
}

/// Bucket-backed store issuing presigned GET URLs.
#[derive(Clone)]
pub struct SignedUrlStore {
    client: GcsClient,
    url_ttl: Duration,
}

impl SignedUrlStore {
    pub fn new(client: GcsClient, url_ttl: Duration) -> Self {
        Self { client, url_ttl }
    }

    pub fn bucket(&self) -> &str {
        self.client.bucket()
    }
}

#[async_trait]
impl ThumbnailStore for SignedUrlStore {
    async fn store(&self, key: &str, data: &[u8], content_type: &str) -> StorageResult<String> {
        let start = Instant::now();
        self.client.upload_gzip(data, key, content_type).await?;
        let url = self.client.presign_get(key, self.url_ttl).await?;

        debug!(
            bucket = %self.client.bucket(),
            key = %key,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Stored thumbnail"
        );
        Ok(url)
    }

    async fn check(&self) -> StorageResult<()> {
        self.client.check_connectivity().await
    }
}
