//! Cloud Storage client over the S3-compatible XML API.

use std::io::Write;
use std::time::Duration;

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};

pub const DEFAULT_ENDPOINT_URL: &str = "https://storage.googleapis.com";

/// Objects are immutable once written.
pub const CACHE_CONTROL: &str = "public, max-age=31536000";

/// Configuration for the storage client.
#[derive(Debug, Clone)]
pub struct GcsConfig {
    /// Interoperability endpoint URL
    pub endpoint_url: String,
    /// HMAC access key ID
    pub access_key_id: String,
    /// HMAC secret
    pub secret_access_key: String,
    pub region: String,
}

impl GcsConfig {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Ok(Self {
            endpoint_url: std::env::var("GCS_ENDPOINT_URL")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT_URL.to_string()),
            access_key_id: std::env::var("GCS_HMAC_ACCESS_KEY_ID")
                .map_err(|_| StorageError::config_error("GCS_HMAC_ACCESS_KEY_ID not set"))?,
            secret_access_key: std::env::var("GCS_HMAC_SECRET")
                .map_err(|_| StorageError::config_error("GCS_HMAC_SECRET not set"))?,
            region: std::env::var("GCS_REGION").unwrap_or_else(|_| "auto".to_string()),
        })
    }
}

/// Client bound to a single bucket.
#[derive(Clone)]
pub struct GcsClient {
    client: Client,
    bucket: String,
}

impl GcsClient {
    pub fn new(config: &GcsConfig, bucket: impl Into<String>) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "gcs-hmac",
        );

        let sdk_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint_url)
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(sdk_config),
            bucket: bucket.into(),
        }
    }

    /// Same credentials, different bucket.
    pub fn with_bucket(&self, bucket: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Upload bytes gzip-encoded with a long cache lifetime.
    pub async fn upload_gzip(&self, data: &[u8], key: &str, content_type: &str) -> StorageResult<()> {
        let compressed = gzip(data)?;
        debug!(
            bucket = %self.bucket,
            key = %key,
            bytes = data.len(),
            compressed = compressed.len(),
            "Uploading object"
        );

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(compressed))
            .content_type(content_type)
            .content_encoding("gzip")
            .cache_control(CACHE_CONTROL)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(format!("{}: {}", key, e)))?;

        info!(bucket = %self.bucket, key = %key, "Uploaded object");
        Ok(())
    }

    /// Generate a presigned URL for GET.
    pub async fn presign_get(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let presign_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::PresignFailed(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presign_config)
            .await
            .map_err(|e| StorageError::PresignFailed(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }

    /// Check connectivity by performing a head bucket operation.
    pub async fn check_connectivity(&self) -> StorageResult<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| StorageError::Unreachable(format!("{}: {}", self.bucket, e)))?;
        Ok(())
    }
}

/// Gzip-compress a payload.
pub fn gzip(data: &[u8]) -> StorageResult<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
