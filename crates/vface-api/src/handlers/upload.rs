//! Multipart upload extraction.

use axum::body::Bytes;
use axum::extract::Multipart;
use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// A file read from one multipart field.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Read the file in `field`, skipping any other fields.
pub async fn read_file_field(multipart: &mut Multipart, field: &str) -> ApiResult<UploadedFile> {
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_upload(e.body_text()))?
    {
        if part.name() != Some(field) {
            continue;
        }

        let filename = part.file_name().map(str::to_string);
        let content_type = part.content_type().map(str::to_string);
        let data = part
            .bytes()
            .await
            .map_err(|e| ApiError::invalid_upload(e.body_text()))?;

        if data.is_empty() {
            return Err(ApiError::no_media(field));
        }

        debug!(
            field = %field,
            filename = ?filename,
            content_type = ?content_type,
            bytes = data.len(),
            "Received upload"
        );
        return Ok(UploadedFile {
            filename,
            content_type,
            data,
        });
    }

    Err(ApiError::no_media(field))
}
