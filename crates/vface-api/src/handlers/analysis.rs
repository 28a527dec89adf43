//! Face analysis handlers.

use axum::extract::{Multipart, State};
use axum::Json;
use vface_models::EmotionGroups;

use crate::error::ApiResult;
use crate::handlers::upload::read_file_field;
use crate::services::{AttributeReport, ImageReport};
use crate::state::AppState;

/// Multipart field carrying the video.
pub const VIDEO_FIELD: &str = "video";
/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// `POST /api/videointelligence`: faces grouped by attribute.
pub async fn analyze_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<AttributeReport>> {
    let upload = read_file_field(&mut multipart, VIDEO_FIELD).await?;
    let report = state
        .faces
        .analyze_video_attributes(&upload.data, upload.filename.as_deref())
        .await?;
    Ok(Json(report))
}

/// `POST /api/combined`: faces grouped by emotion.
pub async fn analyze_video_emotions(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<EmotionGroups>> {
    let upload = read_file_field(&mut multipart, VIDEO_FIELD).await?;
    let groups = state
        .faces
        .analyze_video_emotions(&upload.data, upload.filename.as_deref())
        .await?;
    Ok(Json(groups))
}

/// `POST /api/vision`: cropped faces with emotions.
pub async fn analyze_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ImageReport>> {
    let upload = read_file_field(&mut multipart, IMAGE_FIELD).await?;
    let report = state.faces.analyze_image(&upload.data).await?;
    Ok(Json(report))
}
