//! Error types for media operations.

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while cropping faces.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Bounding polygon needs 4 vertices, got {0}")]
    MalformedPolygon(usize),

    #[error("Crop region is empty after clamping to {width}x{height}")]
    EmptyCrop { width: u32, height: u32 },

    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Image encode failed: {0}")]
    Encode(String),
}
