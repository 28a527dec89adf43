//! Bounding-polygon crops.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};
use tracing::debug;
use vface_vision::Vertex;

use crate::error::{MediaError, MediaResult};

pub const JPEG_QUALITY: u8 = 90;

/// Pixel rectangle inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Rectangle spanned by a 4-vertex bounding polygon.
    ///
    /// Origin is the smallest x and y; width is the distance between the
    /// first two vertices, height between the second and third.
    pub fn from_vertices(vertices: &[Vertex]) -> MediaResult<Self> {
        if vertices.len() < 4 {
            return Err(MediaError::MalformedPolygon(vertices.len()));
        }

        let left = vertices.iter().map(|v| v.x).min().unwrap_or(0).max(0);
        let top = vertices.iter().map(|v| v.y).min().unwrap_or(0).max(0);

        Ok(Self {
            left: left as u32,
            top: top as u32,
            width: vertices[1].x.abs_diff(vertices[0].x),
            height: vertices[2].y.abs_diff(vertices[1].y),
        })
    }

    /// Shrink the rectangle to fit inside `width`x`height`.
    pub fn clamp_to(self, width: u32, height: u32) -> MediaResult<Self> {
        let left = self.left.min(width);
        let top = self.top.min(height);
        let clamped = Self {
            left,
            top,
            width: self.width.min(width - left),
            height: self.height.min(height - top),
        };

        if clamped.width == 0 || clamped.height == 0 {
            return Err(MediaError::EmptyCrop { width, height });
        }
        Ok(clamped)
    }
}

/// Decoded source image for cutting out several faces.
pub struct FaceCropper {
    image: DynamicImage,
}

impl FaceCropper {
    pub fn new(bytes: &[u8]) -> MediaResult<Self> {
        let image = image::load_from_memory(bytes).map_err(|e| MediaError::Decode(e.to_string()))?;
        Ok(Self { image })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Crop the face bounded by `vertices` and encode it as JPEG.
    pub fn crop(&self, vertices: &[Vertex]) -> MediaResult<Vec<u8>> {
        let (width, height) = self.dimensions();
        let rect = CropRect::from_vertices(vertices)?.clamp_to(width, height)?;

        let face = self
            .image
            .crop_imm(rect.left, rect.top, rect.width, rect.height)
            .to_rgb8();

        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
            .encode_image(&face)
            .map_err(|e| MediaError::Encode(e.to_string()))?;

        debug!(?rect, bytes = out.len(), "Cropped face");
        Ok(out)
    }
}
