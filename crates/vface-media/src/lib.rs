//! Face crop extraction.
//!
//! Turns a detection bounding polygon into a pixel rectangle, cuts it out of
//! the source image and re-encodes it as JPEG.

pub mod crop;
pub mod error;

pub use crop::{CropRect, FaceCropper, JPEG_QUALITY};
pub use error::{MediaError, MediaResult};
