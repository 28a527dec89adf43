//! Business logic services.

pub mod face_analysis;

pub use face_analysis::{AttributeReport, FaceAnalysisService, FaceStores, ImageFace, ImageReport};
