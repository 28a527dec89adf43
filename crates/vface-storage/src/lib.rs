//! Cloud Storage thumbnail store.
//!
//! This crate provides:
//! - Gzip-encoded uploads through the S3-compatible XML API (HMAC keys)
//! - Presigned, time-limited read URLs
//! - Deterministic object keys for face thumbnails and crops

pub mod client;
pub mod error;
pub mod keys;
pub mod store;

pub use client::{GcsClient, GcsConfig};
pub use error::{StorageError, StorageResult};
pub use keys::{image_face_key, image_folder, video_face_key, video_stem};
pub use store::{SignedUrlStore, ThumbnailStore, JPEG_CONTENT_TYPE};
