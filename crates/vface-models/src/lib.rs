//! Shared data models for the VFace backend.
//!
//! This crate provides Serde-serializable types for:
//! - Per-face observations extracted from detection results
//! - Likelihood levels and the emotion classifier
//! - Attribute and emotion grouping of face results
//! - Segment timestamp and elapsed-time formatting

pub mod emotion;
pub mod face;
pub mod grouping;
pub mod timestamp;

// Re-export common types
pub use emotion::{classify, EmotionLabel, EmotionLikelihoods, LikelihoodLevel};
pub use face::{FaceAttribute, FaceObservation};
pub use grouping::{
    group_by_attribute, group_by_emotion, AttributeFace, AttributeGroup, EmotionFace, EmotionGroups,
};
pub use timestamp::{format_elapsed, format_segment_timestamp, parse_duration, TimestampError};
