//! Likelihood levels and emotion classification.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ordinal likelihood bucket reported by the detection service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LikelihoodLevel {
    VeryUnlikely,
    Unlikely,
    Possible,
    Likely,
    VeryLikely,
    /// Any value the service sends that is not a known bucket.
    #[default]
    #[serde(other)]
    Unknown,
}

impl LikelihoodLevel {
    /// Whether this level counts as a positive signal.
    ///
    /// `POSSIBLE` is the inclusion floor.
    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            LikelihoodLevel::Possible | LikelihoodLevel::Likely | LikelihoodLevel::VeryLikely
        )
    }
}

/// The four emotional likelihoods of a single face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct EmotionLikelihoods {
    pub joy: LikelihoodLevel,
    pub sorrow: LikelihoodLevel,
    pub anger: LikelihoodLevel,
    pub surprise: LikelihoodLevel,
}

/// Coarse emotion label assigned to a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EmotionLabel {
    Joyful,
    Sad,
    Angry,
    Surprise,
    CannotDetect,
}

impl EmotionLabel {
    /// All labels, in classification priority order.
    pub const ALL: [EmotionLabel; 5] = [
        EmotionLabel::Joyful,
        EmotionLabel::Sad,
        EmotionLabel::Angry,
        EmotionLabel::Surprise,
        EmotionLabel::CannotDetect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Joyful => "joyful",
            EmotionLabel::Sad => "sad",
            EmotionLabel::Angry => "angry",
            EmotionLabel::Surprise => "surprise",
            EmotionLabel::CannotDetect => "cannot-detect",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a face's likelihoods to one emotion label.
///
/// Categories are checked in fixed order (joy, sorrow, anger, surprise) and
/// the first positive one wins, regardless of which signal is strongest.
pub fn classify(likelihoods: &EmotionLikelihoods) -> EmotionLabel {
    if likelihoods.joy.is_positive() {
        EmotionLabel::Joyful
    } else if likelihoods.sorrow.is_positive() {
        EmotionLabel::Sad
    } else if likelihoods.anger.is_positive() {
        EmotionLabel::Angry
    } else if likelihoods.surprise.is_positive() {
        EmotionLabel::Surprise
    } else {
        EmotionLabel::CannotDetect
    }
}
