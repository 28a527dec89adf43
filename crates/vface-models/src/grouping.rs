//! Reshaping flat face lists into grouped responses.
//!
//! Two groupings exist:
//! - by attribute name, where a face appears once per attribute it carries
//! - by emotion label, where every face appears in exactly one group
//!
//! Groups are created lazily on first occurrence and keep that first-seen
//! order; faces inside a group keep detection order.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::emotion::EmotionLabel;
use crate::face::{FaceAttribute, FaceObservation};

/// A face entry inside an attribute group.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct AttributeFace {
    pub faceid: u32,
    pub confidence: f64,
    pub img: String,
    pub timestamp: String,
}

/// All faces exhibiting one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct AttributeGroup {
    /// Attribute name
    pub attributes: String,
    pub faces: Vec<AttributeFace>,
}

/// Group faces by attribute name.
pub fn group_by_attribute(faces: &[FaceObservation]) -> Vec<AttributeGroup> {
    let mut groups: Vec<AttributeGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for face in faces {
        let img = face.image_ref();
        for attribute in &face.attributes {
            let slot = *index.entry(attribute.name.as_str()).or_insert_with(|| {
                groups.push(AttributeGroup {
                    attributes: attribute.name.clone(),
                    faces: Vec::new(),
                });
                groups.len() - 1
            });

            groups[slot].faces.push(AttributeFace {
                faceid: face.id,
                confidence: attribute.confidence,
                img: img.clone(),
                timestamp: face.timestamp.clone(),
            });
        }
    }

    groups
}

/// A full face record inside an emotion group.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmotionFace {
    pub id: u32,
    pub current_emotion: EmotionLabel,
    pub timestamp: String,
    pub img: String,
    pub attributes: Vec<FaceAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision_confid: Option<f64>,
}

impl From<&FaceObservation> for EmotionFace {
    fn from(face: &FaceObservation) -> Self {
        Self {
            id: face.id,
            current_emotion: face.emotion.unwrap_or(EmotionLabel::CannotDetect),
            timestamp: face.timestamp.clone(),
            img: face.image_ref(),
            attributes: face.attributes.clone(),
            vision_confid: face.detection_confidence,
        }
    }
}

/// Faces partitioned by emotion label.
///
/// Serializes as a JSON object keyed by label, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmotionGroups {
    groups: Vec<(EmotionLabel, Vec<EmotionFace>)>,
}

impl EmotionGroups {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of distinct labels present.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn get(&self, label: EmotionLabel) -> Option<&[EmotionFace]> {
        self.groups
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, faces)| faces.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmotionLabel, &[EmotionFace])> {
        self.groups.iter().map(|(l, faces)| (*l, faces.as_slice()))
    }

    /// Total faces across all groups.
    pub fn face_count(&self) -> usize {
        self.groups.iter().map(|(_, faces)| faces.len()).sum()
    }

    fn push(&mut self, label: EmotionLabel, face: EmotionFace) {
        match self.groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, faces)) => faces.push(face),
            None => self.groups.push((label, vec![face])),
        }
    }
}

impl Serialize for EmotionGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (label, faces) in &self.groups {
            map.serialize_entry(label.as_str(), faces)?;
        }
        map.end()
    }
}

/// Group faces by their assigned emotion.
///
/// A face with no emotion assigned lands in `cannot-detect`.
pub fn group_by_emotion(faces: &[FaceObservation]) -> EmotionGroups {
    let mut groups = EmotionGroups::default();
    for face in faces {
        let record = EmotionFace::from(face);
        groups.push(record.current_emotion, record);
    }
    groups
}
