//! Deterministic object key builders.

use vface_models::EmotionLabel;

/// Folder name for the faces of one uploaded video.
///
/// The uploaded filename without directory or extension, restricted to
/// `[A-Za-z0-9._-]`. A random UUID when no usable name was supplied.
pub fn video_stem(filename: Option<&str>) -> String {
    let base = filename
        .map(|name| name.rsplit(['/', '\\']).next().unwrap_or(name))
        .unwrap_or_default();

    let stem = match base.rfind('.') {
        Some(pos) if pos > 0 => &base[..pos],
        _ => base,
    };

    let sanitized: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(|c| c == '.' || c == '_').is_empty() {
        uuid::Uuid::new_v4().to_string()
    } else {
        sanitized
    }
}

/// `<stem>/<id>.jpg`
pub fn video_face_key(stem: &str, id: u32) -> String {
    format!("{}/{}.jpg", stem, id)
}

/// `output_faces_with_emotions_<epoch millis>`
pub fn image_folder(epoch_millis: i64) -> String {
    format!("output_faces_with_emotions_{}", epoch_millis)
}

/// `<folder>/<emotion>/<index>.jpg`
pub fn image_face_key(folder: &str, emotion: EmotionLabel, index: u32) -> String {
    format!("{}/{}/{}.jpg", folder, emotion, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_stem_strips_path_and_extension() {
        assert_eq!(video_stem(Some("party.mp4")), "party");
        assert_eq!(video_stem(Some("/tmp/uploads/party.final.mov")), "party.final");
        assert_eq!(video_stem(Some("C:\\videos\\clip.avi")), "clip");
        assert_eq!(video_stem(Some("noext")), "noext");
    }

    #[test]
    fn test_video_stem_sanitizes() {
        assert_eq!(video_stem(Some("my video (1).mp4")), "my_video__1_");
        assert_eq!(video_stem(Some("..%2f.mp4")), ".._2f");
    }

    #[test]
    fn test_video_stem_falls_back_to_uuid() {
        for name in [None, Some(""), Some("???.mp4"), Some("dir/")] {
            let stem = video_stem(name);
            assert!(uuid::Uuid::parse_str(&stem).is_ok(), "{:?} -> {}", name, stem);
        }
    }

    #[test]
    fn test_face_keys() {
        assert_eq!(video_face_key("party", 3), "party/3.jpg");
        assert_eq!(image_folder(1_700_000_000_123), "output_faces_with_emotions_1700000000123");
        assert_eq!(
            image_face_key("output_faces_with_emotions_1", EmotionLabel::CannotDetect, 0),
            "output_faces_with_emotions_1/cannot-detect/0.jpg"
        );
    }
}
