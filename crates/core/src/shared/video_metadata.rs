use serde::{Deserialize, Serialize};

/// Per-video metadata recorded at ingest time.
///
/// Only the duration feeds planning; a duration of zero means the ingest step
/// could not determine it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    #[serde(default)]
    pub video_id: String,
    #[serde(rename = "dur_sec", default)]
    pub duration_secs: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl VideoMetadata {
    /// Upper bound for segment end times, or `None` when the duration is unknown.
    pub fn clamp_limit(&self) -> Option<f64> {
        (self.duration_secs > 0.0).then_some(self.duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let meta = VideoMetadata {
            video_id: "abc123".to_string(),
            duration_secs: 1800.0,
            title: Some("Two Sum walkthrough".to_string()),
        };
        assert_eq!(meta.video_id, "abc123");
        assert_eq!(meta.duration_secs, 1800.0);
        assert_eq!(meta.clamp_limit(), Some(1800.0));
    }

    #[test]
    fn test_zero_duration_disables_clamp() {
        let meta = VideoMetadata {
            video_id: "abc123".to_string(),
            duration_secs: 0.0,
            title: None,
        };
        assert_eq!(meta.clamp_limit(), None);
    }

    #[test]
    fn test_deserializes_ingest_field_names() {
        let meta: VideoMetadata =
            serde_json::from_str(r#"{"video_id": "xyz", "dur_sec": 612.5}"#).unwrap();
        assert_eq!(meta.duration_secs, 612.5);
        assert!(meta.title.is_none());
    }

    #[test]
    fn test_missing_duration_defaults_to_unknown() {
        let meta: VideoMetadata = serde_json::from_str(r#"{"video_id": "xyz"}"#).unwrap();
        assert_eq!(meta.clamp_limit(), None);
    }
}
