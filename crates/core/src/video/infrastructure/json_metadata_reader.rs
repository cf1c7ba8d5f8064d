use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::shared::constants::METADATA_FILENAME;
use crate::shared::video_id::{check_video_id, InvalidVideoId};
use crate::shared::video_metadata::VideoMetadata;
use crate::shared::BoxError;
use crate::video::domain::metadata_reader::MetadataReader;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("failed to read metadata {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid metadata JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    VideoId(#[from] InvalidVideoId),
}

/// Reads `<root>/<video_id>/meta.json` as written by the ingest step.
pub struct JsonMetadataReader {
    root: PathBuf,
}

impl JsonMetadataReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl MetadataReader for JsonMetadataReader {
    fn read_metadata(&self, video_id: &str) -> Result<Option<VideoMetadata>, BoxError> {
        let dir = check_video_id(video_id).map_err(MetadataError::from)?;
        let path = self.root.join(dir).join(METADATA_FILENAME);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path).map_err(|e| MetadataError::Read {
            path: path.clone(),
            source: e,
        })?;
        let mut meta: VideoMetadata =
            serde_json::from_str(&json).map_err(|e| MetadataError::Parse {
                path: path.clone(),
                source: e,
            })?;
        if meta.video_id.is_empty() {
            meta.video_id = video_id.to_string();
        }
        Ok(Some(meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_meta(root: &std::path::Path, video_id: &str, json: &str) {
        let dir = root.join(video_id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(METADATA_FILENAME), json).unwrap();
    }

    #[test]
    fn test_reads_duration() {
        let tmp = TempDir::new().unwrap();
        write_meta(tmp.path(), "vid1", r#"{"dur_sec": 1234.5, "title": "LRU cache"}"#);

        let reader = JsonMetadataReader::new(tmp.path());
        let meta = reader.read_metadata("vid1").unwrap().unwrap();
        assert_eq!(meta.duration_secs, 1234.5);
        assert_eq!(meta.video_id, "vid1");
        assert_eq!(meta.title.as_deref(), Some("LRU cache"));
    }

    #[test]
    fn test_missing_metadata_is_none() {
        let tmp = TempDir::new().unwrap();
        let reader = JsonMetadataReader::new(tmp.path());
        assert!(reader.read_metadata("vid1").unwrap().is_none());
    }

    #[test]
    fn test_bad_json_is_error() {
        let tmp = TempDir::new().unwrap();
        write_meta(tmp.path(), "vid1", r#"{"dur_sec": "long"}"#);
        let reader = JsonMetadataReader::new(tmp.path());
        let err = reader.read_metadata("vid1").unwrap_err();
        assert!(err.to_string().contains("invalid metadata JSON"));
    }

    #[test]
    fn test_rejects_nested_video_id() {
        let tmp = TempDir::new().unwrap();
        write_meta(tmp.path(), "vid1", r#"{"dur_sec": 10.0}"#);
        let reader = JsonMetadataReader::new(tmp.path());

        let err = reader.read_metadata("vid1/..").unwrap_err();
        assert!(err.to_string().contains("invalid video id"));
    }
}
