use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::TRANSCRIPT_FILENAME;
use crate::shared::video_id::{check_video_id, InvalidVideoId};
use crate::shared::BoxError;
use crate::transcript::domain::transcript_reader::TranscriptReader;
use crate::transcript::domain::utterance::Utterance;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("failed to read transcript {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid transcript JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to list work directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    VideoId(#[from] InvalidVideoId),
}

/// Reads utterance arrays from `<root>/<video_id>/transcript.json`.
pub struct JsonTranscriptReader {
    root: PathBuf,
}

impl JsonTranscriptReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn transcript_path(&self, video_id: &str) -> Result<PathBuf, TranscriptError> {
        let dir = check_video_id(video_id)?;
        Ok(self.root.join(dir).join(TRANSCRIPT_FILENAME))
    }

    fn parse(path: &Path) -> Result<Vec<Utterance>, TranscriptError> {
        let json = fs::read_to_string(path).map_err(|e| TranscriptError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| TranscriptError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl TranscriptReader for JsonTranscriptReader {
    fn read_transcript(&self, video_id: &str) -> Result<Option<Vec<Utterance>>, BoxError> {
        let path = self.transcript_path(video_id)?;
        if !path.exists() {
            log::debug!("[{video_id}] no transcript at {}", path.display());
            return Ok(None);
        }
        let utterances = Self::parse(&path)?;
        log::debug!("[{video_id}] loaded {} utterances", utterances.len());
        Ok(Some(utterances))
    }

    fn list_video_ids(&self) -> Result<Vec<String>, BoxError> {
        let entries = fs::read_dir(&self.root).map_err(|e| TranscriptError::ListDir {
            path: self.root.clone(),
            source: e,
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TranscriptError::ListDir {
                path: self.root.clone(),
                source: e,
            })?;
            let dir = entry.path();
            if dir.is_dir() && dir.join(TRANSCRIPT_FILENAME).exists() {
                if let Some(name) = dir.file_name().and_then(|n| n.to_str()) {
                    ids.push(name.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}
