use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::persistence::domain::plan_store::PlanStore;
use crate::planning::domain::segment_plan::SegmentPlan;
use crate::shared::constants::SEGMENTS_FILENAME;
use crate::shared::video_id::{check_video_id, InvalidVideoId};
use crate::shared::BoxError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to create plan directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write plan to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read plan {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid plan JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    VideoId(#[from] InvalidVideoId),
}

/// Stores plans as `<root>/<video_id>/segments.json`.
pub struct JsonPlanStore {
    root: PathBuf,
}

impl JsonPlanStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn plan_path(&self, video_id: &str) -> Result<PathBuf, StoreError> {
        let dir = check_video_id(video_id)?;
        Ok(self.root.join(dir).join(SEGMENTS_FILENAME))
    }
}

impl PlanStore for JsonPlanStore {
    fn write_plan(&self, plan: &SegmentPlan) -> Result<(), BoxError> {
        let dest = self.plan_path(&plan.video_id)?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_vec_pretty(plan).map_err(|e| StoreError::Json {
            path: dest.clone(),
            source: e,
        })?;
        write_atomic(&dest, &json)?;
        log::debug!("[{}] wrote plan to {}", plan.video_id, dest.display());
        Ok(())
    }

    fn read_plan(&self, video_id: &str) -> Result<Option<SegmentPlan>, BoxError> {
        let path = self.plan_path(video_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path).map_err(|e| StoreError::Read {
            path: path.clone(),
            source: e,
        })?;
        let plan = serde_json::from_str(&json).map_err(|e| StoreError::Json {
            path: path.clone(),
            source: e,
        })?;
        Ok(Some(plan))
    }
}

/// Write to a sibling `.part` file, then rename over the destination so
/// readers never observe a half-written plan.
fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let temp_path = dest.with_extension("part");
    let write = |path: &Path| -> Result<(), StoreError> {
        let mut file = fs::File::create(path).map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|e| StoreError::Write {
                path: path.to_path_buf(),
                source: e,
            })
    };

    if let Err(e) = write(&temp_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, dest).map_err(|e| StoreError::Write {
        path: dest.to_path_buf(),
        source: e,
    })
}
