use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    DEFAULT_MERGE_GAP_SEC, DEFAULT_MIN_LEN_SEC, DEFAULT_PAD_SEC, DEFAULT_THRESHOLD,
};

#[derive(Error, Debug, PartialEq)]
pub enum PlanError {
    #[error("{name} must be {expected}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("video duration must be a non-negative number of seconds, got {0}")]
    InvalidDuration(f64),
}

/// The four caller-supplied knobs of a planning run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanParams {
    /// Minimum score for an utterance to count as a hit.
    pub threshold: f64,
    /// Padded segments shorter than this are dropped.
    pub min_len_sec: f64,
    /// Largest gap between hits that still merges them (inclusive).
    pub merge_gap_sec: f64,
    /// Margin added on both sides of each merged interval.
    pub pad_sec: f64,
}

impl Default for PlanParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_len_sec: DEFAULT_MIN_LEN_SEC,
            merge_gap_sec: DEFAULT_MERGE_GAP_SEC,
            pad_sec: DEFAULT_PAD_SEC,
        }
    }
}

impl PlanParams {
    pub fn validate(&self) -> Result<(), PlanError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PlanError::InvalidParameter {
                name: "threshold",
                value: self.threshold,
                expected: "between 0.0 and 1.0",
            });
        }
        let lengths = [
            ("min_len_sec", self.min_len_sec),
            ("merge_gap_sec", self.merge_gap_sec),
            ("pad_sec", self.pad_sec),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanError::InvalidParameter {
                    name,
                    value,
                    expected: "a non-negative number of seconds",
                });
            }
        }
        Ok(())
    }
}

/// `None` and zero both mean "unknown"; anything else must be a real length.
pub fn validate_duration(video_duration: Option<f64>) -> Result<(), PlanError> {
    match video_duration {
        Some(d) if !d.is_finite() || d < 0.0 => Err(PlanError::InvalidDuration(d)),
        _ => Ok(()),
    }
}
