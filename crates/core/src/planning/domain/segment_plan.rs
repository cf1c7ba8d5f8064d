use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::constants::{NO_TRANSCRIPT_REASON, SCORER_VERSION};

use super::frame_window::FrameWindow;
use super::segment::Segment;

/// Out-of-band flags recorded alongside a plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanNotes {
    /// Set when no transcript existed; downstream can trigger ASR backfill.
    pub needs_alignment: bool,
    pub reason: String,
}

/// The persisted result of planning one video.
///
/// Carries the scorer version and padding so consumers can tell whether a
/// re-plan with today's settings would produce different segments. An empty
/// `segments` list with notes means "planned, nothing to plan from", which is
/// distinct from having no plan at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentPlan {
    pub video_id: String,
    pub planned_at: DateTime<Utc>,
    pub scorer_version: String,
    pub pad_sec: f64,
    pub segments: Vec<Segment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<PlanNotes>,
}

impl SegmentPlan {
    pub fn new(video_id: impl Into<String>, segments: Vec<Segment>, pad_sec: f64) -> Self {
        Self {
            video_id: video_id.into(),
            planned_at: Utc::now(),
            scorer_version: SCORER_VERSION.to_string(),
            pad_sec,
            segments,
            notes: None,
        }
    }

    /// Empty plan for a video without a transcript.
    pub fn needs_alignment(video_id: impl Into<String>, pad_sec: f64) -> Self {
        Self {
            notes: Some(PlanNotes {
                needs_alignment: true,
                reason: NO_TRANSCRIPT_REASON.to_string(),
            }),
            ..Self::new(video_id, Vec::new(), pad_sec)
        }
    }

    pub fn is_alignment_needed(&self) -> bool {
        self.notes.as_ref().is_some_and(|n| n.needs_alignment)
    }

    /// True when this plan was produced by another scorer version or padding.
    pub fn is_stale(&self, pad_sec: f64) -> bool {
        self.scorer_version != SCORER_VERSION || self.pad_sec != pad_sec
    }

    /// Windows for frame sampling. With `limit`, only the last `limit`
    /// segments are returned. Windows without positive length are skipped.
    pub fn frame_windows(&self, limit: Option<usize>) -> Vec<FrameWindow> {
        let skip = limit.map_or(0, |n| self.segments.len().saturating_sub(n));
        self.segments
            .iter()
            .skip(skip)
            .filter(|s| s.duration() > 0.0)
            .map(Segment::frame_window)
            .collect()
    }

    /// Sum of segment lengths; overlapping padding is counted twice.
    pub fn total_duration_secs(&self) -> f64 {
        self.segments
            .iter()
            .fold(0.0, |total, s| total + s.duration())
    }
}
