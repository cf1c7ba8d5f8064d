use crate::planning::domain::segment_plan::SegmentPlan;
use crate::shared::BoxError;

/// Domain interface for storing one plan per video.
///
/// Writes replace the previous plan for the video as a whole; segments are
/// never patched in place.
pub trait PlanStore: Send + Sync {
    fn write_plan(&self, plan: &SegmentPlan) -> Result<(), BoxError>;

    /// Returns `None` if the video has never been planned.
    fn read_plan(&self, video_id: &str) -> Result<Option<SegmentPlan>, BoxError>;
}
