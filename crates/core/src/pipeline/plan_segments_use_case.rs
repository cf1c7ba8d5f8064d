use crate::persistence::domain::plan_store::PlanStore;
use crate::planning::domain::segment_plan::SegmentPlan;
use crate::planning::domain::segment_planner::SegmentPlanner;
use crate::shared::BoxError;
use crate::transcript::domain::transcript_reader::TranscriptReader;
use crate::transcript::domain::utterance::skip_leading;
use crate::video::domain::metadata_reader::MetadataReader;

/// Plans and persists the code segments of one video at a time.
pub struct PlanSegmentsUseCase {
    transcripts: Box<dyn TranscriptReader>,
    metadata: Box<dyn MetadataReader>,
    store: Box<dyn PlanStore>,
    planner: SegmentPlanner,
    start_offset_sec: f64,
}

impl PlanSegmentsUseCase {
    pub fn new(
        transcripts: Box<dyn TranscriptReader>,
        metadata: Box<dyn MetadataReader>,
        store: Box<dyn PlanStore>,
        planner: SegmentPlanner,
        start_offset_sec: f64,
    ) -> Self {
        Self {
            transcripts,
            metadata,
            store,
            planner,
            start_offset_sec,
        }
    }

    pub fn run(&self, video_id: &str) -> Result<SegmentPlan, BoxError> {
        let pad_sec = self.planner.params().pad_sec;

        // 1. Duration bounds the padded segments; unknown means no clamp
        let limit = self
            .metadata
            .read_metadata(video_id)?
            .and_then(|m| m.clamp_limit());
        if limit.is_none() {
            log::debug!("[{video_id}] no duration known, segment ends are not clamped");
        }

        // 2. No transcript still produces a plan so the video is not retried blindly
        let Some(utterances) = self.transcripts.read_transcript(video_id)? else {
            log::warn!("[{video_id}] no transcript found, marking for alignment");
            let plan = SegmentPlan::needs_alignment(video_id, pad_sec);
            self.store.write_plan(&plan)?;
            return Ok(plan);
        };

        // 3. Intro chatter rarely shows code
        let total = utterances.len();
        let utterances = skip_leading(utterances, self.start_offset_sec);
        log::debug!(
            "[{video_id}] {} of {total} utterances after {}s offset",
            utterances.len(),
            self.start_offset_sec
        );

        // 4. Plan and persist
        let segments = self.planner.plan(&utterances, limit)?;
        let plan = SegmentPlan::new(video_id, segments, pad_sec);
        self.store.write_plan(&plan)?;

        log::info!(
            "[{video_id}] planned {} segments covering {:.1}s",
            plan.segments.len(),
            plan.total_duration_secs()
        );
        Ok(plan)
    }

    /// Every video that has a transcript, in a stable order.
    pub fn video_ids(&self) -> Result<Vec<String>, BoxError> {
        self.transcripts.list_video_ids()
    }
}
