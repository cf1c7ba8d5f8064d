use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use crate::planning::domain::segment_plan::SegmentPlan;
use crate::shared::BoxError;

use super::pipeline_logger::PipelineLogger;

/// Work applied to each video of a batch.
pub type PlanJob = dyn Fn(&str) -> Result<SegmentPlan, BoxError> + Send + Sync;

/// What a successful plan looked like, kept small so outcomes stay cheap.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanSummary {
    pub segments: usize,
    pub covered_secs: f64,
    pub needs_alignment: bool,
}

impl From<&SegmentPlan> for PlanSummary {
    fn from(plan: &SegmentPlan) -> Self {
        Self {
            segments: plan.segments.len(),
            covered_secs: plan.total_duration_secs(),
            needs_alignment: plan.is_alignment_needed(),
        }
    }
}

/// Result of planning one video of a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchOutcome {
    pub video_id: String,
    pub result: Result<PlanSummary, String>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs a planning job over many videos.
///
/// Outcomes come back in the order of `video_ids`. A failing video is
/// recorded in its outcome and never stops the rest of the batch.
pub trait BatchExecutor: Send {
    fn execute(
        &self,
        video_ids: &[String],
        job: Arc<PlanJob>,
        logger: &mut dyn PipelineLogger,
    ) -> Vec<BatchOutcome>;
}

/// Plans videos one after another on the calling thread.
#[derive(Default)]
pub struct SequentialBatchExecutor;

impl BatchExecutor for SequentialBatchExecutor {
    fn execute(
        &self,
        video_ids: &[String],
        job: Arc<PlanJob>,
        logger: &mut dyn PipelineLogger,
    ) -> Vec<BatchOutcome> {
        let total = video_ids.len();
        video_ids
            .iter()
            .enumerate()
            .map(|(idx, video_id)| {
                let started = Instant::now();
                let outcome = run_job(&*job, video_id);
                logger.timing("plan", started.elapsed().as_secs_f64() * 1000.0);
                record_outcome(logger, &outcome);
                logger.progress(idx + 1, total);
                outcome
            })
            .collect()
    }
}

/// Runs the job for one video. A panic is contained and becomes that
/// video's error so the rest of the batch keeps going.
pub(crate) fn run_job(job: &PlanJob, video_id: &str) -> BatchOutcome {
    let result = match panic::catch_unwind(AssertUnwindSafe(|| job(video_id))) {
        Ok(Ok(plan)) => Ok(PlanSummary::from(&plan)),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => Err(format!("planning panicked: {}", panic_message(&*payload))),
    };
    BatchOutcome {
        video_id: video_id.to_string(),
        result,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

pub(crate) fn record_outcome(logger: &mut dyn PipelineLogger, outcome: &BatchOutcome) {
    match &outcome.result {
        Ok(summary) => {
            logger.metric("segments", summary.segments as f64);
            logger.metric("covered_secs", summary.covered_secs);
            if summary.needs_alignment {
                logger.info(&format!("[{}] needs alignment", outcome.video_id));
            }
        }
        Err(e) => {
            log::warn!("[{}] planning failed: {e}", outcome.video_id);
            logger.info(&format!("[{}] failed: {e}", outcome.video_id));
        }
    }
}
