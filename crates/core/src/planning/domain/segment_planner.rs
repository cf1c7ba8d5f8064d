use crate::scoring::domain::code_scorer::CodeScorer;
use crate::shared::constants::{OUTPUT_DECIMALS, SEGMENT_ID_PREFIX, SEGMENT_REASON};
use crate::transcript::domain::utterance::Utterance;

use super::plan_params::{validate_duration, PlanError, PlanParams};
use super::scored_hit::ScoredHit;
use super::segment::Segment;

/// Turns scored utterances into a short list of reviewable code segments.
///
/// Pipeline: threshold → sort → gap-tolerant merge → pad/clamp →
/// minimum-length filter → ordinal ids → rounding. Stateless; the same
/// input always yields the same segments.
pub struct SegmentPlanner {
    scorer: CodeScorer,
    params: PlanParams,
}

impl SegmentPlanner {
    pub fn new(scorer: CodeScorer, params: PlanParams) -> Result<Self, PlanError> {
        params.validate()?;
        Ok(Self { scorer, params })
    }

    pub fn params(&self) -> &PlanParams {
        &self.params
    }

    /// `video_duration` of `None` or zero disables the upper clamp.
    pub fn plan(
        &self,
        utterances: &[Utterance],
        video_duration: Option<f64>,
    ) -> Result<Vec<Segment>, PlanError> {
        validate_duration(video_duration)?;
        let limit = video_duration.filter(|d| *d > 0.0);

        let hits = self.select_hits(utterances);
        log::debug!(
            "{} of {} utterances scored >= {}",
            hits.len(),
            utterances.len(),
            self.params.threshold
        );

        let merged = merge_hits(hits, self.params.merge_gap_sec);
        let segments: Vec<Segment> = merged
            .into_iter()
            .map(|h| round_hit(pad_and_clamp(h, self.params.pad_sec, limit)))
            .filter(|h| self.is_long_enough(h))
            .enumerate()
            .map(|(idx, h)| Segment {
                id: segment_id(idx + 1),
                t0: h.t0,
                t1: h.t1,
                score: h.score,
                reason: SEGMENT_REASON.to_string(),
            })
            .collect();

        log::debug!("planned {} segments", segments.len());
        Ok(segments)
    }

    /// Score every utterance and keep those at or above the threshold.
    pub fn select_hits(&self, utterances: &[Utterance]) -> Vec<ScoredHit> {
        utterances
            .iter()
            .filter_map(|u| {
                let score = self.scorer.score(&u.text);
                (score >= self.params.threshold).then(|| ScoredHit {
                    t0: u.start,
                    t1: u.end,
                    score,
                })
            })
            .collect()
    }

    /// Checked on the rounded bounds, which are what gets emitted.
    fn is_long_enough(&self, h: &ScoredHit) -> bool {
        h.t1 > h.t0 && h.duration() >= self.params.min_len_sec
    }
}

/// Sort hits by start and coalesce those separated by at most `merge_gap_sec`.
///
/// The comparison is inclusive: a hit starting exactly `merge_gap_sec` after
/// the running interval's end still merges. Merged intervals never shrink and
/// carry the highest score of any contributing hit.
pub fn merge_hits(mut hits: Vec<ScoredHit>, merge_gap_sec: f64) -> Vec<ScoredHit> {
    hits.sort_by(|a, b| a.t0.total_cmp(&b.t0));

    hits.into_iter()
        .fold(Vec::new(), |mut merged: Vec<ScoredHit>, hit| {
            match merged.last_mut() {
                Some(current) if hit.t0 <= current.t1 + merge_gap_sec => {
                    current.t1 = current.t1.max(hit.t1);
                    current.score = current.score.max(hit.score);
                }
                _ => merged.push(hit),
            }
            merged
        })
}

/// Widen by `pad_sec` on both sides, flooring at zero and capping at `limit`.
pub fn pad_and_clamp(hit: ScoredHit, pad_sec: f64, limit: Option<f64>) -> ScoredHit {
    let t0 = (hit.t0 - pad_sec).max(0.0);
    let padded_end = hit.t1 + pad_sec;
    let t1 = limit.map_or(padded_end, |max| padded_end.min(max));
    ScoredHit {
        t0,
        t1,
        score: hit.score,
    }
}

pub fn segment_id(ordinal: usize) -> String {
    format!("{SEGMENT_ID_PREFIX}{ordinal:04}")
}

fn round_hit(hit: ScoredHit) -> ScoredHit {
    ScoredHit {
        t0: round_output(hit.t0),
        t1: round_output(hit.t1),
        score: round_output(hit.score),
    }
}

fn round_output(value: f64) -> f64 {
    let factor = 10f64.powi(OUTPUT_DECIMALS);
    (value * factor).round() / factor
}
