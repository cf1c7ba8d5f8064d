use super::utterance::Utterance;
use crate::shared::BoxError;

/// Domain interface for loading a video's normalized transcript.
///
/// Caption download and VTT parsing happen upstream; implementations only
/// hand back utterances that are already time-aligned.
pub trait TranscriptReader: Send + Sync {
    /// Returns `None` when the video has no transcript yet.
    fn read_transcript(&self, video_id: &str) -> Result<Option<Vec<Utterance>>, BoxError>;

    /// Video ids with a transcript available, in a stable order.
    fn list_video_ids(&self) -> Result<Vec<String>, BoxError>;
}
