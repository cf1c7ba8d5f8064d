use crate::shared::video_metadata::VideoMetadata;
use crate::shared::BoxError;

/// Domain interface for looking up what ingest recorded about a video.
pub trait MetadataReader: Send + Sync {
    /// Returns `None` if the video was never ingested.
    fn read_metadata(&self, video_id: &str) -> Result<Option<VideoMetadata>, BoxError>;
}
