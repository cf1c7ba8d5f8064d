pub mod constants;
pub mod video_id;
pub mod video_metadata;

/// Error type crossing port boundaries; `Send + Sync` so batch workers can
/// hand failures back across threads.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
