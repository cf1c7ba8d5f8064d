/// Minimum code-likelihood for an utterance to count as a hit.
pub const DEFAULT_THRESHOLD: f64 = 0.55;
pub const DEFAULT_MIN_LEN_SEC: f64 = 3.0;
pub const DEFAULT_MERGE_GAP_SEC: f64 = 3.0;
pub const DEFAULT_PAD_SEC: f64 = 4.0;

/// Intros rarely show code; the batch pipeline skips the first five minutes.
pub const DEFAULT_START_OFFSET_SEC: f64 = 300.0;

/// Bumped by hand whenever the scoring or merge policy changes.
pub const SCORER_VERSION: &str = "v1";
pub const SEGMENT_REASON: &str = "heuristic_v1";
pub const SEGMENT_ID_PREFIX: &str = "seg_";

/// Decimal places kept on serialized times and scores.
pub const OUTPUT_DECIMALS: i32 = 3;

pub const TRANSCRIPT_FILENAME: &str = "transcript.json";
pub const METADATA_FILENAME: &str = "meta.json";
pub const SEGMENTS_FILENAME: &str = "segments.json";

pub const NO_TRANSCRIPT_REASON: &str = "no_transcript_found";

/// Frame sampling rate used when reviewing segments.
pub const DEFAULT_SAMPLE_FPS: f64 = 0.5;
