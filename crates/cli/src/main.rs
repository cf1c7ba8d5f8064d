use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use codewindow_core::persistence::domain::plan_store::PlanStore;
use codewindow_core::persistence::infrastructure::json_plan_store::JsonPlanStore;
use codewindow_core::pipeline::batch_executor::{
    BatchExecutor, BatchOutcome, PlanJob, SequentialBatchExecutor,
};
use codewindow_core::pipeline::infrastructure::threaded_batch_executor::ThreadedBatchExecutor;
use codewindow_core::pipeline::pipeline_logger::{PipelineLogger, StdoutPipelineLogger};
use codewindow_core::pipeline::plan_segments_use_case::PlanSegmentsUseCase;
use codewindow_core::planning::domain::plan_params::PlanParams;
use codewindow_core::planning::domain::segment_plan::SegmentPlan;
use codewindow_core::planning::domain::segment_planner::SegmentPlanner;
use codewindow_core::scoring::infrastructure::vocabulary_file;
use codewindow_core::shared::BoxError;
use codewindow_core::shared::constants::{
    DEFAULT_MERGE_GAP_SEC, DEFAULT_MIN_LEN_SEC, DEFAULT_PAD_SEC, DEFAULT_SAMPLE_FPS,
    DEFAULT_START_OFFSET_SEC, DEFAULT_THRESHOLD,
};
use codewindow_core::transcript::infrastructure::json_transcript_reader::JsonTranscriptReader;
use codewindow_core::video::infrastructure::json_metadata_reader::JsonMetadataReader;

/// Find the parts of recorded coding videos that likely show code.
#[derive(Parser)]
#[command(name = "codewindow")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding one sub-directory per video.
    #[arg(long, global = true, default_value = "work")]
    work_dir: PathBuf,

    /// Minimum utterance score to count as a hit (0.0-1.0).
    #[arg(long, global = true, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Drop segments shorter than this many seconds.
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_LEN_SEC)]
    min_len: f64,

    /// Merge hits separated by at most this many seconds.
    #[arg(long, global = true, default_value_t = DEFAULT_MERGE_GAP_SEC)]
    merge_gap: f64,

    /// Seconds of context added on both sides of a segment.
    #[arg(long, global = true, default_value_t = DEFAULT_PAD_SEC)]
    pad: f64,

    /// Ignore utterances starting before this many seconds.
    #[arg(long, global = true, default_value_t = DEFAULT_START_OFFSET_SEC)]
    start_offset: f64,

    /// JSON scoring table overriding the built-in keywords and symbols.
    #[arg(long, global = true)]
    vocabulary: Option<PathBuf>,

    /// Videos planned in parallel with --all.
    #[arg(long, global = true, default_value = "1")]
    jobs: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Plan segments for one video, or for every video with a transcript.
    Plan {
        #[arg(long, conflicts_with = "all", required_unless_present = "all")]
        video_id: Option<String>,

        #[arg(long)]
        all: bool,
    },
    /// Print how code-like a piece of text scores.
    Score { text: String },
    /// Print the frame windows of a stored plan as JSON.
    Windows {
        #[arg(long)]
        video_id: String,

        /// Only the last N segments.
        #[arg(long)]
        max_segments: Option<usize>,

        /// Sampling rate used for the frame counts.
        #[arg(long, default_value_t = DEFAULT_SAMPLE_FPS)]
        fps: f64,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), BoxError> {
    validate(cli)?;

    match &cli.command {
        Command::Plan {
            video_id: Some(video_id),
            ..
        } => run_plan_one(cli, video_id),
        Command::Plan { .. } => run_plan_all(cli),
        Command::Score { text } => run_score(cli, text),
        Command::Windows {
            video_id,
            max_segments,
            fps,
        } => run_windows(cli, video_id, *max_segments, *fps),
    }
}

fn run_plan_one(cli: &Cli, video_id: &str) -> Result<(), BoxError> {
    let use_case = build_use_case(cli)?;
    let plan = use_case.run(video_id)?;
    if plan.is_alignment_needed() {
        println!("{video_id}: no transcript, marked for alignment");
    } else {
        println!(
            "{video_id}: {} segments, {:.1}s",
            plan.segments.len(),
            plan.total_duration_secs()
        );
    }
    Ok(())
}

fn run_plan_all(cli: &Cli) -> Result<(), BoxError> {
    let use_case = Arc::new(build_use_case(cli)?);
    let video_ids = use_case.video_ids()?;
    if video_ids.is_empty() {
        log::info!("No transcripts found under {}", cli.work_dir.display());
        return Ok(());
    }
    log::info!("Planning {} videos with {} jobs", video_ids.len(), cli.jobs);

    let executor: Box<dyn BatchExecutor> = if cli.jobs > 1 {
        Box::new(ThreadedBatchExecutor::new(cli.jobs))
    } else {
        Box::new(SequentialBatchExecutor)
    };
    let job_use_case = Arc::clone(&use_case);
    let job: Arc<PlanJob> = Arc::new(move |video_id: &str| job_use_case.run(video_id));

    let mut logger = StdoutPipelineLogger::default();
    let outcomes = executor.execute(&video_ids, job, &mut logger);
    logger.summary();

    report(&outcomes);
    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        return Err(format!("{failed} of {} videos failed to plan", outcomes.len()).into());
    }
    Ok(())
}

/// Prints one line per video.
fn report(outcomes: &[BatchOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(s) if s.needs_alignment => println!("{}: needs alignment", outcome.video_id),
            Ok(s) => println!(
                "{}: {} segments, {:.1}s",
                outcome.video_id, s.segments, s.covered_secs
            ),
            Err(e) => println!("{}: failed: {e}", outcome.video_id),
        }
    }
}

fn run_score(cli: &Cli, text: &str) -> Result<(), BoxError> {
    let scorer = vocabulary_file::scorer_from(cli.vocabulary.as_deref())?;
    let vocabulary = scorer.vocabulary();
    log::debug!(
        "Scoring with {} keywords and {} symbols",
        vocabulary.keywords.len(),
        vocabulary.symbols.chars().count()
    );
    let score = scorer.score(text);
    println!("score:         {score:.3}");
    println!("keyword hits:  {}", scorer.keyword_hits(text));
    println!("symbol ratio:  {:.3}", scorer.symbol_ratio(text));
    println!(
        "hit:           {}",
        if score >= cli.threshold { "yes" } else { "no" }
    );
    Ok(())
}

fn run_windows(
    cli: &Cli,
    video_id: &str,
    max_segments: Option<usize>,
    fps: f64,
) -> Result<(), BoxError> {
    let store = JsonPlanStore::new(cli.work_dir.clone());
    let plan = store.read_plan(video_id)?.ok_or_else(|| {
        format!("No plan for {video_id}; run `codewindow plan --video-id {video_id}` first")
    })?;
    if plan.is_stale(cli.pad) {
        log::warn!(
            "Plan for {video_id} was made with scorer {} and pad {}s",
            plan.scorer_version,
            plan.pad_sec
        );
    }

    let windows = window_rows(&plan, max_segments, fps);
    println!("{}", serde_json::to_string_pretty(&windows)?);
    Ok(())
}

/// One JSON object per frame window, with the timestamps a sampler at
/// `fps` would grab.
fn window_rows(plan: &SegmentPlan, max_segments: Option<usize>, fps: f64) -> Vec<serde_json::Value> {
    plan.frame_windows(max_segments)
        .iter()
        .map(|w| {
            serde_json::json!({
                "id": w.id,
                "t0": w.t0,
                "t1": w.t1,
                "frames": w.frame_count(fps),
                "sample_times": w.sample_times(fps),
            })
        })
        .collect()
}

fn build_use_case(cli: &Cli) -> Result<PlanSegmentsUseCase, BoxError> {
    let scorer = vocabulary_file::scorer_from(cli.vocabulary.as_deref())?;
    let params = PlanParams {
        threshold: cli.threshold,
        min_len_sec: cli.min_len,
        merge_gap_sec: cli.merge_gap,
        pad_sec: cli.pad,
    };
    let planner = SegmentPlanner::new(scorer, params)?;

    Ok(PlanSegmentsUseCase::new(
        Box::new(JsonTranscriptReader::new(cli.work_dir.clone())),
        Box::new(JsonMetadataReader::new(cli.work_dir.clone())),
        Box::new(JsonPlanStore::new(cli.work_dir.clone())),
        planner,
        cli.start_offset,
    ))
}

fn validate(cli: &Cli) -> Result<(), BoxError> {
    if !(0.0..=1.0).contains(&cli.threshold) {
        return Err(format!(
            "Threshold must be between 0.0 and 1.0, got {}",
            cli.threshold
        )
        .into());
    }
    for (flag, value) in [
        ("--min-len", cli.min_len),
        ("--merge-gap", cli.merge_gap),
        ("--pad", cli.pad),
        ("--start-offset", cli.start_offset),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{flag} must be a non-negative number of seconds, got {value}").into());
        }
    }
    if cli.jobs == 0 {
        return Err("--jobs must be at least 1".into());
    }
    if let Some(path) = &cli.vocabulary {
        if !path.exists() {
            return Err(format!("Vocabulary file not found: {}", path.display()).into());
        }
    }
    match &cli.command {
        Command::Score { .. } => {}
        Command::Plan { .. } | Command::Windows { .. } => {
            if !cli.work_dir.is_dir() {
                return Err(format!(
                    "Work directory not found: {}",
                    cli.work_dir.display()
                )
                .into());
            }
        }
    }
    if let Command::Windows {
        max_segments, fps, ..
    } = &cli.command
    {
        if *max_segments == Some(0) {
            return Err("--max-segments must be at least 1".into());
        }
        if !fps.is_finite() || *fps <= 0.0 {
            return Err(format!("--fps must be positive, got {fps}").into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("codewindow").chain(args.iter().copied())).unwrap()
    }

    fn work_dir_with_video(video_id: &str, transcript: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(video_id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("transcript.json"), transcript).unwrap();
        fs::write(dir.join("meta.json"), r#"{"dur_sec": 600.0}"#).unwrap();
        tmp
    }

    const CODE_TRANSCRIPT: &str =
        r#"[{"text": "if (a[i] < b[j]) return dp[i];", "start": 310.0, "end": 315.0}]"#;

    #[test]
    fn test_defaults_match_core_constants() {
        let cli = parse(&["score", "x"]);
        assert_eq!(cli.threshold, DEFAULT_THRESHOLD);
        assert_eq!(cli.min_len, DEFAULT_MIN_LEN_SEC);
        assert_eq!(cli.merge_gap, DEFAULT_MERGE_GAP_SEC);
        assert_eq!(cli.pad, DEFAULT_PAD_SEC);
        assert_eq!(cli.start_offset, DEFAULT_START_OFFSET_SEC);
        assert_eq!(cli.jobs, 1);
        assert_eq!(cli.work_dir, PathBuf::from("work"));
    }

    #[test]
    fn test_plan_requires_video_id_or_all() {
        let err = Cli::try_parse_from(["codewindow", "plan"]);
        assert!(err.is_err());
        let both = Cli::try_parse_from(["codewindow", "plan", "--all", "--video-id", "a"]);
        assert!(both.is_err());
    }

    #[test]
    fn test_validate_rejects_threshold_out_of_range() {
        let cli = parse(&["score", "x", "--threshold", "1.5"]);
        let err = validate(&cli).unwrap_err();
        assert!(err.to_string().contains("Threshold"));
    }

    #[test]
    fn test_validate_rejects_negative_pad() {
        let cli = parse(&["score", "x", "--pad=-1"]);
        let err = validate(&cli).unwrap_err();
        assert!(err.to_string().contains("--pad"));
    }

    #[test]
    fn test_validate_rejects_zero_jobs() {
        let cli = parse(&["score", "x", "--jobs", "0"]);
        assert!(validate(&cli).is_err());
    }

    #[test]
    fn test_validate_requires_existing_work_dir_for_plan() {
        let cli = parse(&["plan", "--all", "--work-dir", "/nonexistent/codewindow"]);
        let err = validate(&cli).unwrap_err();
        assert!(err.to_string().contains("Work directory not found"));
    }

    #[test]
    fn test_plan_one_writes_segments_file() {
        let tmp = work_dir_with_video("vid", CODE_TRANSCRIPT);
        let work_dir = tmp.path().to_str().unwrap();
        let cli = parse(&["plan", "--video-id", "vid", "--work-dir", work_dir]);

        run(&cli).unwrap();

        let json = fs::read_to_string(tmp.path().join("vid").join("segments.json")).unwrap();
        let plan: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(plan["segments"][0]["id"], "seg_0001");
        assert_eq!(plan["segments"][0]["t0"], 306.0);
        assert_eq!(plan["segments"][0]["t1"], 319.0);
    }

    #[test]
    fn test_plan_all_in_parallel() {
        let tmp = work_dir_with_video("a", CODE_TRANSCRIPT);
        let b = tmp.path().join("b");
        fs::create_dir_all(&b).unwrap();
        fs::write(b.join("transcript.json"), "[]").unwrap();
        let work_dir = tmp.path().to_str().unwrap();
        let cli = parse(&["plan", "--all", "--jobs", "2", "--work-dir", work_dir]);

        run(&cli).unwrap();

        assert!(tmp.path().join("a").join("segments.json").exists());
        assert!(tmp.path().join("b").join("segments.json").exists());
    }

    #[test]
    fn test_windows_without_plan_fails() {
        let tmp = work_dir_with_video("vid", CODE_TRANSCRIPT);
        let work_dir = tmp.path().to_str().unwrap();
        let cli = parse(&["windows", "--video-id", "vid", "--work-dir", work_dir]);

        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("No plan for vid"));
    }

    #[test]
    fn test_windows_lists_sample_times_of_stored_plan() {
        let tmp = work_dir_with_video("vid", CODE_TRANSCRIPT);
        let work_dir = tmp.path().to_str().unwrap();
        run(&parse(&["plan", "--video-id", "vid", "--work-dir", work_dir])).unwrap();

        let cli = parse(&["windows", "--video-id", "vid", "--fps", "0.25", "--work-dir", work_dir]);
        run(&cli).unwrap();

        let plan = JsonPlanStore::new(tmp.path()).read_plan("vid").unwrap().unwrap();
        let rows = window_rows(&plan, None, 0.25);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "seg_0001");
        assert_eq!(rows[0]["frames"], 4);
        assert_eq!(
            rows[0]["sample_times"],
            serde_json::json!([306.0, 310.0, 314.0, 318.0])
        );
    }

    #[test]
    fn test_plan_all_fails_when_a_video_fails() {
        let tmp = work_dir_with_video("good", CODE_TRANSCRIPT);
        let bad = tmp.path().join("bad");
        fs::create_dir_all(&bad).unwrap();
        fs::write(bad.join("transcript.json"), "{not json").unwrap();
        let work_dir = tmp.path().to_str().unwrap();
        let cli = parse(&["plan", "--all", "--work-dir", work_dir]);

        let err = run(&cli).unwrap_err();

        assert_eq!(err.to_string(), "1 of 2 videos failed to plan");
        assert!(tmp.path().join("good").join("segments.json").exists());
    }

    #[test]
    fn test_plan_rejects_video_id_outside_work_dir() {
        let tmp = work_dir_with_video("vid", CODE_TRANSCRIPT);
        let work_dir = tmp.path().join("vid");
        let cli = parse(&[
            "plan",
            "--video-id",
            "../vid",
            "--work-dir",
            work_dir.to_str().unwrap(),
        ]);

        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("invalid video id"));
    }
}
