use std::collections::BTreeMap;
use std::time::Instant;

/// Receives batch events from a `BatchExecutor`, always on the thread that
/// called `execute`.
pub trait PipelineLogger: Send {
    /// `current` of `total` videos have finished, in completion order.
    fn progress(&mut self, current: usize, total: usize);

    /// Wall time one video spent in `stage`.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// One per-video sample, e.g. `segments` or `covered_secs`.
    fn metric(&mut self, name: &str, value: f64);

    /// Notable per-video events: alignment needed, failures.
    fn info(&mut self, message: &str);

    fn summary(&self) {}
}

pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Samples of one timing or metric, one entry per video.
#[derive(Default)]
struct Series(Vec<f64>);

impl Series {
    fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    fn mean(&self) -> f64 {
        if self.0.is_empty() {
            0.0
        } else {
            self.total() / self.0.len() as f64
        }
    }

    fn max(&self) -> f64 {
        self.0.iter().copied().fold(0.0, f64::max)
    }
}

/// Batch report for the CLI: a progress line every `every_videos` videos,
/// and a summary of stage timings and per-video metrics at the end.
pub struct StdoutPipelineLogger {
    every_videos: usize,
    timings: BTreeMap<String, Series>,
    metrics: BTreeMap<String, Series>,
    started: Instant,
    batch_size: usize,
    messages: Vec<String>,
}

impl StdoutPipelineLogger {
    pub fn new(every_videos: usize) -> Self {
        Self {
            every_videos: every_videos.max(1),
            timings: BTreeMap::new(),
            metrics: BTreeMap::new(),
            started: Instant::now(),
            batch_size: 0,
            messages: Vec::new(),
        }
    }

    /// `None` until at least one timing or metric has been recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_secs = self.started.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Batch summary ({} videos, {elapsed_secs:.1}s total):",
            self.batch_size
        )];

        for (stage, series) in &self.timings {
            lines.push(format!(
                "  {stage:12}: avg {:6.1}ms  max {:6.1}ms  total {:7.0}ms",
                series.mean(),
                series.max(),
                series.total()
            ));
        }
        for (name, series) in &self.metrics {
            lines.push(format!(
                "  {name}: avg {:.1}  total {:.1}",
                series.mean(),
                series.total()
            ));
        }
        if !self.messages.is_empty() {
            lines.push(format!("  {} videos need attention", self.messages.len()));
        }
        if self.batch_size > 0 && elapsed_secs > 0.0 {
            lines.push(format!(
                "  Throughput: {:.1} videos/s",
                self.batch_size as f64 / elapsed_secs
            ));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|s| s.0.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|s| s.0.as_slice())
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.batch_size = total;
        if total > 0 && (current % self.every_videos == 0 || current == total) {
            log::info!("Planned {current}/{total} videos");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings.entry(stage.to_string()).or_default().0.push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().0.push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
        self.messages.push(message.to_string());
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
