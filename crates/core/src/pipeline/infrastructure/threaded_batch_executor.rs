use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};

use crate::pipeline::batch_executor::{
    record_outcome, run_job, BatchExecutor, BatchOutcome, PlanJob,
};
use crate::pipeline::pipeline_logger::PipelineLogger;

const DEFAULT_CHANNEL_CAPACITY: usize = 8;

/// A finished video, tagged with its position in the input.
struct Completed {
    index: usize,
    outcome: BatchOutcome,
    elapsed_ms: f64,
}

/// Plans videos on a fixed pool of worker threads.
///
/// Layout: `feeder → [worker × n] → main [log/collect]`
///
/// Videos share nothing, so each worker runs whole plans independently;
/// a panicking plan fails only its own video. The main thread owns the
/// logger and restores input order at the end.
pub struct ThreadedBatchExecutor {
    workers: usize,
    channel_capacity: usize,
}

impl ThreadedBatchExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ThreadedBatchExecutor {
    fn default() -> Self {
        Self::new(
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        )
    }
}

impl BatchExecutor for ThreadedBatchExecutor {
    fn execute(
        &self,
        video_ids: &[String],
        job: Arc<PlanJob>,
        logger: &mut dyn PipelineLogger,
    ) -> Vec<BatchOutcome> {
        let total = video_ids.len();
        if total == 0 {
            return Vec::new();
        }
        let workers = self.workers.min(total);

        let (work_tx, work_rx) = crossbeam_channel::bounded::<(usize, String)>(self.channel_capacity);
        let (done_tx, done_rx) = crossbeam_channel::bounded::<Completed>(self.channel_capacity);

        let feeder = spawn_feeder(video_ids.to_vec(), work_tx);
        let handles: Vec<_> = (0..workers)
            .map(|_| spawn_worker(job.clone(), work_rx.clone(), done_tx.clone()))
            .collect();
        // Workers hold the remaining ends; the loop below ends when they exit.
        drop(work_rx);
        drop(done_tx);

        let mut slots: Vec<Option<BatchOutcome>> = vec![None; total];
        let mut finished = 0;
        for done in done_rx {
            finished += 1;
            logger.timing("plan", done.elapsed_ms);
            record_outcome(logger, &done.outcome);
            logger.progress(finished, total);
            slots[done.index] = Some(done.outcome);
        }

        join_threads(feeder, handles);

        slots
            .into_iter()
            .zip(video_ids)
            .map(|(slot, video_id)| {
                slot.unwrap_or_else(|| BatchOutcome {
                    video_id: video_id.clone(),
                    result: Err("worker stopped before planning this video".to_string()),
                })
            })
            .collect()
    }
}

fn spawn_feeder(video_ids: Vec<String>, work_tx: Sender<(usize, String)>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for item in video_ids.into_iter().enumerate() {
            if work_tx.send(item).is_err() {
                break;
            }
        }
    })
}

fn spawn_worker(
    job: Arc<PlanJob>,
    work_rx: Receiver<(usize, String)>,
    done_tx: Sender<Completed>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        for (index, video_id) in work_rx {
            let started = Instant::now();
            let outcome = run_job(&*job, &video_id);
            let completed = Completed {
                index,
                outcome,
                elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
            };
            if done_tx.send(completed).is_err() {
                break;
            }
        }
    })
}

fn join_threads(feeder: JoinHandle<()>, workers: Vec<JoinHandle<()>>) {
    if feeder.join().is_err() {
        log::error!("Feeder thread panicked");
    }
    for handle in workers {
        if handle.join().is_err() {
            log::error!("Batch worker thread panicked");
        }
    }
}
