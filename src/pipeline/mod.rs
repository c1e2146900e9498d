//! Generation pipeline.
//!
//! One producer thread pulls combinations from the generator, seals them into
//! batches and hands each batch to the write pool. Progress is sampled on the
//! producer after every full batch. The pool is always joined before the
//! output file is measured.

mod batch;
mod dispatch;
mod progress;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub use batch::{Batch, Batcher};
pub use dispatch::WritePool;
pub use progress::{Progress, ProgressEvent, QuietSink, Snapshot, StatusSink};

use crate::combo::{Combinations, SizeEstimate};
use crate::error::{Error, Result};
use crate::settings::RunConfig;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub path: PathBuf,
    pub combinations: u64,
    /// Batches submitted, including a trailing partial one.
    pub batches: u64,
    /// Whether the last batch was smaller than the chunk size.
    pub trailing_partial: bool,
    pub bytes_written: u64,
    /// Size of the output as reported by the filesystem after all writers
    /// have finished.
    pub file_size: u64,
    pub estimated_bytes: u64,
    pub elapsed: Duration,
    /// Last sampled throughput; `None` when no progress sample was taken.
    pub throughput: Option<f64>,
}

impl RunSummary {
    fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            combinations: 0,
            batches: 0,
            trailing_partial: false,
            bytes_written: 0,
            file_size: 0,
            estimated_bytes: 0,
            elapsed: Duration::ZERO,
            throughput: None,
        }
    }
}

/// Runs the whole pipeline for `config`, reporting status to `sink`.
///
/// `cancel` is polled between batches; once set, no further batches are
/// submitted, in-flight writes finish, and [`Error::Cancelled`] is returned.
pub fn run(
    config: &RunConfig,
    sink: &mut dyn StatusSink,
    cancel: &AtomicBool,
) -> Result<RunSummary> {
    let estimate = match SizeEstimate::compute(config.alphabet.len(), &config.lengths) {
        Ok(estimate) => estimate,
        Err(Error::NothingToGenerate) => {
            prepare_output(&config.output)?;
            tracing::info!(path = %config.output.display(), "nothing to generate");
            sink.report(&ProgressEvent::NothingToGenerate);
            let summary = RunSummary::empty(&config.output);
            sink.report(&ProgressEvent::Finished(summary.clone()));
            return Ok(summary);
        }
        Err(err) => return Err(err),
    };
    sink.report(&ProgressEvent::Estimated(estimate));

    tracing::info!(
        alphabet_len = config.alphabet.len(),
        lengths = ?config.lengths.iter().collect::<Vec<_>>(),
        total = estimate.total,
        avg_length = estimate.avg_length,
        threads = config.threads.get(),
        chunk_size = config.chunk_size.get(),
        "starting generation"
    );

    prepare_output(&config.output)?;
    let pool = WritePool::start(&config.output, config.threads)?;
    let mut batcher = Batcher::new(config.chunk_size);
    let mut progress = Progress::new(estimate.total, config.update_interval);
    let mut cancelled = false;
    let mut rejected = false;

    for combination in Combinations::new(&config.alphabet, &config.lengths) {
        let Some(batch) = batcher.push(combination) else {
            continue;
        };
        if cancel.load(Ordering::Relaxed) {
            cancelled = true;
            break;
        }
        let count = batch.len() as u64;
        tracing::trace!(seq = batch.seq(), count, "submitting batch");
        if !pool.submit(batch) {
            rejected = true;
            break;
        }
        if let Some(snapshot) = progress.record(count) {
            tracing::debug!(
                submitted = snapshot.submitted,
                total = snapshot.total,
                elapsed = ?snapshot.elapsed,
                estimated_total = ?snapshot.estimated_total,
                "progress sample"
            );
            sink.report(&ProgressEvent::Progress(snapshot));
        }
    }

    let mut trailing_partial = false;
    if !cancelled
        && !rejected
        && let Some(batch) = batcher.finish()
    {
        trailing_partial = true;
        pool.submit(batch);
    }

    // Every writer must be done before the file is measured. A rejected
    // submit always leaves an error behind for `join` to return.
    let bytes_written = pool.join()?;

    if cancelled {
        tracing::warn!(sealed = batcher.sealed(), "generation interrupted");
        return Err(Error::Cancelled);
    }

    let file_size = fs::metadata(&config.output)
        .map_err(|source| Error::Prepare {
            path: config.output.clone(),
            source,
        })?
        .len();

    let summary = RunSummary {
        path: config.output.clone(),
        combinations: batcher.lines(),
        batches: batcher.sealed(),
        trailing_partial,
        bytes_written,
        file_size,
        estimated_bytes: estimate.bytes,
        elapsed: progress.elapsed(),
        throughput: progress.last_throughput(),
    };
    tracing::info!(
        combinations = summary.combinations,
        batches = summary.batches,
        trailing_partial = summary.trailing_partial,
        bytes_written = summary.bytes_written,
        file_size,
        "generation complete"
    );
    sink.report(&ProgressEvent::Finished(summary.clone()));
    Ok(summary)
}

/// Creates missing parent directories and truncates `path` to empty.
fn prepare_output(path: &Path) -> Result<()> {
    let prepare = |source| Error::Prepare {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(prepare)?;
    }
    File::create(path).map_err(prepare)?;
    Ok(())
}
