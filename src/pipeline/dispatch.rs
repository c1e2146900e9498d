//! Write dispatcher: a fixed pool of threads appending batches to the output.
//!
//! Batches travel over a bounded [`crossbeam_channel`] queue, so the producer
//! blocks once every writer is busy and the queue is full. All writers share
//! one append-mode handle behind a lock; a batch is encoded before the lock is
//! taken and written with a single `write_all` + `flush` while it is held, so
//! lines from different batches never interleave. Batches may still land in
//! any order when more than one writer runs.
//!
//! The first failed write is kept and every writer stops pulling work. The
//! producer notices through [`WritePool::submit`] returning `false` and gets
//! the error from [`WritePool::join`].

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

use super::Batch;
use crate::error::{Error, Result};

/// Queued batches allowed per writer before `submit` blocks.
const QUEUE_DEPTH: usize = 2;

struct Output {
    path: PathBuf,
    file: Mutex<File>,
}

impl Output {
    fn append(&self, batch: &Batch) -> Result<u64> {
        let buf = batch.encode();
        let mut file = self.file.lock();
        file.write_all(&buf)
            .and_then(|()| file.flush())
            .map_err(|source| Error::Write {
                path: self.path.clone(),
                batch: batch.seq(),
                source,
            })?;
        Ok(buf.len() as u64)
    }
}

#[derive(Default)]
struct Failure {
    raised: AtomicBool,
    first: Mutex<Option<Error>>,
}

impl Failure {
    fn record(&self, err: Error) {
        let mut first = self.first.lock();
        if first.is_none() {
            *first = Some(err);
        }
        self.raised.store(true, Ordering::Release);
    }

    fn raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

pub struct WritePool {
    sender: Option<Sender<Batch>>,
    workers: Vec<JoinHandle<u64>>,
    failure: Arc<Failure>,
}

impl WritePool {
    /// Opens `path` for appending and spawns `threads` writers.
    ///
    /// The file must already exist; truncation is the caller's job.
    pub fn start(path: &Path, threads: NonZeroUsize) -> Result<Self> {
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|source| Error::Prepare {
                path: path.to_path_buf(),
                source,
            })?;
        let output = Arc::new(Output {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        });
        let failure = Arc::new(Failure::default());
        let (sender, receiver) = crossbeam_channel::bounded(threads.get() * QUEUE_DEPTH);

        let mut pool = Self {
            sender: Some(sender),
            workers: Vec::with_capacity(threads.get()),
            failure,
        };

        for worker_id in 0..threads.get() {
            let rx = receiver.clone();
            let output = Arc::clone(&output);
            let failure = Arc::clone(&pool.failure);
            let handle = thread::Builder::new()
                .name(format!("writer-{worker_id}"))
                .spawn(move || worker_loop(worker_id, rx, output, failure))
                .map_err(|source| Error::Spawn { source })?;
            pool.workers.push(handle);
        }

        Ok(pool)
    }

    /// Queues a batch, blocking while the queue is full.
    ///
    /// Returns `false` once a writer has failed; the batch is dropped and the
    /// caller should stop producing and call [`WritePool::join`].
    pub fn submit(&self, batch: Batch) -> bool {
        if self.failure.raised() {
            return false;
        }
        match &self.sender {
            Some(sender) => sender.send(batch).is_ok(),
            None => false,
        }
    }

    /// Closes the queue and waits for every writer to finish.
    ///
    /// Returns the number of bytes written, or the first write error.
    pub fn join(mut self) -> Result<u64> {
        let (bytes, panicked) = self.drain();
        if let Some(err) = self.failure.first.lock().take() {
            return Err(err);
        }
        if let Some(worker) = panicked {
            return Err(Error::WorkerPanicked { worker });
        }
        Ok(bytes)
    }

    fn drain(&mut self) -> (u64, Option<usize>) {
        drop(self.sender.take());
        let mut bytes = 0;
        let mut panicked = None;
        for (worker_id, handle) in self.workers.drain(..).enumerate() {
            match handle.join() {
                Ok(written) => bytes += written,
                Err(_) => {
                    panicked.get_or_insert(worker_id);
                }
            }
        }
        (bytes, panicked)
    }
}

impl Drop for WritePool {
    fn drop(&mut self) {
        self.drain();
    }
}

fn worker_loop(
    worker_id: usize,
    rx: Receiver<Batch>,
    output: Arc<Output>,
    failure: Arc<Failure>,
) -> u64 {
    tracing::debug!(worker_id, "writer started");
    let mut written = 0;

    for batch in rx.iter() {
        if failure.raised() {
            break;
        }
        match output.append(&batch) {
            Ok(bytes) => {
                tracing::trace!(worker_id, seq = batch.seq(), bytes, "batch written");
                written += bytes;
            }
            Err(err) => {
                tracing::error!(worker_id, seq = batch.seq(), "write failed: {err}");
                failure.record(err);
                break;
            }
        }
    }

    tracing::debug!(worker_id, bytes = written, "writer stopped");
    written
}
