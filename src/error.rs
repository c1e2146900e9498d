//! Error types for a generation run.
//!
//! Configuration problems are caught before the output file is touched.
//! Write failures carry the path and batch number so the OS error can be
//! traced back to the part of the run that hit it.

use std::io;
use std::path::PathBuf;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A parameter was missing or out of range.
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    /// The requested lengths produce no combinations at all.
    #[error("Nothing to generate: no requested length fits the alphabet")]
    NothingToGenerate,

    /// Combination counts no longer fit in 64 bits.
    #[error("Combination count overflows at length {length}")]
    Overflow { length: usize },

    /// The output file could not be truncated or opened for appending.
    #[error("Failed to prepare {}: {source}", .path.display())]
    Prepare {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write batch {batch} to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        batch: u64,
        #[source]
        source: io::Error,
    },

    #[error("Failed to spawn writer thread: {source}")]
    Spawn {
        #[source]
        source: io::Error,
    },

    #[error("Writer thread {worker} panicked")]
    WorkerPanicked { worker: usize },

    #[error("Interrupted before all combinations were written")]
    Cancelled,
}

impl Error {
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Cancelled => 130,
            _ => 1,
        }
    }
}
