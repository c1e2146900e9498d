//! Validated run settings.

use std::num::{NonZeroU64, NonZeroUsize};
use std::path::PathBuf;

use crate::combo::LengthSet;

pub const DEFAULT_OUTPUT: &str = "combinations.txt";
pub const DEFAULT_UPDATE_INTERVAL: u64 = 1000;
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;
pub const DEFAULT_THREADS: usize = 1;

/// Parameters for one generation run. Every numeric knob is already known to
/// be non-zero.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Input characters, in order, duplicates kept.
    pub alphabet: Vec<char>,
    pub lengths: LengthSet,
    pub output: PathBuf,
    /// Progress cadence in submitted combinations.
    pub update_interval: NonZeroU64,
    pub chunk_size: NonZeroUsize,
    pub threads: NonZeroUsize,
    pub quiet: bool,
}
