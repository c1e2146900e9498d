//! Chunk batching between the generator and the write pool.

use std::num::NonZeroUsize;

/// Upper bound on the capacity reserved for a new batch.
const MAX_PREALLOC: usize = 64 * 1024;

/// A sealed, immutable group of combinations handed to one write task.
#[derive(Debug)]
pub struct Batch {
    seq: u64,
    lines: Vec<String>,
}

impl Batch {
    /// Submission order, starting at 0.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Renders every line followed by `\n` into one buffer so a batch lands
    /// in the file with a single write.
    pub fn encode(&self) -> Vec<u8> {
        let size = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut buf = Vec::with_capacity(size);
        for line in &self.lines {
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        buf
    }
}

/// Accumulates combinations and seals a [`Batch`] every `chunk_size` items.
pub struct Batcher {
    chunk_size: usize,
    current: Vec<String>,
    sealed: u64,
    lines: u64,
}

impl Batcher {
    pub fn new(chunk_size: NonZeroUsize) -> Self {
        let chunk_size = chunk_size.get();
        Self {
            chunk_size,
            current: Vec::with_capacity(chunk_size.min(MAX_PREALLOC)),
            sealed: 0,
            lines: 0,
        }
    }

    /// Appends one combination; returns the sealed batch once it is full.
    pub fn push(&mut self, item: String) -> Option<Batch> {
        self.current.push(item);
        if self.current.len() >= self.chunk_size {
            Some(self.seal())
        } else {
            None
        }
    }

    /// Seals whatever is left as a final, possibly undersized batch.
    pub fn finish(&mut self) -> Option<Batch> {
        if self.current.is_empty() {
            None
        } else {
            Some(self.seal())
        }
    }

    /// Number of batches sealed so far.
    pub fn sealed(&self) -> u64 {
        self.sealed
    }

    /// Number of combinations sealed into batches so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    fn seal(&mut self) -> Batch {
        let next = Vec::with_capacity(self.chunk_size.min(MAX_PREALLOC));
        let lines = std::mem::replace(&mut self.current, next);
        let batch = Batch {
            seq: self.sealed,
            lines,
        };
        self.sealed += 1;
        self.lines += batch.len() as u64;
        batch
    }
}
