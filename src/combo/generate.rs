//! Lazy combination generator.

use std::iter::FusedIterator;

use super::LengthSet;

/// Pull-based cursor over every combination of `alphabet` for each usable
/// length, shortest first, each length in lexicographic index order.
///
/// Only the current index tuple is held, so memory stays O(length) no matter
/// how many combinations remain. Combinations are drawn by position: a
/// repeated character yields repeated-looking but distinct entries.
pub struct Combinations<'a> {
    alphabet: &'a [char],
    lengths: Vec<usize>,
    pos: usize,
    indices: Vec<usize>,
}

impl<'a> Combinations<'a> {
    pub fn new(alphabet: &'a [char], lengths: &LengthSet) -> Self {
        let lengths: Vec<usize> = lengths.usable(alphabet.len()).collect();
        let mut this = Self {
            alphabet,
            lengths,
            pos: 0,
            indices: Vec::new(),
        };
        this.start_length();
        this
    }

    /// Resets the cursor to the first combination of the current length.
    fn start_length(&mut self) {
        self.indices.clear();
        if let Some(&len) = self.lengths.get(self.pos) {
            self.indices.extend(0..len);
        }
    }

    /// Steps to the next combination of the current length in O(length).
    /// Returns false once the last one (`n-l, .., n-1`) has been passed.
    fn advance(&mut self) -> bool {
        let n = self.alphabet.len();
        let len = self.indices.len();
        let Some(i) = (0..len).rev().find(|&i| self.indices[i] != i + n - len) else {
            return false;
        };
        self.indices[i] += 1;
        for j in i + 1..len {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }

    fn current(&self) -> String {
        self.indices.iter().map(|&i| self.alphabet[i]).collect()
    }
}

impl Iterator for Combinations<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.pos >= self.lengths.len() {
            return None;
        }
        let item = self.current();
        if !self.advance() {
            self.pos += 1;
            self.start_length();
        }
        Some(item)
    }
}

impl FusedIterator for Combinations<'_> {}
