//! Progress accounting and status events.
//!
//! Progress is counted when a full batch is submitted, not when it is written,
//! so the counters live on the producer thread only. Projections are a plain
//! linear extrapolation from elapsed time and are noisy early in a run.

use std::num::NonZeroU64;
use std::time::{Duration, Instant};

use super::RunSummary;
use crate::combo::SizeEstimate;

/// One progress sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub submitted: u64,
    pub total: u64,
    pub percent: f64,
    pub remaining: u64,
    pub elapsed: Duration,
    pub estimated_total: Duration,
    pub remaining_minutes: f64,
    /// Combinations per second, 0 when no time has elapsed.
    pub throughput: f64,
}

impl Snapshot {
    /// `submitted` must be non-zero.
    pub fn compute(submitted: u64, total: u64, elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64();
        let estimated_total = secs / submitted as f64 * total as f64;
        let throughput = if secs > 0.0 {
            submitted as f64 / secs
        } else {
            0.0
        };
        Self {
            submitted,
            total,
            percent: submitted as f64 / total as f64 * 100.0,
            remaining: total.saturating_sub(submitted),
            elapsed,
            estimated_total: Duration::from_secs_f64(estimated_total),
            remaining_minutes: (estimated_total - secs) / 60.0,
            throughput,
        }
    }
}

/// Shared counters read by the reporter: total (fixed), submitted so far, and
/// the start instant.
pub struct Progress {
    total: u64,
    submitted: u64,
    update_interval: u64,
    start: Instant,
    last_throughput: Option<f64>,
}

impl Progress {
    pub fn new(total: u64, update_interval: NonZeroU64) -> Self {
        Self {
            total,
            submitted: 0,
            update_interval: update_interval.get(),
            start: Instant::now(),
            last_throughput: None,
        }
    }

    /// Counts a submitted batch of `count` combinations. Returns a sample when
    /// the running count is a multiple of the update interval or reaches the
    /// total.
    pub fn record(&mut self, count: u64) -> Option<Snapshot> {
        let elapsed = self.start.elapsed();
        self.record_at(count, elapsed)
    }

    fn record_at(&mut self, count: u64, elapsed: Duration) -> Option<Snapshot> {
        self.submitted += count;
        let due = self.submitted % self.update_interval == 0 || self.submitted == self.total;
        if !due || self.submitted == 0 {
            return None;
        }
        let snapshot = Snapshot::compute(self.submitted, self.total, elapsed);
        self.last_throughput = Some(snapshot.throughput);
        Some(snapshot)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Throughput from the most recent sample, if one was ever taken.
    pub fn last_throughput(&self) -> Option<f64> {
        self.last_throughput
    }
}

/// Status updates emitted over a run.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Printed before any work starts.
    Estimated(SizeEstimate),
    /// The requested lengths yield no combinations; the output is left empty.
    NothingToGenerate,
    Progress(Snapshot),
    Finished(RunSummary),
}

/// Destination for [`ProgressEvent`]s: a console, a log, or nothing.
pub trait StatusSink {
    fn report(&mut self, event: &ProgressEvent);
}

/// Discards every event.
pub struct QuietSink;

impl StatusSink for QuietSink {
    fn report(&mut self, _event: &ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(total: u64, interval: u64) -> Progress {
        Progress::new(total, NonZeroU64::new(interval).unwrap())
    }

    #[test]
    fn snapshot_extrapolates_linearly() {
        let s = Snapshot::compute(250, 1000, Duration::from_secs(10));
        assert_eq!(s.percent, 25.0);
        assert_eq!(s.remaining, 750);
        assert!((s.estimated_total.as_secs_f64() - 40.0).abs() < 1e-9);
        assert!((s.remaining_minutes - 0.5).abs() < 1e-9);
        assert_eq!(s.throughput, 25.0);
    }

    #[test]
    fn zero_elapsed_gives_zero_throughput() {
        let s = Snapshot::compute(10, 100, Duration::ZERO);
        assert_eq!(s.throughput, 0.0);
        assert_eq!(s.estimated_total, Duration::ZERO);
    }

    #[test]
    fn emits_on_interval_multiples() {
        let mut p = progress(10_000, 1_000);
        let secs = Duration::from_secs(1);
        assert!(p.record_at(500, secs).is_none());
        let s = p.record_at(500, secs).unwrap();
        assert_eq!(s.submitted, 1_000);
        assert!(p.record_at(700, secs).is_none());
        assert!(p.record_at(300, secs).is_some());
        assert_eq!(p.last_throughput(), Some(2_000.0));
    }

    #[test]
    fn emits_when_total_reached_off_interval() {
        let mut p = progress(7, 5);
        assert!(p.record_at(3, Duration::from_secs(1)).is_none());
        let s = p.record_at(4, Duration::from_secs(1)).unwrap();
        assert_eq!(s.percent, 100.0);
        assert_eq!(s.remaining, 0);
    }

    #[test]
    fn interval_above_total_never_samples() {
        let mut p = progress(10, 1_000);
        assert!(p.record_at(5, Duration::from_secs(1)).is_none());
        assert_eq!(p.last_throughput(), None);
    }
}
