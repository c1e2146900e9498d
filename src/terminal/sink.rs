//! Console status sink.

use std::io::{self, Stdout, Write};

use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use crossterm::tty::IsTty;
use crossterm::{cursor, queue};

use super::{box_bottom, box_line, box_top, format_hms, format_number, mebibytes};
use crate::pipeline::{ProgressEvent, RunSummary, Snapshot, StatusSink};

/// Renders [`ProgressEvent`]s as human-readable status lines.
///
/// On a terminal the progress line is redrawn in place with the cursor
/// hidden; otherwise every sample is printed on its own line.
pub struct ConsoleSink<W: Write> {
    out: W,
    tty: bool,
    line_open: bool,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        let out = io::stdout();
        let tty = out.is_tty();
        Self::new(out, tty)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, tty: bool) -> Self {
        Self {
            out,
            tty,
            line_open: false,
        }
    }

    fn estimate(&mut self, total: u64, bytes: u64) -> io::Result<()> {
        writeln!(self.out, "Total combinations: {}", format_number(total))?;
        writeln!(
            self.out,
            "Estimated total file size: {} B ({:.2} MiB)",
            format_number(bytes),
            mebibytes(bytes)
        )
    }

    fn progress(&mut self, s: &Snapshot) -> io::Result<()> {
        let line = format!(
            "Progress: {:.2}% | Remaining combinations: {} | Estimated remaining time: {:.2} minutes | Write speed: {} combinations/s",
            s.percent,
            format_number(s.remaining),
            s.remaining_minutes,
            format_number(s.throughput as u64)
        );
        if self.tty {
            if !self.line_open {
                queue!(self.out, cursor::Hide)?;
            }
            queue!(
                self.out,
                cursor::MoveToColumn(0),
                Clear(ClearType::CurrentLine)
            )?;
            write!(self.out, "{}", line.red())?;
            self.line_open = true;
        } else {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    fn close_line(&mut self) -> io::Result<()> {
        if self.line_open {
            queue!(self.out, cursor::Show)?;
            writeln!(self.out)?;
            self.line_open = false;
        }
        Ok(())
    }

    fn finished(&mut self, summary: &RunSummary) -> io::Result<()> {
        self.close_line()?;

        let path = summary.path.display().to_string();
        let throughput = match summary.throughput {
            Some(speed) => format!(
                "Write speed: {} combinations/s",
                format_number(speed as u64).green()
            ),
            None => format!(
                "{}",
                "Write speed unavailable. Maybe --update-interval was too big.".yellow()
            ),
        };

        writeln!(self.out, "{}", box_top(&format!("{}", "Done".green())))?;
        writeln!(
            self.out,
            "{}",
            box_line(&format!(
                "Combinations: {} in {} batch(es)",
                format_number(summary.combinations),
                format_number(summary.batches)
            ))
        )?;
        writeln!(
            self.out,
            "{}",
            box_line(&format!("Written to {}", path.magenta().bold()))
        )?;
        writeln!(
            self.out,
            "{}",
            box_line(&format!(
                "Actual file size: {} B | {} (estimated {} B)",
                format_number(summary.file_size),
                format!("{:.2} MiB", mebibytes(summary.file_size))
                    .magenta()
                    .bold(),
                format_number(summary.estimated_bytes)
            ))
        )?;
        writeln!(
            self.out,
            "{}",
            box_line(&format!(
                "Total execution time: {}",
                format_hms(summary.elapsed).cyan()
            ))
        )?;
        writeln!(self.out, "{}", box_line(&throughput))?;
        writeln!(self.out, "{}", box_bottom())?;
        self.out.flush()
    }

    fn render(&mut self, event: &ProgressEvent) -> io::Result<()> {
        match event {
            ProgressEvent::Estimated(est) => self.estimate(est.total, est.bytes),
            ProgressEvent::NothingToGenerate => writeln!(
                self.out,
                "{}",
                "Nothing to generate: no requested length fits the input.".yellow()
            ),
            ProgressEvent::Progress(snapshot) => self.progress(snapshot),
            ProgressEvent::Finished(summary) => self.finished(summary),
        }
    }
}

impl<W: Write> StatusSink for ConsoleSink<W> {
    fn report(&mut self, event: &ProgressEvent) {
        // Status output is best effort; a closed stdout must not abort a run.
        if let Err(err) = self.render(event) {
            tracing::debug!("status output failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combo::{LengthSet, SizeEstimate};
    use std::path::PathBuf;
    use std::time::Duration;

    fn summary(throughput: Option<f64>) -> RunSummary {
        RunSummary {
            path: PathBuf::from("out.txt"),
            combinations: 7,
            batches: 1,
            trailing_partial: true,
            bytes_written: 19,
            file_size: 19,
            estimated_bytes: 19,
            elapsed: Duration::from_secs(61),
            throughput,
        }
    }

    fn rendered(tty: bool, events: &[ProgressEvent]) -> String {
        let mut sink = ConsoleSink::new(Vec::new(), tty);
        for event in events {
            sink.report(event);
        }
        String::from_utf8(sink.out).unwrap()
    }

    #[test]
    fn estimate_lines() {
        let est = SizeEstimate::compute(3, &LengthSet::up_to(3)).unwrap();
        let out = rendered(false, &[ProgressEvent::Estimated(est)]);
        assert!(out.contains("Total combinations: 7"));
        assert!(out.contains("Estimated total file size: 19 B"));
    }

    #[test]
    fn plain_progress_is_one_line_per_sample() {
        let s = Snapshot::compute(1_000, 4_000, Duration::from_secs(2));
        let out = rendered(
            false,
            &[ProgressEvent::Progress(s), ProgressEvent::Progress(s)],
        );
        assert_eq!(out.lines().count(), 2);
        assert!(out.contains("Progress: 25.00%"));
        assert!(out.contains("Write speed: 500 combinations/s"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn tty_progress_redraws_in_place() {
        let s = Snapshot::compute(10, 20, Duration::from_secs(1));
        let out = rendered(
            true,
            &[
                ProgressEvent::Progress(s),
                ProgressEvent::Progress(s),
                ProgressEvent::Finished(summary(Some(10.0))),
            ],
        );
        let before_summary = out.split('┌').next().unwrap();
        assert_eq!(before_summary.matches('\n').count(), 1);
        assert!(before_summary.contains("\x1b[?25l"));
        assert!(before_summary.contains("\x1b[?25h"));
    }

    #[test]
    fn summary_reports_actual_size_and_time() {
        let out = rendered(false, &[ProgressEvent::Finished(summary(Some(1234.0)))]);
        assert!(out.contains("out.txt"));
        assert!(out.contains("Actual file size: 19 B"));
        assert!(out.contains("(estimated 19 B)"));
        assert!(out.contains("Combinations: 7 in 1 batch(es)"));
        assert!(out.contains("00h 01m 01.00s"));
        assert!(out.contains("1,234"));
    }

    #[test]
    fn summary_without_sample_degrades() {
        let out = rendered(false, &[ProgressEvent::Finished(summary(None))]);
        assert!(out.contains("Write speed unavailable"));
    }
}
