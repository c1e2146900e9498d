//! Console rendering for run status.
//!
//! Box drawing, number formatting, and the [`ConsoleSink`] status sink.

mod output;
mod sink;

pub use output::*;
pub use sink::ConsoleSink;
