//! Centralized error and hint messages for CLI output.

use crossterm::style::Stylize;

use super::quiet;

/// Print an error message to stderr (red) - NOT suppressed (errors are always shown)
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a follow-up hint to stderr (yellow) - suppressed in quiet mode
pub fn hint(msg: &str) {
    if !quiet::enabled() {
        eprintln!("{}", msg.yellow());
    }
}
