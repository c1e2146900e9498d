//! Terminal output utilities.
//!
//! Box drawing, number/size/duration formatting, ANSI-aware width.

use std::time::Duration;

// ============================================================================
// Number Formatting
// ============================================================================

pub fn format_number(num: u64) -> String {
    let s = num.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

pub fn mebibytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// `HHh MMm SS.SSs`
pub fn format_hms(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    let hours = (secs / 3600.0).floor();
    let minutes = ((secs - hours * 3600.0) / 60.0).floor();
    let seconds = secs - hours * 3600.0 - minutes * 60.0;
    format!("{:02}h {:02}m {:05.2}s", hours as u64, minutes as u64, seconds)
}

// ============================================================================
// Box Drawing (74 char width)
// ============================================================================

pub const BOX_WIDTH: usize = 74;

/// Box top with optional title: ┌─ Title ───────────────────────────┐
pub fn box_top(title: &str) -> String {
    if title.is_empty() {
        format!("┌{}┐", "─".repeat(BOX_WIDTH - 2))
    } else {
        let title_part = format!("─ {} ", title);
        let remaining = (BOX_WIDTH - 2).saturating_sub(console_width(&title_part));
        format!("┌{}{}┐", title_part, "─".repeat(remaining))
    }
}

/// Box content line: │ content                                        │
pub fn box_line(content: &str) -> String {
    let inner_width = BOX_WIDTH - 4;
    let display_len = console_width(content);

    if display_len <= inner_width {
        let padding = inner_width - display_len;
        format!("│ {}{} │", content, " ".repeat(padding))
    } else {
        format!("│ {} │", content)
    }
}

/// Box bottom: └───────────────────────────────────────────────────────┘
pub fn box_bottom() -> String {
    format!("└{}┘", "─".repeat(BOX_WIDTH - 2))
}

/// Display width, skipping ANSI escape sequences.
pub fn console_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape {
            if c == 'm' {
                in_escape = false;
            }
        } else {
            width += 1;
        }
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn hms_split() {
        assert_eq!(format_hms(Duration::from_millis(3_723_500)), "01h 02m 03.50s");
        assert_eq!(format_hms(Duration::ZERO), "00h 00m 00.00s");
    }

    #[test]
    fn width_ignores_escapes() {
        assert_eq!(console_width("\x1b[31mred\x1b[0m"), 3);
        assert_eq!(console_width("│ä│"), 3);
    }

    #[test]
    fn box_lines_are_aligned() {
        let plain = box_line("hello");
        let styled = box_line("\x1b[1mhello\x1b[0m");
        assert_eq!(console_width(&plain), BOX_WIDTH);
        assert_eq!(console_width(&styled), BOX_WIDTH);
        assert_eq!(console_width(&box_top("Done")), BOX_WIDTH);
        assert_eq!(console_width(&box_bottom()), BOX_WIDTH);
    }
}
