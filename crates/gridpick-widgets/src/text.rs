//! Display-width aware helpers for fitting cell text into columns.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marker appended to truncated cell text.
pub const ELLIPSIS: &str = "…";

/// Display width in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Collapse text onto one line: tabs and newlines become spaces, other
/// control characters are dropped.
pub fn single_line(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Fit `s` into `max_width` columns, ending in `tail` when cut.
///
/// The result never exceeds `max_width`, even when the tail alone does not
/// fit.
///
/// ```
/// use gridpick_widgets::text::truncate;
///
/// assert_eq!(truncate("Engineering", 6, "…"), "Engin…");
/// assert_eq!(truncate("Ops", 6, "…"), "Ops");
/// ```
pub fn truncate(s: &str, max_width: usize, tail: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let tail_width = display_width(tail);
    if tail_width >= max_width {
        return take_width(tail, max_width);
    }
    let mut result = take_width(s, max_width - tail_width);
    result.push_str(tail);
    result
}

fn take_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if width + cw > max_width {
            break;
        }
        result.push(c);
        width += cw;
    }
    result
}
