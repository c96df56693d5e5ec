//! Time-of-day formatting
//!
//! Wire times are zero-padded 24-hour strings (`HH:MM` or `HH:MM:SS`), so
//! plain string comparison is chronological. Display strings are never used
//! for ordering.

use std::cmp::Ordering;

/// Format a 24-hour wire time as `h:mm AM/PM`.
///
/// Empty input gives an empty string. Input whose hour can't be read is
/// returned unchanged.
pub fn format_display(time: &str) -> String {
    let time = time.trim();
    if time.is_empty() {
        return String::new();
    }

    if let Some((h, rest)) = time.split_once(':') {
        // Minutes pass through verbatim; seconds are dropped
        let minutes = rest.split(':').next().unwrap_or(rest);
        if let Ok(hour) = h.parse::<u8>() {
            if hour < 24 {
                let (h12, ampm) = match hour {
                    0 => (12, "AM"),
                    1..=11 => (hour, "AM"),
                    12 => (12, "PM"),
                    _ => (hour - 12, "PM"),
                };
                return format!("{}:{} {}", h12, minutes, ampm);
            }
        }
    }

    time.to_string()
}

/// Format a start/end pair as `9:00 AM - 10:30 AM`
pub fn format_range(start: &str, end: &str) -> String {
    let (start, end) = (format_display(start), format_display(end));
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start,
        (true, false) => end,
        (false, false) => format!("{} - {}", start, end),
    }
}

/// Chronological comparison of two wire times
pub fn compare(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}
