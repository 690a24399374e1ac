//! Display helpers for durations, percentages, and counts.

/// Render seconds with 2 decimals at or above one second, 4 below.
pub fn format_seconds(secs: f64) -> String {
    if secs >= 1.0 {
        format!("{:.2}", secs)
    } else {
        format!("{:.4}", secs)
    }
}

pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}", pct)
}

/// `pluralize(1, "example")` is `"1 example"`, otherwise `"N examples"`.
pub fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}
