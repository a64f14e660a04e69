//! Display formatting for listings: human-readable file sizes and dates.

use chrono::{DateTime, Utc};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count for display: base 1024, rounded to two decimals with
/// trailing zeros dropped (2097152 -> "2 MB", 1536 -> "1.5 KB").
pub fn format_file_size(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(SIZE_UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;

    let mut formatted = format!("{:.2}", rounded);
    while formatted.ends_with('0') {
        formatted.pop();
    }
    if formatted.ends_with('.') {
        formatted.pop();
    }

    format!("{} {}", formatted, SIZE_UNITS[exponent])
}

/// Format a timestamp for display in en-US style ("Jan 5, 2026, 03:14 PM").
/// Missing timestamps render as "Unknown date".
pub fn format_date(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(ts) => ts.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => "Unknown date".to_string(),
    }
}
