//! Date helper functions

use chrono::NaiveDate;

/// Format a post date for display.
///
/// Dates are kept as strings everywhere else; only the display layer
/// interprets them. A value that does not start with `YYYY-MM-DD` is shown
/// unchanged.
///
/// # Examples
/// ```ignore
/// display_date("2024-01-15", "%B %-d, %Y") // -> "January 15, 2024"
/// ```
pub fn display_date(date: &str, format: &str) -> String {
    let date = date.trim();
    date.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map(|d| d.format(format).to_string())
        .unwrap_or_else(|| date.to_string())
}

/// Format a date in ISO 8601 form for `<time datetime>` attributes
pub fn date_iso(date: &str) -> Option<String> {
    let date = date.trim();
    date.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map(|d| d.format("%Y-%m-%d").to_string())
}
