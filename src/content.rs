//! Small helpers for article pages

use chrono::NaiveDate;

/// Average reading speed used for the "min read" badge
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimated reading time in whole minutes, never less than one
pub fn reading_time_minutes(content: &str) -> usize {
    let words = content.split_whitespace().count().max(1);
    words.div_ceil(WORDS_PER_MINUTE)
}

/// Format a `YYYY-MM-DD` date as `Last updated: January 15, 2024`
pub fn format_last_updated(date: &str) -> Result<String, chrono::ParseError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")?;
    Ok(format!("Last updated: {}", date.format("%B %-d, %Y")))
}
