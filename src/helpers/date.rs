//! Date helper functions

use chrono::{DateTime, TimeZone};

use crate::content::parse_date_string;

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMMM D, YYYY") // -> "January 5, 2024"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a date string as written in front-matter; unparseable input is
/// returned unchanged
pub fn format_date_str(date: &str, format: &str) -> String {
    match parse_date_string(date) {
        Some(dt) => format_date(&dt, format),
        None => date.to_string(),
    }
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longer tokens first so "MM" is not eaten by "M"
    let replacements = [
        // Year
        ("YYYY", "%Y"),
        ("YY", "%y"),
        // Month (uppercase M)
        ("MMMM", "%B"), // January
        ("MMM", "%b"),  // Jan
        ("MM", "%m"),   // 01
        ("M", "%-m"),   // 1
        // Day (uppercase D)
        ("DDDD", "%j"), // day of year
        ("DD", "%d"),
        ("D", "%-d"),
        // Time; lowercase m is safe once every M is gone
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        // Weekday (lowercase d) last
        ("dddd", "%A"),
        ("ddd", "%a"),
        // Offset
        ("ZZ", "%z"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
