//! Human-readable formatting of counts, timestamps and durations.

use crate::timeunit::TimeUnit;
use chrono::{DateTime, Utc};
use num_format::{Locale, ToFormattedString};

/// Format a count with thousands separators
pub fn format_count(n: usize) -> String {
    n.to_formatted_string(&Locale::en)
}

/// Format seconds since the Unix epoch as a UTC timestamp
pub fn format_wall_time(secs: f64) -> String {
    if !secs.is_finite() {
        return format!("{secs}");
    }
    let whole = secs.floor();
    let nanos = (((secs - whole) * 1e9) as u32).min(999_999_999);
    match DateTime::<Utc>::from_timestamp(whole as i64, nanos) {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{secs:.3}"),
    }
}

/// Format a duration in seconds using the unit a chart axis would pick
pub fn format_span(secs: f64) -> String {
    let unit = TimeUnit::for_duration(secs);
    format!("{:.1} {}", secs / unit.divisor(), unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn wall_time_is_rendered_in_utc() {
        assert_eq!(format_wall_time(0.0), "1970-01-01 00:00:00 UTC");
        assert_eq!(format_wall_time(1_700_000_000.75), "2023-11-14 22:13:20 UTC");
        assert_eq!(format_wall_time(f64::NAN), "NaN");
    }

    #[test]
    fn spans_use_axis_units() {
        assert_eq!(format_span(0.25), "250.0 milliseconds");
        assert_eq!(format_span(12.0), "12.0 seconds");
        assert_eq!(format_span(90.0), "1.5 minutes");
        assert_eq!(format_span(5400.0), "1.5 hours");
    }
}
