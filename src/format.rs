// src/format.rs
// =============================================================================
// Small formatting helpers shared by the views.
//
// - format_count: 1234 -> "1.2k", 2_500_000 -> "2.5M"
// - format_thousands: 1234567 -> "1,234,567"
// - format_date_long / format_date_short: GitHub timestamps for humans
// =============================================================================

use chrono::{DateTime, Utc};

pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1000 {
        format!("{:.1}k", n as f64 / 1000.0)
    } else {
        n.to_string()
    }
}

pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

// "January 5, 2024". Unparsable input is shown as-is.
pub fn format_date_long(timestamp: &str) -> String {
    format_date(timestamp, "%B %-d, %Y")
}

// "Jan 5, 2024"
pub fn format_date_short(timestamp: &str) -> String {
    format_date(timestamp, "%b %-d, %Y")
}

fn format_date(timestamp: &str, pattern: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&Utc).format(pattern).to_string(),
        Err(_) => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1.0k");
        assert_eq!(format_count(1234), "1.2k");
        assert_eq!(format_count(98_765), "98.8k");
        assert_eq!(format_count(1_000_000), "1.0M");
        assert_eq!(format_count(2_540_000), "2.5M");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_dates() {
        assert_eq!(format_date_long("2024-01-05T10:20:30Z"), "January 5, 2024");
        assert_eq!(format_date_short("2024-01-05T10:20:30Z"), "Jan 5, 2024");
    }

    #[test]
    fn test_bad_date_is_echoed() {
        assert_eq!(format_date_long("yesterday"), "yesterday");
    }
}
