// src/services/format.rs
use chrono::DateTime;
use chrono_tz::Tz;

// `-0.0 + 0.0` is `0.0`, so negative zero never prints as `-0.00`.
pub fn format_money(value: f64) -> String {
    format!("${:.2}", value + 0.0)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value + 0.0)
}

/// Unix seconds to a `M/D/YYYY` date in `tz`.
pub fn format_date(timestamp: i64, tz: Tz) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(&tz).format("%-m/%-d/%Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_and_percent_use_two_decimals() {
        assert_eq!(format_money(150.2), "$150.20");
        assert_eq!(format_percent(12.345), "12.35%");
        assert_eq!(format_percent(-3.0), "-3.00%");
    }

    #[test]
    fn negative_zero_prints_unsigned() {
        assert_eq!(format_money(-0.0), "$0.00");
        assert_eq!(format_percent(-0.0), "0.00%");
    }

    #[test]
    fn dates_follow_the_display_zone() {
        assert_eq!(format_date(1_700_000_000, Tz::UTC), "11/14/2023");
        assert_eq!(format_date(1_700_000_000, Tz::Asia__Tokyo), "11/15/2023");
        assert_eq!(format_date(i64::MAX, Tz::UTC), "Invalid Date");
    }
}
