//! Parsing of raw request values into typed inputs.

use chrono::NaiveDateTime;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::YearMonth;

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an ISO-8601 local date-time such as `2025-01-01T10:10:10`.
///
/// Fractional seconds are accepted, and seconds may be omitted.
/// A value that cannot be parsed makes the whole interval invalid.
pub fn parse_timestamp(value: &str) -> AnalyticsResult<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| AnalyticsError::invalid_interval(format!("cannot parse timestamp '{value}'")))
}

/// Parses a `YYYY-MM` month selector.
pub fn parse_month(value: &str) -> AnalyticsResult<YearMonth> {
    value.parse()
}

/// Parses a non-negative day count.
pub fn parse_since_days(value: &str) -> AnalyticsResult<u32> {
    value
        .parse::<u32>()
        .map_err(|_| AnalyticsError::invalid_number(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2025-01-01T10:10:10").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(ts.hour(), 10);
        assert_eq!(ts.second(), 10);
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert!(parse_timestamp("2025-01-01T10:10:10.123456789").is_ok());
        assert!(parse_timestamp("2025-01-01T10:10").is_ok());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        for input in ["0", "", "2025-01-01", "2025-01-01 10:10:10", "yesterday"] {
            assert!(
                matches!(parse_timestamp(input), Err(AnalyticsError::InvalidInterval { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_since_days() {
        assert_eq!(parse_since_days("0").unwrap(), 0);
        assert_eq!(parse_since_days("100000").unwrap(), 100_000);
        assert!(matches!(parse_since_days("fon"), Err(AnalyticsError::InvalidNumber { .. })));
        assert!(parse_since_days("-1").is_err());
        assert!(parse_since_days("1.5").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-01").unwrap().to_string(), "2025-01");
        assert!(matches!(parse_month("fon"), Err(AnalyticsError::InvalidMonth { .. })));
    }
}
