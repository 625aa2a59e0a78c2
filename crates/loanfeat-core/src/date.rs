//! Date parsing for contract fields and application dates
//!
//! Contract dates always use the `DD.MM.YYYY` form. Application dates come
//! from upstream exports in several shapes; all of them reduce to a calendar
//! date with any time of day and UTC offset dropped.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Format of `claim_date` and `contract_date`
pub const CONTRACT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Offset-carrying date-time shapes; the local wall-clock date is kept.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", CONTRACT_DATE_FORMAT];

/// Errors from date parsing and date arithmetic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Invalid date {value:?}: expected {expected}")]
    Invalid { value: String, expected: &'static str },

    #[error("Date arithmetic out of range: {date} - {days} days")]
    OutOfRange { date: NaiveDate, days: u32 },
}

/// Parse a contract date (`DD.MM.YYYY`)
///
/// Dates outside chrono's representable range fail like any other
/// malformed value.
pub fn parse_contract_date(value: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(value.trim(), CONTRACT_DATE_FORMAT).map_err(|_| DateError::Invalid {
        value: value.to_string(),
        expected: "DD.MM.YYYY",
    })
}

/// Parse an application date into a calendar date
///
/// Accepts ISO dates, ISO date-times (with `T` or space, optional fractional
/// seconds), RFC 3339 and other offset date-times, and `DD.MM.YYYY`.
pub fn parse_application_date(value: &str) -> Result<NaiveDate, DateError> {
    let s = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local().date());
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.naive_local().date());
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(DateError::Invalid {
        value: value.to_string(),
        expected: "an ISO 8601 date or date-time",
    })
}

/// First day of the inclusive window of `days` days ending at `date`
pub fn window_start(date: NaiveDate, days: u32) -> Result<NaiveDate, DateError> {
    date.checked_sub_days(Days::new(u64::from(days)))
        .ok_or(DateError::OutOfRange { date, days })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_contract_date() {
        assert_eq!(parse_contract_date("15.05.2024"), Ok(ymd(2024, 5, 15)));
        assert_eq!(parse_contract_date("1.2.2024"), Ok(ymd(2024, 2, 1)));
    }

    #[test]
    fn test_contract_date_invalid() {
        assert!(parse_contract_date("2024-05-15").is_err());
        assert!(parse_contract_date("31.02.2024").is_err());
        assert!(parse_contract_date("yesterday").is_err());
        assert!(parse_contract_date("01.01.999999999").is_err());
    }

    #[test]
    fn test_application_date_shapes() {
        let expected = ymd(2024, 6, 1);
        for input in [
            "2024-06-01",
            "2024-06-01 00:00:00",
            "2024-06-01T13:45:10",
            "2024-06-01 13:45:10.123456",
            "2024-06-01T13:45:10.5+03:00",
            "2024-06-01 23:30:00+05:00",
            "2024-06-01T08:00:00Z",
            "2024-06-01 10:15",
            "01.06.2024",
        ] {
            assert_eq!(parse_application_date(input), Ok(expected), "{input}");
        }
    }

    #[test]
    fn test_application_date_keeps_local_date() {
        // 23:30 at +05:00 is the previous day in UTC; the local date wins
        assert_eq!(
            parse_application_date("2024-06-01T23:30:00+05:00"),
            Ok(ymd(2024, 6, 1))
        );
    }

    #[test]
    fn test_application_date_invalid() {
        assert!(parse_application_date("").is_err());
        assert!(parse_application_date("not a date").is_err());
        assert!(parse_application_date("2024-13-01").is_err());
    }

    #[test]
    fn test_window_start() {
        assert_eq!(window_start(ymd(2024, 6, 1), 180), Ok(ymd(2023, 12, 4)));
        assert!(matches!(
            window_start(NaiveDate::MIN, 1),
            Err(DateError::OutOfRange { .. })
        ));
    }
}
