//! Date parsing for the date operators.
//!
//! Accepts ISO-8601 dates and date-times. Values without an offset are read
//! as UTC. The literal `"null"` maps to a configurable default date instead
//! of failing.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::error::ScriptError;

/// Date-time formats carrying an offset, tried after RFC 3339.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

/// Date-time formats without an offset.
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a response or operand into an instant.
///
/// # Errors
///
/// Returns [`ScriptError::InvalidDateFormat`] when `value` is neither
/// `"null"` nor an ISO-8601 date or date-time.
pub fn parse_date(value: &str, null_date: NaiveDate) -> Result<DateTime<FixedOffset>, ScriptError> {
    let trimmed = value.trim();
    if trimmed == "null" {
        return Ok(start_of_day(null_date));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(start_of_day(date));
    }

    Err(ScriptError::InvalidDateFormat {
        value: value.to_string(),
    })
}

/// Calendar day of an instant, in the offset it was written with.
#[must_use]
pub fn calendar_day(instant: &DateTime<FixedOffset>) -> NaiveDate {
    instant.date_naive()
}

fn start_of_day(date: NaiveDate) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_naive_utc_and_offset(date.and_time(chrono::NaiveTime::MIN), Utc)
        .fixed_offset()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn epoch() -> NaiveDate {
        NaiveDate::default()
    }

    #[test_case("2024-01-01" ; "date only")]
    #[test_case("2024-01-01T08:00:00Z" ; "rfc3339 utc")]
    #[test_case("2024-01-01T08:00:00+02:00" ; "rfc3339 offset")]
    #[test_case("2024-01-01T08:00:00.250Z" ; "fractional seconds")]
    #[test_case("2024-01-01T08:00Z" ; "minutes with zulu")]
    #[test_case("2024-01-01T08:00:00" ; "naive seconds")]
    #[test_case("2024-01-01T08:00" ; "naive minutes")]
    #[test_case(" 2024-01-01 " ; "surrounding whitespace")]
    fn test_parses_iso_forms(value: &str) {
        let parsed = parse_date(value, epoch()).unwrap();
        assert_eq!(
            calendar_day(&parsed),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_null_maps_to_configured_default() {
        let default = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        let parsed = parse_date("null", default).unwrap();
        assert_eq!(calendar_day(&parsed), default);
    }

    #[test]
    fn test_null_default_is_epoch() {
        let parsed = parse_date("null", epoch()).unwrap();
        assert_eq!(parsed.timestamp(), 0);
    }

    #[test_case("yesterday")]
    #[test_case("01/02/2024")]
    #[test_case("2024-13-01")]
    #[test_case("")]
    fn test_rejects_non_dates(value: &str) {
        let err = parse_date(value, epoch()).unwrap_err();
        assert_eq!(
            err,
            ScriptError::InvalidDateFormat {
                value: value.to_string()
            }
        );
    }

    #[test]
    fn test_naive_values_are_utc() {
        let naive = parse_date("2024-01-01T08:00:00", epoch()).unwrap();
        let zulu = parse_date("2024-01-01T08:00:00Z", epoch()).unwrap();
        assert_eq!(naive, zulu);
    }

    #[test]
    fn test_calendar_day_uses_written_offset() {
        let late = parse_date("2024-01-01T23:30:00-05:00", epoch()).unwrap();
        assert_eq!(
            calendar_day(&late),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }
}
