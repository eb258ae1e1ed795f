//! Conversions between instants and their display, input and storage forms.
//!
//! Raw values are strings because that is how due dates are persisted and
//! typed in. The formatting helpers never fail: invalid input falls back to a
//! sentinel (`"Invalid date"`) or to the current instant.

use crate::error::TodoError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Sentinel returned by [`format_display`] for unparseable input
pub const INVALID_DATE: &str = "Invalid date";

/// Layout used by the due-date input field
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Input layout with seconds and an optional fraction
const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Date-only layout, read as midnight UTC
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Human-readable layout: short weekday, short month, day, 12-hour time
const DISPLAY_FORMAT: &str = "%a, %b %-d, %I:%M %p";

/// Parse a raw date-time value into an absolute instant.
///
/// Accepts RFC 3339 (`2026-10-19T14:30:00Z`, `2026-10-19T16:30:00+02:00`),
/// the local input layout `YYYY-MM-DDTHH:MM` optionally followed by seconds
/// and a fraction, and a bare `YYYY-MM-DD` date (midnight UTC).
///
/// A local time repeated by a DST fall-back resolves to its earlier instant.
/// A local time skipped by a spring-forward gap is rejected.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, TodoError> {
    let trimmed = raw.trim();
    let invalid = || TodoError::InvalidDate(raw.to_string());
    if trimmed.is_empty() {
        return Err(invalid());
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
        return Ok(Utc.from_utc_datetime(&midnight));
    }

    let naive = NaiveDateTime::parse_from_str(trimmed, INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, SECONDS_FORMAT))
        .map_err(|_| invalid())?;

    resolve_local(&Local, &naive).ok_or_else(invalid)
}

/// Wall-clock time in `tz` as an instant; the earlier one when it occurs twice
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// True iff the value is a real point in time
pub fn is_valid(raw: &str) -> bool {
    parse_instant(raw).is_ok()
}

/// Format for display, e.g. "Mon, Oct 19, 03:45 PM" (local time)
pub fn format_display(raw: &str) -> String {
    match parse_instant(raw) {
        Ok(instant) => format_display_at(instant),
        Err(_) => INVALID_DATE.to_string(),
    }
}

/// Format a typed instant for display
fn format_display_at(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format(DISPLAY_FORMAT)
        .to_string()
}

/// Format for the due-date input field; invalid input formats the current instant
pub fn format_for_input(raw: &str) -> String {
    let instant = parse_instant(raw).unwrap_or_else(|_| Utc::now());
    format_for_input_at(instant)
}

/// Format a typed instant in the input layout (local time)
fn format_for_input_at(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format(INPUT_FORMAT).to_string()
}

/// Serialize an instant the way due dates are persisted (UTC, millisecond precision)
pub fn to_storage(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_is_valid() {
        assert!(is_valid("2026-10-19T14:30:00Z"));
        assert!(is_valid("2026-10-19T14:30:00.123Z"));
        assert!(is_valid("2026-10-19T16:30:00+02:00"));
        assert!(is_valid("2026-10-19T14:30"));
        assert!(!is_valid(""));
        assert!(!is_valid("not a date"));
        assert!(!is_valid("2026-13-40T99:99"));
        assert!(!is_valid("NaN"));
    }

    #[test]
    fn test_parse_rfc3339_normalizes_to_utc() {
        let instant = parse_instant("2026-10-19T16:30:00+02:00").unwrap();
        assert_eq!(to_storage(instant), "2026-10-19T14:30:00.000Z");
    }

    #[test]
    fn test_parse_input_layout_is_local_time() {
        let instant = parse_instant("2026-10-19T14:30").unwrap();
        assert_eq!(format_for_input_at(instant), "2026-10-19T14:30");
    }

    #[test]
    fn test_format_display_invalid() {
        assert_eq!(format_display("garbage"), INVALID_DATE);
        assert_eq!(format_display(""), INVALID_DATE);
    }

    #[test]
    fn test_format_display_layout() {
        let local = Local.with_ymd_and_hms(2026, 10, 19, 15, 45, 0).unwrap();
        let display = format_display_at(local.with_timezone(&Utc));
        assert_eq!(display, "Mon, Oct 19, 03:45 PM");

        let raw = to_storage(local.with_timezone(&Utc));
        assert_eq!(format_display(&raw), display);
    }

    #[test]
    fn test_format_for_input_roundtrips_valid() {
        let local = Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 0).unwrap();
        let raw = to_storage(local.with_timezone(&Utc));
        assert_eq!(format_for_input(&raw), "2026-01-02T03:04");
    }

    #[test]
    fn test_parse_seconds_fraction_and_date_only() {
        let with_fraction = parse_instant("2026-10-19T14:30:00.000").unwrap();
        assert_eq!(with_fraction, parse_instant("2026-10-19T14:30").unwrap());
        assert_eq!(
            parse_instant("2026-10-19T14:30:15").unwrap(),
            with_fraction + Duration::seconds(15)
        );

        let date_only = parse_instant("2026-10-19").unwrap();
        assert_eq!(to_storage(date_only), "2026-10-19T00:00:00.000Z");
        assert!(!is_valid("2026-02-30"));
    }

    #[test]
    fn test_every_existing_local_time_is_valid() {
        // Walks a whole year so fall-back hours are covered in zones with DST
        let start = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        for step in 0..(365 * 48) {
            let naive = start + Duration::minutes(30 * step);
            let raw = naive.format(INPUT_FORMAT).to_string();
            match Local.from_local_datetime(&naive).earliest() {
                Some(earliest) => {
                    assert_eq!(parse_instant(&raw).unwrap(), earliest.with_timezone(&Utc));
                    assert_ne!(format_display(&raw), INVALID_DATE);
                }
                None => assert!(!is_valid(&raw)),
            }
        }
    }

    #[test]
    fn test_resolve_local_in_fixed_zones() {
        let utc = Utc.with_ymd_and_hms(2026, 11, 1, 6, 30, 0).unwrap();
        let naive = utc.naive_utc();
        assert_eq!(resolve_local(&Utc, &naive), Some(utc));

        let offset = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(resolve_local(&offset, &naive), Some(utc - Duration::hours(2)));
    }

    #[test]
    fn test_format_for_input_falls_back_to_now() {
        let before = Utc::now() - Duration::minutes(1);
        let formatted = format_for_input("definitely not a date");
        let parsed = parse_instant(&formatted).unwrap();
        assert!(parsed >= before);
        assert!(parsed <= Utc::now() + Duration::minutes(1));
    }
}
