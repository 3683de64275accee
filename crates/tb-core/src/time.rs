//! Timestamp handling for export fields and date-range bounds.
//!
//! Export timestamps are plain strings. Anything without an explicit offset
//! is read as UTC, which is also the zone calendar days are computed in.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an export timestamp. Returns `None` for empty or unrecognized text.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    parse_date(value).map(start_of_day)
}

/// Parse a bare `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// `00:00:00.000` UTC on `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// `23:59:59.999` UTC on `date`.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rfc3339_with_offset_is_normalized_to_utc() {
        let ts = parse_timestamp("2023-05-01T10:00:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-05-01T08:00:00+00:00");
    }

    #[test]
    fn test_naive_formats_read_as_utc() {
        let a = parse_timestamp("2023-05-01T10:15:30.250").unwrap();
        let b = parse_timestamp("2023-05-01 10:15:30").unwrap();
        assert_eq!(a.hour(), 10);
        assert_eq!(a.timestamp_subsec_millis(), 250);
        assert_eq!(b.minute(), 15);
    }

    #[test]
    fn test_bare_date_is_midnight() {
        let ts = parse_timestamp("2023-05-01").unwrap();
        assert_eq!(ts, start_of_day(date(2023, 5, 1)));
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("2023-13-45").is_none());
    }

    #[test]
    fn test_end_of_day_is_last_millisecond() {
        let end = end_of_day(date(2024, 2, 29));
        assert_eq!(end.to_rfc3339(), "2024-02-29T23:59:59.999+00:00");
    }
}
