//! # Ticket Queries
//!
//! Request parameters for the list endpoint and their normalized form.
//! The pipeline itself lives in [`executor`]; name resolution in [`enrich`].

pub mod enrich;
pub mod executor;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tb_core::time::{end_of_day, parse_date, parse_timestamp, start_of_day};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 20;

/// Query string of `GET /api/tickets`, as sent by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

/// A normalized list request. Empty filters are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketQuery {
    pub page: usize,
    pub limit: usize,
    pub search: Option<String>,
    pub status: Option<String>,
    pub created: DateRange,
}

impl Default for TicketQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
            status: None,
            created: DateRange::default(),
        }
    }
}

impl TicketQuery {
    pub fn from_params(params: TicketListParams, default_limit: usize) -> Self {
        Self {
            page: positive_or(params.page.as_deref(), DEFAULT_PAGE),
            limit: positive_or(params.limit.as_deref(), default_limit.max(1)),
            search: non_empty(params.search),
            status: non_empty(params.status),
            created: DateRange {
                start: DateBound::parse(params.start_date.as_deref(), start_bound),
                end: DateBound::parse(params.end_date.as_deref(), end_bound),
            },
        }
    }

    /// Offset of the first ticket on the requested page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// One side of the `created_at` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateBound {
    #[default]
    Open,
    At(DateTime<Utc>),
    /// The bound was given but could not be read. Nothing satisfies it.
    Invalid,
}

impl DateBound {
    fn parse(raw: Option<&str>, read: fn(&str) -> Option<DateTime<Utc>>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::Open,
            Some(value) => read(value).map_or(Self::Invalid, Self::At),
        }
    }
}

/// Inclusive `created_at` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: DateBound,
    pub end: DateBound,
}

impl DateRange {
    pub fn is_open(&self) -> bool {
        self.start == DateBound::Open && self.end == DateBound::Open
    }

    /// Tickets with a missing or unreadable `created_at` never fall inside a
    /// window that has at least one bound.
    pub fn contains(&self, created_at: Option<&str>) -> bool {
        if self.is_open() {
            return true;
        }
        let Some(ts) = created_at.and_then(parse_timestamp) else {
            return false;
        };
        let after_start = match self.start {
            DateBound::Open => true,
            DateBound::At(start) => ts >= start,
            DateBound::Invalid => false,
        };
        let before_end = match self.end {
            DateBound::Open => true,
            DateBound::At(end) => ts <= end,
            DateBound::Invalid => false,
        };
        after_start && before_end
    }
}

/// A bare date starts at midnight; a full timestamp is taken as given.
fn start_bound(value: &str) -> Option<DateTime<Utc>> {
    match parse_date(value) {
        Some(date) => Some(start_of_day(date)),
        None => parse_timestamp(value),
    }
}

/// Whatever the input, the bound is the last millisecond of its day.
fn end_bound(value: &str) -> Option<DateTime<Utc>> {
    let date = match parse_date(value) {
        Some(date) => date,
        None => parse_timestamp(value)?.date_naive(),
    };
    Some(end_of_day(date))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Reads the leading integer of `raw` (`"3abc"` is 3). Missing, unreadable
/// and non-positive values give `fallback`.
fn positive_or(raw: Option<&str>, fallback: usize) -> usize {
    raw.and_then(leading_int)
        .filter(|n| *n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(fallback)
}

/// Leading optionally-signed integer after any whitespace; the rest is ignored.
pub(crate) fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn params(pairs: &[(&str, &str)]) -> TicketListParams {
        let mut p = TicketListParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "page" => p.page = value,
                "limit" => p.limit = value,
                "search" => p.search = value,
                "status" => p.status = value,
                "startDate" => p.start_date = value,
                "endDate" => p.end_date = value,
                other => panic!("unknown param {other}"),
            }
        }
        p
    }

    #[test]
    fn test_defaults() {
        let q = TicketQuery::from_params(TicketListParams::default(), DEFAULT_LIMIT);
        assert_eq!(q, TicketQuery::default());
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_lenient_integers() {
        let q = TicketQuery::from_params(params(&[("page", "3abc"), ("limit", " 15")]), 20);
        assert_eq!((q.page, q.limit), (3, 15));
        assert_eq!(q.offset(), 30);

        for bad in ["0", "-2", "abc", ""] {
            let q = TicketQuery::from_params(params(&[("page", bad), ("limit", bad)]), 20);
            assert_eq!((q.page, q.limit), (1, 20), "input {bad:?}");
        }
    }

    #[test]
    fn test_configured_default_limit() {
        let q = TicketQuery::from_params(TicketListParams::default(), 50);
        assert_eq!(q.limit, 50);
    }

    #[test]
    fn test_empty_filters_are_none() {
        let q = TicketQuery::from_params(params(&[("search", ""), ("status", "")]), 20);
        assert_eq!(q.search, None);
        assert_eq!(q.status, None);
        assert!(q.created.is_open());
    }

    #[test]
    fn test_end_date_covers_whole_day() {
        let q = TicketQuery::from_params(params(&[("endDate", "2024-03-10")]), 20);
        assert!(q.created.contains(Some("2024-03-10T23:59:00Z")));
        assert!(q.created.contains(Some("2024-03-10T23:59:59.999Z")));
        assert!(!q.created.contains(Some("2024-03-11T00:00:01Z")));
    }

    #[test]
    fn test_start_date_is_inclusive_from_midnight() {
        let q = TicketQuery::from_params(params(&[("startDate", "2024-03-10")]), 20);
        assert!(q.created.contains(Some("2024-03-10T00:00:00Z")));
        assert!(!q.created.contains(Some("2024-03-09T23:59:59Z")));
    }

    #[test]
    fn test_timestamp_bounds() {
        let q = TicketQuery::from_params(
            params(&[
                ("startDate", "2024-03-10T12:00:00Z"),
                ("endDate", "2024-03-12T08:00:00Z"),
            ]),
            20,
        );
        let day = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
        assert_eq!(q.created.end, DateBound::At(end_of_day(day)));
        assert!(!q.created.contains(Some("2024-03-10T11:59:59Z")));
        assert!(q.created.contains(Some("2024-03-12T20:00:00Z")));
    }

    #[test]
    fn test_unreadable_created_at_fails_active_window() {
        let q = TicketQuery::from_params(params(&[("startDate", "2024-01-01")]), 20);
        assert!(!q.created.contains(None));
        assert!(!q.created.contains(Some("yesterday")));

        let open = DateRange::default();
        assert!(open.contains(None));
        assert!(open.contains(Some("yesterday")));
    }

    #[test]
    fn test_unreadable_bound_matches_nothing() {
        let q = TicketQuery::from_params(params(&[("endDate", "soon")]), 20);
        assert_eq!(q.created.end, DateBound::Invalid);
        assert!(!q.created.contains(Some("2024-03-10T10:00:00Z")));
    }
}
