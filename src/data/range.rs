//! Closed time-range selection over normalized samples.

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::sample::Sample;

/// Select the samples whose instant lies in `[start, end]`, both ends inclusive.
///
/// `samples` must already be sorted by instant (as [`normalize`] guarantees);
/// the result is then a contiguous sub-slice located by binary search.
/// An inverted range (`start > end`) selects nothing.
///
/// [`normalize`]: super::normalize
pub fn filter_range(samples: &[Sample], start: DateTime<Utc>, end: DateTime<Utc>) -> &[Sample] {
    if start > end {
        return &[];
    }
    let first = samples.partition_point(|s| s.instant < start);
    let past_last = samples.partition_point(|s| s.instant <= end);
    &samples[first..past_last.max(first)]
}

/// A closed interval of UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Combine separately entered dates and times of day into a range.
    ///
    /// Both halves are interpreted as UTC.
    pub fn from_parts(
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_date: NaiveDate,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            start: NaiveDateTime::new(start_date, start_time).and_utc(),
            end: NaiveDateTime::new(end_date, end_time).and_utc(),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// `true` when the start lies after the end; such a range matches nothing.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Samples inside this range. See [`filter_range`].
    pub fn select<'a>(&self, samples: &'a [Sample]) -> &'a [Sample] {
        filter_range(samples, self.start, self.end)
    }
}

/// Formats accepted by [`parse_utc_datetime`].
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a `YYYY-MM-DD HH:MM[:SS]` string as a UTC instant.
///
/// A bare date means midnight at the start of that day.
pub fn parse_utc_datetime(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    bail!("Unknown date/time format: {} (expected YYYY-MM-DD HH:MM[:SS])", s)
}
