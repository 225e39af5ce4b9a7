//! Record normalization: raw `(timestamp-key, value)` pairs into ordered samples.

use std::collections::HashMap;
use std::time::Instant;

use chrono::{DateTime, Utc};

use super::range::TimeRange;
use super::summary::Summary;
use crate::error::NormalizeError;

/// Display format for sample instants: `HH:MM:SS DD/MM/YYYY`, always UTC.
pub const DISPLAY_FORMAT: &str = "%H:%M:%S %d/%m/%Y";

/// A raw snapshot as read from the store.
///
/// Keys are Unix epoch seconds encoded as strings, values are temperature
/// readings. Iteration order carries no meaning.
pub type RawSnapshot = HashMap<String, f64>;

/// One normalized temperature reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Absolute point in time, UTC.
    pub instant: DateTime<Utc>,
    /// `instant` rendered with [`DISPLAY_FORMAT`].
    pub display_text: String,
    /// Temperature reading, passed through unchanged.
    pub value: f64,
}

impl Sample {
    /// Build a sample from whole seconds since the Unix epoch.
    ///
    /// Returns `None` if the count does not map onto a calendar date.
    pub fn from_epoch_seconds(seconds: i64, value: f64) -> Option<Self> {
        let instant = DateTime::<Utc>::from_timestamp(seconds, 0)?;
        Some(Self {
            display_text: instant.format(DISPLAY_FORMAT).to_string(),
            instant,
            value,
        })
    }

    /// Seconds since the Unix epoch as a float, for chart coordinates.
    pub fn epoch_seconds(&self) -> f64 {
        self.instant.timestamp() as f64
    }
}

/// Normalize a raw snapshot into samples ordered by ascending instant.
///
/// Keys are compared numerically, so `"9"` sorts before `"10"`. Every entry
/// is kept exactly once. An absent or empty snapshot yields an empty vector.
///
/// A single key that does not parse aborts the whole batch with
/// [`NormalizeError::MalformedKey`].
///
/// ```
/// use nanotemp::data::{normalize, RawSnapshot};
///
/// let raw = RawSnapshot::from([("10".to_string(), 2.0), ("9".to_string(), 1.0)]);
/// let samples = normalize(Some(&raw)).unwrap();
/// assert_eq!(samples[0].value, 1.0);
/// assert_eq!(samples[1].display_text, "00:00:10 01/01/1970");
/// ```
pub fn normalize(raw: Option<&RawSnapshot>) -> Result<Vec<Sample>, NormalizeError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let mut keyed: Vec<(i64, &str, f64)> = raw
        .iter()
        .map(|(key, &value)| parse_key(key).map(|seconds| (seconds, key.as_str(), value)))
        .collect::<Result<_, _>>()?;

    // Keys like "09" and "9" parse to the same second; the string breaks the tie
    keyed.sort_unstable_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    keyed
        .into_iter()
        .map(|(seconds, key, value)| {
            Sample::from_epoch_seconds(seconds, value).ok_or_else(|| malformed(key))
        })
        .collect()
}

fn parse_key(key: &str) -> Result<i64, NormalizeError> {
    match key.trim().parse::<i64>() {
        Ok(seconds) if seconds >= 0 => Ok(seconds),
        _ => Err(malformed(key)),
    }
}

fn malformed(key: &str) -> NormalizeError {
    NormalizeError::MalformedKey {
        key: key.to_string(),
    }
}

/// The full sample sequence produced by one poll.
///
/// A series is built from scratch on every tick and replaces the previous
/// one; nothing is merged or cached across ticks.
#[derive(Debug, Clone)]
pub struct Series {
    samples: Vec<Sample>,
    /// When this series was fetched, for the "updated N s ago" indicator.
    pub fetched_at: Instant,
}

impl Series {
    /// Wrap already-normalized samples.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            samples,
            fetched_at: Instant::now(),
        }
    }

    /// Normalize a raw snapshot into a series.
    pub fn from_snapshot(raw: Option<&RawSnapshot>) -> Result<Self, NormalizeError> {
        normalize(raw).map(Self::new)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` means "no data available", not a failure.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn summary(&self) -> Summary {
        Summary::of(&self.samples)
    }

    /// Samples inside the closed range.
    pub fn select(&self, range: &TimeRange) -> &[Sample] {
        range.select(&self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[(&str, f64)]) -> RawSnapshot {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_numeric_not_lexicographic_order() {
        let samples = normalize(Some(&raw(&[("10", 2.0), ("9", 1.0)]))).unwrap();
        let seconds: Vec<i64> = samples.iter().map(|s| s.instant.timestamp()).collect();
        assert_eq!(seconds, vec![9, 10]);
        assert_eq!(samples[0].value, 1.0);
        assert_eq!(samples[1].value, 2.0);
    }

    #[test]
    fn test_keeps_every_entry_in_order() {
        let input = raw(&[
            ("1700000300", 21.5),
            ("1700000000", 20.0),
            ("1700000100", 20.5),
            ("1700000200", 21.0),
            ("99", -4.0),
        ]);
        let samples = normalize(Some(&input)).unwrap();
        assert_eq!(samples.len(), input.len());
        assert!(samples.windows(2).all(|w| w[0].instant <= w[1].instant));
        assert_eq!(samples[0].value, -4.0);
        assert_eq!(samples[4].value, 21.5);
    }

    #[test]
    fn test_epoch_zero_display_text() {
        let samples = normalize(Some(&raw(&[("0", 5.0)]))).unwrap();
        assert_eq!(samples[0].display_text, "00:00:00 01/01/1970");
    }

    #[test]
    fn test_display_text_is_utc() {
        let samples = normalize(Some(&raw(&[("1700000000", 5.0)]))).unwrap();
        assert_eq!(samples[0].display_text, "22:13:20 14/11/2023");
    }

    #[test]
    fn test_empty_and_absent_input() {
        assert!(normalize(Some(&RawSnapshot::new())).unwrap().is_empty());
        assert!(normalize(None).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_key_aborts_batch() {
        let err = normalize(Some(&raw(&[("abc", 5.0)]))).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::MalformedKey {
                key: "abc".to_string()
            }
        );

        let mixed = raw(&[("10", 1.0), ("12.5", 2.0), ("20", 3.0)]);
        assert!(matches!(
            normalize(Some(&mixed)),
            Err(NormalizeError::MalformedKey { key }) if key == "12.5"
        ));
    }

    #[test]
    fn test_negative_and_out_of_range_keys_are_malformed() {
        assert!(normalize(Some(&raw(&[("-5", 1.0)]))).is_err());
        assert!(normalize(Some(&raw(&[("99999999999999999", 1.0)]))).is_err());
    }

    #[test]
    fn test_value_passed_through() {
        let samples = normalize(Some(&raw(&[("1", 1234.5678), ("2", -273.15)]))).unwrap();
        assert_eq!(samples[0].value, 1234.5678);
        assert_eq!(samples[1].value, -273.15);
    }

    #[test]
    fn test_idempotent() {
        let input = raw(&[("30", 3.0), ("10", 1.0), ("20", 2.0), ("010", 9.0)]);
        let first = normalize(Some(&input)).unwrap();
        let second = normalize(Some(&input)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_series_accessors() {
        let series = Series::from_snapshot(Some(&raw(&[("2", 4.0), ("1", 3.0)]))).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest().map(|s| s.value), Some(4.0));

        let empty = Series::from_snapshot(None).unwrap();
        assert!(empty.is_empty());
        assert!(empty.latest().is_none());
    }
}
