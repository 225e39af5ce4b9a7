//! Summary statistics shown next to the chart.

use super::sample::Sample;

/// Latest, minimum and maximum readings of a series.
///
/// Ties on minimum or maximum resolve to the earliest sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub latest: Option<Sample>,
    pub min: Option<Sample>,
    pub max: Option<Sample>,
    pub count: usize,
}

impl Summary {
    /// Summarize samples ordered by ascending instant.
    pub fn of(samples: &[Sample]) -> Self {
        let mut min: Option<&Sample> = None;
        let mut max: Option<&Sample> = None;

        for sample in samples {
            // Strict comparisons keep the first occurrence; NaN never wins
            if min.map_or(!sample.value.is_nan(), |m| sample.value < m.value) {
                min = Some(sample);
            }
            if max.map_or(!sample.value.is_nan(), |m| sample.value > m.value) {
                max = Some(sample);
            }
        }

        Self {
            latest: samples.last().cloned(),
            min: min.cloned(),
            max: max.cloned(),
            count: samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i64, f64)]) -> Vec<Sample> {
        points
            .iter()
            .map(|&(t, v)| Sample::from_epoch_seconds(t, v).unwrap())
            .collect()
    }

    #[test]
    fn test_empty() {
        let summary = Summary::of(&[]);
        assert!(summary.is_empty());
        assert!(summary.latest.is_none());
        assert!(summary.min.is_none());
        assert!(summary.max.is_none());
    }

    #[test]
    fn test_latest_min_max() {
        let summary = Summary::of(&series(&[(1, 20.0), (2, 18.5), (3, 23.0), (4, 21.0)]));
        assert_eq!(summary.count, 4);
        assert_eq!(summary.latest.unwrap().value, 21.0);
        assert_eq!(summary.min.unwrap().instant.timestamp(), 2);
        assert_eq!(summary.max.unwrap().instant.timestamp(), 3);
    }

    #[test]
    fn test_ties_take_first_occurrence() {
        let summary = Summary::of(&series(&[(1, 5.0), (2, 9.0), (3, 5.0), (4, 9.0)]));
        assert_eq!(summary.min.unwrap().instant.timestamp(), 1);
        assert_eq!(summary.max.unwrap().instant.timestamp(), 2);
    }

    #[test]
    fn test_nan_is_skipped() {
        let summary = Summary::of(&series(&[(1, f64::NAN), (2, 7.0), (3, f64::NAN)]));
        assert_eq!(summary.min.unwrap().value, 7.0);
        assert_eq!(summary.max.unwrap().value, 7.0);
        assert!(summary.latest.unwrap().value.is_nan());
    }
}
