//! Median / MAD dispersion and robust z-scores
//!
//! The median absolute deviation (MAD) is the median of `|x - median|` over a
//! sample. Unlike the standard deviation it is barely moved by a few extreme
//! values, which makes it a good yardstick for spotting entries that sit far
//! below the bulk of a sample.
//!
//! # Robust z-score
//!
//! ```text
//! z = k * (x - median) / mad
//! ```
//!
//! `k = 0.6745` (the 75th percentile of the standard normal) rescales the MAD
//! so the score reads like a standard z-score when the data is normal. When
//! `mad == 0` every score is `0.0`: a sample where more than half the values
//! coincide gives the MAD nothing to measure against.
//!
//! # Examples
//!
//! ```
//! use episieve_stats::robust::RobustDispersion;
//!
//! let counts = [500, 480, 50, 510, 495, 20];
//! let robust = RobustDispersion::from_counts(&counts, RobustDispersion::DEFAULT_CONSISTENCY).unwrap();
//!
//! assert!((robust.median - 2.689).abs() < 1e-3);
//! assert_eq!(robust.low_outliers(-2.0), vec![2, 5]);
//! ```

use crate::{descriptive::median_of_sorted, transform::log_counts};

/// Median, MAD and per-value robust z-scores of a sample.
#[derive(Debug, Clone)]
pub struct RobustDispersion {
    /// Median of the (transformed) sample.
    pub median: f64,
    /// Median absolute deviation from [`median`](Self::median).
    pub mad: f64,
    /// Robust z-score of each value, aligned with the input order.
    pub z_scores: Vec<f64>,
}

impl RobustDispersion {
    /// Scale constant that calibrates MAD against a normal standard deviation.
    pub const DEFAULT_CONSISTENCY: f64 = 0.6745;

    /// Estimates dispersion of raw counts in the `log10(c + 1)` domain.
    ///
    /// Returns `None` for an empty sample.
    #[must_use]
    pub fn from_counts(counts: &[u64], consistency: f64) -> Option<Self> {
        Self::from_values(&log_counts(counts), consistency)
    }

    /// Estimates dispersion of already-transformed values.
    ///
    /// Returns `None` for an empty sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use episieve_stats::robust::RobustDispersion;
    ///
    /// // More than half of the values tie, so the MAD collapses to zero
    /// let robust = RobustDispersion::from_values(&[3.0, 3.0, 3.0, 0.5], 0.6745).unwrap();
    /// assert_eq!(robust.mad, 0.0);
    /// assert!(robust.z_scores.iter().all(|z| *z == 0.0));
    /// ```
    #[must_use]
    pub fn from_values(values: &[f64], consistency: f64) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median = median_of_sorted(&sorted)?;

        let mut deviations = values
            .iter()
            .map(|x| (x - median).abs())
            .collect::<Vec<_>>();
        deviations.sort_by(f64::total_cmp);
        let mad = median_of_sorted(&deviations)?;

        let z_scores = values
            .iter()
            .map(|x| robust_z_score(*x, median, mad, consistency))
            .collect();

        Some(Self {
            median,
            mad,
            z_scores,
        })
    }

    /// Indices of values whose z-score is strictly below `threshold`.
    ///
    /// Only the low tail is reported; unusually high values are never flagged.
    #[must_use]
    pub fn low_outliers(&self, threshold: f64) -> Vec<usize> {
        self.z_scores
            .iter()
            .enumerate()
            .filter(|(_, z)| **z < threshold)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Robust z-score of `value`, or `0.0` when `mad` is zero.
#[must_use]
pub fn robust_z_score(value: f64, median: f64, mad: f64, consistency: f64) -> f64 {
    if mad == 0.0 {
        return 0.0;
    }
    consistency * (value - median) / mad
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(counts: &[u64]) -> RobustDispersion {
        RobustDispersion::from_counts(counts, RobustDispersion::DEFAULT_CONSISTENCY).unwrap()
    }

    #[test]
    fn test_empty_sample() {
        assert!(RobustDispersion::from_counts(&[], 0.6745).is_none());
    }

    #[test]
    fn test_single_value_is_degenerate() {
        let robust = estimate(&[42]);
        assert_eq!(robust.mad, 0.0);
        assert_eq!(robust.z_scores, vec![0.0]);
        assert!(robust.low_outliers(-2.0).is_empty());
    }

    #[test]
    fn test_skewed_sample_flags_low_tail() {
        let robust = estimate(&[500, 480, 50, 510, 495, 20]);
        assert!((robust.median - 2.688_813).abs() < 1e-5);
        assert!((robust.mad - 0.015_316).abs() < 1e-5);
        assert!((robust.z_scores[2] - -43.213).abs() < 1e-2);
        assert!((robust.z_scores[5] - -60.184).abs() < 1e-2);
        assert_eq!(robust.low_outliers(-2.0), vec![2, 5]);
    }

    #[test]
    fn test_high_values_are_never_flagged() {
        let robust = estimate(&[100, 102, 98, 101, 99, 100_000]);
        assert!(robust.z_scores[5] > 2.0);
        assert!(robust.low_outliers(-2.0).is_empty());
    }

    #[test]
    fn test_uniform_sample_has_no_low_outliers() {
        let robust = estimate(&[500, 510, 495, 505, 498, 502]);
        assert!(robust.z_scores.iter().all(|z| *z > -2.0));
        assert!(robust.low_outliers(-2.0).is_empty());
    }

    #[test]
    fn test_z_scores_keep_input_order() {
        let values = [1.0, 5.0, 3.0];
        let robust = RobustDispersion::from_values(&values, 1.0).unwrap();
        // median 3, deviations [2, 2, 0] -> mad 2
        assert_eq!(robust.z_scores, vec![-1.0, 1.0, 0.0]);
    }
}
