//! Interquartile-range low-outlier bounds
//!
//! A fallback for [`RobustDispersion`](crate::robust::RobustDispersion) when
//! the MAD degenerates: heavy ties push it to zero (nothing gets flagged), or a
//! shallow but wide low tail flags an implausibly large share of the sample.
//! Quartiles come from [`compute_percentile`](crate::percentiles::compute_percentile)
//! (direct index, no interpolation), so the bounds stay defined on tied data.
//!
//! ```text
//! IQR = max(0, Q3 - Q1)
//! low = Q1 - multiplier * IQR
//! ```
//!
//! Values strictly below `low` are outliers.

use crate::{percentiles::compute_percentile, transform::log_counts};

/// Quartiles and the derived low-outlier threshold of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    /// 25th percentile.
    pub q1: f64,
    /// 75th percentile.
    pub q3: f64,
    /// Interquartile range, clamped to be non-negative.
    pub iqr: f64,
    /// Values strictly below this are low outliers.
    pub low_threshold: f64,
}

impl IqrBounds {
    /// Tukey's fence multiplier.
    pub const DEFAULT_MULTIPLIER: f64 = 1.5;

    /// Computes bounds over already-transformed values.
    ///
    /// Returns `None` for an empty sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use episieve_stats::iqr::IqrBounds;
    ///
    /// let bounds = IqrBounds::from_values(&[1.0, 2.0, 3.0, 4.0], 1.5).unwrap();
    /// assert_eq!(bounds.q1, 2.0);
    /// assert_eq!(bounds.q3, 4.0);
    /// assert_eq!(bounds.low_threshold, -1.0);
    /// ```
    #[must_use]
    pub fn from_values(values: &[f64], multiplier: f64) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let q1 = compute_percentile(&sorted, 25.0);
        let q3 = compute_percentile(&sorted, 75.0);
        let iqr = (q3 - q1).max(0.0);
        Some(Self {
            q1,
            q3,
            iqr,
            low_threshold: q1 - multiplier * iqr,
        })
    }

    /// Indices of `values` strictly below [`low_threshold`](Self::low_threshold).
    #[must_use]
    pub fn low_outliers(&self, values: &[f64]) -> Vec<usize> {
        values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v < self.low_threshold)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Low outliers of raw counts, judged in the `log10(c + 1)` domain.
///
/// Returns indices into `counts` in ascending order; empty for an empty sample.
///
/// # Examples
///
/// ```
/// use episieve_stats::iqr::low_outliers;
///
/// // Seven tied values leave the MAD at zero; the quartile fence still
/// // separates the low cluster.
/// let counts = [1000, 1000, 1000, 1000, 1000, 1000, 1000, 5, 3];
/// assert_eq!(low_outliers(&counts, 1.5), vec![7, 8]);
/// ```
#[must_use]
pub fn low_outliers(counts: &[u64], multiplier: f64) -> Vec<usize> {
    let values = log_counts(counts);
    IqrBounds::from_values(&values, multiplier)
        .map(|bounds| bounds.low_outliers(&values))
        .unwrap_or_default()
}
