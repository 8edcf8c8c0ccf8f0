//! Direct-index percentiles
//!
//! Quartiles here feed a fence, not an estimate of a continuous
//! distribution, so no interpolation is done: on tied data a percentile is
//! always one of the observed values.

/// Computes a single percentile value from sorted data.
///
/// This function uses the direct-index method: for a dataset with n values,
/// the k-th percentile is the value at position `floor(n * k / 100)`, clamped
/// to the last element. No interpolation is performed.
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use episieve_stats::percentiles::compute_percentile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
///
/// // floor(6 * 0.25) = 1
/// assert_eq!(compute_percentile(&values, 25.0), 2.0);
/// // floor(6 * 0.75) = 4
/// assert_eq!(compute_percentile(&values, 75.0), 5.0);
/// assert_eq!(compute_percentile(&values, 100.0), 6.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let idx = ((sorted_values.len() as f64 * percentile) / 100.0) as usize;
    let idx = idx.min(sorted_values.len() - 1);
    sorted_values[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_nan() {
        assert!(compute_percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_quartile_indices_truncate() {
        // n = 9: Q1 at floor(2.25) = 2, Q3 at floor(6.75) = 6
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert_eq!(compute_percentile(&values, 25.0), 2.0);
        assert_eq!(compute_percentile(&values, 75.0), 6.0);
    }

    #[test]
    fn test_tied_values_stay_observed() {
        let values = [1.0, 4.0, 4.0, 4.0];
        assert_eq!(compute_percentile(&values, 25.0), 4.0);
        assert_eq!(compute_percentile(&values, 0.0), 1.0);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(compute_percentile(&[7.0], 25.0), 7.0);
        assert_eq!(compute_percentile(&[7.0], 75.0), 7.0);
    }
}
