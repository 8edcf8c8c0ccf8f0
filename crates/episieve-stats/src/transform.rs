//! Log-domain transform for engagement counts.
//!
//! Engagement counts have a long right tail: a handful of breakout episodes
//! can collect an order of magnitude more interactions than the rest. All
//! outlier detection in this crate runs on `log10(c + 1)` so those few values
//! do not drag the "typical" estimate. The `+ 1` keeps a zero count finite.

/// Maps a raw count to `log10(count + 1)`.
///
/// # Examples
///
/// ```
/// use episieve_stats::transform::log_count;
///
/// assert_eq!(log_count(0), 0.0);
/// assert!((log_count(9) - 1.0).abs() < 1e-12);
/// assert!((log_count(99) - 2.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn log_count(count: u64) -> f64 {
    (count as f64 + 1.0).log10()
}

/// Maps every count with [`log_count`], preserving order.
#[must_use]
pub fn log_counts(counts: &[u64]) -> Vec<f64> {
    counts.iter().copied().map(log_count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_counts_preserve_order() {
        let logs = log_counts(&[99, 0, 9]);
        assert_eq!(logs.len(), 3);
        assert!((logs[0] - 2.0).abs() < 1e-12);
        assert_eq!(logs[1], 0.0);
        assert!((logs[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_large_count_is_finite() {
        assert!(log_count(u64::MAX).is_finite());
    }
}
