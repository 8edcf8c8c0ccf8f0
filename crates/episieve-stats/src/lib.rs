//! Statistical building blocks for episode curation.
//!
//! This crate provides the numeric leaves of the curation pipeline:
//!
//! - **Descriptive statistics**: mean, median, population standard deviation and
//!   coefficient of variation over raw values
//! - **Percentiles**: direct-index percentile lookup
//! - **Log transform**: the `log10(c + 1)` mapping applied to engagement counts
//! - **Robust dispersion**: median, MAD and robust z-scores
//! - **IQR bounds**: quartile-based low-outlier fences, used when the MAD degenerates
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Direct-index percentile lookup on sorted data
//! - [`transform`]: Log-domain transform for long-tailed counts
//! - [`robust`]: Median absolute deviation and robust z-scores
//! - [`iqr`]: Interquartile-range low-outlier detection
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use episieve_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Flagging low outliers
//!
//! ```
//! use episieve_stats::{iqr, robust::RobustDispersion};
//!
//! let counts = [1000, 1000, 1000, 1000, 1000, 1000, 1000, 5, 3];
//!
//! // Ties collapse the MAD, so the robust scores flag nothing...
//! let robust = RobustDispersion::from_counts(&counts, RobustDispersion::DEFAULT_CONSISTENCY).unwrap();
//! assert!(robust.low_outliers(-2.0).is_empty());
//!
//! // ...while the IQR fence still finds the low cluster.
//! assert_eq!(iqr::low_outliers(&counts, 1.5), vec![7, 8]);
//! ```

pub mod descriptive;
pub mod iqr;
pub mod percentiles;
pub mod robust;
pub mod transform;
