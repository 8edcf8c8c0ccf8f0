//! Tunable thresholds of the decision engine
//!
//! The defaults are the values the curation rules were calibrated with. They
//! are empirical, so every one of them can be overridden from a TOML file:
//!
//! ```toml
//! low_z_threshold = -2.5
//! fallback_fraction = 0.6
//! uniform_cv_threshold = 0.2
//! extra_title_patterns = ["(?i)recap"]
//! ```

use episieve_stats::{iqr::IqrBounds, robust::RobustDispersion};
use serde::{Deserialize, Serialize};

use crate::title::TitlePatternClassifier;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    #[display("invalid configuration file: {_0}")]
    Parse(toml::de::Error),
    #[display("invalid extra title pattern: {_0}")]
    TitlePattern(regex::Error),
    #[display("`{field}` is {value}, expected {expected}")]
    #[from(ignore)]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurationConfig {
    /// Robust z-score below which an episode is a statistical low outlier
    pub low_z_threshold: f64,
    /// Share of the sample above which MAD flagging is considered degenerate
    pub fallback_fraction: f64,
    /// Coefficient of variation under which a clean collection is kept whole
    pub uniform_cv_threshold: f64,
    /// MAD-to-standard-deviation scale used for robust z-scores
    pub mad_consistency: f64,
    /// Tukey fence multiplier of the IQR fallback
    pub iqr_multiplier: f64,
    /// Additional title regexes treated as non-canonical
    pub extra_title_patterns: Vec<String>,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            low_z_threshold: -2.0,
            fallback_fraction: 0.6,
            uniform_cv_threshold: 0.25,
            mad_consistency: RobustDispersion::DEFAULT_CONSISTENCY,
            iqr_multiplier: IqrBounds::DEFAULT_MULTIPLIER,
            extra_title_patterns: vec![],
        }
    }
}

impl CurationConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check(
            "low_z_threshold",
            self.low_z_threshold,
            "a finite negative number",
            |v| v < 0.0,
        )?;
        check(
            "fallback_fraction",
            self.fallback_fraction,
            "a number in (0, 1]",
            |v| v > 0.0 && v <= 1.0,
        )?;
        check(
            "uniform_cv_threshold",
            self.uniform_cv_threshold,
            "a finite non-negative number",
            |v| v >= 0.0,
        )?;
        check(
            "mad_consistency",
            self.mad_consistency,
            "a finite positive number",
            |v| v > 0.0,
        )?;
        check(
            "iqr_multiplier",
            self.iqr_multiplier,
            "a finite non-negative number",
            |v| v >= 0.0,
        )?;
        self.title_classifier()?;
        Ok(())
    }

    /// Builds the title classifier including [`extra_title_patterns`](Self::extra_title_patterns).
    pub fn title_classifier(&self) -> Result<TitlePatternClassifier, ConfigError> {
        Ok(TitlePatternClassifier::with_extra_patterns(
            &self.extra_title_patterns,
        )?)
    }
}

fn check(
    field: &'static str,
    value: f64,
    expected: &'static str,
    valid: impl Fn(f64) -> bool,
) -> Result<(), ConfigError> {
    if value.is_finite() && valid(value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CurationConfig::default();
        config.validate().unwrap();
        assert_eq!(config.low_z_threshold, -2.0);
        assert_eq!(config.fallback_fraction, 0.6);
        assert_eq!(config.uniform_cv_threshold, 0.25);
        assert_eq!(config.mad_consistency, 0.6745);
        assert_eq!(config.iqr_multiplier, 1.5);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CurationConfig::from_toml_str(
            r#"
            low_z_threshold = -2.5
            extra_title_patterns = ["(?i)recap"]
            "#,
        )
        .unwrap();
        assert_eq!(config.low_z_threshold, -2.5);
        assert_eq!(config.fallback_fraction, 0.6);
        assert_eq!(config.extra_title_patterns, vec!["(?i)recap".to_owned()]);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            CurationConfig::from_toml_str("").unwrap(),
            CurationConfig::default()
        );
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = CurationConfig::from_toml_str("low_z = -2.0").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_out_of_range() {
        let err = CurationConfig::from_toml_str("fallback_fraction = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "fallback_fraction",
                ..
            }
        ));

        let config = CurationConfig {
            low_z_threshold: 1.0,
            ..CurationConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CurationConfig {
            uniform_cv_threshold: f64::NAN,
            ..CurationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_title_pattern() {
        let config = CurationConfig {
            extra_title_patterns: vec!["[".to_owned()],
            ..CurationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TitlePattern(_))
        ));
    }
}
