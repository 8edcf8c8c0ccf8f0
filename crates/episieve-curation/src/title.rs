//! Lexical detection of non-canonical episode titles
//!
//! Imports pick up trailers, behind-the-scenes featurettes, extended cuts and
//! similar entries next to the real episodes. Their titles usually say so.
//! [`TitlePatternClassifier`] checks a title against a fixed vocabulary of such
//! markers (Chinese and English) and reports the first matching
//! [`TitleCategory`].
//!
//! The `SP` marker is special-cased: a bare `SP` (or `SP版`, `SP:`...) marks a
//! special, but `SP1`, `SP2`, ... are ordinary numbered entries of the
//! sequence and stay canonical.
//!
//! # Examples
//!
//! ```
//! use episieve_curation::title::{TitleCategory, TitlePatternClassifier};
//!
//! let classifier = TitlePatternClassifier::builtin();
//! assert!(!classifier.is_non_canonical("第1集"));
//! assert_eq!(classifier.classify("预告片"), Some(TitleCategory::Trailer));
//! assert_eq!(classifier.classify("第5集 SP"), Some(TitleCategory::SpecialMarker));
//! assert_eq!(classifier.classify("SP1"), None);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Why a title was considered non-canonical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum TitleCategory {
    #[display("plus edition")]
    PlusEdition,
    #[display("preview edition")]
    PreviewEdition,
    #[display("extended highlights")]
    ExtendedHighlights,
    #[display("behind the scenes")]
    BehindTheScenes,
    #[display("easter egg")]
    EasterEgg,
    #[display("trailer")]
    Trailer,
    #[display("spin-off")]
    SpinOff,
    #[display("special feature")]
    SpecialFeature,
    #[display("clip")]
    Clip,
    #[display("compilation")]
    Compilation,
    #[display("bonus cut")]
    BonusCut,
    #[display("SP marker")]
    SpecialMarker,
    /// Matched an operator-supplied pattern
    #[display("custom pattern")]
    Custom,
}

/// A compiled pattern with the category it reports.
#[derive(Debug, Clone)]
struct TitlePattern {
    regex: Regex,
    category: TitleCategory,
}

fn pattern(source: &str, category: TitleCategory) -> TitlePattern {
    TitlePattern {
        regex: Regex::new(source).expect("built-in title pattern must compile"),
        category,
    }
}

// Latin-word markers are bounded by non-Latin characters rather than `\b`:
// Unicode `\b` treats Han as word characters, so `第3集preview` has no boundary.
static BUILTIN_PATTERNS: LazyLock<Vec<TitlePattern>> = LazyLock::new(|| {
    use TitleCategory as C;
    vec![
        pattern(r"(?i)plus|会员版|纯享版", C::PlusEdition),
        pattern(
            r"(?i)抢先看|抢先版|试看|(?:^|[^A-Za-z])preview(?:[^A-Za-z]|$)",
            C::PreviewEdition,
        ),
        pattern(r"(?i)精彩加长|加长精华|extended\s+highlights?", C::ExtendedHighlights),
        pattern(
            r"(?i)幕后|花絮|NG(?:镜头|集锦|片段)|behind[\s-]+the[\s-]+scenes|(?:^|[^A-Za-z])(?:outtakes?|bloopers?)(?:[^A-Za-z]|$)",
            C::BehindTheScenes,
        ),
        pattern(r"(?i)彩蛋|easter\s+eggs?|bonus\s+clips?", C::EasterEgg),
        pattern(r"(?i)预告|先导|trailer|teaser", C::Trailer),
        pattern(r"(?i)番外|外传|spin-?off|side\s+story", C::SpinOff),
        pattern(r"(?i)特辑|特别篇|special\s+features?|featurette", C::SpecialFeature),
        pattern(r"(?i)片段|短片|(?:^|[^A-Za-z])clips?(?:[^A-Za-z]|$)", C::Clip),
        pattern(r"(?i)合集|集锦|compilation", C::Compilation),
        pattern(r"(?i)加更|加长版|extended\s+cut|bonus\s+cut", C::BonusCut),
        // standalone `SP`: SP1, SP2 are regular entries, SPY is a word
        pattern(r"(?:^|[^A-Za-z])SP(?:[^0-9A-Za-z]|$)", C::SpecialMarker),
    ]
});

/// Flags episode titles that look like non-canonical entries.
///
/// Cheap to clone; the built-in patterns are compiled once per process.
#[derive(Debug, Clone)]
pub struct TitlePatternClassifier {
    extra: Vec<TitlePattern>,
}

impl Default for TitlePatternClassifier {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TitlePatternClassifier {
    /// Classifier using only the built-in vocabulary.
    #[must_use]
    pub fn builtin() -> Self {
        Self { extra: vec![] }
    }

    /// Classifier using the built-in vocabulary plus extra regular expressions.
    ///
    /// Extra matches are reported as [`TitleCategory::Custom`].
    pub fn with_extra_patterns<S>(patterns: &[S]) -> Result<Self, regex::Error>
    where
        S: AsRef<str>,
    {
        let extra = patterns
            .iter()
            .map(|source| {
                Ok(TitlePattern {
                    regex: Regex::new(source.as_ref())?,
                    category: TitleCategory::Custom,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { extra })
    }

    /// First category whose pattern matches `title`, if any.
    #[must_use]
    pub fn classify(&self, title: &str) -> Option<TitleCategory> {
        BUILTIN_PATTERNS
            .iter()
            .chain(&self.extra)
            .find(|p| p.regex.is_match(title))
            .map(|p| p.category)
    }

    #[must_use]
    pub fn is_non_canonical(&self, title: &str) -> bool {
        self.classify(title).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(title: &str) -> Option<TitleCategory> {
        TitlePatternClassifier::builtin().classify(title)
    }

    #[test]
    fn test_regular_episodes_are_canonical() {
        for title in [
            "第1集",
            "第12集 重逢",
            "Episode 3",
            "SP1",
            "第3集 SP2",
            "Spring Breeze",
            "ESPN Special",
            "SPY×FAMILY 第1集",
            "SPECIAL",
            "Eclipse",
            "第2集 Previewed",
        ] {
            assert_eq!(classify(title), None, "{title}");
        }
    }

    #[test]
    fn test_vocabulary() {
        use TitleCategory as C;
        let cases = [
            ("第1集 Plus", C::PlusEdition),
            ("第1集PLUS版", C::PlusEdition),
            ("会员版 第2集", C::PlusEdition),
            ("抢先版 第1集", C::PreviewEdition),
            ("第1集 试看", C::PreviewEdition),
            ("Preview: the reunion", C::PreviewEdition),
            ("第3集preview", C::PreviewEdition),
            ("第3集 精彩加长", C::ExtendedHighlights),
            ("花絮特辑", C::BehindTheScenes),
            ("幕后故事", C::BehindTheScenes),
            ("NG镜头合辑", C::BehindTheScenes),
            ("Behind the Scenes", C::BehindTheScenes),
            ("第5集bloopers", C::BehindTheScenes),
            ("彩蛋", C::EasterEgg),
            ("预告片", C::Trailer),
            ("Official Teaser", C::Trailer),
            ("番外篇", C::SpinOff),
            ("Side Story 2", C::SpinOff),
            ("独家特辑", C::SpecialFeature),
            ("Featurette", C::SpecialFeature),
            ("精彩片段", C::Clip),
            ("Clip 4", C::Clip),
            ("第3集clip", C::Clip),
            ("第1-5集合集", C::Compilation),
            ("加更 第7集", C::BonusCut),
            ("Extended Cut", C::BonusCut),
            ("SP", C::SpecialMarker),
            ("第8集 SP版", C::SpecialMarker),
            ("SP: 回忆", C::SpecialMarker),
        ];
        for (title, expected) in cases {
            assert_eq!(classify(title), Some(expected), "{title}");
        }
    }

    #[test]
    fn test_sp_followed_by_digit_is_canonical() {
        let classifier = TitlePatternClassifier::builtin();
        assert!(!classifier.is_non_canonical("SP1"));
        assert!(!classifier.is_non_canonical("SP10 终章"));
        assert!(classifier.is_non_canonical("SP 终章"));
    }

    #[test]
    fn test_extra_patterns() {
        let classifier = TitlePatternClassifier::with_extra_patterns(&["(?i)recap"]).unwrap();
        assert_eq!(classifier.classify("Recap"), Some(TitleCategory::Custom));
        assert_eq!(classifier.classify("预告"), Some(TitleCategory::Trailer));
        assert_eq!(classifier.classify("第1集"), None);
    }

    #[test]
    fn test_invalid_extra_pattern() {
        assert!(TitlePatternClassifier::with_extra_patterns(&["("]).is_err());
    }
}
