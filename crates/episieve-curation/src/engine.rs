//! Keep/delete decision over an episode list
//!
//! Two independent signals are combined:
//!
//! - **Title vocabulary** ([`TitlePatternClassifier`]): trailers, featurettes,
//!   extended cuts, ... announce themselves in their titles.
//! - **Engagement distribution**: entries nobody watched sit far below the
//!   bulk of the collection. Counts are compared in the `log10(c + 1)` domain
//!   with robust z-scores ([`RobustDispersion`]); when the MAD degenerates the
//!   quartile fence of [`iqr`] takes over.
//!
//! # Algorithm
//!
//! 1. Sample the usable counts; summary stats (mean, std-dev, CV) on raw counts
//! 2. Title-classify every episode (set `K`)
//! 3. Robust z-scores over the sample; `z < low_z_threshold` (set `S`)
//! 4. If `S` is empty or covers more than `fallback_fraction` of the sample,
//!    replace it with the IQR low outliers
//! 5. If `cv < uniform_cv_threshold` and `K` and `S` are empty, keep everything
//! 6. Otherwise delete `K ∪ S`, keep the rest, both in input order
//!
//! # Examples
//!
//! ```
//! use episieve_curation::{engine::CurationEngine, episode::Episode};
//!
//! let episodes = vec![
//!     Episode::new(1, "第1集", 1, Some(500)),
//!     Episode::new(2, "第2集", 2, Some(480)),
//!     Episode::new(3, "预告片", 3, Some(50)),
//!     Episode::new(4, "第3集", 4, Some(510)),
//!     Episode::new(5, "第4集", 5, Some(495)),
//!     Episode::new(6, "花絮特辑", 6, Some(20)),
//! ];
//!
//! let partition = CurationEngine::default().decide(&episodes)?;
//! let deleted = partition.delete.iter().map(|e| e.sequence_index).collect::<Vec<_>>();
//! assert_eq!(deleted, vec![3, 6]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use episieve_stats::{
    descriptive::DescriptiveStats, iqr, robust::RobustDispersion, transform::log_count,
};
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    config::{ConfigError, CurationConfig},
    episode::{Episode, EpisodeId},
    title::{TitleCategory, TitlePatternClassifier},
};

/// No episode carried a usable engagement count.
///
/// Title matches alone never justify a bulk deletion, so the engine refuses
/// to decide without a statistical picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("none of the {episode_count} episodes has a usable engagement count")]
pub struct InsufficientDataError {
    pub episode_count: usize,
}

/// Which estimator produced the statistical low-outlier set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    #[display("median/MAD")]
    Mad,
    #[display("IQR fallback")]
    IqrFallback,
}

/// Summary statistics of the engagement sample.
///
/// `mean`, `std_dev` and `coefficient_of_variation` describe raw counts;
/// `median` and `mad` are in the `log10(c + 1)` domain used for detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartitionStats {
    pub sample_size: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub coefficient_of_variation: f64,
    pub median: f64,
    pub mad: f64,
}

/// Diagnostics for a single episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EpisodeAssessment {
    /// Non-canonical title category, if the title matched
    pub title_category: Option<TitleCategory>,
    /// `log10(count + 1)`; `None` without a usable count
    pub log_count: Option<f64>,
    /// Robust z-score; `None` without a usable count
    pub z_score: Option<f64>,
    /// In the statistical low-outlier set of the chosen [`DetectionMethod`]
    pub low_engagement: bool,
}

impl EpisodeAssessment {
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.title_category.is_some() || self.low_engagement
    }

    fn deletion_reason(&self) -> Option<DeletionReason> {
        self.is_flagged().then_some(DeletionReason {
            title_category: self.title_category,
            low_engagement: self.low_engagement,
        })
    }
}

/// Per-episode diagnostics, aligned with the input list.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub episodes: Vec<EpisodeAssessment>,
    pub detection: DetectionMethod,
    pub stats: PartitionStats,
}

impl Assessment {
    /// Whether the collection is uniform enough, and clean enough, to keep whole.
    #[must_use]
    pub fn is_uniform(&self, cv_threshold: f64) -> bool {
        self.stats.coefficient_of_variation < cv_threshold
            && self.episodes.iter().all(|e| !e.is_flagged())
    }
}

/// Signals that put an episode in the delete set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletionReason {
    pub title_category: Option<TitleCategory>,
    pub low_engagement: bool,
}

/// Keep/delete split of an episode list.
///
/// Every input episode appears exactly once across `keep` and `delete`; both
/// preserve input order. `delete_reasons[i]` explains `delete[i]`.
#[derive(Debug, Clone, Serialize)]
pub struct Partition {
    pub keep: Vec<Episode>,
    pub delete: Vec<Episode>,
    pub delete_reasons: Vec<DeletionReason>,
    pub detection: DetectionMethod,
    /// The uniform-distribution rule kept the whole collection
    pub short_circuited: bool,
    pub stats: PartitionStats,
}

impl Partition {
    #[must_use]
    pub fn deletion_ids(&self) -> Vec<EpisodeId> {
        self.delete.iter().map(|e| e.id.clone()).collect()
    }

    pub fn deletions(&self) -> impl Iterator<Item = (&Episode, &DeletionReason)> + '_ {
        self.delete.iter().zip(&self.delete_reasons)
    }
}

/// Decides which episodes of a collection are canonical.
///
/// Holds only immutable configuration, so one engine can serve any number of
/// independent calls, from any thread.
#[derive(Debug, Clone, Default)]
pub struct CurationEngine {
    config: CurationConfig,
    classifier: TitlePatternClassifier,
}

impl CurationEngine {
    pub fn new(config: CurationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let classifier = config.title_classifier()?;
        Ok(Self { config, classifier })
    }

    #[must_use]
    pub fn config(&self) -> &CurationConfig {
        &self.config
    }

    /// Computes per-episode diagnostics and the chosen statistical flags.
    pub fn assess(&self, episodes: &[Episode]) -> Result<Assessment, InsufficientDataError> {
        let insufficient = InsufficientDataError {
            episode_count: episodes.len(),
        };

        let (positions, counts): (Vec<usize>, Vec<u64>) = episodes
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.usable_count().map(|c| (i, c)))
            .unzip();

        #[expect(clippy::cast_precision_loss)]
        let raw = DescriptiveStats::new(counts.iter().map(|c| *c as f64)).ok_or(insufficient)?;
        let robust = RobustDispersion::from_counts(&counts, self.config.mad_consistency)
            .ok_or(insufficient)?;
        debug!(
            episodes = episodes.len(),
            sample = counts.len(),
            mean = raw.mean,
            cv = raw.coefficient_of_variation,
            median = robust.median,
            mad = robust.mad,
            "engagement sample"
        );

        let mut flagged = robust.low_outliers(self.config.low_z_threshold);
        let mut detection = DetectionMethod::Mad;
        if needs_fallback(flagged.len(), counts.len(), self.config.fallback_fraction) {
            flagged = iqr::low_outliers(&counts, self.config.iqr_multiplier);
            detection = DetectionMethod::IqrFallback;
            debug!(
                flagged = flagged.len(),
                "MAD flagging degenerate, using IQR fallback"
            );
        }

        let mut assessments = episodes
            .iter()
            .map(|e| EpisodeAssessment {
                title_category: self.classifier.classify(&e.title),
                log_count: None,
                z_score: None,
                low_engagement: false,
            })
            .collect::<Vec<_>>();
        for (sample_idx, &episode_idx) in positions.iter().enumerate() {
            let assessment = &mut assessments[episode_idx];
            assessment.log_count = Some(log_count(counts[sample_idx]));
            assessment.z_score = Some(robust.z_scores[sample_idx]);
        }
        for sample_idx in flagged {
            assessments[positions[sample_idx]].low_engagement = true;
        }

        for (episode, assessment) in episodes.iter().zip(&assessments) {
            trace!(
                id = %episode.id,
                title = %episode.title,
                z = ?assessment.z_score,
                category = ?assessment.title_category,
                low = assessment.low_engagement,
                "assessed episode"
            );
        }

        Ok(Assessment {
            episodes: assessments,
            detection,
            stats: PartitionStats {
                sample_size: counts.len(),
                mean: raw.mean,
                std_dev: raw.std_dev,
                coefficient_of_variation: raw.coefficient_of_variation,
                median: robust.median,
                mad: robust.mad,
            },
        })
    }

    /// Splits `episodes` into canonical (`keep`) and non-canonical (`delete`).
    ///
    /// The result is a proposal: it must be confirmed by an operator before
    /// anything destructive happens.
    pub fn decide(&self, episodes: &[Episode]) -> Result<Partition, InsufficientDataError> {
        let assessment = self.assess(episodes)?;

        if assessment.is_uniform(self.config.uniform_cv_threshold) {
            debug!(
                cv = assessment.stats.coefficient_of_variation,
                "uniform collection without flags, keeping all episodes"
            );
            return Ok(Partition {
                keep: episodes.to_vec(),
                delete: vec![],
                delete_reasons: vec![],
                detection: assessment.detection,
                short_circuited: true,
                stats: assessment.stats,
            });
        }

        let mut keep = vec![];
        let mut delete = vec![];
        let mut delete_reasons = vec![];
        for (episode, assessment) in episodes.iter().zip(&assessment.episodes) {
            match assessment.deletion_reason() {
                Some(reason) => {
                    delete.push(episode.clone());
                    delete_reasons.push(reason);
                }
                None => keep.push(episode.clone()),
            }
        }
        debug!(keep = keep.len(), delete = delete.len(), "partition decided");

        Ok(Partition {
            keep,
            delete,
            delete_reasons,
            detection: assessment.detection,
            short_circuited: false,
            stats: assessment.stats,
        })
    }
}

/// MAD flagging is degenerate when it flags nothing or an implausibly large
/// share of the sample.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn needs_fallback(flagged: usize, sample_size: usize, fraction: f64) -> bool {
    flagged == 0 || flagged as f64 > fraction * sample_size as f64
}
