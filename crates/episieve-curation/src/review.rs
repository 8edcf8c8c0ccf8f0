//! Operator review of a proposed partition
//!
//! A [`Partition`] is a heuristic proposal. Nothing destructive may follow
//! from it until an operator has looked at it and confirmed. The review is an
//! ordinary value owned by the caller and moved through the steps:
//!
//! ```text
//! CurationEngine::decide ──> Partition
//!                               │ CurationReview::new
//!                               ▼
//!                         CurationReview ── preview / deletions shown to operator
//!                               │ confirm (consumes the review)
//!                               ▼
//!                        ConfirmedCuration ── deletion ids + renumbering table,
//!                                              handed to the external executors
//! ```
//!
//! Declining is simply dropping the review.
//!
//! # Examples
//!
//! ```
//! use episieve_curation::{engine::CurationEngine, episode::Episode, review::CurationReview};
//!
//! let episodes = vec![
//!     Episode::new(10, "第1集", 1, Some(500)),
//!     Episode::new(11, "预告片", 2, Some(40)),
//!     Episode::new(12, "第2集", 3, Some(510)),
//! ];
//! let partition = CurationEngine::default().decide(&episodes)?;
//!
//! let review = CurationReview::new(partition);
//! assert_eq!(review.keep_preview(1).len(), 1);
//!
//! let confirmed = review.confirm();
//! assert_eq!(confirmed.deletion_ids.len(), 1);
//! assert_eq!(
//!     confirmed.renumbering.iter().map(|r| r.new_index).collect::<Vec<_>>(),
//!     vec![1, 2]
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    engine::{DeletionReason, Partition, PartitionStats},
    episode::{Episode, EpisodeId},
};

/// A partition awaiting operator confirmation.
#[derive(Debug, Clone)]
pub struct CurationReview {
    partition: Partition,
}

impl CurationReview {
    #[must_use]
    pub fn new(partition: Partition) -> Self {
        Self { partition }
    }

    #[must_use]
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    #[must_use]
    pub fn stats(&self) -> &PartitionStats {
        &self.partition.stats
    }

    /// The first `limit` episodes that would survive, in order.
    #[must_use]
    pub fn keep_preview(&self, limit: usize) -> &[Episode] {
        let end = limit.min(self.partition.keep.len());
        &self.partition.keep[..end]
    }

    pub fn deletions(&self) -> impl Iterator<Item = (&Episode, &DeletionReason)> + '_ {
        self.partition.deletions()
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.partition.delete.is_empty() || self.renumbering().iter().any(|r| !r.is_unchanged())
    }

    /// New contiguous numbers, from 1, for the kept episodes in their current order.
    #[must_use]
    pub fn renumbering(&self) -> Vec<RenumberEntry> {
        self.partition
            .keep
            .iter()
            .zip(1..)
            .map(|(episode, new_index)| RenumberEntry {
                id: episode.id.clone(),
                previous_index: episode.sequence_index,
                new_index,
            })
            .collect()
    }

    /// Records the operator's approval and produces the executable plan.
    #[must_use]
    pub fn confirm(self) -> ConfirmedCuration {
        self.confirm_at(Utc::now())
    }

    #[must_use]
    pub fn confirm_at(self, confirmed_at: DateTime<Utc>) -> ConfirmedCuration {
        let renumbering = self.renumbering();
        let deletion_ids = self.partition.deletion_ids();
        ConfirmedCuration {
            confirmed_at,
            stats: self.partition.stats,
            deletion_ids,
            renumbering,
        }
    }
}

/// One kept episode's move to its new sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenumberEntry {
    pub id: EpisodeId,
    pub previous_index: i64,
    pub new_index: i64,
}

impl RenumberEntry {
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.previous_index == self.new_index
    }
}

/// An approved curation: what the bulk-deletion and renumbering collaborators
/// receive, in that order.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmedCuration {
    pub confirmed_at: DateTime<Utc>,
    pub stats: PartitionStats,
    pub deletion_ids: Vec<EpisodeId>,
    pub renumbering: Vec<RenumberEntry>,
}
