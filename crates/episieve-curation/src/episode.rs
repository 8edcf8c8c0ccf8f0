//! Episode records as supplied by the episode-listing collaborator
//!
//! # Data Structure
//!
//! ```text
//! EpisodeCollection
//! ├─ work_title (optional, display only)
//! └─ episodes: Vec<Episode>
//!     ├─ id               (integer or string, opaque)
//!     ├─ title
//!     ├─ sequence_index   (operator-visible number, may have gaps)
//!     └─ engagement_count (optional; negative means "unknown")
//! ```
//!
//! # Serialization
//!
//! ```json
//! {
//!   "work_title": "Some Drama",
//!   "episodes": [
//!     { "id": 101, "title": "第1集", "sequence_index": 1, "engagement_count": 500 },
//!     { "id": "ep-x", "title": "预告片", "sequence_index": 2 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Opaque episode identifier.
///
/// Import sources use either numeric or textual ids; both are accepted and
/// round-trip unchanged.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(untagged)]
pub enum EpisodeId {
    Number(u64),
    Text(String),
}

impl From<u64> for EpisodeId {
    fn from(id: u64) -> Self {
        EpisodeId::Number(id)
    }
}

impl From<&str> for EpisodeId {
    fn from(id: &str) -> Self {
        EpisodeId::Text(id.to_owned())
    }
}

/// A numbered entry belonging to a media work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub title: String,
    /// Operator-visible episode number; not necessarily contiguous
    pub sequence_index: i64,
    /// Interaction volume (e.g. comment count); absent when the source had none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_count: Option<i64>,
}

impl Episode {
    #[must_use]
    pub fn new(
        id: impl Into<EpisodeId>,
        title: impl Into<String>,
        sequence_index: i64,
        engagement_count: Option<i64>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sequence_index,
            engagement_count,
        }
    }

    /// The engagement count if it can take part in the statistical sample.
    ///
    /// Absent and negative counts are unusable.
    #[must_use]
    pub fn usable_count(&self) -> Option<u64> {
        self.engagement_count
            .and_then(|count| u64::try_from(count).ok())
    }
}

/// A work's episode list, in the order the listing collaborator returned it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpisodeCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_title: Option<String>,
    pub episodes: Vec<Episode>,
}
