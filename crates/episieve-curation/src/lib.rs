//! Canonical-episode curation for numbered episode collections
//!
//! Imports of a media work's episode list regularly pick up entries that are
//! not episodes at all: trailers, behind-the-scenes clips, extended or
//! compilation cuts. Before a collection is renumbered, those entries have to
//! go. This crate decides which ones, and leaves the deleting to an operator.
//!
//! # Overview
//!
//! ```text
//! EpisodeCollection ──> CurationEngine::decide ──> Partition {keep, delete, stats}
//!                                                      │
//!                                          CurationReview (operator)
//!                                                      │ confirm
//!                                                      ▼
//!                                   ConfirmedCuration {deletion ids, renumbering}
//! ```
//!
//! - [`episode`]: input records ([`episode::Episode`], [`episode::EpisodeCollection`])
//! - [`title`]: lexical classifier for non-canonical titles
//! - [`config`]: engine thresholds, loadable from TOML
//! - [`engine`]: combines title and engagement signals into a [`engine::Partition`]
//! - [`review`]: caller-owned confirm step producing the executable plan
//!
//! The engine is pure and deterministic: no I/O, no state between calls.
//!
//! # Examples
//!
//! ```
//! use episieve_curation::{
//!     config::CurationConfig, engine::CurationEngine, episode::Episode, review::CurationReview,
//! };
//!
//! let engine = CurationEngine::new(CurationConfig::default())?;
//! let episodes = vec![
//!     Episode::new(1, "第1集", 1, Some(500)),
//!     Episode::new(2, "第2集", 2, Some(510)),
//!     Episode::new(3, "番外篇", 3, Some(505)),
//! ];
//!
//! let review = CurationReview::new(engine.decide(&episodes)?);
//! for (episode, reason) in review.deletions() {
//!     println!("delete {}: {:?}", episode.title, reason);
//! }
//! let plan = review.confirm();
//! assert_eq!(plan.deletion_ids.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod engine;
pub mod episode;
pub mod review;
pub mod title;
