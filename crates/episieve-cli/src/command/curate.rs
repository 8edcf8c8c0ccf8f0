//! Curation command
//!
//! Runs the decision engine, shows the proposal, and only after explicit
//! confirmation writes the plan (deletion ids and renumbering) for the
//! external executors. The report goes to stderr so stdout can carry the plan.

use std::{
    io::{self, BufRead as _, Write as _},
    path::PathBuf,
};

use anyhow::{Context, bail};
use clap::Args;
use episieve_curation::review::CurationReview;
use tracing::{info, warn};

use crate::{command::EngineArg, report, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct CurateArg {
    /// Path to the episodes JSON file
    pub episodes: PathBuf,

    #[clap(flatten)]
    pub engine: EngineArg,

    /// Number of kept episodes to preview
    #[arg(long, default_value_t = 10)]
    pub preview: usize,

    /// Confirm without prompting
    #[arg(long)]
    pub yes: bool,

    /// Output file path for the confirmed plan
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CurateArg) -> anyhow::Result<()> {
    let engine = arg.engine.build_engine()?;
    let collection = util::read_episodes_file(&arg.episodes)?;
    let partition = engine
        .decide(&collection.episodes)
        .with_context(|| format!("Cannot curate {}", arg.episodes.display()))?;
    if partition.detection.is_iqr_fallback() {
        warn!("robust z-scores were degenerate; low engagement judged by IQR fallback");
    }
    let review = CurationReview::new(partition);

    let mut err = io::stderr().lock();
    if let Some(title) = &collection.work_title {
        writeln!(err, "Curation proposal: {title}\n")?;
    }
    report::write_stats(
        &mut err,
        review.stats(),
        review.partition().detection,
        collection.episodes.len(),
    )?;
    if review.partition().short_circuited {
        writeln!(err, "  Uniform collection with no flagged titles")?;
    }
    writeln!(err)?;
    report::write_deletions(&mut err, review.deletions())?;
    writeln!(err)?;
    report::write_keep_preview(
        &mut err,
        review.keep_preview(arg.preview),
        review.partition().keep.len(),
    )?;
    writeln!(err)?;
    drop(err);

    if !review.has_changes() {
        info!("collection is already canonical and contiguous, no plan written");
        return Ok(());
    }

    if !arg.yes && !prompt_confirmation()? {
        bail!("curation declined; no plan written");
    }

    let plan = review.confirm();
    info!(
        deletions = plan.deletion_ids.len(),
        renumbered = plan.renumbering.len(),
        "curation confirmed"
    );
    util::save_json(&plan, arg.output.as_deref())?;
    Ok(())
}

fn prompt_confirmation() -> anyhow::Result<bool> {
    eprint!("Apply this curation? [y/N] ");
    io::stderr().flush().context("Failed to flush prompt")?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
    }
}
