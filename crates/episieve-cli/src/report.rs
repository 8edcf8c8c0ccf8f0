//! Plain-text rendering of curation results
//!
//! Writers are generic so commands can route reports to stdout or stderr
//! (stderr when stdout carries JSON).

use std::io::{self, Write};

use episieve_curation::{
    engine::{Assessment, DeletionReason, DetectionMethod, EpisodeAssessment, PartitionStats},
    episode::Episode,
};

const TITLE_WIDTH: usize = 24;

pub(crate) fn write_stats<W>(
    out: &mut W,
    stats: &PartitionStats,
    detection: DetectionMethod,
    episode_count: usize,
) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "Engagement sample:")?;
    writeln!(
        out,
        "  Episodes: {episode_count} total, {} with usable counts",
        stats.sample_size
    )?;
    writeln!(
        out,
        "  Raw counts: mean {:.1}, std-dev {:.1}, CV {:.3}",
        stats.mean, stats.std_dev, stats.coefficient_of_variation
    )?;
    writeln!(
        out,
        "  log10(c+1): median {:.3}, MAD {:.4}",
        stats.median, stats.mad
    )?;
    writeln!(out, "  Low-outlier detection: {detection}")?;
    Ok(())
}

pub(crate) fn write_assessment_table<W>(
    out: &mut W,
    episodes: &[Episode],
    assessment: &Assessment,
) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        out,
        "  {:>6} {:<TITLE_WIDTH$} {:>10} {:>8} {:>9}  {:<20} {}",
        "Seq", "Title", "Count", "log10", "z", "Title flag", "Verdict"
    )?;
    writeln!(out, "  {}", "-".repeat(TITLE_WIDTH + 74))?;
    for (episode, row) in episodes.iter().zip(&assessment.episodes) {
        write_assessment_row(out, episode, row)?;
    }
    Ok(())
}

fn write_assessment_row<W>(out: &mut W, episode: &Episode, row: &EpisodeAssessment) -> io::Result<()>
where
    W: Write,
{
    let count = episode
        .engagement_count
        .map_or_else(|| "-".to_owned(), |c| c.to_string());
    let log = row.log_count.map_or_else(|| "-".to_owned(), |v| format!("{v:.3}"));
    let z = row.z_score.map_or_else(|| "-".to_owned(), |v| format!("{v:.2}"));
    let flag = row
        .title_category
        .map_or_else(|| "-".to_owned(), |c| c.to_string());
    let verdict = if row.is_flagged() { "delete" } else { "keep" };
    writeln!(
        out,
        "  {:>6} {:<TITLE_WIDTH$} {:>10} {:>8} {:>9}  {:<20} {}",
        episode.sequence_index,
        truncate(&episode.title, TITLE_WIDTH),
        count,
        log,
        z,
        flag,
        verdict
    )
}

pub(crate) fn write_deletions<'a, W, I>(out: &mut W, deletions: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a Episode, &'a DeletionReason)>,
{
    let mut deletions = deletions.into_iter().peekable();
    if deletions.peek().is_none() {
        writeln!(out, "Nothing to delete.")?;
        return Ok(());
    }
    writeln!(out, "Proposed deletions:")?;
    for (episode, reason) in deletions {
        writeln!(
            out,
            "  #{:<5} {:<TITLE_WIDTH$} ({})",
            episode.sequence_index,
            truncate(&episode.title, TITLE_WIDTH),
            describe_reason(reason)
        )?;
    }
    Ok(())
}

pub(crate) fn write_keep_preview<W>(out: &mut W, preview: &[Episode], total: usize) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "Kept episodes after renumbering ({total} total):")?;
    for (episode, new_index) in preview.iter().zip(1..) {
        writeln!(
            out,
            "  {new_index:>5} <- #{:<5} {}",
            episode.sequence_index, episode.title
        )?;
    }
    if preview.len() < total {
        writeln!(out, "  ... and {} more", total - preview.len())?;
    }
    Ok(())
}

pub(crate) fn describe_reason(reason: &DeletionReason) -> String {
    match (reason.title_category, reason.low_engagement) {
        (Some(category), true) => format!("title: {category}; low engagement"),
        (Some(category), false) => format!("title: {category}"),
        (None, _) => "low engagement".to_owned(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut truncated = text.chars().take(max_chars - 1).collect::<String>();
    truncated.push('…');
    truncated
}
