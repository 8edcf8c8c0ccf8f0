//! Inspection command
//!
//! Shows the per-episode diagnostics behind a curation decision without
//! proposing or writing a plan.

use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Args;
use episieve_curation::{
    config::CurationConfig,
    engine::{Assessment, DetectionMethod, EpisodeAssessment, PartitionStats},
    episode::Episode,
};
use serde::Serialize;

use crate::{command::EngineArg, report, util};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct InspectArg {
    /// Path to the episodes JSON file
    pub episodes: PathBuf,

    #[clap(flatten)]
    pub engine: EngineArg,

    /// Report format (table or json)
    #[arg(long, default_value = "table")]
    pub format: ReportFormat,

    /// Output file path for the JSON report
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    work_title: Option<&'a str>,
    config: &'a CurationConfig,
    detection: DetectionMethod,
    stats: PartitionStats,
    episodes: Vec<InspectRow<'a>>,
}

#[derive(Debug, Serialize)]
struct InspectRow<'a> {
    episode: &'a Episode,
    #[serde(flatten)]
    assessment: &'a EpisodeAssessment,
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let engine = arg.engine.build_engine()?;
    let collection = util::read_episodes_file(&arg.episodes)?;
    let assessment = engine
        .assess(&collection.episodes)
        .with_context(|| format!("Cannot assess {}", arg.episodes.display()))?;

    match arg.format {
        ReportFormat::Table => {
            let mut out = io::stdout().lock();
            print_table(&mut out, collection.work_title.as_deref(), &collection.episodes, &assessment)
                .context("Failed to write report")?;
        }
        ReportFormat::Json => {
            let report = InspectReport {
                work_title: collection.work_title.as_deref(),
                config: engine.config(),
                detection: assessment.detection,
                stats: assessment.stats,
                episodes: collection
                    .episodes
                    .iter()
                    .zip(&assessment.episodes)
                    .map(|(episode, assessment)| InspectRow {
                        episode,
                        assessment,
                    })
                    .collect(),
            };
            util::save_json(&report, arg.output.as_deref())?;
        }
    }
    Ok(())
}

fn print_table<W>(
    out: &mut W,
    work_title: Option<&str>,
    episodes: &[Episode],
    assessment: &Assessment,
) -> io::Result<()>
where
    W: io::Write,
{
    let heading = match work_title {
        Some(title) => format!("Episode Inspection: {title}"),
        None => "Episode Inspection".to_owned(),
    };
    writeln!(out, "{heading}")?;
    writeln!(out, "{}\n", "=".repeat(heading.chars().count().max(18)))?;
    report::write_stats(out, &assessment.stats, assessment.detection, episodes.len())?;
    writeln!(out)?;
    report::write_assessment_table(out, episodes, assessment)?;
    Ok(())
}
