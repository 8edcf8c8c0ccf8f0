use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use episieve_curation::{config::CurationConfig, engine::CurationEngine};

use crate::util;

use self::{curate::CurateArg, inspect::InspectArg};

mod curate;
mod inspect;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Show per-episode title and engagement diagnostics
    Inspect(#[clap(flatten)] InspectArg),
    /// Propose a keep/delete split and, once confirmed, write the curation plan
    Curate(#[clap(flatten)] CurateArg),
}

/// Engine threshold options shared by all subcommands
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct EngineArg {
    /// TOML file with engine thresholds
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Robust z-score below which an episode counts as low engagement
    #[arg(long, allow_negative_numbers = true)]
    pub low_z_threshold: Option<f64>,

    /// Share of the sample above which MAD flagging falls back to IQR
    #[arg(long)]
    pub fallback_fraction: Option<f64>,

    /// Coefficient of variation under which a clean collection is kept whole
    #[arg(long)]
    pub uniform_cv_threshold: Option<f64>,

    /// Extra regex marking a title as non-canonical (repeatable)
    #[arg(long = "title-pattern")]
    pub title_patterns: Vec<String>,
}

impl EngineArg {
    /// Config file (or defaults) with command-line overrides applied
    pub(crate) fn load_config(&self) -> anyhow::Result<CurationConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => CurationConfig::default(),
        };
        if let Some(value) = self.low_z_threshold {
            config.low_z_threshold = value;
        }
        if let Some(value) = self.fallback_fraction {
            config.fallback_fraction = value;
        }
        if let Some(value) = self.uniform_cv_threshold {
            config.uniform_cv_threshold = value;
        }
        config
            .extra_title_patterns
            .extend(self.title_patterns.iter().cloned());
        Ok(config)
    }

    pub(crate) fn build_engine(&self) -> anyhow::Result<CurationEngine> {
        let config = self.load_config()?;
        CurationEngine::new(config).context("Invalid engine configuration")
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Inspect(arg) => inspect::run(&arg)?,
        Mode::Curate(arg) => curate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_overrides_apply_on_defaults() {
        let args = CommandArgs::try_parse_from([
            "episieve",
            "inspect",
            "episodes.json",
            "--low-z-threshold",
            "-3.5",
            "--title-pattern",
            "(?i)recap",
        ])
        .unwrap();
        let Mode::Inspect(arg) = args.mode else {
            panic!("expected inspect");
        };
        let config = arg.engine.load_config().unwrap();
        assert_eq!(config.low_z_threshold, -3.5);
        assert_eq!(config.fallback_fraction, 0.6);
        assert_eq!(config.extra_title_patterns, vec!["(?i)recap".to_owned()]);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let arg = EngineArg {
            fallback_fraction: Some(2.0),
            ..EngineArg::default()
        };
        assert!(arg.build_engine().is_err());
    }
}
