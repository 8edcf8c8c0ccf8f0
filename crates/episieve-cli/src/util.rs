use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use episieve_curation::{config::CurationConfig, episode::EpisodeCollection};
use serde::{Serialize, de::DeserializeOwned};
use tracing::info;

/// Where a JSON document goes: the `--output` file, or stdout without one.
pub(crate) struct JsonOutput {
    writer: Box<dyn Write>,
    destination: String,
}

impl JsonOutput {
    pub(crate) fn create(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self {
                writer: Box::new(io::stdout().lock()),
                destination: "stdout".to_owned(),
            });
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self {
            writer: Box::new(BufWriter::new(file)),
            destination: path.display().to_string(),
        })
    }

    /// Pretty-prints `value`, terminated by a newline, and flushes.
    pub(crate) fn write<T>(mut self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        serde_json::to_writer_pretty(&mut self.writer, value)
            .with_context(|| format!("Failed to write JSON to {}", self.destination))?;
        writeln!(self.writer)
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("Failed to finish writing {}", self.destination))?;
        info!("wrote {}", self.destination);
        Ok(())
    }
}

pub(crate) fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    JsonOutput::create(path)?.write(value)
}

fn read_json_file<T>(file_kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Read an episode listing from a JSON file
pub(crate) fn read_episodes_file(path: &Path) -> anyhow::Result<EpisodeCollection> {
    let collection: EpisodeCollection = read_json_file("episodes", path)?;
    info!(
        "loaded {} episodes from {}",
        collection.episodes.len(),
        path.display()
    );
    Ok(collection)
}

/// Read engine thresholds from a TOML file
///
/// # Errors
///
/// Returns error if file cannot be read, parsed, or holds out-of-range values
pub(crate) fn read_config_file(path: &Path) -> anyhow::Result<CurationConfig> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    CurationConfig::from_toml_str(&source)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::{env, path::PathBuf, process};

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("episieve-{}-{name}", process::id()))
    }

    #[test]
    fn test_saved_json_reads_back_as_episodes() {
        let path = scratch_path("episodes.json");
        let value = serde_json::json!({
            "work_title": "重逢",
            "episodes": [
                { "id": 7, "title": "第1集", "sequence_index": 1, "engagement_count": 500 },
                { "id": "x-2", "title": "预告片", "sequence_index": 2 }
            ]
        });
        save_json(&value, Some(&path)).unwrap();
        let collection = read_episodes_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(collection.work_title.as_deref(), Some("重逢"));
        assert_eq!(collection.episodes.len(), 2);
        assert_eq!(collection.episodes[1].engagement_count, None);
    }

    #[test]
    fn test_config_file_errors_name_the_file() {
        let path = scratch_path("bad.toml");
        fs::write(&path, "fallback_fraction = 3.0\n").unwrap();
        let err = read_config_file(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(format!("{err}").contains("bad.toml"));

        let missing = scratch_path("missing.toml");
        assert!(read_config_file(&missing).is_err());
    }
}
