//! Versioned experiment configs on disk.
//!
//! Each config lives in its own `<name>_v<version>.json` file.  The market
//! parameters sit at the top level of the JSON object next to `name` and
//! `version`; any parameter left out takes its default:
//!
//! ```json
//! { "name": "dense", "version": 2, "n_carriers": 800, "width": 20 }
//! ```

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use fm_core::MarketConfig;
use serde::{Deserialize, Serialize};

use crate::{ExperimentError, ExperimentResult};

/// A named, versioned [`MarketConfig`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub name: String,

    #[serde(default)]
    pub version: u32,

    #[serde(flatten)]
    pub market: MarketConfig,
}

impl ExperimentConfig {
    /// Version 0 of `name` with default market parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:    name.into(),
            version: 0,
            market:  MarketConfig::default(),
        }
    }

    pub fn with_market(mut self, market: MarketConfig) -> Self {
        self.market = market;
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// `<name>_v<version>`; also the name of the run's output directory.
    pub fn label(&self) -> String {
        format!("{}_v{}", self.name, self.version)
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.label())
    }
}

fn check_name(name: &str) -> ExperimentResult<()> {
    let bad = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if bad {
        return Err(ExperimentError::InvalidName(name.to_owned()));
    }
    Ok(())
}

/// Write `config` to `dir/<name>_v<version>.json`, creating `dir` if needed.
/// Returns the file's path.
pub fn write_config(dir: &Path, config: &ExperimentConfig) -> ExperimentResult<PathBuf> {
    check_name(&config.name)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(config.file_name());
    let mut out = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut out, config)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(path)
}

/// Read one config file.
pub fn read_config(path: &Path) -> ExperimentResult<ExperimentConfig> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Version encoded in `file_name` if it is a config file for `name`.
fn version_of(file_name: &str, name: &str) -> Option<u32> {
    file_name
        .strip_prefix(name)?
        .strip_prefix("_v")?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

/// All versions of `name` present in `dir`, ascending.
pub fn list_versions(dir: &Path, name: &str) -> ExperimentResult<Vec<u32>> {
    check_name(name)?;
    let mut versions = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(v) = entry.file_name().to_str().and_then(|f| version_of(f, name)) {
            versions.push(v);
        }
    }
    versions.sort_unstable();
    Ok(versions)
}

/// Load the highest-versioned config for `name` from `dir`.
pub fn load_config(dir: &Path, name: &str) -> ExperimentResult<ExperimentConfig> {
    let latest = list_versions(dir, name)?
        .pop()
        .ok_or_else(|| ExperimentError::ConfigNotFound {
            name: name.to_owned(),
            dir:  dir.to_path_buf(),
        })?;
    read_config(&dir.join(format!("{name}_v{latest}.json")))
}
