//! Batch runner: one sim per config, one output directory per run.

use std::fs;
use std::path::{Path, PathBuf};

use fm_output::{CsvWriter, SimOutputObserver};
use fm_sim::{MarketSnapshot, SimBuilder};
use tracing::{info, warn};

use crate::{ExperimentConfig, ExperimentResult, config_io};

/// What a finished run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// `<name>_v<version>`.
    pub label:          String,
    pub ticks:          u64,
    pub loads_created:  usize,
    pub loads_moved:    u64,
    pub total_earnings: f64,
    /// Metrics for the last tick.
    pub final_snapshot: MarketSnapshot,
    /// Directory holding the CSV tables and a copy of the config.
    pub out_dir:        PathBuf,
}

/// Runs experiments and writes their results under one output root.
///
/// Each run gets `out_dir/<name>_v<version>/` with:
/// - `tick_summaries.csv` and `agent_snapshots.csv`;
/// - `<name>_v<version>.json`, the exact config used.
#[derive(Clone, Debug)]
pub struct ExperimentRunner {
    out_dir: PathBuf,
}

impl ExperimentRunner {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Run every config.  Stops at the first failing run.
    ///
    /// With the `parallel` feature the runs execute on Rayon's pool; the
    /// summaries still come back in `configs` order.
    pub fn run(&self, configs: &[ExperimentConfig]) -> ExperimentResult<Vec<RunSummary>> {
        #[cfg(not(feature = "parallel"))]
        {
            configs.iter().map(|c| self.run_one(c)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            configs.par_iter().map(|c| self.run_one(c)).collect()
        }
    }

    /// Load the latest version of each name from `config_dir`, pass it
    /// through `adjust`, and run it.
    ///
    /// A name that fails to load is logged and skipped.
    pub fn run_named<S: AsRef<str>>(
        &self,
        config_dir: &Path,
        names:      &[S],
        adjust:     impl Fn(&mut ExperimentConfig),
    ) -> ExperimentResult<Vec<RunSummary>> {
        let mut configs = Vec::with_capacity(names.len());
        for name in names.iter().map(AsRef::as_ref) {
            match config_io::load_config(config_dir, name) {
                Ok(mut cfg) => {
                    adjust(&mut cfg);
                    configs.push(cfg);
                }
                Err(e) => warn!(name, error = %e, "unable to load config; skipping"),
            }
        }
        self.run(&configs)
    }

    /// Build, run and record a single experiment.
    pub fn run_one(&self, config: &ExperimentConfig) -> ExperimentResult<RunSummary> {
        let label = config.label();
        let run_dir = self.out_dir.join(&label);
        fs::create_dir_all(&run_dir)?;
        config_io::write_config(&run_dir, config)?;

        let mut sim = SimBuilder::new(config.market.clone())?.build()?;
        info!(run = %label, ticks = config.market.total_ticks, "run started");

        let mut obs = SimOutputObserver::new(CsvWriter::new(&run_dir)?);
        sim.run(&mut obs)?;
        if let Some(e) = obs.take_error() {
            return Err(e.into());
        }

        let summary = RunSummary {
            label,
            ticks:          sim.tick.0,
            loads_created:  sim.market.loads.len(),
            loads_moved:    sim.carriers.iter().map(|c| c.loads_moved()).sum(),
            total_earnings: sim.carriers.iter().map(|c| c.earnings()).sum(),
            final_snapshot: sim.snapshot(),
            out_dir:        run_dir,
        };
        info!(
            run = %summary.label,
            loads_created = summary.loads_created,
            loads_moved = summary.loads_moved,
            unbooked = summary.final_snapshot.unbooked_loads,
            "run finished"
        );
        Ok(summary)
    }
}
