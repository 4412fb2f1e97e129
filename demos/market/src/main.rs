//! market: run the freight market simulator from the command line.
//!
//! ```text
//! market                                   # defaults: 40×10 grid, 50 shippers, 400 carriers
//! market --config configs/dense_v2.json --ticks 200 --out results
//! market --config-dir configs --name dense --name sparse
//! RUST_LOG=fm_sim=debug market --ticks 10
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use fm_core::IdlePolicy;
use fm_experiment::{ExperimentConfig, ExperimentRunner, RunSummary, read_config};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[cfg(test)]
mod tests;

/// Freight market simulator.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Experiment config file (JSON).  Built-in defaults if omitted.
    #[arg(long, conflicts_with = "config_dir")]
    config: Option<PathBuf>,

    /// Directory of versioned configs; runs the latest version of each --name.
    #[arg(long, requires = "name")]
    config_dir: Option<PathBuf>,

    /// Config name to load from --config-dir (repeatable).
    #[arg(long, requires = "config_dir")]
    name: Vec<String>,

    /// Override the number of ticks.
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Idle carriers take a random step of up to this many cells.
    #[arg(long)]
    walk: Option<u32>,

    /// Output root; each run writes to <out>/<name>_v<version>/.
    #[arg(long, default_value = "output")]
    out: PathBuf,
}

impl Args {
    fn apply_overrides(&self, cfg: &mut ExperimentConfig) {
        if let Some(t) = self.ticks {
            cfg.market.total_ticks = t;
        }
        if let Some(s) = self.seed {
            cfg.market.seed = s;
        }
        if let Some(step) = self.walk {
            cfg.market.idle_policy = IdlePolicy::RandomWalk { step };
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing tracing subscriber")?;

    let runner = ExperimentRunner::new(&args.out);
    let t0 = Instant::now();

    let summaries = match (&args.config, &args.config_dir) {
        (_, Some(dir)) => {
            let summaries = runner.run_named(dir, args.name.as_slice(), |cfg| args.apply_overrides(cfg))?;
            if summaries.is_empty() {
                bail!("no configs could be loaded from {}", dir.display());
            }
            summaries
        }
        (Some(path), None) => {
            let mut cfg = read_config(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            args.apply_overrides(&mut cfg);
            runner.run(&[cfg])?
        }
        (None, None) => {
            let mut cfg = ExperimentConfig::new("default");
            args.apply_overrides(&mut cfg);
            runner.run(&[cfg])?
        }
    };

    info!("finished {} run(s) in {:.3} s", summaries.len(), t0.elapsed().as_secs_f64());
    print_table(&summaries);
    Ok(())
}

fn print_table(summaries: &[RunSummary]) {
    println!();
    println!(
        "{:<20} {:>6} {:>8} {:>8} {:>9} {:>6} {:>6} {:>6}",
        "Run", "Ticks", "Created", "Moved", "Unbooked", "Srch", "Dead", "Trans"
    );
    println!("{}", "-".repeat(76));
    for s in summaries {
        let snap = &s.final_snapshot;
        println!(
            "{:<20} {:>6} {:>8} {:>8} {:>9} {:>6} {:>6} {:>6}",
            s.label,
            s.ticks,
            s.loads_created,
            s.loads_moved,
            snap.unbooked_loads,
            snap.status.searching,
            snap.status.deadheading,
            snap.status.in_transit,
        );
    }
    for s in summaries {
        println!("  {} -> {}", s.label, s.out_dir.display());
    }
}
