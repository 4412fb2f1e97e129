//! `fm-experiment`: named, versioned experiment configs and a batch runner.
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`config_io`] | `ExperimentConfig`, `write_config`, `load_config`, …       |
//! | [`runner`]    | `ExperimentRunner`, `RunSummary`                           |
//! | [`error`]     | `ExperimentError`, `ExperimentResult<T>`                   |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs independent experiments on Rayon's thread pool.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fm_experiment::{ExperimentConfig, ExperimentRunner, write_config};
//!
//! write_config(Path::new("configs"), &ExperimentConfig::new("baseline"))?;
//! let runner = ExperimentRunner::new("results");
//! for s in runner.run_named(Path::new("configs"), &["baseline"], |_| {})? {
//!     println!("{}: {} loads moved", s.label, s.loads_moved);
//! }
//! ```

pub mod config_io;
pub mod error;
pub mod runner;


pub use config_io::{ExperimentConfig, list_versions, load_config, read_config, write_config};
pub use error::{ExperimentError, ExperimentResult};
pub use runner::{ExperimentRunner, RunSummary};
