//! `fm-output`: metrics collection and output writers for the freight
//! market simulator.
//!
//! | Type                   | Role                                                  |
//! |------------------------|-------------------------------------------------------|
//! | [`MetricsCollector`]   | In-memory observer: every tick's `MarketSnapshot`     |
//! | [`CsvWriter`]          | `tick_summaries.csv`, `agent_snapshots.csv`           |
//! | [`SimOutputObserver`]  | Bridges `fm_sim::SimObserver` to any [`OutputWriter`] |
//!
//! # Usage
//!
//! ```rust,ignore
//! use fm_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod collector;
pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use collector::MetricsCollector;
pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
