//! `fm-sim`: tick loop orchestrator for the freight market simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Shippers: shuffled; each may post one load, then advances the
//!               state machine of every load it still tracks.
//!   ② Carriers: shuffled; each may book one load, advances its load
//!               queue, and moves if still searching.
//!   ③ Report:   tick += 1; observer gets a MarketSnapshot for the tick
//!               just processed (and the agents every output interval).
//! ```
//!
//! Shippers always act before carriers; the order within each population
//! comes from the sim's one seeded RNG, so a run is a pure function of its
//! `MarketConfig`.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fm_core::MarketConfig;
//! use fm_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(MarketConfig::default())?.build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{:?}", sim.snapshot());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use snapshot::{AgentRecord, MarketSnapshot, StatusTally, agent_records};
