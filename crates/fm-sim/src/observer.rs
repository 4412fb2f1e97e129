//! Simulation observer trait for progress reporting and data collection.

use fm_agent::{CarrierAgent, ShipperAgent};
use fm_core::Tick;

use crate::MarketSnapshot;

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] and the run methods
/// built on it.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, snapshot: &MarketSnapshot) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} unbooked", snapshot.unbooked_loads);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent acts.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once every agent has acted and the tick counter has advanced.
    ///
    /// `tick` is the tick that was just processed; `snapshot.tick == tick`.
    fn on_tick_end(&mut self, _tick: Tick, _snapshot: &MarketSnapshot) {}

    /// Called every `config.output_interval_ticks` ticks, right after
    /// [`on_tick_end`](Self::on_tick_end), with read-only access to both
    /// agent populations.
    fn on_snapshot(
        &mut self,
        _tick:     Tick,
        _shippers: &[ShipperAgent],
        _carriers: &[CarrierAgent],
    ) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
