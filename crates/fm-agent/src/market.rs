//! Shared market state and the per-tick context handed to agents.

use fm_core::{CarrierId, LoadId, MarketConfig, Tick};
use fm_spatial::GridIndex;

use crate::LoadStore;

/// Everything agents coordinate through.
///
/// Agents never call each other; a shipper publishes a load by placing it in
/// `load_grid`, a carrier claims it by booking it and removing it again.
pub struct Market {
    pub loads: LoadStore,

    /// Unbooked loads, keyed by origin cell.  A load is here iff it is not
    /// booked.
    pub load_grid: GridIndex<LoadId>,

    /// Idle carriers, keyed by position.  A carrier is here iff it has no
    /// current load.
    pub carrier_grid: GridIndex<CarrierId>,
}

impl Market {
    /// Empty indices sized to `config`'s grid.
    pub fn new(config: &MarketConfig) -> Self {
        Self {
            loads:        LoadStore::new(),
            load_grid:    GridIndex::new(config.bounds()),
            carrier_grid: GridIndex::new(config.bounds()),
        }
    }
}

/// Read-only inputs for one agent activation.
///
/// Built once per tick by `fm-sim` and shared by every activation in it.
#[derive(Copy, Clone, Debug)]
pub struct StepContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    pub config: &'a MarketConfig,
}

impl<'a> StepContext<'a> {
    #[inline]
    pub fn new(tick: Tick, config: &'a MarketConfig) -> Self {
        Self { tick, config }
    }
}
