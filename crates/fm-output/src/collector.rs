//! `MetricsCollector`: keeps every tick's metrics in memory.

use fm_agent::{CarrierAgent, ShipperAgent};
use fm_core::Tick;
use fm_sim::{AgentRecord, MarketSnapshot, SimObserver, agent_records};

/// In-memory [`SimObserver`]: one [`MarketSnapshot`] per tick, plus the
/// per-agent records at every snapshot interval.
#[derive(Clone, Debug, Default)]
pub struct MetricsCollector {
    ticks:  Vec<MarketSnapshot>,
    agents: Vec<(Tick, Vec<AgentRecord>)>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Market metrics in tick order.
    pub fn snapshots(&self) -> &[MarketSnapshot] {
        &self.ticks
    }

    /// Agent records, one batch per snapshot tick.
    pub fn agent_batches(&self) -> &[(Tick, Vec<AgentRecord>)] {
        &self.agents
    }

    pub fn latest(&self) -> Option<&MarketSnapshot> {
        self.ticks.last()
    }

    /// One column of the market table, e.g.
    /// `collector.series(|s| s.unbooked_loads as f64)`.
    pub fn series<T>(&self, f: impl Fn(&MarketSnapshot) -> T) -> Vec<T> {
        self.ticks.iter().map(f).collect()
    }
}

impl SimObserver for MetricsCollector {
    fn on_tick_end(&mut self, _tick: Tick, snapshot: &MarketSnapshot) {
        self.ticks.push(snapshot.clone());
    }

    fn on_snapshot(&mut self, tick: Tick, shippers: &[ShipperAgent], carriers: &[CarrierAgent]) {
        self.agents.push((tick, agent_records(shippers, carriers)));
    }
}
