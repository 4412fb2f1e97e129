//! Read-only metrics derived from the sim state after each tick.

use fm_agent::{CarrierAgent, Market, ShipperAgent};
use fm_core::{AgentKind, CarrierStatus, Tick};

/// Number of carriers in each status.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTally {
    pub searching:   usize,
    pub deadheading: usize,
    pub in_transit:  usize,
}

impl StatusTally {
    pub fn from_carriers(carriers: &[CarrierAgent]) -> Self {
        let mut tally = Self::default();
        for c in carriers {
            tally.record(c.status());
        }
        tally
    }

    pub fn record(&mut self, status: CarrierStatus) {
        match status {
            CarrierStatus::Searching   => self.searching += 1,
            CarrierStatus::Deadheading => self.deadheading += 1,
            CarrierStatus::InTransit   => self.in_transit += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.searching + self.deadheading + self.in_transit
    }
}

/// Market-level metrics for one completed tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketSnapshot {
    /// The tick these metrics describe (the one just processed).
    pub tick:                Tick,
    /// Loads waiting in the unbooked-load index.
    pub unbooked_loads:      usize,
    pub unbooked_roll_total: u64,
    /// `unbooked_roll_total / unbooked_loads`, or 0.0 with no unbooked loads.
    pub unbooked_roll_mean:  f64,
    /// Carriers in the idle-carrier index.
    pub idle_carriers:       usize,
    pub status:              StatusTally,
}

impl MarketSnapshot {
    pub fn collect(tick: Tick, market: &Market, carriers: &[CarrierAgent]) -> Self {
        let mut unbooked_loads = 0usize;
        let mut unbooked_roll_total = 0u64;
        for (_, id) in market.load_grid.iter() {
            unbooked_loads += 1;
            if let Some(load) = market.loads.get(id) {
                unbooked_roll_total += u64::from(load.roll_count);
            }
        }
        let unbooked_roll_mean = if unbooked_loads == 0 {
            0.0
        } else {
            unbooked_roll_total as f64 / unbooked_loads as f64
        };

        Self {
            tick,
            unbooked_loads,
            unbooked_roll_total,
            unbooked_roll_mean,
            idle_carriers: market.carrier_grid.len(),
            status: StatusTally::from_carriers(carriers),
        }
    }
}

/// Per-agent metrics.  Shippers report zero loads moved, no status and no
/// earnings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentRecord {
    /// Index within the agent's own collection.
    pub id:          u32,
    pub kind:        AgentKind,
    pub loads_moved: u64,
    pub status:      Option<CarrierStatus>,
    pub earnings:    f64,
}

impl AgentRecord {
    pub fn shipper(agent: &ShipperAgent) -> Self {
        Self {
            id:          agent.id.0,
            kind:        AgentKind::Shipper,
            loads_moved: 0,
            status:      None,
            earnings:    0.0,
        }
    }

    pub fn carrier(agent: &CarrierAgent) -> Self {
        Self {
            id:          agent.id.0,
            kind:        AgentKind::Carrier,
            loads_moved: agent.loads_moved(),
            status:      Some(agent.status()),
            earnings:    agent.earnings(),
        }
    }
}

/// Shippers first, then carriers, each in id order.
pub fn agent_records(shippers: &[ShipperAgent], carriers: &[CarrierAgent]) -> Vec<AgentRecord> {
    shippers
        .iter()
        .map(AgentRecord::shipper)
        .chain(carriers.iter().map(AgentRecord::carrier))
        .collect()
}
