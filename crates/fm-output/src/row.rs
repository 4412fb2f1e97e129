//! Plain data row types written by output backends.

use fm_core::{AgentKind, CarrierStatus, Tick};
use fm_sim::{AgentRecord, MarketSnapshot};

/// One agent's metrics at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:        u64,
    pub kind:        AgentKind,
    pub agent_id:    u32,
    pub loads_moved: u64,
    /// `None` for shippers.
    pub status:      Option<CarrierStatus>,
    pub earnings:    f64,
}

impl AgentSnapshotRow {
    pub fn new(tick: Tick, record: &AgentRecord) -> Self {
        Self {
            tick:        tick.0,
            kind:        record.kind,
            agent_id:    record.id,
            loads_moved: record.loads_moved,
            status:      record.status,
            earnings:    record.earnings,
        }
    }
}

/// Market summary for one tick, with the status tally flattened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:                u64,
    pub unbooked_loads:      u64,
    pub unbooked_roll_total: u64,
    pub unbooked_roll_mean:  f64,
    pub idle_carriers:       u64,
    pub searching:           u64,
    pub deadheading:         u64,
    pub in_transit:          u64,
}

impl From<&MarketSnapshot> for TickSummaryRow {
    fn from(s: &MarketSnapshot) -> Self {
        Self {
            tick:                s.tick.0,
            unbooked_loads:      s.unbooked_loads as u64,
            unbooked_roll_total: s.unbooked_roll_total,
            unbooked_roll_mean:  s.unbooked_roll_mean,
            idle_carriers:       s.idle_carriers as u64,
            searching:           s.status.searching as u64,
            deadheading:         s.status.deadheading as u64,
            in_transit:          s.status.in_transit as u64,
        }
    }
}
