//! Agent kinds and carrier operating status, shared by the agent, sim and
//! output crates.

/// What a carrier is doing this tick.
///
/// Recomputed every tick from the carrier's current load and the clock; only
/// the initial `Searching` value is set directly.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarrierStatus {
    /// Idle, present in the idle-carrier index, looking for a load.
    #[default]
    Searching,
    /// Committed to a load whose pickup tick is still in the future.
    Deadheading,
    /// Carrying a picked load toward its destination.
    InTransit,
}

impl CarrierStatus {
    /// Label used for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            CarrierStatus::Searching   => "searching",
            CarrierStatus::Deadheading => "deadheading",
            CarrierStatus::InTransit   => "in_transit",
        }
    }
}

impl std::fmt::Display for CarrierStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two agent populations the scheduler activates, in this order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentKind {
    Shipper,
    Carrier,
}

impl AgentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Shipper => "shipper",
            AgentKind::Carrier => "carrier",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
