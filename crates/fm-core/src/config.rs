//! Market configuration.
//!
//! `MarketConfig` is the one immutable snapshot of run parameters.  The sim
//! builder validates it once and then threads a shared reference to every
//! component that needs it; nothing reads parameters from global state.

use crate::{FmError, FmResult, GridBounds, Tick};

/// Largest grid `validate` accepts, in cells.
///
/// Spatial indices allocate one bucket per cell up front.
pub const MAX_GRID_CELLS: u64 = 1 << 26;

// ── IdlePolicy ────────────────────────────────────────────────────────────────

/// How a searching carrier relocates between ticks.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum IdlePolicy {
    /// Never move while idle.
    #[default]
    StayPut,
    /// Move by a uniform offset in `[-step, step]` on each axis, clamped to
    /// the grid.
    RandomWalk { step: u32 },
}

// ── MarketConfig ──────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by `fm-experiment` and passed to
/// `SimBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarketConfig {
    /// Grid width in cells.
    pub width: u32,

    /// Grid height in cells.
    pub height: u32,

    pub n_shippers: usize,

    pub n_carriers: usize,

    /// Cells a carrier covers per tick (Chebyshev).  Must be positive.
    pub carrier_speed: u32,

    /// Radius of the block a carrier searches for loads.  1 = 3×3.
    pub carrier_search_radius: u32,

    /// A shipper stops generating while it holds this many unbooked loads.
    pub shipper_max_unbooked: usize,

    /// Ticks between a load's creation and its planned pickup.
    pub shipper_lead_time: u64,

    /// Rate per cell of Chebyshev distance on new loads.
    pub shipper_starting_rate: f64,

    pub idle_policy: IdlePolicy,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Ticks `Sim::run` simulates.
    pub total_ticks: u64,

    /// Per-agent snapshot every N ticks.  0 disables agent snapshots.
    pub output_interval_ticks: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            width:                 40,
            height:                10,
            n_shippers:            50,
            n_carriers:            400,
            carrier_speed:         3,
            carrier_search_radius: 1,
            shipper_max_unbooked:  3,
            shipper_lead_time:     3,
            shipper_starting_rate: 2.0,
            idle_policy:           IdlePolicy::StayPut,
            seed:                  42,
            total_ticks:           50,
            output_interval_ticks: 1,
        }
    }
}

impl MarketConfig {
    /// Check every parameter once.  Returns the first violation found.
    pub fn validate(&self) -> FmResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FmError::Config(format!(
                "grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        let cells = u64::from(self.width) * u64::from(self.height);
        if cells > MAX_GRID_CELLS {
            return Err(FmError::Config(format!(
                "grid {}x{} has {cells} cells, limit is {MAX_GRID_CELLS}",
                self.width, self.height
            )));
        }
        if self.carrier_speed == 0 {
            return Err(FmError::Config("carrier_speed must be positive".into()));
        }
        if self.shipper_lead_time == 0 {
            return Err(FmError::Config("shipper_lead_time must be positive".into()));
        }
        if !self.shipper_starting_rate.is_finite() || self.shipper_starting_rate < 0.0 {
            return Err(FmError::Config(format!(
                "shipper_starting_rate must be finite and non-negative, got {}",
                self.shipper_starting_rate
            )));
        }
        if let IdlePolicy::RandomWalk { step: 0 } = self.idle_policy {
            return Err(FmError::Config("random walk step must be positive".into()));
        }
        u32::try_from(self.n_shippers)
            .map_err(|_| FmError::Config(format!("too many shippers: {}", self.n_shippers)))?;
        u32::try_from(self.n_carriers)
            .map_err(|_| FmError::Config(format!("too many carriers: {}", self.n_carriers)))?;
        Ok(())
    }

    #[inline]
    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.width, self.height)
    }

    /// The tick at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }
}
