//! A single shipment and its lifecycle.
//!
//! # State machine
//!
//! ```text
//!   Unbooked ──book()──► Booked ──tick == planned──► Picked ──tick >= drop──► Dropped
//!      │  ▲
//!      └──┘ tick >= planned: roll (planned += 1, roll_count += 1)
//! ```
//!
//! [`Load::advance`] applies at most one transition per tick, checking the
//! rules in the order above (roll first).  Flags only ever go from `false` to
//! `true`.

use fm_core::{Cell, LoadId, ShipperId, Tick, ceil_div};

use crate::LoadError;

// ── LoadState ─────────────────────────────────────────────────────────────────

/// Lifecycle stage, derived from the load's flags.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadState {
    Unbooked,
    /// Booked by a carrier, waiting for its pickup tick.
    Booked,
    Picked,
    /// Terminal.
    Dropped,
}

/// The transition [`Load::advance`] applied, if any.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LoadTransition {
    /// Missed its pickup window unbooked; now planned one tick later.
    Rolled,
    Picked,
    Dropped,
}

// ── Load ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Load {
    pub id:          LoadId,
    /// Shipper that created (and owns) the load.
    pub shipper:     ShipperId,
    /// Tick the load was created at.
    pub created:     Tick,
    pub origin:      Cell,
    pub destination: Cell,
    /// Earliest pickup tick.  Moves forward by one on every roll.
    pub planned_tick: Tick,
    pub rate:        f64,
    pub roll_count:  u32,
    transit_ticks:   u64,
    booked:          bool,
    picked:          bool,
    dropped:         bool,
}

impl Load {
    /// A fresh unbooked load.  `carrier_speed` fixes the transit time; it
    /// must be positive.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id:            LoadId,
        shipper:       ShipperId,
        created:       Tick,
        origin:        Cell,
        destination:   Cell,
        planned_tick:  Tick,
        rate:          f64,
        carrier_speed: u32,
    ) -> Self {
        let distance = origin.distance(destination);
        Self {
            id,
            shipper,
            created,
            origin,
            destination,
            planned_tick,
            rate,
            roll_count: 0,
            transit_ticks: ceil_div(u64::from(distance), u64::from(carrier_speed)),
            booked: false,
            picked: false,
            dropped: false,
        }
    }

    /// `"<shipper>_<created tick>_0"`, stable across runs with the same seed.
    pub fn tag(&self) -> String {
        format!("{}_{}_0", self.shipper.0, self.created.0)
    }

    // ── Derived quantities ────────────────────────────────────────────────

    /// Chebyshev distance from origin to destination.
    #[inline]
    pub fn distance(&self) -> u32 {
        self.origin.distance(self.destination)
    }

    /// Ticks needed to move the load once picked.
    #[inline]
    pub fn transit_ticks(&self) -> u64 {
        self.transit_ticks
    }

    /// Tick at which the load is delivered if picked on `planned_tick`.
    #[inline]
    pub fn drop_tick(&self) -> Tick {
        self.planned_tick + self.transit_ticks
    }

    /// Rate per cell of distance, for reporting.  `None` for zero-distance
    /// loads.
    pub fn rate_per_distance(&self) -> Option<f64> {
        match self.distance() {
            0 => None,
            d => Some(self.rate / f64::from(d)),
        }
    }

    // ── Flags ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn is_booked(&self) -> bool {
        self.booked
    }

    #[inline]
    pub fn is_picked(&self) -> bool {
        self.picked
    }

    #[inline]
    pub fn is_dropped(&self) -> bool {
        self.dropped
    }

    pub fn state(&self) -> LoadState {
        if self.dropped {
            LoadState::Dropped
        } else if self.picked {
            LoadState::Picked
        } else if self.booked {
            LoadState::Booked
        } else {
            LoadState::Unbooked
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Mark the load booked.  A load can be booked exactly once.
    pub fn book(&mut self) -> Result<(), LoadError> {
        if self.booked {
            return Err(LoadError::AlreadyBooked(self.id));
        }
        self.booked = true;
        Ok(())
    }

    /// Evaluate the state machine for tick `now`.
    ///
    /// Dropped loads are inert.  A booked load whose pickup tick has already
    /// passed without a pick stays where it is; the shipper visits every
    /// open load each tick, so this only happens if a caller skips ticks.
    pub fn advance(&mut self, now: Tick) -> Option<LoadTransition> {
        if self.dropped {
            return None;
        }
        if !self.booked {
            if now >= self.planned_tick {
                self.planned_tick += 1;
                self.roll_count += 1;
                return Some(LoadTransition::Rolled);
            }
            return None;
        }
        if now < self.planned_tick {
            return None;
        }
        if now == self.planned_tick {
            if self.picked {
                return None;
            }
            self.picked = true;
            return Some(LoadTransition::Picked);
        }
        if self.picked && now >= self.drop_tick() {
            self.dropped = true;
            return Some(LoadTransition::Dropped);
        }
        None
    }
}
