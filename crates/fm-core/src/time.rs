//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter starting at 0.  One tick
//! is one market period; no wall-clock mapping is needed.  All schedule
//! arithmetic (planned pickup, drop tick, rolls) is exact integer math.

use std::fmt;

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// The following tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// Signed number of ticks from `earlier` to `self`.
    ///
    /// Negative when `self` precedes `earlier`; reachability checks rely on
    /// that to reject pickups in the past.
    #[inline]
    pub fn signed_since(self, earlier: Tick) -> i64 {
        self.0 as i64 - earlier.0 as i64
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::AddAssign<u64> for Tick {
    #[inline]
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
