//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`, seeded once from `MarketConfig::seed`
//! when the sim is built and never re-seeded.  Every random decision in the
//! market draws from it, in the fixed order the scheduler visits agents:
//!
//! - initial carrier placement (carrier order),
//! - per-tick activation shuffles (shippers, then carriers),
//! - load origin/destination draws,
//! - booking tie-breaks,
//! - idle-movement steps.
//!
//! Identical seed + identical config therefore reproduces the run exactly.
//! Independent `Sim`s each own their own `SimRng`, so parallel runs never
//! interfere.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Cell, GridBounds};

/// The single seeded random source for one simulation run.
///
/// Not `Clone`.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform cell within `bounds`: x is drawn before y.
    ///
    /// `bounds` must be non-empty; `MarketConfig::validate` guarantees it.
    #[inline]
    pub fn cell(&mut self, bounds: GridBounds) -> Cell {
        let x = self.0.gen_range(0..bounds.width);
        let y = self.0.gen_range(0..bounds.height);
        Cell::new(x, y)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
