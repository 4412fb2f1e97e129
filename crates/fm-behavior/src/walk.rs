//! Bounded random walk for idle carriers.

use fm_core::{CarrierId, Cell, GridBounds, SimRng};

use crate::{BehaviorError, BehaviorResult, IdleMovement};

/// Each tick, move by `(dx, dy)` with both offsets drawn uniformly from
/// `[-step, step]` (dx first), then clamp onto the grid.
///
/// A clamped step can land on the starting cell; that counts as staying.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomWalk {
    pub step: u32,
}

impl RandomWalk {
    pub fn new(step: u32) -> BehaviorResult<Self> {
        if step == 0 {
            return Err(BehaviorError::Config("random walk step must be positive".into()));
        }
        Ok(Self { step })
    }
}

impl IdleMovement for RandomWalk {
    fn next_cell(
        &self,
        _carrier: CarrierId,
        from:     Cell,
        bounds:   GridBounds,
        rng:      &mut SimRng,
    ) -> Cell {
        let step = i64::from(self.step);
        let dx = rng.gen_range(-step..=step);
        let dy = rng.gen_range(-step..=step);
        bounds.clamp(i64::from(from.x) + dx, i64::from(from.y) + dy)
    }
}
