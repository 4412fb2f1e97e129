//! A no-op idle policy: carriers stay where they delivered.

use fm_core::{CarrierId, Cell, GridBounds, SimRng};

use crate::IdleMovement;

/// An [`IdleMovement`] that always returns the current cell and draws
/// nothing from the RNG.
///
/// This is the reference market behavior: an idle carrier waits for loads
/// to appear near it.
#[derive(Copy, Clone, Debug, Default)]
pub struct StayPut;

impl IdleMovement for StayPut {
    #[inline]
    fn next_cell(
        &self,
        _carrier: CarrierId,
        from:     Cell,
        _bounds:  GridBounds,
        _rng:     &mut SimRng,
    ) -> Cell {
        from
    }
}
