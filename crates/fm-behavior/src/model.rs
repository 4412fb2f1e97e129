//! The `IdleMovement` trait: the extension point for idle carriers.

use fm_core::{CarrierId, Cell, GridBounds, IdlePolicy, SimRng};

use crate::{RandomWalk, StayPut};

/// Pluggable idle-carrier relocation.
///
/// Called once per tick for every carrier whose status is `Searching` after
/// its queue has been advanced.  Returning `from` means "stay"; any other
/// cell moves the carrier in the idle-carrier index.
///
/// All randomness must come from `rng` so the run stays reproducible.
///
/// # Example
///
/// ```rust,ignore
/// struct DriftEast;
///
/// impl IdleMovement for DriftEast {
///     fn next_cell(&self, _c: CarrierId, from: Cell, bounds: GridBounds, _rng: &mut SimRng) -> Cell {
///         bounds.clamp(from.x as i64 + 1, from.y as i64)
///     }
/// }
/// ```
pub trait IdleMovement: Send + Sync + 'static {
    /// The cell `carrier`, currently idle at `from`, should occupy next.
    ///
    /// Must return a cell inside `bounds`.
    fn next_cell(
        &self,
        carrier: CarrierId,
        from:    Cell,
        bounds:  GridBounds,
        rng:     &mut SimRng,
    ) -> Cell;
}

impl IdleMovement for IdlePolicy {
    fn next_cell(
        &self,
        carrier: CarrierId,
        from:    Cell,
        bounds:  GridBounds,
        rng:     &mut SimRng,
    ) -> Cell {
        match *self {
            IdlePolicy::StayPut => StayPut.next_cell(carrier, from, bounds, rng),
            IdlePolicy::RandomWalk { step } => {
                RandomWalk { step }.next_cell(carrier, from, bounds, rng)
            }
        }
    }
}
