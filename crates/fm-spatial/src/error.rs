//! Spatial-subsystem error type.
//!
//! Every variant is an internal-consistency violation: the booking and idle
//! bookkeeping should never misuse an index.  Callers treat them as fatal.

use thiserror::Error;

use fm_core::{Cell, GridBounds};

/// Errors produced by `fm-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("{entity} is already placed at {cell}")]
    AlreadyPlaced { entity: String, cell: Cell },

    #[error("{0} is not placed in the index")]
    NotPlaced(String),

    #[error("cell {cell} lies outside the {bounds} grid")]
    OutOfBounds { cell: Cell, bounds: GridBounds },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
