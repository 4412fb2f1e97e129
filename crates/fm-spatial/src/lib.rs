//! `fm-spatial`: grid occupancy index and neighborhood queries.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `GridIndex<E>`: entity → cell occupancy on a bounded grid   |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! The market keeps two independent indices: unbooked loads by origin cell
//! and idle carriers by position.  Both are plain `GridIndex` instances keyed
//! by the respective typed ID.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Propagates serde derives to `fm-core` types.                 |

pub mod error;
pub mod grid;


pub use error::{SpatialError, SpatialResult};
pub use grid::GridIndex;
