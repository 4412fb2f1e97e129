//! `fm-behavior`: how searching carriers move between ticks.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`model`]   | `IdleMovement` trait                                            |
//! | [`noop`]    | `StayPut`: carriers never move while idle                       |
//! | [`walk`]    | `RandomWalk`: bounded uniform step, clamped to the grid         |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! `IdlePolicy` (from `fm-core`) also implements [`IdleMovement`] by
//! dispatching to the matching built-in, so a config value can drive the sim
//! directly.  Custom policies plug in through `SimBuilder::idle_movement`.

pub mod error;
pub mod model;
pub mod noop;
pub mod walk;


pub use error::{BehaviorError, BehaviorResult};
pub use model::IdleMovement;
pub use noop::StayPut;
pub use walk::RandomWalk;
