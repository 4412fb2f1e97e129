//! `fm-core`: foundational types for the freight market simulator.
//!
//! This crate is a dependency of every other `fm-*` crate.  It has no `fm-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ShipperId`, `CarrierId`, `LoadId`                    |
//! | [`geo`]         | `Cell`, `GridBounds`, Chebyshev distance, `ceil_div`  |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (the one seeded source per run)              |
//! | [`status`]      | `CarrierStatus`, `AgentKind`                          |
//! | [`config`]      | `MarketConfig`, `IdlePolicy`                          |
//! | [`error`]       | `FmError`, `FmResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types; enabled  |
//! |         | by `fm-experiment` for JSON configs.                         |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod status;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{IdlePolicy, MAX_GRID_CELLS, MarketConfig};
pub use error::{FmError, FmResult};
pub use geo::{Cell, GridBounds, ceil_div, chebyshev};
pub use ids::{CarrierId, LoadId, ShipperId};
pub use rng::SimRng;
pub use status::{AgentKind, CarrierStatus};
pub use time::Tick;
