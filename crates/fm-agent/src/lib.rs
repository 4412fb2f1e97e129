//! `fm-agent`: the entities of the freight market and their per-tick rules.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`load`]      | `Load`, `LoadState`, `LoadTransition`: shipment lifecycle  |
//! | [`store`]     | `LoadStore`: arena owning every load ever created          |
//! | [`market`]    | `Market` (shared indices + arena), `StepContext`           |
//! | [`shipper`]   | `ShipperAgent`: load generation and load updates           |
//! | [`carrier`]   | `CarrierAgent`: booking, queue advance, idle movement      |
//! | [`error`]     | `AgentError`, `LoadError`, `AgentResult<T>`                |
//!
//! # Ownership
//!
//! Loads never move.  They live in the [`LoadStore`] arena for the whole run
//! and everything else refers to them by [`LoadId`][fm_core::LoadId]:
//!
//! ```text
//! ShipperAgent.loads ──┐
//! CarrierAgent.queue ──┼──► LoadStore[LoadId]
//! Market.load_grid   ──┘
//! ```
//!
//! A shipper keeps its ids for the load's whole life; a carrier references
//! a load from booking until delivery; the load grid holds it only while
//! unbooked.  Dropped loads stay in the arena as an archive and are never
//! mutated again.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Load` and `LoadState`.|

pub mod carrier;
pub mod error;
pub mod load;
pub mod market;
pub mod shipper;
pub mod store;


pub use carrier::{CarrierActivity, CarrierAgent, is_reachable};
pub use error::{AgentError, AgentResult, LoadError};
pub use load::{Load, LoadState, LoadTransition};
pub use market::{Market, StepContext};
pub use shipper::ShipperAgent;
pub use store::LoadStore;
