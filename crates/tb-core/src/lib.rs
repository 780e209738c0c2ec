//! `tb-core` — foundational types for the urban tuberculosis model.
//!
//! This crate is a dependency of every other `tb-*` crate.  It has no `tb-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module            | Contents                                            |
//! |-------------------|-----------------------------------------------------|
//! | [`ids`]           | `AgentId`, `EventId`                                |
//! | [`geo`]           | `Point` (continuous), `Cell` (discrete grid cell)   |
//! | [`time`]          | `Tick`, `SimClock`, `SimConfig`, day ↔ tick helpers |
//! | [`rng`]           | `SimRng` (simulation-level stream)                  |
//! | [`compartment`]   | `Compartment` enum                                  |
//! | [`error`]         | `CoreError`, `CoreResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod compartment;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use compartment::Compartment;
pub use error::{CoreError, CoreResult};
pub use geo::{Cell, Point};
pub use ids::{AgentId, EventId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, TICKS_PER_DAY, Tick, days_to_ticks, ticks_to_days};
