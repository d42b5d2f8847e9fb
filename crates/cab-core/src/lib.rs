//! `cab-core`: foundational types for the `cabtown` city simulation.
//!
//! This crate is a dependency of every other `cab-*` crate.  It intentionally
//! has no `cab-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`coord`]       | `TilePos` grid coordinate                             |
//! | [`direction`]   | `Direction`, `DirectionSet`                           |
//! | [`ids`]         | `TripId`                                              |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`config`]      | `MapConfig`, `SimConfig`                              |
//! | [`vehicle`]     | `CarKind` enum                                        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on public types (for snapshots). |

pub mod config;
pub mod coord;
pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{MapConfig, SimConfig};
pub use coord::TilePos;
pub use direction::{Direction, DirectionSet};
pub use error::{CoreError, CoreResult};
pub use ids::TripId;
pub use rng::SimRng;
pub use time::Tick;
pub use vehicle::CarKind;
