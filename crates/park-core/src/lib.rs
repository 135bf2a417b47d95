//! `park-core` — foundational types for the `rust_park` simulation.
//!
//! This crate is a dependency of every other `park-*` crate.  It has no
//! `park-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VisitorId`, `RideId`, `NodeId`, `EdgeId`             |
//! | [`geo`]         | `TileCoord`, `WorldPos`, `RideTile`                   |
//! | [`time`]        | `Tick`, `SimClock`, `ParkConfig`, `WallClock`         |
//! | [`rng`]         | `SimRng`, `Chooser`, `FixedChooser`                   |
//! | [`error`]       | `ParkError`, `ParkResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ParkError, ParkResult};
pub use geo::{RideTile, TileCoord, WorldPos};
pub use ids::{EdgeId, NodeId, RideId, VisitorId};
pub use rng::{Chooser, FixedChooser, SimRng};
pub use time::{FixedWallClock, ParkConfig, SimClock, SystemWallClock, Tick, WallClock};
