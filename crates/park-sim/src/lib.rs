//! `park-sim` — the park driver for the rust_park simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Stroll  — every `walk_ticks_per_node` ticks each free pedestrian moves
//!               one node along its path.  At the end of the path it joins
//!               the target ride's queue, or leaves the park if leaving.
//!   ② Rides   — Ride::step for every ride, ascending RideId.  Finished
//!               runs add to Finances and release their riders.
//!   ③ Sweep   — pedestrians with no destination are removed.
//! ```
//!
//! Everything runs on one thread against one `VisitorStore`; a ride only
//! writes the visitors it holds.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use park_core::{ParkConfig, TileCoord};
//! use park_ride::RideTable;
//! use park_sim::{NoopObserver, ParkBuilder};
//! use park_spatial::{DijkstraRouter, GraphRouteProvider};
//!
//! let provider = GraphRouteProvider::new(network, DijkstraRouter);
//! let mut park = ParkBuilder::new(ParkConfig::default(), RideTable::builtin(), provider)
//!     .build()?;
//! park.place_ride(TileCoord::new(4, 0), coaster_node, Some("rollercoaster"))?;
//! park.admit_visitor("Ada", VisitorKind::Adult, gate_tile, gate_node)?;
//! park.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod park;

#[cfg(test)]
mod tests;

pub use builder::ParkBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, ParkObserver, TickStats};
pub use park::{Finances, Park};
