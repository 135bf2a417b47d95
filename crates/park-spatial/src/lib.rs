//! `park-spatial` — footpath network, spatial indexing, and routing.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`network`]  | `FootpathNetwork` (CSR + R-tree), `FootpathNetworkBuilder`   |
//! | [`router`]   | `Router` trait, `Route`, `DijkstraRouter`                    |
//! | [`provider`] | `RouteProvider` trait, `RideRoute`, `ExitRoute`, `GraphRouteProvider` |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                           |
//!
//! Rides only ever see the [`RouteProvider`] trait: a visitor's next goal is
//! either a route to another ride, a route to the exit, or nothing.  How that
//! route is found is this crate's business.

pub mod error;
pub mod network;
pub mod provider;
pub mod router;


pub use error::{SpatialError, SpatialResult};
pub use network::{FootpathNetwork, FootpathNetworkBuilder};
pub use provider::{ExitRoute, GraphRouteProvider, RideRoute, RouteProvider};
pub use router::{DijkstraRouter, Route, Router};
