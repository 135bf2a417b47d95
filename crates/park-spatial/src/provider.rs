//! The route-provider capability rides consult when releasing visitors.

use log::debug;

use park_core::{NodeId, RideId, RideTile, TileCoord, WorldPos};

use crate::network::FootpathNetwork;
use crate::router::Router;

// ── Route results ─────────────────────────────────────────────────────────────

/// A walk to the queue of another ride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideRoute {
    pub destination_node:    NodeId,
    pub next_ride_tile:      RideTile,
    /// Path starting at the visitor's origin.
    pub path_to_destination: Vec<NodeId>,
}

/// A walk to the park exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitRoute {
    pub destination_node:    NodeId,
    pub entrance_tile:       TileCoord,
    /// Path starting at the visitor's origin.
    pub path_to_destination: Vec<NodeId>,
}

// ── RouteProvider trait ───────────────────────────────────────────────────────

/// Opaque pathfinding capability.  Absence of a route is `None`, never an
/// error.
pub trait RouteProvider {
    /// Pick the next ride for a visitor standing on `origin`, choosing among
    /// `ride_tiles` and knowing the rides already in `visited_rides`.
    fn find_next_ride(
        &self,
        origin:        NodeId,
        ride_tiles:    &[RideTile],
        visited_rides: &[RideId],
    ) -> Option<RideRoute>;

    /// Route from `origin` to the exit on `entrance_tile`.
    fn find_exit(&self, origin: NodeId, entrance_tile: TileCoord) -> Option<ExitRoute>;

    /// World position of a node, used to re-anchor released visitors.
    fn node_position(&self, _node: NodeId) -> Option<WorldPos> {
        None
    }
}

// ── GraphRouteProvider ────────────────────────────────────────────────────────

/// [`RouteProvider`] backed by a [`FootpathNetwork`] and a [`Router`].
///
/// Next-ride policy: among the rides whose tile carries a reachable node,
/// prefer the ride visited the fewest times so far, then the shortest walk,
/// then the lowest `RideId`.  A visitor that has completed
/// `max_rides_per_visitor` rides gets no next ride and heads for the exit.
pub struct GraphRouteProvider<R: Router> {
    pub network: FootpathNetwork,
    pub router:  R,
    pub max_rides_per_visitor: Option<usize>,
}

impl<R: Router> GraphRouteProvider<R> {
    pub fn new(network: FootpathNetwork, router: R) -> Self {
        Self { network, router, max_rides_per_visitor: None }
    }

    pub fn with_max_rides(mut self, max: usize) -> Self {
        self.max_rides_per_visitor = Some(max);
        self
    }
}

impl<R: Router> RouteProvider for GraphRouteProvider<R> {
    fn find_next_ride(
        &self,
        origin:        NodeId,
        ride_tiles:    &[RideTile],
        visited_rides: &[RideId],
    ) -> Option<RideRoute> {
        if let Some(max) = self.max_rides_per_visitor {
            if visited_rides.len() >= max {
                debug!("visitor at {origin} has ridden {max} rides; no next ride");
                return None;
            }
        }

        ride_tiles
            .iter()
            .filter_map(|rt| {
                let target = self.network.node_at_tile(rt.tile)?;
                let route = self.router.route(&self.network, origin, target).ok()?;
                let visits = visited_rides.iter().filter(|&&r| r == rt.ride).count();
                Some(((visits, route.total_walk_ms, rt.ride), *rt, target, route))
            })
            .min_by_key(|(key, ..)| *key)
            .map(|(_, rt, target, route)| RideRoute {
                destination_node:    target,
                next_ride_tile:      rt,
                path_to_destination: route.nodes,
            })
    }

    fn find_exit(&self, origin: NodeId, entrance_tile: TileCoord) -> Option<ExitRoute> {
        let target = self.network.node_at_tile(entrance_tile)?;
        let route = self.router.route(&self.network, origin, target).ok()?;
        Some(ExitRoute {
            destination_node:    target,
            entrance_tile,
            path_to_destination: route.nodes,
        })
    }

    fn node_position(&self, node: NodeId) -> Option<WorldPos> {
        self.network.node_pos(node)
    }
}
