//! Deciding where riders go once a run ends.
//!
//! For every released visitor, in order:
//!
//! 1. record the ride in `visited_rides` (release only, not disposal);
//! 2. ask the provider for a next ride from `origin`;
//! 3. otherwise mark the visitor leaving and ask for the exit;
//! 4. otherwise set `destination = None` (the park removes it next sweep);
//! 5. re-anchor, restart the walk cycle, unpause, show, and hand the visitor
//!    back to the pedestrian pool.
//!
//! Steps 2-4 are worked out for the whole batch first; if the provider hands
//! back an unusable route, nothing has been written yet.
//!
//! The router never touches the ride's loaded batch; the ride clears it.

use log::{debug, warn};

use park_core::{NodeId, RideId, RideTile, TileCoord, VisitorId};
use park_spatial::RouteProvider;
use park_visitor::{Visitor, VisitorStore};

use crate::{RideError, RideResult, StepContext};

/// What happened to one released visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision {
    /// Walking to the queue of `ride`.
    NextRide { ride: RideId, tile: TileCoord },
    /// Walking to the exit.
    Exit,
    /// No ride and no exit reachable; `destination` is `None`.
    Stranded,
}

/// Per-visitor decisions for one released batch, in batch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseReport {
    pub decisions: Vec<(VisitorId, ReleaseDecision)>,
}

impl ReleaseReport {
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn decision_for(&self, visitor: VisitorId) -> Option<ReleaseDecision> {
        self.decisions.iter().find(|(v, _)| *v == visitor).map(|(_, d)| *d)
    }

    pub fn exits(&self) -> usize {
        self.count(|d| matches!(d, ReleaseDecision::Exit))
    }

    pub fn stranded(&self) -> usize {
        self.count(|d| matches!(d, ReleaseDecision::Stranded))
    }

    fn count(&self, pred: impl Fn(&ReleaseDecision) -> bool) -> usize {
        self.decisions.iter().filter(|(_, d)| pred(d)).count()
    }
}

/// Stateless release routine; the route provider is passed in per call.
pub struct ReleaseRouter;

impl ReleaseRouter {
    /// Release the riders of a completed run of `ride`.
    pub fn release<P: RouteProvider + ?Sized>(
        ride:     RideId,
        batch:    &[VisitorId],
        visitors: &mut VisitorStore,
        provider: &P,
        ctx:      &StepContext,
    ) -> RideResult<ReleaseReport> {
        route_batch(ride, batch, visitors, provider, ctx, true)
    }

    /// Send visitors held by `ride` back onto the footpaths without counting
    /// a visit.  Used when the ride is removed from the park.
    pub fn reroute<P: RouteProvider + ?Sized>(
        ride:     RideId,
        batch:    &[VisitorId],
        visitors: &mut VisitorStore,
        provider: &P,
        ctx:      &StepContext,
    ) -> RideResult<ReleaseReport> {
        route_batch(ride, batch, visitors, provider, ctx, false)
    }

    /// Give a free pedestrian a new goal: a visitor just admitted at the
    /// gate, or one whose target ride disappeared while it was walking.
    pub fn dispatch<P: RouteProvider + ?Sized>(
        visitor:  VisitorId,
        visitors: &mut VisitorStore,
        provider: &P,
        ctx:      &StepContext,
    ) -> RideResult<ReleaseDecision> {
        let v = visitors.try_get_mut(visitor)?;
        if !v.owner().is_pedestrian() {
            return Err(RideError::NotPedestrian { visitor, owner: v.owner() });
        }
        let goal = plan_goal(v, &v.visited_rides, provider)?;
        let decision = apply_goal(v, goal);
        send_off(v, provider, ctx);
        Ok(decision)
    }
}

/// Routes for the whole batch are planned before any visitor is touched, so
/// a provider error leaves every visitor and the ride as they were.
fn route_batch<P: RouteProvider + ?Sized>(
    ride:         RideId,
    batch:        &[VisitorId],
    visitors:     &mut VisitorStore,
    provider:     &P,
    ctx:          &StepContext,
    record_visit: bool,
) -> RideResult<ReleaseReport> {
    let mut plans = Vec::with_capacity(batch.len());
    let mut visited = Vec::new();
    for &id in batch {
        let Some(visitor) = visitors.get(id) else {
            warn!("{ride}: visitor {id} left the park while held; skipping release");
            continue;
        };
        visited.clear();
        visited.extend_from_slice(&visitor.visited_rides);
        if record_visit {
            visited.push(ride);
        }
        plans.push((id, plan_goal(visitor, &visited, provider)?));
    }

    let mut report = ReleaseReport { decisions: Vec::with_capacity(plans.len()) };
    for (id, goal) in plans {
        let Some(visitor) = visitors.get_mut(id) else { continue };
        if record_visit {
            visitor.visited_rides.push(ride);
        }
        let decision = apply_goal(visitor, goal);
        send_off(visitor, provider, ctx);
        if let Err(owner) = visitor.release_from(ride) {
            warn!("{ride}: released visitor {id} was {owner}");
        }
        report.decisions.push((id, decision));
    }

    Ok(report)
}

/// Step 5 minus the ownership hand-over.
fn send_off<P: RouteProvider + ?Sized>(visitor: &mut Visitor, provider: &P, ctx: &StepContext) {
    visitor.refresh_world_position(|n| provider.node_position(n));
    visitor.cycle_start_ms = ctx.wall_ms;
    visitor.is_paused = false;
    visitor.visible = true;
}

/// A visitor's next navigational goal, worked out but not yet written.
enum Goal {
    Ride {
        tile:  RideTile,
        node:  NodeId,
        path:  Vec<NodeId>,
        next:  NodeId,
    },
    Exit {
        tile:  TileCoord,
        node:  NodeId,
        path:  Vec<NodeId>,
        next:  NodeId,
    },
    Stranded,
}

/// Steps 2-4, read-only.  `visited` is the history the provider should see.
fn plan_goal<P: RouteProvider + ?Sized>(
    visitor:  &Visitor,
    visited:  &[RideId],
    provider: &P,
) -> RideResult<Goal> {
    if let Some(route) = provider.find_next_ride(visitor.origin, &visitor.ride_tiles, visited) {
        let next = first_waypoint(&route.path_to_destination, visitor.id)?;
        return Ok(Goal::Ride {
            tile: route.next_ride_tile,
            node: route.destination_node,
            path: route.path_to_destination,
            next,
        });
    }

    match provider.find_exit(visitor.origin, visitor.entrance_tile) {
        Some(route) => {
            let next = first_waypoint(&route.path_to_destination, visitor.id)?;
            Ok(Goal::Exit {
                tile: route.entrance_tile,
                node: route.destination_node,
                path: route.path_to_destination,
                next,
            })
        }
        None => Ok(Goal::Stranded),
    }
}

fn apply_goal(visitor: &mut Visitor, goal: Goal) -> ReleaseDecision {
    match goal {
        Goal::Ride { tile, node, path, next } => {
            debug!("{} heads to {} at {}", visitor.name, tile.ride, tile.tile);
            visitor.final_destination_node = Some(node);
            visitor.final_destination_tile = Some(tile.tile);
            visitor.path_to_destination = path;
            visitor.destination = Some(next);
            ReleaseDecision::NextRide { ride: tile.ride, tile: tile.tile }
        }
        Goal::Exit { tile, node, path, next } => {
            debug!("sending {} to exit at {tile}", visitor.name);
            visitor.is_leaving = true;
            visitor.final_destination_node = Some(node);
            visitor.final_destination_tile = Some(tile);
            visitor.path_to_destination = path;
            visitor.destination = Some(next);
            ReleaseDecision::Exit
        }
        Goal::Stranded => {
            warn!(
                "could not find path to exit for {}, exit tile {}",
                visitor.name, visitor.entrance_tile
            );
            visitor.is_leaving = true;
            visitor.destination = None;
            ReleaseDecision::Stranded
        }
    }
}

/// The node after the path's starting point.  A one-node path means the
/// visitor already stands on its target.
fn first_waypoint(path: &[NodeId], visitor: VisitorId) -> RideResult<NodeId> {
    match path {
        [] => Err(RideError::EmptyRoute(visitor)),
        [here] => Ok(*here),
        [_, next, ..] => Ok(*next),
    }
}
