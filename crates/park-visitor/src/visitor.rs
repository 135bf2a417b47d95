//! The `Visitor` entity.

use std::fmt;

use park_core::{NodeId, RideId, RideTile, TileCoord, VisitorId, WorldPos};

use crate::Owner;

/// Visitor age group.  Only affects display and arrival mix.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisitorKind {
    #[default]
    Adult,
    Kid,
    Elder,
}

impl VisitorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VisitorKind::Adult => "adult",
            VisitorKind::Kid   => "kid",
            VisitorKind::Elder => "elder",
        }
    }
}

impl fmt::Display for VisitorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A park visitor.
///
/// Rides hold `VisitorId`s, never `Visitor`s: the entity itself lives in the
/// [`VisitorStore`][crate::VisitorStore] for its whole life.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visitor {
    pub id:   VisitorId,
    pub name: String,
    pub kind: VisitorKind,

    // ── Navigation ────────────────────────────────────────────────────────
    /// Footpath node the visitor currently stands on (or last left).
    pub origin: NodeId,

    /// Rides the visitor may choose from when picking its next ride.
    pub ride_tiles: Vec<RideTile>,

    /// Tile of the park entrance, which is also the exit.
    pub entrance_tile: TileCoord,

    /// Every completed ride, in order.  Repeat visits appear repeatedly.
    pub visited_rides: Vec<RideId>,

    /// Next footpath node to walk to.  `None` while walking means the
    /// visitor has nowhere reachable to go and must be removed.
    pub destination: Option<NodeId>,

    /// Node at the end of the current path.
    pub final_destination_node: Option<NodeId>,

    /// Ride tile (or entrance tile) the current path leads to.
    pub final_destination_tile: Option<TileCoord>,

    /// Full path, first element being the node the route was computed from.
    pub path_to_destination: Vec<NodeId>,

    /// Set once the visitor heads for the exit.  Never cleared.
    pub is_leaving: bool,

    // ── Presentation ──────────────────────────────────────────────────────
    pub is_paused: bool,

    /// Wall-clock ms at which the current walk cycle started.
    pub cycle_start_ms: u64,

    /// Whether the visitor's model is drawn.  Hidden while inside a ride.
    pub visible: bool,

    pub world_pos: WorldPos,

    /// Where the visitor is facing; the position of `destination`.
    pub heading: Option<WorldPos>,

    owner: Owner,
}

impl Visitor {
    /// A fresh pedestrian standing at `origin` with no route yet.
    pub fn new(
        id:            VisitorId,
        name:          impl Into<String>,
        kind:          VisitorKind,
        origin:        NodeId,
        entrance_tile: TileCoord,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            origin,
            ride_tiles: Vec::new(),
            entrance_tile,
            visited_rides: Vec::new(),
            destination: None,
            final_destination_node: None,
            final_destination_tile: None,
            path_to_destination: Vec::new(),
            is_leaving: false,
            is_paused: false,
            cycle_start_ms: 0,
            visible: true,
            world_pos: entrance_tile.to_world(),
            heading: None,
            owner: Owner::Pedestrian,
        }
    }

    #[inline]
    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// How many times this visitor has completed `ride`.
    pub fn visit_count(&self, ride: RideId) -> usize {
        self.visited_rides.iter().filter(|&&r| r == ride).count()
    }

    // ── Ownership hand-over ───────────────────────────────────────────────

    /// Pedestrian → `Queued(ride)`.  Returns the current owner on refusal.
    pub fn join_queue(&mut self, ride: RideId) -> Result<(), Owner> {
        match self.owner {
            Owner::Pedestrian => {
                self.owner = Owner::Queued(ride);
                Ok(())
            }
            other => Err(other),
        }
    }

    /// `Queued(ride)` → `Riding(ride)`.  Returns the current owner on refusal.
    pub fn board(&mut self, ride: RideId) -> Result<(), Owner> {
        match self.owner {
            Owner::Queued(r) if r == ride => {
                self.owner = Owner::Riding(ride);
                Ok(())
            }
            other => Err(other),
        }
    }

    /// Hand the visitor back to the pedestrian pool.  Only the ride that
    /// holds the visitor may do this.
    pub fn release_from(&mut self, ride: RideId) -> Result<(), Owner> {
        match self.owner.ride() {
            Some(r) if r == ride => {
                self.owner = Owner::Pedestrian;
                Ok(())
            }
            _ => Err(self.owner),
        }
    }

    // ── Presentation ──────────────────────────────────────────────────────

    /// Re-anchor the model on `origin` and face it toward `destination`.
    ///
    /// `position_of` maps a footpath node to its world position.  A visitor
    /// without a destination keeps facing nowhere.
    pub fn refresh_world_position<F>(&mut self, position_of: F)
    where
        F: Fn(NodeId) -> Option<WorldPos>,
    {
        if let Some(pos) = position_of(self.origin) {
            self.world_pos = pos;
        }
        self.heading = self.destination.and_then(&position_of);
    }
}

impl fmt::Display for Visitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.kind, self.owner)
    }
}
