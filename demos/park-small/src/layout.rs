//! Footpath layout of the demo park.

use park_core::{NodeId, TileCoord};
use park_spatial::{FootpathNetwork, FootpathNetworkBuilder};

/// Named nodes of the demo park.
pub struct Layout {
    pub gate:     NodeId,
    pub coaster:  NodeId,
    pub wheel:    NodeId,
    pub carousel: NodeId,
    pub corner:   NodeId,
}

/// Build the demo footpaths.
///
/// ```text
///   corner(0,1)   north(1,1) ─ carousel(2,1)
///      │            │           │
///   gate(0,0) ─ plaza(1,0) ─ east(2,0) ─ coaster(3,0)
///                   │
///               wheel(1,-1)
/// ```
///
/// Every hop takes 4 s of walking.
pub fn build_layout() -> (FootpathNetwork, Layout) {
    let mut b = FootpathNetworkBuilder::new();

    let gate     = b.add_node(TileCoord::new(0, 0));
    let plaza    = b.add_node(TileCoord::new(1, 0));
    let east     = b.add_node(TileCoord::new(2, 0));
    let coaster  = b.add_node(TileCoord::new(3, 0));
    let north    = b.add_node(TileCoord::new(1, 1));
    let carousel = b.add_node(TileCoord::new(2, 1));
    let wheel    = b.add_node(TileCoord::new(1, -1));
    let corner   = b.add_node(TileCoord::new(0, 1));

    b.add_path(gate,  plaza,    4_000);
    b.add_path(plaza, east,     4_000);
    b.add_path(east,  coaster,  4_000);
    b.add_path(plaza, north,    4_000);
    b.add_path(north, carousel, 4_000);
    b.add_path(east,  carousel, 4_000);
    b.add_path(plaza, wheel,    4_000);
    b.add_path(gate,  corner,   4_000);

    (b.build(), Layout { gate, coaster, wheel, carousel, corner })
}
