//! Footpath network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Every node stands on exactly one tile.  An R-tree (via `rstar`) over the
//! tile anchors answers "which node is on this tile" and "which node is
//! nearest to this world position".

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use park_core::{EdgeId, NodeId, TileCoord, WorldPos};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2], // [x, z]
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

// ── FootpathNetwork ───────────────────────────────────────────────────────────

/// Directed footpath graph in CSR format plus a spatial index.
///
/// Do not construct directly; use [`FootpathNetworkBuilder`].
pub struct FootpathNetwork {
    /// Tile each node stands on.  Indexed by `NodeId`.
    pub node_tile: Vec<TileCoord>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each edge (needed for route reconstruction).
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Walking time in milliseconds.  Used as Dijkstra edge cost.
    pub edge_walk_ms: Vec<u32>,

    spatial_idx: RTree<NodeEntry>,
}

impl FootpathNetwork {
    /// A network with no nodes; every routing request fails.
    pub fn empty() -> Self {
        FootpathNetworkBuilder::new().build()
    }

    pub fn node_count(&self) -> usize {
        self.node_tile.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_tile.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// World position of `node`, or `None` for an unknown node.
    pub fn node_pos(&self, node: NodeId) -> Option<WorldPos> {
        self.node_tile.get(node.index()).map(|t| t.to_world())
    }

    /// The node standing on exactly `tile`, if any.
    pub fn node_at_tile(&self, tile: TileCoord) -> Option<NodeId> {
        let p = tile.to_world();
        self.spatial_idx
            .nearest_neighbor(&[p.x, p.z])
            .map(|e| e.id)
            .filter(|&id| self.node_tile[id.index()] == tile)
    }

    /// Nearest node to `pos`.  Returns `None` only if the network is empty.
    pub fn snap_to_node(&self, pos: WorldPos) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.z])
            .map(|e| e.id)
    }
}

// ── FootpathNetworkBuilder ────────────────────────────────────────────────────

/// Construct a [`FootpathNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use park_core::TileCoord;
/// use park_spatial::FootpathNetworkBuilder;
///
/// let mut b = FootpathNetworkBuilder::new();
/// let gate = b.add_node(TileCoord::new(0, 0));
/// let ride = b.add_node(TileCoord::new(0, 1));
/// b.add_path(gate, ride, 2_000);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct FootpathNetworkBuilder {
    tiles:     Vec<TileCoord>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:    NodeId,
    to:      NodeId,
    walk_ms: u32,
}

impl FootpathNetworkBuilder {
    pub fn new() -> Self {
        Self { tiles: Vec::new(), raw_edges: Vec::new() }
    }

    /// Add a footpath node on `tile` and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, tile: TileCoord) -> NodeId {
        let id = NodeId(self.tiles.len() as u32);
        self.tiles.push(tile);
        id
    }

    /// Add a **directed** edge (one-way path, e.g. a ride exit ramp).
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, walk_ms: u32) {
        self.raw_edges.push(RawEdge { from, to, walk_ms });
    }

    /// Add edges in both directions.
    pub fn add_path(&mut self, a: NodeId, b: NodeId, walk_ms: u32) {
        self.add_directed_edge(a, b, walk_ms);
        self.add_directed_edge(b, a, walk_ms);
    }

    pub fn node_count(&self) -> usize { self.tiles.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`FootpathNetwork`].
    pub fn build(self) -> FootpathNetwork {
        let node_count = self.tiles.len();
        let edge_count = self.raw_edges.len();

        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:    Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:      Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_walk_ms: Vec<u32>    = raw.iter().map(|e| e.walk_ms).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let entries: Vec<NodeEntry> = self
            .tiles
            .iter()
            .enumerate()
            .map(|(i, &tile)| {
                let p = tile.to_world();
                NodeEntry { point: [p.x, p.z], id: NodeId(i as u32) }
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        FootpathNetwork {
            node_tile: self.tiles,
            node_out_start,
            edge_from,
            edge_to,
            edge_walk_ms,
            spatial_idx,
        }
    }
}

impl Default for FootpathNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
