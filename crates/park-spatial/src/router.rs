//! Routing trait and default Dijkstra implementation.
//!
//! Costs are walking times in milliseconds (u32).  A [`Route`] carries the
//! visited nodes (source first) as well as the edges, because visitors walk
//! node to node.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use park_core::{EdgeId, NodeId};

use crate::network::FootpathNetwork;
use crate::SpatialError;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Nodes in walking order.  `nodes[0]` is the source; the last element
    /// is the target.  A trivial route holds only the source.
    pub nodes: Vec<NodeId>,
    /// Edges to traverse in order; `edges.len() == nodes.len() - 1`.
    pub edges: Vec<EdgeId>,
    /// Total walking time in milliseconds.
    pub total_walk_ms: u32,
}

impl Route {
    /// `true` if the source and target are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
pub trait Router {
    /// Compute a route from `from` to `to`.
    ///
    /// `from == to` yields a trivial route, not an error.
    fn route(
        &self,
        network: &FootpathNetwork,
        from:    NodeId,
        to:      NodeId,
    ) -> Result<Route, SpatialError>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR footpath graph, using
/// `edge_walk_ms` as cost.  Ties are broken by `NodeId` so routes are
/// deterministic.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        network: &FootpathNetwork,
        from:    NodeId,
        to:      NodeId,
    ) -> Result<Route, SpatialError> {
        dijkstra(network, from, to)
    }
}

fn dijkstra(network: &FootpathNetwork, from: NodeId, to: NodeId) -> Result<Route, SpatialError> {
    if !network.contains(from) {
        return Err(SpatialError::NodeNotFound(from));
    }
    if !network.contains(to) {
        return Err(SpatialError::NodeNotFound(to));
    }
    if from == to {
        return Ok(Route { nodes: vec![from], edges: vec![], total_walk_ms: 0 });
    }

    let n = network.node_count();
    let mut dist      = vec![u32::MAX; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0;

    // Reverse turns the max-heap into a min-heap.
    let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost.saturating_add(network.edge_walk_ms[edge.index()]);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(
    network:   &FootpathNetwork,
    prev_edge: &[EdgeId],
    from:      NodeId,
    to:        NodeId,
    total_ms:  u32,
) -> Route {
    let mut edges = Vec::new();
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    edges.reverse();
    nodes.reverse();
    Route { nodes, edges, total_walk_ms: total_ms }
}
