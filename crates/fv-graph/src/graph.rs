//! Core graph data structures.

use std::collections::HashMap;

use fv_core::{EdgeId, NodeId, Real, format_number};

use crate::builder::GraphBuilder;
use crate::error::GraphResult;
use crate::payload::GraphPayload;
use crate::role::NodeRole;

/// A node of the water network.
///
/// Positions are not stored here: the layout engine keeps them in its own
/// table indexed by [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub role: NodeRole,
    pub is_source: bool,
    pub is_sink: bool,
}

/// Optional numeric attributes carried by a connection.
///
/// Zero and non-finite numbers are normalized to `None` so that label
/// encoding only has to check presence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeAttributes {
    pub capacity: Option<Real>,
    pub cost: Option<Real>,
    pub distance: Option<Real>,
    pub value: Option<String>,
}

impl EdgeAttributes {
    pub fn with_capacity(mut self, v: Real) -> Self {
        self.capacity = Some(v);
        self
    }

    pub fn with_cost(mut self, v: Real) -> Self {
        self.cost = Some(v);
        self
    }

    pub fn with_distance(mut self, v: Real) -> Self {
        self.distance = Some(v);
        self
    }

    pub fn with_value(mut self, v: impl Into<String>) -> Self {
        self.value = Some(v.into());
        self
    }

    pub(crate) fn normalized(self) -> Self {
        let keep = |v: Option<Real>| v.filter(|x| x.is_finite() && *x != 0.0);
        Self {
            capacity: keep(self.capacity),
            cost: keep(self.cost),
            distance: keep(self.distance),
            value: self.value.filter(|s| !s.is_empty()),
        }
    }

    /// Formatted capacity, e.g. `"100"`.
    pub fn capacity_text(&self) -> Option<String> {
        self.capacity.map(format_number)
    }

    pub fn cost_text(&self) -> Option<String> {
        self.cost.map(format_number)
    }

    pub fn distance_text(&self) -> Option<String> {
        self.distance.map(format_number)
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub attrs: EdgeAttributes,
    /// How many earlier edges share this exact (source, target) pair.
    pub parallel_index: usize,
}

/// The graph: a validated, immutable arena of nodes and edges.
///
/// The graph stores:
/// - All nodes and edges in vectors (indexed by their IDs).
/// - Compact adjacency: for each node, which edges are incident.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) by_name: HashMap<String, NodeId>,

    /// Node i's incident edges are in `node_edges[node_edge_offsets[i]..node_edge_offsets[i+1]]`.
    pub(crate) node_edge_offsets: Vec<usize>,
    pub(crate) node_edges: Vec<EdgeId>,
}

impl Graph {
    /// Validate and build a graph from an input payload.
    pub fn from_payload(payload: &GraphPayload) -> GraphResult<Graph> {
        GraphBuilder::from_payload(payload).build()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Look a node up by its string id.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Edges incident to a node (as source or target), in edge order.
    pub fn incident_edges(&self, node: NodeId) -> &[EdgeId] {
        let idx = node.index();
        if idx >= self.nodes.len() {
            return &[];
        }
        let start = self.node_edge_offsets[idx];
        let end = self.node_edge_offsets[idx + 1];
        &self.node_edges[start..end]
    }

    /// Number of edge endpoints at a node. A self-loop counts twice.
    pub fn degree(&self, node: NodeId) -> usize {
        self.incident_edges(node)
            .iter()
            .filter_map(|e| self.edge(*e))
            .map(|e| usize::from(e.source == node) + usize::from(e.target == node))
            .sum()
    }

    pub fn sources(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_source)
    }

    pub fn sinks(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_sink)
    }

    /// Names of both endpoints of an edge.
    pub fn endpoint_names(&self, edge: &Edge) -> (&str, &str) {
        let name = |id: NodeId| self.node(id).map(|n| n.name.as_str()).unwrap_or("");
        (name(edge.source), name(edge.target))
    }
}
