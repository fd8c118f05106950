//! Incremental graph builder.

use std::collections::{HashMap, HashSet};

use fv_core::{EdgeId, NodeId};

use crate::error::GraphResult;
use crate::graph::{Edge, EdgeAttributes, Graph, Node};
use crate::payload::{EdgePayload, GraphPayload, Scalar};
use crate::role::{EndpointFlags, classify};
use crate::validate;

#[derive(Debug, Clone)]
pub(crate) struct PendingNode {
    pub name: String,
    pub kind: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct PendingEdge {
    pub source: String,
    pub target: String,
    pub attrs: EdgeAttributes,
}

/// Builder for constructing a graph incrementally.
///
/// Nodes and edges are recorded by string id; `build()` validates the
/// references, classifies roles and freezes everything into a [`Graph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<PendingNode>,
    edges: Vec<PendingEdge>,
    sources: Vec<String>,
    sinks: Vec<String>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder with everything in an input payload.
    pub fn from_payload(payload: &GraphPayload) -> Self {
        let mut builder = Self::new();
        for node in &payload.nodes {
            builder.add_node(node.id.clone(), node.kind.clone());
        }
        for edge in &payload.edges {
            builder.add_edge(
                edge.source.clone(),
                edge.target.clone(),
                attributes_from_payload(edge),
            );
        }
        if let Some(source) = &payload.source {
            for id in source.ids() {
                builder.designate_source(id);
            }
        }
        if let Some(sink) = &payload.sink {
            for id in sink.ids() {
                builder.designate_sink(id);
            }
        }
        builder
    }

    /// Add a node and return the id it will have once built.
    pub fn add_node(&mut self, name: impl Into<String>, kind: Option<String>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(PendingNode {
            name: name.into(),
            kind,
        });
        id
    }

    /// Add a directed edge between two node ids.
    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        attrs: EdgeAttributes,
    ) -> EdgeId {
        let id = EdgeId::from_index(self.edges.len());
        self.edges.push(PendingEdge {
            source: source.into(),
            target: target.into(),
            attrs,
        });
        id
    }

    pub fn designate_source(&mut self, name: impl Into<String>) {
        self.sources.push(name.into());
    }

    pub fn designate_sink(&mut self, name: impl Into<String>) {
        self.sinks.push(name.into());
    }

    /// Validate and build the graph.
    pub fn build(self) -> GraphResult<Graph> {
        let by_name = validate::validate_nodes(&self.nodes)?;
        let endpoints = validate::validate_edges(&self.edges, &by_name)?;

        let sources: HashSet<&str> = self.sources.iter().map(String::as_str).collect();
        let sinks: HashSet<&str> = self.sinks.iter().map(String::as_str).collect();
        for name in sources.iter().chain(sinks.iter()) {
            if !by_name.contains_key(*name) {
                tracing::warn!(node = *name, "designated endpoint is not in the node list");
            }
        }

        let nodes: Vec<Node> = self
            .nodes
            .into_iter()
            .enumerate()
            .map(|(i, pending)| {
                let flags = EndpointFlags {
                    is_source: sources.contains(pending.name.as_str()),
                    is_sink: sinks.contains(pending.name.as_str()),
                };
                Node {
                    id: NodeId::from_index(i),
                    role: classify(&pending.name, pending.kind.as_deref(), flags),
                    name: pending.name,
                    is_source: flags.is_source,
                    is_sink: flags.is_sink,
                }
            })
            .collect();

        let mut repeats: HashMap<(NodeId, NodeId), usize> = HashMap::new();
        let edges: Vec<Edge> = self
            .edges
            .into_iter()
            .zip(endpoints)
            .enumerate()
            .map(|(i, (pending, (source, target)))| {
                let seen = repeats.entry((source, target)).or_default();
                let parallel_index = *seen;
                *seen += 1;
                Edge {
                    id: EdgeId::from_index(i),
                    source,
                    target,
                    attrs: pending.attrs.normalized(),
                    parallel_index,
                }
            })
            .collect();

        let (node_edge_offsets, node_edges) = Self::build_adjacency(nodes.len(), &edges);
        validate::validate_adjacency(&edges, &node_edge_offsets, &node_edges)?;

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            "graph built"
        );

        Ok(Graph {
            nodes,
            edges,
            by_name,
            node_edge_offsets,
            node_edges,
        })
    }

    /// Build compact adjacency lists: for each node, collect its incident edges.
    fn build_adjacency(node_count: usize, edges: &[Edge]) -> (Vec<usize>, Vec<EdgeId>) {
        let mut per_node: Vec<Vec<EdgeId>> = vec![Vec::new(); node_count];
        for edge in edges {
            per_node[edge.source.index()].push(edge.id);
            if edge.target != edge.source {
                per_node[edge.target.index()].push(edge.id);
            }
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut flat = Vec::new();
        offsets.push(0);
        for list in per_node {
            flat.extend(list);
            offsets.push(flat.len());
        }
        (offsets, flat)
    }
}

fn attributes_from_payload(edge: &EdgePayload) -> EdgeAttributes {
    EdgeAttributes {
        capacity: edge.capacity.as_ref().and_then(Scalar::as_number),
        cost: edge.cost.as_ref().and_then(Scalar::as_number),
        distance: edge.distance.as_ref().and_then(Scalar::as_number),
        value: edge.value.as_ref().and_then(Scalar::as_text),
    }
}
