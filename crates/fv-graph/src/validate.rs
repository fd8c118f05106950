//! Graph validation logic.

use std::collections::{HashMap, HashSet};

use fv_core::{EdgeId, NodeId};

use crate::builder::{PendingEdge, PendingNode};
use crate::error::{GraphError, GraphResult};
use crate::graph::Edge;

/// Check node ids are non-empty and unique; returns the name index.
pub(crate) fn validate_nodes(nodes: &[PendingNode]) -> GraphResult<HashMap<String, NodeId>> {
    let mut by_name: HashMap<String, NodeId> = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        if node.name.is_empty() {
            return Err(GraphError::EmptyNodeId { index: i });
        }
        if let Some(first) = by_name.get(&node.name) {
            return Err(GraphError::DuplicateNode {
                id: node.name.clone(),
                first: first.index(),
                second: i,
            });
        }
        by_name.insert(node.name.clone(), NodeId::from_index(i));
    }
    Ok(by_name)
}

/// Resolve every edge endpoint; any unknown id rejects the whole graph.
pub(crate) fn validate_edges(
    edges: &[PendingEdge],
    by_name: &HashMap<String, NodeId>,
) -> GraphResult<Vec<(NodeId, NodeId)>> {
    edges
        .iter()
        .enumerate()
        .map(|(i, edge)| -> GraphResult<(NodeId, NodeId)> {
            let resolve = |name: &str, endpoint: &'static str| {
                by_name
                    .get(name)
                    .copied()
                    .ok_or_else(|| GraphError::UnknownEndpoint {
                        edge: i,
                        endpoint,
                        id: name.to_string(),
                    })
            };
            Ok((
                resolve(&edge.source, "source")?,
                resolve(&edge.target, "target")?,
            ))
        })
        .collect()
}

/// Validate adjacency lists for consistency with the edge table.
pub(crate) fn validate_adjacency(
    edges: &[Edge],
    offsets: &[usize],
    node_edges: &[EdgeId],
) -> GraphResult<()> {
    for node in 0..offsets.len().saturating_sub(1) {
        for &eid in &node_edges[offsets[node]..offsets[node + 1]] {
            let incident = edges
                .get(eid.index())
                .map(|e| e.source.index() == node || e.target.index() == node)
                .unwrap_or(false);
            if !incident {
                return Err(GraphError::InconsistentAdjacency {
                    edge: eid.index(),
                    node,
                });
            }
        }
    }

    // Every edge must be listed under its source.
    let listed: HashSet<(usize, EdgeId)> = (0..offsets.len().saturating_sub(1))
        .flat_map(|n| node_edges[offsets[n]..offsets[n + 1]].iter().map(move |e| (n, *e)))
        .collect();
    for edge in edges {
        if !listed.contains(&(edge.source.index(), edge.id)) {
            return Err(GraphError::InconsistentAdjacency {
                edge: edge.id.index(),
                node: edge.source.index(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeAttributes;

    fn pending(name: &str) -> PendingNode {
        PendingNode {
            name: name.into(),
            kind: None,
        }
    }

    #[test]
    fn validate_empty_graph() {
        assert!(validate_nodes(&[]).unwrap().is_empty());
        assert!(validate_adjacency(&[], &[0], &[]).is_ok());
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = validate_nodes(&[pending("a"), pending("")]).unwrap_err();
        assert_eq!(err, GraphError::EmptyNodeId { index: 1 });
    }

    #[test]
    fn unknown_source_reported_before_target() {
        let by_name = validate_nodes(&[pending("a")]).unwrap();
        let edges = vec![PendingEdge {
            source: "x".into(),
            target: "y".into(),
            attrs: EdgeAttributes::default(),
        }];
        let err = validate_edges(&edges, &by_name).unwrap_err();
        assert!(matches!(err, GraphError::UnknownEndpoint { endpoint: "source", .. }));
    }

    #[test]
    fn adjacency_mismatch_detected() {
        let edges = vec![Edge {
            id: EdgeId::from_index(0),
            source: NodeId::from_index(0),
            target: NodeId::from_index(1),
            attrs: EdgeAttributes::default(),
            parallel_index: 0,
        }];
        // Edge listed under node 2, which it does not touch.
        let offsets = vec![0, 0, 0, 1];
        let node_edges = vec![EdgeId::from_index(0)];
        assert!(validate_adjacency(&edges, &offsets, &node_edges).is_err());
    }
}
