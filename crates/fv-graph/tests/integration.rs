//! Integration tests for fv-graph.

use fv_graph::{
    GraphError, GraphPayload, HighlightSet, NodeRole, OptimizationResult, PayloadFormat,
    ResultKind, parse_payload,
};

const SAMPLE: &str = r#"{
    "nodes": [
        {"id": "reservoir_1", "type": "source"},
        {"id": "pump_station"},
        {"id": "junction_a"},
        {"id": "j2", "type": "valve"},
        {"id": "consumer_1"},
        {"id": "hospital"}
    ],
    "edges": [
        {"source": "reservoir_1", "target": "pump_station", "capacity": 400, "cost": 7},
        {"source": "pump_station", "target": "junction_a", "capacity": "250"},
        {"source": "junction_a", "target": "j2", "distance": 12},
        {"source": "j2", "target": "consumer_1", "value": "main"},
        {"source": "j2", "target": "hospital", "capacity": 0, "cost": "n/a"}
    ],
    "source": "reservoir_1",
    "sink": ["consumer_1", "hospital"]
}"#;

#[test]
fn build_sample_network() {
    let payload = parse_payload(SAMPLE, PayloadFormat::Json).unwrap();
    let graph = fv_graph::Graph::from_payload(&payload).unwrap();

    assert_eq!(graph.nodes().len(), 6);
    assert_eq!(graph.edges().len(), 5);

    let roles: Vec<NodeRole> = graph.nodes().iter().map(|n| n.role).collect();
    assert_eq!(
        roles,
        vec![
            NodeRole::Reservoir,
            NodeRole::Pump,
            NodeRole::Junction,
            NodeRole::Junction, // unknown explicit type falls through to inference
            NodeRole::Consumer,
            NodeRole::Consumer, // designated sink
        ]
    );

    assert_eq!(graph.sources().count(), 1);
    assert_eq!(graph.sinks().count(), 2);

    // Numeric strings are accepted; zero and garbage are dropped.
    assert_eq!(graph.edges()[1].attrs.capacity, Some(250.0));
    assert_eq!(graph.edges()[4].attrs.capacity, None);
    assert_eq!(graph.edges()[4].attrs.cost, None);
    assert_eq!(graph.edges()[3].attrs.value.as_deref(), Some("main"));

    let j2 = graph.find("j2").unwrap();
    assert_eq!(graph.degree(j2), 3);
}

#[test]
fn empty_payload_builds_empty_graph() {
    let graph = fv_graph::Graph::from_payload(&GraphPayload::default()).unwrap();
    assert!(graph.is_empty());
    assert!(graph.edges().is_empty());
}

#[test]
fn dangling_edge_rejects_whole_graph() {
    let payload = parse_payload(
        r#"{"nodes": [{"id": "a"}], "edges": [{"source": "a", "target": "b"}]}"#,
        PayloadFormat::Json,
    )
    .unwrap();
    let err = fv_graph::Graph::from_payload(&payload).unwrap_err();
    assert!(matches!(err, GraphError::UnknownEndpoint { ref id, .. } if id == "b"));
}

#[test]
fn highlights_match_graph_edges() {
    let payload = parse_payload(SAMPLE, PayloadFormat::Json).unwrap();
    let graph = fv_graph::Graph::from_payload(&payload).unwrap();

    let result = OptimizationResult::from_json(
        ResultKind::ShortestPath,
        r#"{"distance": 19, "path": ["reservoir_1", "pump_station", "junction_a", "consumer_1"]}"#,
    )
    .unwrap();
    let set = result.highlights();

    let lit: Vec<bool> = graph
        .edges()
        .iter()
        .map(|e| set.contains_edge(&graph, e))
        .collect();
    assert_eq!(lit, vec![true, true, false, false, false]);

    // junction_a -> consumer_1 is not an edge of the network.
    assert_eq!(set.unknown_pairs(&graph), vec![("consumer_1", "junction_a")]);
}

#[test]
fn highlight_is_direction_agnostic_on_edges() {
    let payload = parse_payload(SAMPLE, PayloadFormat::Json).unwrap();
    let graph = fv_graph::Graph::from_payload(&payload).unwrap();
    let set = HighlightSet::from_pairs([("pump_station", "reservoir_1")]);
    assert!(set.contains_edge(&graph, &graph.edges()[0]));
}
