//! Integration tests for fv-render.

use fv_core::{CanvasSize, NodeId, Real, vec2};
use fv_graph::{GraphPayload, HighlightSet, PayloadFormat, parse_payload};
use fv_layout::{FrameClock, SimConfig};
use fv_render::{
    NetworkView, PathParams, RenderError, RenderStyle, SvgSurface, ViewState, resolve_edge_path,
};
use proptest::prelude::*;

const NETWORK: &str = r#"{
    "nodes": [
        {"id": "reservoir_1"}, {"id": "pump_1"}, {"id": "junction_1"}, {"id": "consumer_1"}
    ],
    "edges": [
        {"source": "reservoir_1", "target": "pump_1", "capacity": 400, "cost": 7},
        {"source": "pump_1", "target": "junction_1", "distance": 12},
        {"source": "junction_1", "target": "consumer_1", "value": "main"},
        {"source": "consumer_1", "target": "junction_1", "cost": 3}
    ],
    "source": "reservoir_1",
    "sink": "consumer_1"
}"#;

fn payload() -> GraphPayload {
    parse_payload(NETWORK, PayloadFormat::Json).unwrap()
}

fn view(clock: &FrameClock) -> NetworkView {
    NetworkView::new(clock, SimConfig::default(), RenderStyle::default())
}

#[test]
fn idle_view_draws_empty_placeholder() {
    let clock = FrameClock::new();
    let v = view(&clock);
    let mut svg = SvgSurface::new(CanvasSize::default());
    v.draw(&mut svg).unwrap();
    let doc = svg.finish();
    assert_eq!(v.state(), ViewState::Idle);
    assert!(doc.contains("No graph data to display"));
    assert!(doc.contains("Network Visualization"));
}

#[test]
fn loading_placeholder_then_running() {
    let clock = FrameClock::new();
    let mut v = view(&clock);
    v.begin_loading();
    assert_eq!(v.state(), ViewState::Loading);
    let mut svg = SvgSurface::new(CanvasSize::default());
    v.draw(&mut svg).unwrap();
    assert!(svg.finish().contains("Loading network"));

    v.load_payload(&payload()).unwrap();
    assert_eq!(v.state(), ViewState::Running);
    assert_eq!(clock.live_subscriptions(), 1);
}

#[test]
fn empty_payload_is_not_an_error() {
    let clock = FrameClock::new();
    let mut v = view(&clock);
    v.load_payload(&GraphPayload::default()).unwrap();
    assert_eq!(v.state(), ViewState::Idle);
    assert!(v.simulation().is_none());
    assert_eq!(clock.live_subscriptions(), 0);
}

#[test]
fn invalid_payload_rejected_before_simulation() {
    let clock = FrameClock::new();
    let mut v = view(&clock);
    let bad = parse_payload(
        r#"{"nodes": [{"id": "a"}], "edges": [{"source": "a", "target": "ghost"}]}"#,
        PayloadFormat::Json,
    )
    .unwrap();
    assert!(matches!(v.load_payload(&bad), Err(RenderError::Graph(_))));
    assert_eq!(clock.live_subscriptions(), 0);
}

#[test]
fn failed_simulation_leaves_view_idle() {
    let clock = FrameClock::new();
    let config = SimConfig {
        alpha_decay: 2.0,
        ..SimConfig::default()
    };
    let mut v = NetworkView::new(&clock, config, RenderStyle::default());
    v.begin_loading();
    assert_eq!(v.state(), ViewState::Loading);

    let graph = fv_graph::Graph::from_payload(&payload()).unwrap();
    assert!(matches!(v.load(graph), Err(RenderError::Sim(_))));
    assert_eq!(v.state(), ViewState::Idle);
    assert!(v.graph().is_none());
    assert_eq!(clock.live_subscriptions(), 0);

    let mut svg = SvgSurface::new(CanvasSize::default());
    v.draw(&mut svg).unwrap();
    let doc = svg.finish();
    assert!(doc.contains("No graph data to display"));
    assert!(!doc.contains("Loading network"));
}

#[test]
fn each_frame_ticks_once_and_draws() {
    let clock = FrameClock::new();
    let mut v = view(&clock);
    v.load_payload(&payload()).unwrap();
    v.set_highlights(HighlightSet::from_path(&["reservoir_1", "pump_1"]));

    for _ in 0..3 {
        clock.fire();
    }
    let mut svg = SvgSurface::new(CanvasSize::default());
    assert_eq!(v.on_frame(&mut svg).unwrap(), 3);
    assert_eq!(v.simulation().unwrap().tick_count(), 3);

    let doc = svg.finish();
    assert!(doc.contains("400 L/s / $7"));
    assert!(doc.contains("12 m"));
    assert!(doc.contains(">main<"));
    assert!(doc.contains(r##"stroke="#ff3d00" stroke-width="4""##));
    assert!(doc.contains("Highlighted path"));
    assert!(doc.contains(r#"stroke-dasharray="5,3""#));
    assert!(doc.contains("reservoir_1\nType: reservoir"));
    // One frame's worth of edges, not three.
    assert_eq!(doc.matches("<path ").count(), 4);
}

#[test]
fn teardown_stops_ticks_and_is_idempotent() {
    let clock = FrameClock::new();
    let mut v = view(&clock);
    v.load_payload(&payload()).unwrap();
    clock.fire();
    v.advance();

    v.teardown();
    v.teardown();
    assert_eq!(v.state(), ViewState::Idle);
    assert_eq!(clock.live_subscriptions(), 0);
    for _ in 0..10 {
        clock.fire();
    }
    let mut svg = SvgSurface::new(CanvasSize::default());
    assert_eq!(v.on_frame(&mut svg).unwrap(), 0);
}

#[test]
fn reload_replaces_simulation() {
    let clock = FrameClock::new();
    let mut v = view(&clock);
    v.load_payload(&payload()).unwrap();
    v.set_sticky(true);
    let n = NodeId::from_index(0);
    v.drag_start(n, vec2(10.0, 10.0)).unwrap();
    v.drag_end(n).unwrap();
    assert_eq!(v.simulation().unwrap().pinned_count(), 1);

    v.load_payload(&payload()).unwrap();
    assert_eq!(clock.live_subscriptions(), 1);
    assert_eq!(v.simulation().unwrap().pinned_count(), 0);
    assert_eq!(v.simulation().unwrap().tick_count(), 0);
}

#[test]
fn drag_through_view() {
    let clock = FrameClock::new();
    let mut v = view(&clock);
    assert_eq!(
        v.drag_start(NodeId::from_index(0), vec2(0.0, 0.0)),
        Err(RenderError::NotRunning)
    );

    v.load_payload(&payload()).unwrap();
    let at = v.simulation().unwrap().positions()[2];
    let hit = v.node_at(at).unwrap();
    assert_eq!(hit, NodeId::from_index(2));

    v.drag_start(hit, vec2(100.0, 100.0)).unwrap();
    assert!(matches!(
        v.drag_start(hit, vec2(1.0, 1.0)),
        Err(RenderError::Interaction(_))
    ));
    clock.fire();
    v.advance();
    assert_eq!(v.simulation().unwrap().position(hit), Some(vec2(100.0, 100.0)));

    v.drag_end(hit).unwrap();
    assert_eq!(v.simulation().unwrap().pin_of(hit), None);
}

proptest! {
    #[test]
    fn edge_geometry_is_always_finite(
        sx in -1e4f64..1e4, sy in -1e4f64..1e4,
        dx in prop_oneof![Just(0.0), -1e-7f64..1e-7, -1e4f64..1e4],
        dy in prop_oneof![Just(0.0), -1e-7f64..1e-7, -1e4f64..1e4],
        k in 0usize..6,
        target_radius in 0.0f64..40.0,
    ) {
        let s = vec2(sx, sy);
        let t = vec2(sx + dx, sy + dy);
        let params = PathParams { target_radius, ..PathParams::default() }.for_parallel(k);
        let path = resolve_edge_path(s, t, params);
        let finite = |v: Real| v.is_finite();
        prop_assert!(finite(path.arrow.tip.x) && finite(path.arrow.tip.y));
        prop_assert!(finite(path.arrow.angle));
        prop_assert!(finite(path.label.x) && finite(path.label.y));
        for p in path.sample(8) {
            prop_assert!(finite(p.x) && finite(p.y));
        }
        prop_assert!(!path.svg_d().contains("NaN"));
    }
}
