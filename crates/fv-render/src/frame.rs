//! The per-frame draw pass.

use fv_core::{Real, Vec2, vec2};
use fv_graph::{Graph, HighlightSet};
use serde::{Deserialize, Serialize};

use crate::encode::{Color, color_for, label_for, legend, shape_for, tooltip_for};
use crate::error::RenderError;
use crate::geometry::{EdgePath, PathParams, resolve_edge_path};
use crate::surface::{Stroke, Surface, TextAnchor, TextStyle};

/// Colors, sizes and text used by the draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub title: String,
    pub background: Color,
    pub title_color: Color,

    pub edge_color: Color,
    pub edge_width: Real,
    pub highlight_color: Color,
    pub highlight_width: Real,
    pub curve_factor: Real,
    pub arrow_length: Real,
    pub arrow_width: Real,

    pub edge_label_size: Real,
    pub edge_label_color: Color,
    /// Vertical offset of edge labels from the chord midpoint.
    pub edge_label_dy: Real,

    pub node_outline: Color,
    pub node_outline_width: Real,
    pub node_label_size: Real,
    pub node_label_color: Color,
    pub label_halo: Color,

    pub source_halo: Color,
    pub sink_halo: Color,
    /// Halo radius beyond the glyph radius.
    pub halo_gap: Real,

    pub legend_origin: (Real, Real),
    pub legend_row: Real,
    pub legend_swatch: Real,
    pub legend_text_size: Real,
    pub highlight_legend: String,

    pub empty_message: String,
    pub loading_message: String,
    pub placeholder_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            title: "Network Visualization".into(),
            background: Color::hex(0xf5f5f5),
            title_color: Color::hex(0x1976d2),
            edge_color: Color::hex(0x666666),
            edge_width: 2.0,
            highlight_color: Color::hex(0xff3d00),
            highlight_width: 4.0,
            curve_factor: 1.5,
            arrow_length: 10.0,
            arrow_width: 8.0,
            edge_label_size: 10.0,
            edge_label_color: Color::hex(0x444444),
            edge_label_dy: -8.0,
            node_outline: Color::hex(0xffffff),
            node_outline_width: 2.0,
            node_label_size: 11.0,
            node_label_color: Color::hex(0x333333),
            label_halo: Color::hex(0xffffff),
            source_halo: Color::hex(0x4caf50),
            sink_halo: Color::hex(0xf44336),
            halo_gap: 5.0,
            legend_origin: (20.0, 20.0),
            legend_row: 25.0,
            legend_swatch: 15.0,
            legend_text_size: 12.0,
            highlight_legend: "Highlighted path".into(),
            empty_message: "No graph data to display. Please input network data first.".into(),
            loading_message: "Loading network...".into(),
            placeholder_color: Color::hex(0x757575),
        }
    }
}

/// Everything one frame needs.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub graph: &'a Graph,
    pub positions: &'a [Vec2],
    pub highlights: &'a HighlightSet,
}

impl Scene<'_> {
    fn check(&self) -> Result<(), RenderError> {
        if self.positions.len() != self.graph.nodes().len() {
            return Err(RenderError::PositionMismatch {
                expected: self.graph.nodes().len(),
                got: self.positions.len(),
            });
        }
        Ok(())
    }
}

/// Resolve every edge of the scene, in edge order.
pub fn edge_paths(scene: &Scene<'_>, style: &RenderStyle) -> Result<Vec<EdgePath>, RenderError> {
    scene.check()?;
    let base = PathParams {
        curve_factor: style.curve_factor,
        ..PathParams::default()
    };
    Ok(scene
        .graph
        .edges()
        .iter()
        .map(|edge| {
            let target_radius = scene
                .graph
                .node(edge.target)
                .map(|n| shape_for(n.role).radius)
                .unwrap_or(0.0);
            let params = PathParams {
                target_radius,
                ..base.for_parallel(edge.parallel_index)
            };
            resolve_edge_path(
                scene.positions[edge.source.index()],
                scene.positions[edge.target.index()],
                params,
            )
        })
        .collect())
}

/// Draw a full frame: edges, nodes, legend.
pub fn draw_scene<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene<'_>,
    style: &RenderStyle,
) -> Result<(), RenderError> {
    let paths = edge_paths(scene, style)?;

    surface.clear(style.background);
    surface.title(&style.title, style.title_color);

    let label_style = TextStyle {
        size: style.edge_label_size,
        color: style.edge_label_color,
        bold: false,
        anchor: TextAnchor::Middle,
        halo: Some(Stroke::solid(style.label_halo, 3.0)),
    };
    for (edge, path) in scene.graph.edges().iter().zip(&paths) {
        let stroke = if scene.highlights.contains_edge(scene.graph, edge) {
            Stroke::solid(style.highlight_color, style.highlight_width)
        } else {
            Stroke::solid(style.edge_color, style.edge_width)
        };
        surface.edge(path, &stroke);
        let head = path.arrow.triangle(style.arrow_length, style.arrow_width);
        surface.polygon(&head, Some(stroke.color), None);

        let text = label_for(&edge.attrs);
        if !text.is_empty() {
            surface.text(path.label + vec2(0.0, style.edge_label_dy), &text, &label_style);
        }
    }

    let outline = Stroke::solid(style.node_outline, style.node_outline_width);
    let name_style = TextStyle {
        size: style.node_label_size,
        color: style.node_label_color,
        bold: true,
        anchor: TextAnchor::Start,
        halo: Some(Stroke::solid(style.label_halo, 3.0)),
    };
    for node in scene.graph.nodes() {
        let at = scene.positions[node.id.index()];
        let shape = shape_for(node.role);
        let fill = color_for(node.role);

        let outline_pts = shape.outline(at);
        if outline_pts.is_empty() {
            surface.circle(at, shape.radius, Some(fill), Some(&outline));
        } else {
            surface.polygon(&outline_pts, Some(fill), Some(&outline));
        }

        let halo = if node.is_source {
            Some(style.source_halo)
        } else if node.is_sink {
            Some(style.sink_halo)
        } else {
            None
        };
        if let Some(color) = halo {
            let dashed = Stroke::dashed(color, 2.0, 5.0, 3.0);
            surface.circle(at, shape.radius + style.halo_gap, None, Some(&dashed));
        }

        surface.text(
            at + vec2(shape.radius + 5.0, 4.0),
            &node.name,
            &name_style,
        );
        surface.tooltip(at, shape.radius, &tooltip_for(node));
    }

    draw_legend(surface, style, !scene.highlights.is_empty());
    Ok(())
}

fn draw_legend<S: Surface + ?Sized>(surface: &mut S, style: &RenderStyle, with_highlight: bool) {
    let origin = vec2(style.legend_origin.0, style.legend_origin.1);
    let text_style = TextStyle {
        size: style.legend_text_size,
        color: style.node_label_color,
        bold: false,
        anchor: TextAnchor::Start,
        halo: None,
    };
    let swatch = style.legend_swatch;
    let border = Stroke::solid(style.node_outline, 1.0);

    let mut row = 0.0;
    for (role, color) in legend() {
        let top = origin + vec2(0.0, row);
        let square = [
            top,
            top + vec2(swatch, 0.0),
            top + vec2(swatch, swatch),
            top + vec2(0.0, swatch),
        ];
        surface.polygon(&square, Some(color), Some(&border));
        surface.text(top + vec2(25.0, 12.0), role.display_name(), &text_style);
        row += style.legend_row;
    }

    if with_highlight {
        let top = origin + vec2(0.0, row);
        let mid = top.y + swatch / 2.0;
        surface.line(
            vec2(top.x, mid),
            vec2(top.x + 20.0, mid),
            &Stroke::solid(style.highlight_color, 3.0),
        );
        surface.text(top + vec2(25.0, 12.0), &style.highlight_legend, &text_style);
    }
}

/// Draw a centered message instead of a graph.
pub fn draw_placeholder<S: Surface + ?Sized>(
    surface: &mut S,
    message: &str,
    canvas_center: Vec2,
    style: &RenderStyle,
) {
    surface.clear(style.background);
    surface.title(&style.title, style.title_color);
    surface.text(
        canvas_center,
        message,
        &TextStyle {
            size: 14.0,
            color: style.placeholder_color,
            bold: false,
            anchor: TextAnchor::Middle,
            halo: None,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use fv_graph::{EdgeAttributes, GraphBuilder};

    /// Records calls as short strings.
    #[derive(Default)]
    struct Recorder {
        ops: Vec<String>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, _: Color) {
            self.ops.clear();
            self.ops.push("clear".into());
        }
        fn title(&mut self, text: &str, _: Color) {
            self.ops.push(format!("title {text}"));
        }
        fn edge(&mut self, _: &EdgePath, stroke: &Stroke) {
            self.ops.push(format!("edge {} {}", stroke.color, stroke.width));
        }
        fn polygon(&mut self, points: &[Vec2], _: Option<Color>, _: Option<&Stroke>) {
            self.ops.push(format!("polygon {}", points.len()));
        }
        fn circle(&mut self, _: Vec2, r: Real, fill: Option<Color>, stroke: Option<&Stroke>) {
            let dashed = stroke.is_some_and(|s| s.dash.is_some());
            self.ops.push(format!("circle {r} {} {dashed}", fill.is_some()));
        }
        fn line(&mut self, _: Vec2, _: Vec2, stroke: &Stroke) {
            self.ops.push(format!("line {}", stroke.color));
        }
        fn text(&mut self, _: Vec2, text: &str, _: &TextStyle) {
            self.ops.push(format!("text {text}"));
        }
        fn tooltip(&mut self, _: Vec2, _: Real, text: &str) {
            self.ops.push(format!("tooltip {text}"));
        }
    }

    fn graph() -> Graph {
        let mut b = GraphBuilder::new();
        b.add_node("reservoir_1", None);
        b.add_node("consumer_1", None);
        b.add_edge(
            "reservoir_1",
            "consumer_1",
            EdgeAttributes::default().with_capacity(100.0).with_cost(5.0),
        );
        b.designate_source("reservoir_1");
        b.build().unwrap()
    }

    #[test]
    fn highlighted_edge_uses_highlight_stroke() {
        let g = graph();
        let pos = vec![vec2(100.0, 100.0), vec2(300.0, 100.0)];
        let hl = HighlightSet::from_pairs([("consumer_1", "reservoir_1")]);
        let mut rec = Recorder::default();
        draw_scene(
            &mut rec,
            &Scene {
                graph: &g,
                positions: &pos,
                highlights: &hl,
            },
            &RenderStyle::default(),
        )
        .unwrap();

        assert_eq!(rec.ops[0], "clear");
        assert!(rec.ops.contains(&"edge #ff3d00 4".to_string()));
        assert!(rec.ops.contains(&"text 100 L/s / $5".to_string()));
        assert!(rec.ops.contains(&"circle 20 false true".to_string()));
        assert!(rec.ops.contains(&"text Highlighted path".to_string()));
        assert!(rec.ops.contains(&"tooltip consumer_1\nType: consumer".to_string()));
    }

    #[test]
    fn plain_edge_and_no_highlight_legend() {
        let g = graph();
        let pos = vec![vec2(100.0, 100.0), vec2(300.0, 100.0)];
        let mut rec = Recorder::default();
        draw_scene(
            &mut rec,
            &Scene {
                graph: &g,
                positions: &pos,
                highlights: &HighlightSet::new(),
            },
            &RenderStyle::default(),
        )
        .unwrap();
        assert!(rec.ops.contains(&"edge #666666 2".to_string()));
        assert!(!rec.ops.iter().any(|op| op == "text Highlighted path"));
        // Four legend rows.
        for role in ["Reservoir", "Pump", "Junction", "Consumer"] {
            assert!(rec.ops.contains(&format!("text {role}")));
        }
    }

    #[test]
    fn position_mismatch_is_an_error() {
        let g = graph();
        let mut rec = Recorder::default();
        let err = draw_scene(
            &mut rec,
            &Scene {
                graph: &g,
                positions: &[vec2(0.0, 0.0)],
                highlights: &HighlightSet::new(),
            },
            &RenderStyle::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::PositionMismatch { expected: 2, got: 1 }));
        assert!(rec.ops.is_empty());
    }

    #[test]
    fn style_round_trips_through_json_with_defaults() {
        let style: RenderStyle =
            serde_json::from_str(r##"{"highlight_color": "#00ff00", "title": "Max flow"}"##).unwrap();
        assert_eq!(style.highlight_color, Color::hex(0x00ff00));
        assert_eq!(style.title, "Max flow");
        assert_eq!(style.edge_width, 2.0);
    }
}
