//! Edge geometry.
//!
//! Every edge is drawn as a single circular arc from source to target
//! (SVG `A r,r 0 0,1`). The sweep flag is fixed, so a pair of anti-parallel
//! edges bulges to opposite sides.

use fv_core::{Real, Vec2, format_coord, vec2};

/// Below this endpoint distance the arc degrades to a straight segment.
const DEGENERATE_DISTANCE: Real = 1e-6;

/// Curve factor floor; radius must stay above half the chord.
const MIN_CURVE_FACTOR: Real = 0.55;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathParams {
    /// Arc radius as a multiple of the endpoint distance.
    pub curve_factor: Real,
    /// Nominal radius of the target glyph; the arrow tip stops on it.
    pub target_radius: Real,
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            curve_factor: 1.5,
            target_radius: 10.0,
        }
    }
}

impl PathParams {
    /// Params for the k-th repeat (0-based) of an edge with the same ordered
    /// endpoints: each repeat bulges further than the last.
    pub fn for_parallel(self, k: usize) -> Self {
        Self {
            curve_factor: (self.curve_factor / (k as Real + 1.0)).max(MIN_CURVE_FACTOR),
            ..self
        }
    }
}

/// Arrowhead placement: tip position and pointing direction in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowAnchor {
    pub tip: Vec2,
    pub angle: Real,
}

impl ArrowAnchor {
    /// Triangle with its tip at the anchor, `length` long and `width` wide.
    pub fn triangle(&self, length: Real, width: Real) -> [Vec2; 3] {
        let dir = vec2(self.angle.cos(), self.angle.sin());
        let side = vec2(-dir.y, dir.x) * (width / 2.0);
        let base = self.tip - dir * length;
        [self.tip, base + side, base - side]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Arc {
        center: Vec2,
        radius: Real,
        start_angle: Real,
        /// Positive angular extent, at most pi.
        sweep: Real,
    },
    Line,
}

/// Resolved drawing geometry for one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePath {
    pub source: Vec2,
    pub target: Vec2,
    pub curve: Curve,
    pub arrow: ArrowAnchor,
    pub label: Vec2,
}

impl EdgePath {
    /// SVG path data.
    pub fn svg_d(&self) -> String {
        let (s, t) = (self.source, self.target);
        match self.curve {
            Curve::Arc { radius, .. } => format!(
                "M{},{}A{},{} 0 0,1 {},{}",
                format_coord(s.x),
                format_coord(s.y),
                format_coord(radius),
                format_coord(radius),
                format_coord(t.x),
                format_coord(t.y),
            ),
            Curve::Line => format!(
                "M{},{}L{},{}",
                format_coord(s.x),
                format_coord(s.y),
                format_coord(t.x),
                format_coord(t.y),
            ),
        }
    }

    /// Point at fraction `t` in [0, 1] along the curve.
    pub fn point_at(&self, t: Real) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        match self.curve {
            Curve::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => {
                let a = start_angle + sweep * t;
                center + vec2(a.cos(), a.sin()) * radius
            }
            Curve::Line => self.source + (self.target - self.source) * t,
        }
    }

    /// `segments + 1` evenly spaced points, for renderers without arcs.
    pub fn sample(&self, segments: usize) -> Vec<Vec2> {
        let n = segments.max(1);
        (0..=n).map(|i| self.point_at(i as Real / n as Real)).collect()
    }
}

/// Compute the curve, arrow anchor and label anchor for an edge.
pub fn resolve_edge_path(source: Vec2, target: Vec2, params: PathParams) -> EdgePath {
    let chord = target - source;
    let d = chord.norm();
    let label = (source + target) / 2.0;

    if !(d.is_finite() && d > DEGENERATE_DISTANCE) {
        return straight(source, target, label, chord);
    }

    let radius = d * params.curve_factor.max(MIN_CURVE_FACTOR);
    let half = d / 2.0;
    let perp = vec2(-chord.y, chord.x) / d;
    let center = label + perp * (radius * radius - half * half).max(0.0).sqrt();

    let start_angle = angle_of(source - center);
    let sweep = 2.0 * (half / radius).min(1.0).asin();
    let end_angle = start_angle + sweep;

    // Chord length r_t from the target subtends 2*asin(r_t / 2r).
    let back = 2.0 * (params.target_radius.max(0.0) / (2.0 * radius)).min(1.0).asin();
    let tip_angle = end_angle - back.min(sweep);
    let tip = center + vec2(tip_angle.cos(), tip_angle.sin()) * radius;
    let tangent = vec2(-tip_angle.sin(), tip_angle.cos());

    EdgePath {
        source,
        target,
        curve: Curve::Arc {
            center,
            radius,
            start_angle,
            sweep,
        },
        arrow: ArrowAnchor {
            tip,
            angle: tangent.y.atan2(tangent.x),
        },
        label,
    }
}

fn straight(source: Vec2, target: Vec2, label: Vec2, chord: Vec2) -> EdgePath {
    let angle = if chord.norm() > 0.0 && chord.x.is_finite() && chord.y.is_finite() {
        chord.y.atan2(chord.x)
    } else {
        0.0
    };
    EdgePath {
        source,
        target,
        curve: Curve::Line,
        arrow: ArrowAnchor { tip: target, angle },
        label,
    }
}

fn angle_of(v: Vec2) -> Real {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fv_core::distance;

    const EPS: Real = 1e-9;

    #[test]
    fn arc_passes_through_both_endpoints() {
        let s = vec2(100.0, 100.0);
        let t = vec2(300.0, 150.0);
        let path = resolve_edge_path(s, t, PathParams::default());
        assert!(distance(&path.point_at(0.0), &s) < EPS);
        assert!(distance(&path.point_at(1.0), &t) < EPS);
        match path.curve {
            Curve::Arc { radius, .. } => assert!((radius - distance(&s, &t) * 1.5).abs() < EPS),
            Curve::Line => panic!("expected arc"),
        }
    }

    #[test]
    fn arrow_tip_on_target_boundary() {
        let s = vec2(0.0, 0.0);
        let t = vec2(200.0, 0.0);
        let params = PathParams {
            curve_factor: 1.5,
            target_radius: 13.0,
        };
        let path = resolve_edge_path(s, t, params);
        assert!((distance(&path.arrow.tip, &t) - 13.0).abs() < 1e-9);
    }

    #[test]
    fn arrow_points_toward_target() {
        let path = resolve_edge_path(vec2(0.0, 0.0), vec2(200.0, 0.0), PathParams::default());
        let dir = vec2(path.arrow.angle.cos(), path.arrow.angle.sin());
        let to_target = (path.target - path.arrow.tip).normalize();
        assert!(dir.dot(&to_target) > 0.95);
    }

    #[test]
    fn antiparallel_edges_bulge_opposite_sides() {
        let a = vec2(0.0, 0.0);
        let b = vec2(100.0, 0.0);
        let ab = resolve_edge_path(a, b, PathParams::default()).point_at(0.5);
        let ba = resolve_edge_path(b, a, PathParams::default()).point_at(0.5);
        assert!(ab.y * ba.y < 0.0);
    }

    #[test]
    fn parallel_repeats_bulge_further() {
        let a = vec2(0.0, 0.0);
        let b = vec2(100.0, 0.0);
        let base = PathParams::default();
        let bulge = |k| {
            resolve_edge_path(a, b, base.for_parallel(k))
                .point_at(0.5)
                .y
                .abs()
        };
        assert!(bulge(1) > bulge(0));
        assert!(bulge(2) > bulge(1));
        assert_eq!(base.for_parallel(10).curve_factor, 0.55);
    }

    #[test]
    fn label_is_chord_midpoint() {
        let path = resolve_edge_path(vec2(0.0, 0.0), vec2(10.0, 20.0), PathParams::default());
        assert_eq!(path.label, vec2(5.0, 10.0));
    }

    #[test]
    fn coincident_endpoints_degrade_to_line() {
        let p = vec2(50.0, 50.0);
        let path = resolve_edge_path(p, p, PathParams::default());
        assert_eq!(path.curve, Curve::Line);
        assert_eq!(path.arrow.tip, p);
        assert!(path.arrow.angle.is_finite());
        assert_eq!(path.svg_d(), "M50,50L50,50");
    }

    #[test]
    fn svg_path_format() {
        let path = resolve_edge_path(vec2(0.0, 0.0), vec2(30.0, 40.0), PathParams::default());
        assert_eq!(path.svg_d(), "M0,0A75,75 0 0,1 30,40");
    }

    #[test]
    fn arrow_triangle_tip_first() {
        let anchor = ArrowAnchor {
            tip: vec2(10.0, 0.0),
            angle: 0.0,
        };
        let [tip, a, b] = anchor.triangle(6.0, 6.0);
        assert_eq!(tip, vec2(10.0, 0.0));
        assert!((a.x - 4.0).abs() < EPS && (b.x - 4.0).abs() < EPS);
        assert!((a.y + b.y).abs() < EPS);
    }
}
