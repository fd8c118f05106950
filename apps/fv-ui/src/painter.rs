//! egui backend for the draw pass.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape};
use fv_core::{CanvasSize, Real, Vec2, vec2};
use fv_render::{Color, EdgePath, Stroke, Surface, TextAnchor, TextStyle};

/// Segments used to approximate an arc edge.
const ARC_SEGMENTS: usize = 24;

/// Maps canvas units into a screen rect, preserving aspect ratio.
#[derive(Debug, Clone, Copy)]
pub struct CanvasTransform {
    origin: Pos2,
    scale: f32,
}

impl CanvasTransform {
    pub fn fit(canvas: CanvasSize, rect: Rect) -> Self {
        let sx = rect.width() / canvas.width as f32;
        let sy = rect.height() / canvas.height as f32;
        let scale = sx.min(sy).max(f32::EPSILON);
        let used = egui::vec2(canvas.width as f32 * scale, canvas.height as f32 * scale);
        let origin = rect.center() - used / 2.0;
        Self { origin, scale }
    }

    pub fn to_screen(&self, p: Vec2) -> Pos2 {
        self.origin + egui::vec2(p.x as f32, p.y as f32) * self.scale
    }

    pub fn to_canvas(&self, p: Pos2) -> Vec2 {
        let local = (p - self.origin) / self.scale;
        vec2(local.x as Real, local.y as Real)
    }

    fn len(&self, v: Real) -> f32 {
        v as f32 * self.scale
    }
}

fn color32(c: Color) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

/// Draws onto an egui painter and remembers tooltip regions for hover.
pub struct EguiSurface<'p> {
    painter: &'p Painter,
    transform: CanvasTransform,
    tooltips: Vec<(Pos2, f32, String)>,
}

impl<'p> EguiSurface<'p> {
    pub fn new(painter: &'p Painter, transform: CanvasTransform) -> Self {
        Self {
            painter,
            transform,
            tooltips: Vec::new(),
        }
    }

    /// Tooltip text of the topmost region under `pointer`.
    pub fn tooltip_at(&self, pointer: Pos2) -> Option<&str> {
        self.tooltips
            .iter()
            .rev()
            .find(|(center, r, _)| center.distance(pointer) <= *r)
            .map(|(_, _, text)| text.as_str())
    }

    fn stroke(&self, s: &Stroke) -> egui::Stroke {
        egui::Stroke::new(self.transform.len(s.width), color32(s.color))
    }

    fn polyline(&self, points: Vec<Pos2>, s: &Stroke) {
        match s.dash {
            Some((dash, gap)) => {
                self.painter.extend(Shape::dashed_line(
                    &points,
                    self.stroke(s),
                    self.transform.len(dash),
                    self.transform.len(gap),
                ));
            }
            None => {
                self.painter.add(Shape::line(points, self.stroke(s)));
            }
        }
    }
}

impl Surface for EguiSurface<'_> {
    fn clear(&mut self, background: Color) {
        self.tooltips.clear();
        self.painter
            .rect_filled(self.painter.clip_rect(), 0.0, color32(background));
    }

    fn title(&mut self, _text: &str, _color: Color) {
        // The window shows the title as a heading above the canvas.
    }

    fn edge(&mut self, path: &EdgePath, stroke: &Stroke) {
        let points = path
            .sample(ARC_SEGMENTS)
            .into_iter()
            .map(|p| self.transform.to_screen(p))
            .collect();
        self.polyline(points, stroke);
    }

    fn polygon(&mut self, points: &[Vec2], fill: Option<Color>, stroke: Option<&Stroke>) {
        let points = points.iter().map(|p| self.transform.to_screen(*p)).collect();
        self.painter.add(Shape::convex_polygon(
            points,
            fill.map(color32).unwrap_or(Color32::TRANSPARENT),
            stroke.map(|s| self.stroke(s)).unwrap_or(egui::Stroke::NONE),
        ));
    }

    fn circle(&mut self, center: Vec2, radius: Real, fill: Option<Color>, stroke: Option<&Stroke>) {
        let c = self.transform.to_screen(center);
        let r = self.transform.len(radius);
        match stroke {
            Some(s) if s.dash.is_some() => {
                if let Some(f) = fill {
                    self.painter.circle_filled(c, r, color32(f));
                }
                let ring: Vec<Pos2> = (0..=48)
                    .map(|i| {
                        let a = i as f32 / 48.0 * std::f32::consts::TAU;
                        c + egui::vec2(a.cos(), a.sin()) * r
                    })
                    .collect();
                self.polyline(ring, s);
            }
            _ => {
                self.painter.circle(
                    c,
                    r,
                    fill.map(color32).unwrap_or(Color32::TRANSPARENT),
                    stroke.map(|s| self.stroke(s)).unwrap_or(egui::Stroke::NONE),
                );
            }
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.painter.line_segment(
            [self.transform.to_screen(from), self.transform.to_screen(to)],
            self.stroke(stroke),
        );
    }

    fn text(&mut self, at: Vec2, text: &str, style: &TextStyle) {
        let align = match style.anchor {
            TextAnchor::Start => Align2::LEFT_BOTTOM,
            TextAnchor::Middle => Align2::CENTER_BOTTOM,
        };
        self.painter.text(
            self.transform.to_screen(at),
            align,
            text,
            FontId::proportional(self.transform.len(style.size).max(6.0)),
            color32(style.color),
        );
    }

    fn tooltip(&mut self, center: Vec2, radius: Real, text: &str) {
        self.tooltips.push((
            self.transform.to_screen(center),
            self.transform.len(radius),
            text.to_string(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_round_trips() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), egui::vec2(1400.0, 1000.0));
        let t = CanvasTransform::fit(CanvasSize::new(700.0, 500.0), rect);
        let p = vec2(350.0, 250.0);
        let screen = t.to_screen(p);
        assert!((screen - rect.center()).length() < 1e-3);
        let back = t.to_canvas(screen);
        assert!((back - p).norm() < 1e-3);
    }
}
