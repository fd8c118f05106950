//! Drawing backend abstraction.

use fv_core::{Real, Vec2};

use crate::encode::Color;
use crate::geometry::EdgePath;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: Real,
    /// Dash and gap lengths.
    pub dash: Option<(Real, Real)>,
}

impl Stroke {
    pub fn solid(color: Color, width: Real) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: Real, dash: Real, gap: Real) -> Self {
        Self {
            color,
            width,
            dash: Some((dash, gap)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: Real,
    pub color: Color,
    pub bold: bool,
    pub anchor: TextAnchor,
    /// Outline drawn behind the glyphs for legibility over edges.
    pub halo: Option<Stroke>,
}

/// Something a frame can be drawn onto.
///
/// Coordinates are canvas units with y pointing down.
pub trait Surface {
    /// Discard everything drawn so far.
    fn clear(&mut self, background: Color);

    /// Heading shown above the canvas.
    fn title(&mut self, text: &str, color: Color);

    fn edge(&mut self, path: &EdgePath, stroke: &Stroke);

    fn polygon(&mut self, points: &[Vec2], fill: Option<Color>, stroke: Option<&Stroke>);

    fn circle(&mut self, center: Vec2, radius: Real, fill: Option<Color>, stroke: Option<&Stroke>);

    fn line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke);

    fn text(&mut self, at: Vec2, text: &str, style: &TextStyle);

    /// Hover text for a circular region.
    fn tooltip(&mut self, center: Vec2, radius: Real, text: &str);
}
