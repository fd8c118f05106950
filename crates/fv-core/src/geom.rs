//! 2-D geometry shared by the simulation and the renderers.

use nalgebra::Vector2;

use crate::numeric::Real;

/// Positions, velocities and forces all share one vector type.
pub type Vec2 = Vector2<Real>;

#[inline]
pub fn vec2(x: Real, y: Real) -> Vec2 {
    Vec2::new(x, y)
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &Vec2, b: &Vec2) -> Real {
    (b - a).norm()
}

/// Canvas dimensions in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasSize {
    pub width: Real,
    pub height: Real,
}

impl CanvasSize {
    pub fn new(width: Real, height: Real) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, p: &Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(700.0, 500.0)
    }
}
