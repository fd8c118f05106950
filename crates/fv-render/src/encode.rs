//! Visual encoding of network semantics.
//!
//! Pure mappings from node roles and edge attributes to shapes, colors and
//! label text. Nothing here depends on positions.

use std::f64::consts::FRAC_PI_3;
use std::fmt;

use fv_core::{Real, Vec2, vec2};
use fv_graph::{EdgeAttributes, Node, NodeRole};
use serde::{Deserialize, Serialize};

pub use fv_graph::role::classify;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    /// Parse `#rrggbb` or `#rgb`.
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::hex),
            3 => {
                let v = u32::from_str_radix(digits, 16).ok()?;
                let expand = |n: u32| (n << 4 | n) as u8;
                Some(Self {
                    r: expand(v >> 8 & 0xf),
                    g: expand(v >> 4 & 0xf),
                    b: expand(v & 0xf),
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s).ok_or_else(|| format!("invalid color '{s}'"))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Diamond,
    Hexagon,
    Square,
}

/// A node glyph. `radius` is the nominal size used for halos, label offsets
/// and arrow clearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub radius: Real,
}

impl Shape {
    /// Polygon vertices around `center`; empty for circles.
    pub fn outline(&self, center: Vec2) -> Vec<Vec2> {
        let r = self.radius;
        match self.kind {
            ShapeKind::Circle => Vec::new(),
            ShapeKind::Diamond => {
                // Square of side 1.8r turned 45 degrees.
                let h = 0.9 * r * std::f64::consts::SQRT_2;
                vec![
                    center + vec2(0.0, -h),
                    center + vec2(h, 0.0),
                    center + vec2(0.0, h),
                    center + vec2(-h, 0.0),
                ]
            }
            ShapeKind::Hexagon => (0..6)
                .map(|i| {
                    let a = i as Real * FRAC_PI_3;
                    center + vec2(r * a.cos(), r * a.sin())
                })
                .collect(),
            ShapeKind::Square => {
                let h = 0.75 * r;
                vec![
                    center + vec2(-h, -h),
                    center + vec2(h, -h),
                    center + vec2(h, h),
                    center + vec2(-h, h),
                ]
            }
        }
    }

    /// Whether `p` lies within the glyph's bounding circle.
    pub fn contains(&self, center: Vec2, p: Vec2) -> bool {
        (p - center).norm() <= self.radius
    }
}

pub fn shape_for(role: NodeRole) -> Shape {
    let (kind, radius) = match role {
        NodeRole::Reservoir => (ShapeKind::Circle, 15.0),
        NodeRole::Pump => (ShapeKind::Diamond, 12.0),
        NodeRole::Consumer => (ShapeKind::Hexagon, 13.0),
        NodeRole::Junction => (ShapeKind::Square, 10.0),
    };
    Shape { kind, radius }
}

pub fn color_for(role: NodeRole) -> Color {
    match role {
        NodeRole::Reservoir => Color::hex(0x2196f3),
        NodeRole::Pump => Color::hex(0x4caf50),
        NodeRole::Junction => Color::hex(0xf44336),
        NodeRole::Consumer => Color::hex(0xff9800),
    }
}

/// Edge label text, by attribute priority.
pub fn label_for(attrs: &EdgeAttributes) -> String {
    match (attrs.capacity_text(), attrs.cost_text()) {
        (Some(cap), Some(cost)) => format!("{cap} L/s / ${cost}"),
        (Some(cap), None) => format!("{cap} L/s"),
        (None, Some(cost)) => format!("${cost}"),
        (None, None) => match (attrs.distance_text(), &attrs.value) {
            (Some(dist), _) => format!("{dist} m"),
            (None, Some(value)) => value.clone(),
            (None, None) => String::new(),
        },
    }
}

/// Hover text for a node.
pub fn tooltip_for(node: &Node) -> String {
    format!("{}\nType: {}", node.name, node.role.as_str())
}

/// Legend rows in display order.
pub fn legend() -> [(NodeRole, Color); 4] {
    NodeRole::ALL.map(|role| (role, color_for(role)))
}
