//! fv-render: turning a laid-out water network into pictures.
//!
//! - [`encode`]: role and attribute to shape, color and label
//! - [`geometry`]: curved edge paths and arrow anchors
//! - [`frame`]: the draw pass over a [`Surface`]
//! - [`svg`]: an SVG [`Surface`]
//! - [`view`]: lifecycle of one graph with its simulation and drag state

pub mod encode;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod surface;
pub mod svg;
pub mod view;

pub use encode::{Color, Shape, ShapeKind, classify, color_for, label_for, legend, shape_for, tooltip_for};
pub use error::{RenderError, RenderResult};
pub use frame::{RenderStyle, Scene, draw_placeholder, draw_scene, edge_paths};
pub use geometry::{ArrowAnchor, Curve, EdgePath, PathParams, resolve_edge_path};
pub use hit_test::node_at;
pub use surface::{Stroke, Surface, TextAnchor, TextStyle};
pub use svg::SvgSurface;
pub use view::{NetworkView, ViewState};
