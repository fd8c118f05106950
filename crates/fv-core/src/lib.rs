//! fv-core: shared foundation for flowviz.
//!
//! Contains:
//! - ids (compact arena IDs for nodes and edges)
//! - numeric (Real + tolerances + float helpers)
//! - geom (2-D vectors and canvas bounds)
//! - error (shared error types)

pub mod error;
pub mod geom;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FvError, FvResult};
pub use geom::*;
pub use ids::*;
pub use numeric::*;
