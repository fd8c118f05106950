//! fv-graph: network data model for flowviz.
//!
//! Provides:
//! - Input payload types (JSON/YAML) for water networks
//! - Node role classification (reservoir, pump, junction, consumer)
//! - Arena graph with validated node/edge tables and incident-edge adjacency
//! - Highlight sets built from optimization results
//!
//! # Example
//!
//! ```
//! use fv_graph::{GraphBuilder, EdgeAttributes, NodeRole};
//!
//! let mut builder = GraphBuilder::new();
//! builder.add_node("reservoir_1", None);
//! builder.add_node("town", None);
//! builder.add_edge("reservoir_1", "town", EdgeAttributes::default());
//! builder.designate_sink("town");
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.nodes().len(), 2);
//! assert_eq!(graph.nodes()[1].role, NodeRole::Consumer);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod highlight;
pub mod io;
pub mod payload;
pub mod results;
pub mod role;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, EdgeAttributes, Graph, Node};
pub use highlight::HighlightSet;
pub use io::{LoadError, PayloadFormat, load_graph, load_highlights, load_payload, parse_payload};
pub use payload::{Designation, EdgePayload, GraphPayload, NodePayload, Scalar};
pub use results::{FlowPath, MaxFlowResult, MstResult, OptimizationResult, ResultKind, ShortestPathResult};
pub use role::{EndpointFlags, NodeRole, classify};
