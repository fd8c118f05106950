//! Graph-specific error types.

use fv_core::FvError;
use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node was declared with an empty id.
    #[error("Node at position {index} has an empty id")]
    EmptyNodeId { index: usize },

    /// Two nodes share an id.
    #[error("Duplicate node id '{id}' (positions {first} and {second})")]
    DuplicateNode {
        id: String,
        first: usize,
        second: usize,
    },

    /// An edge endpoint names a node that was never declared.
    #[error("Edge {edge} {endpoint} refers to unknown node '{id}'")]
    UnknownEndpoint {
        edge: usize,
        endpoint: &'static str,
        id: String,
    },

    /// Adjacency table disagrees with the edge table.
    #[error("Edge {edge} listed under node {node} but not incident to it")]
    InconsistentAdjacency { edge: usize, node: usize },
}

impl From<GraphError> for FvError {
    fn from(err: GraphError) -> Self {
        FvError::InvalidInput {
            message: err.to_string(),
        }
    }
}
