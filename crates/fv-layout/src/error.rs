//! Error types for layout and interaction.

use fv_core::NodeId;
use thiserror::Error;

/// Errors from constructing or driving a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown node {node} (simulation has {len} nodes)")]
    UnknownNode { node: NodeId, len: usize },

    #[error("Non-finite {what}")]
    NonFinite { what: &'static str },

    #[error("Invalid link {index}: endpoint {node} out of range")]
    InvalidLink { index: usize, node: NodeId },
}

pub type SimResult<T> = Result<T, SimError>;

/// Errors from the drag state machine. None of these change any state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InteractionError {
    #[error("Node {0} is already being dragged")]
    AlreadyDragging(NodeId),

    #[error("Node {0} is not being dragged")]
    NotDragging(NodeId),

    #[error(transparent)]
    Sim(#[from] SimError),
}

impl From<SimError> for fv_core::FvError {
    fn from(e: SimError) -> Self {
        fv_core::FvError::InvalidInput {
            message: e.to_string(),
        }
    }
}
