//! Render and view errors.

use fv_graph::GraphError;
use fv_layout::{InteractionError, SimError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),

    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("Interaction error: {0}")]
    Interaction(#[from] InteractionError),

    #[error("Position table has {got} entries for {expected} nodes")]
    PositionMismatch { expected: usize, got: usize },

    #[error("No graph is running")]
    NotRunning,
}

pub type RenderResult<T> = Result<T, RenderError>;
