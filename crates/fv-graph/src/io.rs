//! Loading graph payloads and result documents from disk.

use std::path::Path;

use thiserror::Error;

use crate::error::GraphError;
use crate::graph::Graph;
use crate::highlight::HighlightSet;
use crate::payload::GraphPayload;
use crate::results::{OptimizationResult, ResultKind};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),
}

/// On-disk encoding of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Json,
    Yaml,
}

impl PayloadFormat {
    /// Guess from a file extension; anything not YAML is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => PayloadFormat::Yaml,
            _ => PayloadFormat::Json,
        }
    }
}

pub fn parse_payload(text: &str, format: PayloadFormat) -> Result<GraphPayload, LoadError> {
    Ok(match format {
        PayloadFormat::Json => serde_json::from_str(text)?,
        PayloadFormat::Yaml => serde_yaml::from_str(text)?,
    })
}

pub fn load_payload(path: &Path) -> Result<GraphPayload, LoadError> {
    let text = std::fs::read_to_string(path)?;
    parse_payload(&text, PayloadFormat::from_path(path))
}

/// Load and validate a graph file.
pub fn load_graph(path: &Path) -> Result<Graph, LoadError> {
    let payload = load_payload(path)?;
    let graph = Graph::from_payload(&payload)?;
    tracing::debug!(
        path = %path.display(),
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        "loaded graph"
    );
    Ok(graph)
}

/// Load an optimization result document and derive its highlight set.
pub fn load_highlights(path: &Path, kind: ResultKind) -> Result<HighlightSet, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let result = OptimizationResult::from_json(kind, &text)?;
    Ok(result.highlights())
}
