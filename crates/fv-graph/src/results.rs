//! Optimization result payloads.
//!
//! These are produced by an external optimizer; here they are only read to
//! derive a [`HighlightSet`].

use serde::{Deserialize, Serialize};

use crate::highlight::HighlightSet;
use crate::payload::Scalar;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlowPath {
    pub path: Vec<String>,
    #[serde(default)]
    pub flow: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaxFlowResult {
    #[serde(default)]
    pub max_flow: Option<f64>,
    #[serde(default)]
    pub flow_paths: Vec<FlowPath>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MstResult {
    #[serde(default)]
    pub mst_edges: Vec<(Scalar, Scalar)>,
    #[serde(default)]
    pub total_cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShortestPathResult {
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub path: Vec<String>,
}

/// Which optimizer produced a result document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultKind {
    MaxFlow,
    Mst,
    ShortestPath,
}

impl ResultKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultKind::MaxFlow => "max-flow",
            ResultKind::Mst => "mst",
            ResultKind::ShortestPath => "shortest-path",
        }
    }
}

/// Any of the supported result documents.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizationResult {
    MaxFlow(MaxFlowResult),
    Mst(MstResult),
    ShortestPath(ShortestPathResult),
}

impl OptimizationResult {
    /// Parse a JSON result of a known kind.
    pub fn from_json(kind: ResultKind, text: &str) -> serde_json::Result<Self> {
        Ok(match kind {
            ResultKind::MaxFlow => Self::MaxFlow(serde_json::from_str(text)?),
            ResultKind::Mst => Self::Mst(serde_json::from_str(text)?),
            ResultKind::ShortestPath => Self::ShortestPath(serde_json::from_str(text)?),
        })
    }

    pub fn kind(&self) -> ResultKind {
        match self {
            Self::MaxFlow(_) => ResultKind::MaxFlow,
            Self::Mst(_) => ResultKind::Mst,
            Self::ShortestPath(_) => ResultKind::ShortestPath,
        }
    }

    /// Connections to emphasize when rendering this result.
    pub fn highlights(&self) -> HighlightSet {
        match self {
            Self::MaxFlow(r) => HighlightSet::from_paths(r.flow_paths.iter().map(|p| p.path.as_slice())),
            Self::Mst(r) => r
                .mst_edges
                .iter()
                .filter_map(|(a, b)| Some((a.as_text()?, b.as_text()?)))
                .collect(),
            Self::ShortestPath(r) => HighlightSet::from_path(&r.path),
        }
    }
}
