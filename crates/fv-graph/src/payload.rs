//! Input payload schema.
//!
//! Mirrors the record produced by the network input form:
//! `{ nodes: [{id, type?}], edges: [{source, target, capacity?, cost?, distance?, value?}], source?, sink? }`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphPayload {
    #[serde(default)]
    pub nodes: Vec<NodePayload>,
    #[serde(default)]
    pub edges: Vec<EdgePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Designation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sink: Option<Designation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodePayload {
    pub id: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgePayload {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Scalar>,
}

/// A loosely typed attribute value as it arrives from form input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl Scalar {
    /// Numeric reading: finite numbers and numeric strings.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(v) if v.is_finite() => Some(*v),
            Scalar::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Verbatim text reading for free-form label values.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Scalar::Number(v) if v.is_finite() => Some(fv_core::format_number(*v)),
            Scalar::Number(_) => None,
            Scalar::Flag(b) => Some(b.to_string()),
            Scalar::Text(s) => Some(s.clone()),
        }
    }
}

/// A source/sink designation: a single node id or a list of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Designation {
    One(String),
    Many(Vec<String>),
}

impl Designation {
    pub fn ids(&self) -> Vec<&str> {
        match self {
            Designation::One(id) => vec![id.as_str()],
            Designation::Many(ids) => ids.iter().map(String::as_str).collect(),
        }
    }
}
