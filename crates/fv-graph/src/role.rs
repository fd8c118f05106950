//! Node role classification.
//!
//! A role is decided once, when the graph is built, by a pure function over
//! the node's id, its optional explicit type and the graph's source/sink
//! designations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic role of a node in a water network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Reservoir,
    Pump,
    Junction,
    Consumer,
}

impl NodeRole {
    /// All roles in legend order.
    pub const ALL: [NodeRole; 4] = [
        NodeRole::Reservoir,
        NodeRole::Pump,
        NodeRole::Junction,
        NodeRole::Consumer,
    ];

    /// Substring patterns tried in priority order when inferring from an id.
    const INFERENCE_ORDER: [(&'static str, NodeRole); 4] = [
        ("reservoir", NodeRole::Reservoir),
        ("pump", NodeRole::Pump),
        ("junction", NodeRole::Junction),
        ("consumer", NodeRole::Consumer),
    ];

    /// Parse an explicit type string. `source` and `sink` are accepted as
    /// aliases for reservoir and consumer.
    pub fn parse(s: &str) -> Option<NodeRole> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reservoir" | "source" => Some(NodeRole::Reservoir),
            "pump" => Some(NodeRole::Pump),
            "junction" => Some(NodeRole::Junction),
            "consumer" | "sink" => Some(NodeRole::Consumer),
            _ => None,
        }
    }

    /// Human-readable name used in legends and tooltips.
    pub fn display_name(self) -> &'static str {
        match self {
            NodeRole::Reservoir => "Reservoir",
            NodeRole::Pump => "Pump",
            NodeRole::Junction => "Junction",
            NodeRole::Consumer => "Consumer",
        }
    }

    /// Lowercase name, as used in payloads and tooltips.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeRole::Reservoir => "reservoir",
            NodeRole::Pump => "pump",
            NodeRole::Junction => "junction",
            NodeRole::Consumer => "consumer",
        }
    }

    fn infer_from_id(id: &str) -> Option<NodeRole> {
        let lower = id.to_lowercase();
        Self::INFERENCE_ORDER
            .iter()
            .find(|(pattern, _)| lower.contains(pattern))
            .map(|(_, role)| *role)
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Whether a node is one of the graph's designated endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EndpointFlags {
    pub is_source: bool,
    pub is_sink: bool,
}

/// Decide a node's role.
///
/// Order: explicit type, source/sink designation, id substring, junction.
pub fn classify(id: &str, explicit: Option<&str>, endpoints: EndpointFlags) -> NodeRole {
    if let Some(raw) = explicit.filter(|s| !s.trim().is_empty()) {
        match NodeRole::parse(raw) {
            Some(role) => return role,
            None => tracing::warn!(node = id, kind = raw, "unknown node type, inferring role"),
        }
    }
    if endpoints.is_source {
        return NodeRole::Reservoir;
    }
    if endpoints.is_sink {
        return NodeRole::Consumer;
    }
    NodeRole::infer_from_id(id).unwrap_or(NodeRole::Junction)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: EndpointFlags = EndpointFlags {
        is_source: false,
        is_sink: false,
    };

    #[test]
    fn explicit_type_wins() {
        let flags = EndpointFlags {
            is_source: true,
            is_sink: false,
        };
        assert_eq!(classify("reservoir_9", Some("pump"), flags), NodeRole::Pump);
        assert_eq!(classify("x", Some("Sink"), NONE), NodeRole::Consumer);
        assert_eq!(classify("x", Some("source"), NONE), NodeRole::Reservoir);
    }

    #[test]
    fn substring_inference_is_case_insensitive() {
        assert_eq!(classify("reservoir1", None, NONE), NodeRole::Reservoir);
        assert_eq!(classify("Main_PUMP", None, NONE), NodeRole::Pump);
        assert_eq!(classify("consumer_3", None, NONE), NodeRole::Consumer);
    }

    #[test]
    fn inference_follows_priority_order() {
        assert_eq!(classify("pump_to_consumer", None, NONE), NodeRole::Pump);
        assert_eq!(classify("junction_reservoir", None, NONE), NodeRole::Reservoir);
    }

    #[test]
    fn designated_sink_is_consumer() {
        let sink = EndpointFlags {
            is_source: false,
            is_sink: true,
        };
        assert_eq!(classify("town_hall", None, sink), NodeRole::Consumer);
        let source = EndpointFlags {
            is_source: true,
            is_sink: false,
        };
        assert_eq!(classify("lake", None, source), NodeRole::Reservoir);
    }

    #[test]
    fn unknown_explicit_type_falls_through() {
        assert_eq!(classify("pump_a", Some("tank"), NONE), NodeRole::Pump);
        assert_eq!(classify("a", Some("  "), NONE), NodeRole::Junction);
    }

    #[test]
    fn default_is_junction() {
        assert_eq!(classify("n42", None, NONE), NodeRole::Junction);
    }
}
