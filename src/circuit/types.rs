//! Core types for network representation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::DEFAULT_CLOCK_INTERVAL;

/// A unique identifier for a node (component instance) in the network.
///
/// Ids are opaque strings so snapshots produced by the editor round-trip
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireId(pub String);

impl From<&str> for WireId {
    fn from(s: &str) -> Self {
        WireId(s.to_string())
    }
}

impl From<String> for WireId {
    fn from(s: String) -> Self {
        WireId(s)
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A port on a node: `(node id, index)`.
///
/// Whether it names an input or an output depends on where it is used; a
/// wire's `source` is always an output and its `target` always an input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortRef {
    pub node_id: NodeId,
    pub index: usize,
}

impl PortRef {
    /// Create a port reference.
    pub fn new(node: impl Into<NodeId>, index: usize) -> Self {
        Self {
            node_id: node.into(),
            index,
        }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.node_id, self.index)
    }
}

/// Canvas position. Carried for the editor; the engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-node configuration, edited from the properties panel.
///
/// Only the fields relevant to a node's kind are read; the rest ride along
/// through serialization untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeConfig {
    /// Display label. Empty labels fall back to the kind's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Fan-in of variable-arity gates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_count: Option<usize>,
    /// Clock divider: ticks between output toggles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    /// Power-on Q of latches and flip-flops.
    pub initial_state: bool,
    /// Contents of a 1-bit ROM.
    pub rom_value: bool,
    /// Contents of a word ROM, indexed by address.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rom_data: Vec<u32>,
    /// Cosmetic only; the evaluator is delay-less.
    pub propagation_delay: u32,
}

impl NodeConfig {
    /// The label, if set and non-empty.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.trim().is_empty())
    }

    /// Clock divider, with zero or unset meaning the default.
    pub fn clock_interval(&self) -> u32 {
        self.interval
            .filter(|&i| i > 0)
            .unwrap_or(DEFAULT_CLOCK_INTERVAL)
    }
}
