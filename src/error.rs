//! Error types for the logic circuit engine.
//!
//! Relaxation and validation never fail; a network that does not settle or
//! has floating inputs is reported as data. This module provides the unified
//! error type [`LogicError`] for everything around the engine: structural
//! edits through the editor API, snapshot serialization, and the CLI.

use std::fmt;

use thiserror::Error;

use crate::circuit::NodeId;

/// Result type alias using [`LogicError`].
pub type Result<T> = std::result::Result<T, LogicError>;

/// Which side of a node a port index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// Unified error type for all fallible operations.
#[derive(Error, Debug)]
pub enum LogicError {
    // ============ Editor Errors ============
    /// Node not found in network
    #[error("Node '{node}' not found in network")]
    NodeNotFound { node: NodeId },

    /// Wire not found in network
    #[error("Wire '{wire}' not found in network")]
    WireNotFound { wire: String },

    /// Port index beyond the node's current arity
    #[error("Node '{node}' has no {direction} port {index} (arity {arity})")]
    PortOutOfRange {
        node: NodeId,
        index: usize,
        direction: PortDirection,
        arity: usize,
    },

    /// A second wire would drive an input that already has a driver
    #[error("Input {index} of node '{node}' is already driven")]
    InputAlreadyDriven { node: NodeId, index: usize },

    /// Fan-in outside the supported range for variable-arity gates
    #[error("Invalid input count {count} for node '{node}' (expected 2..=8)")]
    InvalidInputCount { node: NodeId, count: usize },

    /// Bus width that has no matching component kind
    #[error("Invalid bus width {width} for node '{node}' (expected 2, 4, 8 or 16)")]
    InvalidBusWidth { node: NodeId, width: usize },

    /// Operation not meaningful for this kind of component
    #[error("Cannot {operation} node '{node}' of kind {kind}")]
    UnsupportedOperation {
        node: NodeId,
        kind: String,
        operation: &'static str,
    },

    /// Network failed the floating-input check
    #[error("Circuit is not ready for simulation: {}", messages.join("; "))]
    InvalidCircuit { messages: Vec<String> },

    // ============ I/O Errors ============
    /// Error reading a circuit file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a circuit file
    #[error("Failed to write circuit file '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed circuit JSON
    #[error("Invalid circuit JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl LogicError {
    /// Create a node-not-found error
    pub fn node_not_found(node: &NodeId) -> Self {
        Self::NodeNotFound { node: node.clone() }
    }

    /// Create a port-out-of-range error
    pub fn port_out_of_range(
        node: &NodeId,
        index: usize,
        direction: PortDirection,
        arity: usize,
    ) -> Self {
        Self::PortOutOfRange {
            node: node.clone(),
            index,
            direction,
            arity,
        }
    }

    /// Create an unsupported-operation error
    pub fn unsupported(node: &NodeId, kind: impl fmt::Debug, operation: &'static str) -> Self {
        Self::UnsupportedOperation {
            node: node.clone(),
            kind: format!("{:?}", kind),
            operation,
        }
    }
}
