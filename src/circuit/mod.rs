//! Network representation, editing and validation.
//!
//! This module provides the in-memory shape the engine evaluates: a
//! [`Network`] of [`Node`]s joined by directed single-bit [`Wire`]s, the
//! editor operations that keep that shape well-formed, and the read-only
//! floating-input check that gates whether simulation may start.

mod graph;
mod types;
mod validate;

pub use graph::{Network, Node, Wire};
pub use types::*;
pub use validate::{validate, ValidationResult};
