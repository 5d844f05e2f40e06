//! # Logicsim Core
//!
//! The evaluation engine of an interactive digital-logic designer.
//!
//! This library provides:
//! - A closed catalogue of components (gates, arithmetic, plexers, latches,
//!   flip-flops, registers, RAM and ROM) with their evaluation semantics
//! - A network model of nodes and single-bit wires, with editor operations
//! - A bounded fixed-point solver that settles possibly-cyclic networks
//! - A floating-input validator
//! - A tick driver for clocks, with step-back history
//!
//! ## Architecture
//!
//! - [`components`] - Component kinds, internal state and evaluation
//! - [`circuit`] - Network graph, editor operations and validation
//! - [`solver`] - Relaxation engine and tick-driven simulator
//! - [`format`] - JSON snapshot import and export
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! logicsim counter.json --ticks 200 --output settled.json
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmLogicSim } from 'logicsim_core';
//!
//! const sim = new WasmLogicSim(snapshotJson);
//! sim.tick();
//! const next = sim.snapshot();
//! ```
//!
//! ## Evaluation Method
//!
//! There is no propagation delay and no event queue. Every evaluation
//! repeatedly copies source outputs onto wires and wires onto inputs, then
//! recomputes each node, until nothing changes or the round cap is hit.
//! Edge-triggered elements compare the clock against the level they saw
//! last time, so edges are detected exactly once.

pub mod circuit;
pub mod components;
pub mod error;
pub mod format;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{validate, Network, Node, NodeId, PortRef, ValidationResult, Wire};
pub use components::ComponentKind;
pub use error::{LogicError, Result};
pub use solver::{evaluate, evaluate_network, relax, RelaxReport, Simulator, SimulatorConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmLogicSim;
