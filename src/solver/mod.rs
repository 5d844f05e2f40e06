//! Network evaluation engine.
//!
//! This module settles a network of digital components to a stable state.
//!
//! ## Relaxation
//!
//! The network may contain feedback, so there is no evaluation order that
//! works for every circuit. Instead each round performs:
//!
//! ```text
//! wire.state       <- source.outputs[i]      (every live source)
//! target.inputs[j] <- wire.state             (last wire per input)
//! node.outputs     <- eval(kind, inputs, state)
//! ```
//!
//! until a round changes nothing or the round cap is reached. Clocked
//! elements remember the clock level they last saw, so an edge fires exactly
//! once no matter how many rounds follow it.

mod relax;
mod simulator;

pub use relax::{evaluate, evaluate_network, relax, RelaxReport};
pub use simulator::{Simulator, SimulatorConfig};

/// Maximum relaxation rounds per settle.
pub const MAX_ITERATIONS: usize = 50;

/// Default number of ticks the simulator can step back.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;
