//! WASM bindings for Logicsim Core.
//!
//! This module provides JavaScript-friendly bindings for the browser editor.
//! Networks cross the boundary as JSON snapshot strings.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmLogicSim, validate_json } from 'logicsim_core';
//!
//! await init();
//!
//! const report = JSON.parse(validate_json(snapshotJson));
//! const sim = new WasmLogicSim(snapshotJson);
//!
//! // On every animation tick:
//! sim.tick();
//! render(JSON.parse(sim.snapshot()));
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{validate, NodeId};
use crate::error::LogicError;
use crate::format;
use crate::solver::{self, Simulator, SimulatorConfig};

fn to_js(err: LogicError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible network simulator.
///
/// Wraps the native `Simulator`; every mutating call settles the network
/// before returning.
#[wasm_bindgen]
pub struct WasmLogicSim {
    simulator: Simulator,
}

#[wasm_bindgen]
impl WasmLogicSim {
    /// Create a simulator from a JSON snapshot with default configuration.
    ///
    /// # Example
    /// ```javascript
    /// const sim = new WasmLogicSim(JSON.stringify({ nodes, wires }));
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(snapshot: &str) -> Result<WasmLogicSim, JsValue> {
        Self::with_config(snapshot, solver::MAX_ITERATIONS, solver::DEFAULT_HISTORY_DEPTH)
    }

    /// Create a simulator with a custom round cap and history depth.
    #[wasm_bindgen]
    pub fn with_config(
        snapshot: &str,
        max_iterations: usize,
        history_depth: usize,
    ) -> Result<WasmLogicSim, JsValue> {
        if max_iterations == 0 {
            return Err(to_js(LogicError::WasmError {
                message: "max_iterations must be at least 1".to_string(),
            }));
        }
        let network = format::from_json(snapshot).map_err(to_js)?;
        let config = SimulatorConfig::new()
            .with_max_iterations(max_iterations)
            .with_history_depth(history_depth);
        Ok(WasmLogicSim {
            simulator: Simulator::with_config(network, config),
        })
    }

    /// Advance every clock by one tick. Returns whether the network settled.
    #[wasm_bindgen]
    pub fn tick(&mut self) -> bool {
        self.simulator.tick().converged
    }

    /// Undo the most recent tick. Returns false when there is no history.
    #[wasm_bindgen]
    pub fn step_back(&mut self) -> bool {
        self.simulator.step_back()
    }

    /// Flip a switch or button.
    #[wasm_bindgen]
    pub fn toggle(&mut self, node_id: &str) -> Result<bool, JsValue> {
        self.simulator
            .toggle(&NodeId::from(node_id))
            .map(|r| r.converged)
            .map_err(to_js)
    }

    /// Drive a bus input with an unsigned value, LSB on output 0.
    #[wasm_bindgen]
    pub fn set_bus_value(&mut self, node_id: &str, value: u32) -> Result<bool, JsValue> {
        self.simulator
            .set_bus_value(&NodeId::from(node_id), value)
            .map(|r| r.converged)
            .map_err(to_js)
    }

    /// The current network as a JSON snapshot.
    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<String, JsValue> {
        format::to_json(self.simulator.network()).map_err(to_js)
    }

    /// Rounds taken by the most recent settle.
    #[wasm_bindgen(getter)]
    pub fn last_rounds(&self) -> usize {
        self.simulator.last_report().rounds
    }
}

/// Settle a JSON snapshot once and return the result as JSON.
#[wasm_bindgen]
pub fn evaluate_json(snapshot: &str) -> Result<String, JsValue> {
    let network = format::from_json(snapshot).map_err(to_js)?;
    format::to_json(&solver::evaluate_network(&network)).map_err(to_js)
}

/// Run the floating-input check on a JSON snapshot.
///
/// Returns the report as JSON: `{ ok, messages, offendingNodeIds, offendingInputs }`.
#[wasm_bindgen]
pub fn validate_json(snapshot: &str) -> Result<String, JsValue> {
    let network = format::from_json(snapshot).map_err(to_js)?;
    serde_json::to_string(&validate(&network))
        .map_err(|e| to_js(LogicError::from(e)))
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
