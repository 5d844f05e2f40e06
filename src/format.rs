//! JSON import and export of network snapshots.
//!
//! The snapshot is the `{ "nodes": [...], "wires": [...] }` document the
//! editor saves. Field names are camelCase and component kinds use their
//! SCREAMING_SNAKE_CASE tags:
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": "sw", "type": "SWITCH", "position": { "x": 0, "y": 0 },
//!       "inputs": [], "outputs": [true] },
//!     { "id": "led", "type": "BULB", "position": { "x": 120, "y": 0 },
//!       "inputs": [false], "outputs": [] }
//!   ],
//!   "wires": [
//!     { "id": "w1", "sourceNodeId": "sw", "sourceOutputIndex": 0,
//!       "targetNodeId": "led", "targetInputIndex": 0, "state": false }
//!   ]
//! }
//! ```
//!
//! Loading normalizes every node, so hand-written files may omit `inputs`,
//! `outputs` and `internalState`.

use std::path::Path;

use crate::circuit::Network;
use crate::error::{LogicError, Result};

/// Parse a network snapshot from a JSON string.
pub fn from_json(input: &str) -> Result<Network> {
    let mut network: Network = serde_json::from_str(input)?;
    network.normalize();
    Ok(network)
}

/// Serialize a network snapshot as pretty-printed JSON.
pub fn to_json(network: &Network) -> Result<String> {
    Ok(serde_json::to_string_pretty(network)?)
}

/// Parse a network snapshot file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &Path) -> Result<Network> {
    let content = std::fs::read_to_string(path).map_err(|e| LogicError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    from_json(&content)
}

/// Write a network snapshot file.
pub fn write_file(path: &Path, network: &Network) -> Result<()> {
    let json = to_json(network)?;
    std::fs::write(path, json).map_err(|e| LogicError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}
