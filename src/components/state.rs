//! Per-node internal state.

use serde::{Deserialize, Serialize};

/// Internal state of a node, one variant per component family.
///
/// Each variant holds exactly the fields its family's evaluation reads, so a
/// flip-flop can never carry a memory array and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "camelCase")]
pub enum NodeState {
    /// Combinational components, sinks and non-clock sources.
    #[default]
    Stateless,
    /// Level-sensitive latches.
    Latch { stored: bool },
    /// Edge-triggered flip-flops.
    #[serde(rename_all = "camelCase")]
    FlipFlop { last_clock: bool, stored: bool },
    /// 4-bit shift register; `bits[0]` is the newest bit.
    #[serde(rename_all = "camelCase")]
    Shift { last_clock: bool, bits: [bool; 4] },
    /// 4-bit parallel register.
    #[serde(rename_all = "camelCase")]
    Register { last_clock: bool, bits: [bool; 4] },
    /// 4-bit counter; `value` is always below 16.
    #[serde(rename_all = "camelCase")]
    Counter { last_clock: bool, value: u8 },
    /// Addressable RAM contents, one word per address.
    Memory { words: Vec<u32> },
    /// Free-running clock divider.
    #[serde(rename_all = "camelCase")]
    Clock { tick_count: u32 },
}

/// Discriminant of [`NodeState`], used to check a record against a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateFamily {
    Stateless,
    Latch,
    FlipFlop,
    Shift,
    Register,
    Counter,
    Memory,
    Clock,
}

impl NodeState {
    pub fn family(&self) -> StateFamily {
        match self {
            NodeState::Stateless => StateFamily::Stateless,
            NodeState::Latch { .. } => StateFamily::Latch,
            NodeState::FlipFlop { .. } => StateFamily::FlipFlop,
            NodeState::Shift { .. } => StateFamily::Shift,
            NodeState::Register { .. } => StateFamily::Register,
            NodeState::Counter { .. } => StateFamily::Counter,
            NodeState::Memory { .. } => StateFamily::Memory,
            NodeState::Clock { .. } => StateFamily::Clock,
        }
    }

    /// The stored bit of a latch or flip-flop.
    pub fn stored_bit(&self) -> Option<bool> {
        match self {
            NodeState::Latch { stored } | NodeState::FlipFlop { stored, .. } => Some(*stored),
            _ => None,
        }
    }

    /// The RAM word at `address`, if this is a memory record.
    pub fn word(&self, address: usize) -> Option<u32> {
        match self {
            NodeState::Memory { words } => words.get(address).copied(),
            _ => None,
        }
    }
}
