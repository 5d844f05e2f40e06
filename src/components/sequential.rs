//! Latches, flip-flops and clocked registers.
//!
//! Edge-triggered elements keep the clock level they saw on their previous
//! evaluation. Every evaluation stores the current level back, edge or not,
//! so a clock held high across several relaxation rounds fires only once.

use super::memory::{decode_field, encode_word};
use super::{bit, ComponentKind, NodeState};

/// Transition of a clock input between two consecutive evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEdge {
    Rising,
    Falling,
    None,
}

impl ClockEdge {
    /// Classify the transition from `previous` to `current`.
    pub fn detect(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => ClockEdge::Rising,
            (true, false) => ClockEdge::Falling,
            _ => ClockEdge::None,
        }
    }

    /// Detect an edge against `last_clock` and store `current` into it.
    pub fn sample(last_clock: &mut bool, current: bool) -> Self {
        let edge = Self::detect(*last_clock, current);
        *last_clock = current;
        edge
    }

    pub fn is_rising(&self) -> bool {
        *self == ClockEdge::Rising
    }

    pub fn is_falling(&self) -> bool {
        *self == ClockEdge::Falling
    }
}

/// Next Q of a JK element: set, reset, toggle or hold.
fn jk_next(j: bool, k: bool, q: bool) -> bool {
    match (j, k) {
        (true, false) => true,
        (false, true) => false,
        (true, true) => !q,
        (false, false) => q,
    }
}

/// Next Q of an SR element. Both inputs high holds.
fn sr_next(s: bool, r: bool, q: bool) -> bool {
    match (s, r) {
        (true, false) => true,
        (false, true) => false,
        _ => q,
    }
}

/// D-latch (D, En) and gated SR latch (S, En, R). Outputs Q, !Q.
pub(super) fn eval_latch(kind: ComponentKind, inputs: &[bool], state: &mut NodeState) -> Vec<bool> {
    let NodeState::Latch { stored } = state else {
        return vec![false, true];
    };
    if bit(inputs, 1) {
        *stored = match kind {
            ComponentKind::DLatch => bit(inputs, 0),
            ComponentKind::GatedSrLatch => sr_next(bit(inputs, 0), bit(inputs, 2), *stored),
            _ => *stored,
        };
    }
    vec![*stored, !*stored]
}

/// D, T, JK, SR and master-slave JK flip-flops. The clock is input 1 for all
/// of them; the master-slave variant captures on the falling edge.
pub(super) fn eval_flip_flop(
    kind: ComponentKind,
    inputs: &[bool],
    state: &mut NodeState,
) -> Vec<bool> {
    let NodeState::FlipFlop { last_clock, stored } = state else {
        return vec![false, true];
    };

    let edge = ClockEdge::sample(last_clock, bit(inputs, 1));
    let triggered = match kind {
        ComponentKind::JkMasterSlave => edge.is_falling(),
        _ => edge.is_rising(),
    };

    if triggered {
        *stored = match kind {
            ComponentKind::DFlipFlop => bit(inputs, 0),
            ComponentKind::TFlipFlop => *stored ^ bit(inputs, 0),
            ComponentKind::JkFlipFlop | ComponentKind::JkMasterSlave => {
                jk_next(bit(inputs, 0), bit(inputs, 2), *stored)
            }
            ComponentKind::SrFlipFlop => sr_next(bit(inputs, 0), bit(inputs, 2), *stored),
            _ => *stored,
        };
    }
    vec![*stored, !*stored]
}

/// 4-bit serial-in shift register (D, Clk). Outputs Q0..Q3, Q0 newest.
pub(super) fn eval_shift_register(inputs: &[bool], state: &mut NodeState) -> Vec<bool> {
    let NodeState::Shift { last_clock, bits } = state else {
        return vec![false; 4];
    };
    if ClockEdge::sample(last_clock, bit(inputs, 1)).is_rising() {
        bits.rotate_right(1);
        bits[0] = bit(inputs, 0);
    }
    bits.to_vec()
}

/// 4-bit counter (Clk, Rst). Reset is sampled on the rising edge and wins
/// over the increment.
pub(super) fn eval_counter(inputs: &[bool], state: &mut NodeState) -> Vec<bool> {
    let NodeState::Counter { last_clock, value } = state else {
        return vec![false; 4];
    };
    if ClockEdge::sample(last_clock, bit(inputs, 0)).is_rising() {
        *value = if bit(inputs, 1) { 0 } else { value.wrapping_add(1) % 16 };
    }
    encode_word(u32::from(*value), 4)
}

/// 4-bit parallel register (D0..D3, Clk). Outputs Q0..Q3.
pub(super) fn eval_register(inputs: &[bool], state: &mut NodeState) -> Vec<bool> {
    let NodeState::Register { last_clock, bits } = state else {
        return vec![false; 4];
    };
    if ClockEdge::sample(last_clock, bit(inputs, 4)).is_rising() {
        let word = decode_field(inputs, 0, 4);
        for (i, b) in bits.iter_mut().enumerate() {
            *b = (word >> i) & 1 == 1;
        }
    }
    bits.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flip_flop(stored: bool) -> NodeState {
        NodeState::FlipFlop {
            last_clock: false,
            stored,
        }
    }

    /// Drive one low-high clock cycle with the given data inputs around the clock.
    fn pulse(kind: ComponentKind, a: bool, b: bool, state: &mut NodeState) -> Vec<bool> {
        let clk_at = |clk: bool| [a, clk, b];
        let (low, high) = if kind == ComponentKind::JkMasterSlave {
            (true, false)
        } else {
            (false, true)
        };
        eval_flip_flop(kind, &clk_at(low), state);
        eval_flip_flop(kind, &clk_at(high), state)
    }

    #[test]
    fn test_edge_detection() {
        assert_eq!(ClockEdge::detect(false, true), ClockEdge::Rising);
        assert_eq!(ClockEdge::detect(true, false), ClockEdge::Falling);
        assert_eq!(ClockEdge::detect(true, true), ClockEdge::None);
        assert_eq!(ClockEdge::detect(false, false), ClockEdge::None);

        let mut last = false;
        assert!(ClockEdge::sample(&mut last, true).is_rising());
        assert!(last);
        assert_eq!(ClockEdge::sample(&mut last, true), ClockEdge::None);
    }

    #[test]
    fn test_d_flip_flop_fires_once_per_edge() {
        let mut state = flip_flop(false);
        assert_eq!(eval_flip_flop(ComponentKind::DFlipFlop, &[true, true], &mut state), vec![true, false]);

        // Held clock: D changes are ignored
        assert_eq!(eval_flip_flop(ComponentKind::DFlipFlop, &[false, true], &mut state), vec![true, false]);
        // Falling edge: hold
        assert_eq!(eval_flip_flop(ComponentKind::DFlipFlop, &[false, false], &mut state), vec![true, false]);
        // Next rising edge loads the new D
        assert_eq!(eval_flip_flop(ComponentKind::DFlipFlop, &[false, true], &mut state), vec![false, true]);
    }

    #[test]
    fn test_t_flip_flop_toggles() {
        let mut state = flip_flop(false);
        assert!(pulse(ComponentKind::TFlipFlop, true, false, &mut state)[0]);
        assert!(!pulse(ComponentKind::TFlipFlop, true, false, &mut state)[0]);
        assert!(!pulse(ComponentKind::TFlipFlop, false, false, &mut state)[0]);
    }

    #[test]
    fn test_jk_flip_flop_table() {
        let k = ComponentKind::JkFlipFlop;
        let mut state = flip_flop(false);
        assert!(pulse(k, true, false, &mut state)[0]); // set
        assert!(pulse(k, false, false, &mut state)[0]); // hold
        assert!(!pulse(k, false, true, &mut state)[0]); // reset
        assert!(pulse(k, true, true, &mut state)[0]); // toggle
        assert!(!pulse(k, true, true, &mut state)[0]); // toggle
    }

    #[test]
    fn test_sr_flip_flop_both_high_holds() {
        let k = ComponentKind::SrFlipFlop;
        let mut state = flip_flop(false);
        assert!(pulse(k, true, false, &mut state)[0]);
        assert!(pulse(k, true, true, &mut state)[0]);
        assert!(!pulse(k, false, true, &mut state)[0]);
        assert!(!pulse(k, true, true, &mut state)[0]);
    }

    #[test]
    fn test_master_slave_triggers_on_falling_edge() {
        let k = ComponentKind::JkMasterSlave;
        let mut state = flip_flop(false);
        // Rising edge alone does nothing
        assert!(!eval_flip_flop(k, &[true, true, false], &mut state)[0]);
        // Falling edge captures J
        assert!(eval_flip_flop(k, &[true, false, false], &mut state)[0]);
        assert!(!pulse(k, true, true, &mut state)[0]);
    }

    #[test]
    fn test_latches_are_transparent_while_enabled() {
        let mut state = NodeState::Latch { stored: false };
        assert_eq!(eval_latch(ComponentKind::DLatch, &[true, true], &mut state), vec![true, false]);
        assert_eq!(eval_latch(ComponentKind::DLatch, &[false, true], &mut state), vec![false, true]);
        assert_eq!(eval_latch(ComponentKind::DLatch, &[true, false], &mut state), vec![false, true]);

        let mut state = NodeState::Latch { stored: false };
        assert!(eval_latch(ComponentKind::GatedSrLatch, &[true, true, false], &mut state)[0]);
        assert!(eval_latch(ComponentKind::GatedSrLatch, &[true, true, true], &mut state)[0]);
        assert!(eval_latch(ComponentKind::GatedSrLatch, &[false, false, true], &mut state)[0]);
        assert!(!eval_latch(ComponentKind::GatedSrLatch, &[false, true, true], &mut state)[0]);
    }

    #[test]
    fn test_shift_register_order() {
        let mut state = NodeState::Shift {
            last_clock: false,
            bits: [false; 4],
        };
        for d in [true, false, true] {
            eval_shift_register(&[d, false], &mut state);
            eval_shift_register(&[d, true], &mut state);
        }
        assert_eq!(eval_shift_register(&[false, true], &mut state), vec![true, false, true, false]);

        eval_shift_register(&[true, false], &mut state);
        let out = eval_shift_register(&[true, true], &mut state);
        // Oldest bit evicted
        assert_eq!(out, vec![true, true, false, true]);
    }

    #[test]
    fn test_counter_wraps_and_resets() {
        let mut state = NodeState::Counter {
            last_clock: false,
            value: 14,
        };
        eval_counter(&[true, false], &mut state);
        assert_eq!(state, NodeState::Counter { last_clock: true, value: 15 });

        eval_counter(&[false, false], &mut state);
        let out = eval_counter(&[true, false], &mut state);
        assert_eq!(out, vec![false; 4]);

        eval_counter(&[false, false], &mut state);
        eval_counter(&[true, false], &mut state);
        eval_counter(&[false, false], &mut state);
        // Reset wins over increment on the same edge
        let out = eval_counter(&[true, true], &mut state);
        assert_eq!(out, vec![false; 4]);
    }

    #[test]
    fn test_counter_reset_is_synchronous() {
        let mut state = NodeState::Counter {
            last_clock: true,
            value: 5,
        };
        let out = eval_counter(&[true, true], &mut state);
        assert_eq!(decode_field(&out, 0, 4), 5);
    }

    #[test]
    fn test_register_latches_on_edge() {
        let mut state = NodeState::Register {
            last_clock: false,
            bits: [false; 4],
        };
        assert_eq!(
            eval_register(&[true, false, true, true, true], &mut state),
            vec![true, false, true, true]
        );
        assert_eq!(
            eval_register(&[false, false, false, false, true], &mut state),
            vec![true, false, true, true]
        );
    }
}
