//! Boolean gates.

use super::{bit, ComponentKind};

/// Evaluate a gate over its full current input vector.
///
/// The variable fan-in gates reduce over every input slot the node has;
/// NOT and the buffers read fixed positions.
pub(super) fn eval_gate(kind: ComponentKind, inputs: &[bool]) -> Vec<bool> {
    let high = inputs.iter().filter(|&&v| v).count();
    let out = match kind {
        ComponentKind::And => inputs.iter().all(|&v| v),
        ComponentKind::Or => high > 0,
        ComponentKind::Nand => !inputs.iter().all(|&v| v),
        ComponentKind::Nor => high == 0,
        ComponentKind::Xor => high % 2 == 1,
        ComponentKind::Xnor => high % 2 == 0,
        ComponentKind::Not => !bit(inputs, 0),
        ComponentKind::Buffer => bit(inputs, 0),
        // A disabled tri-state line is modeled as driven low.
        ComponentKind::TriStateBuffer => bit(inputs, 1) && bit(inputs, 0),
        _ => false,
    };
    vec![out]
}
