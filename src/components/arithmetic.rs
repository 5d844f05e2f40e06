//! Arithmetic blocks: adders, subtractor, comparator and the 4-bit ALU.

use super::{bit, ComponentKind};
use super::memory::{decode_field, encode_word};

/// 1-bit arithmetic blocks.
///
/// | Kind | Inputs | Outputs |
/// |------|--------|---------|
/// | Half adder | A, B | S, C |
/// | Full adder | A, B, Cin | S, Cout |
/// | Subtractor | A, B | D, Bo |
/// | Comparator | A, B | >, =, < |
pub(super) fn eval_bitwise(kind: ComponentKind, inputs: &[bool]) -> Vec<bool> {
    let a = bit(inputs, 0);
    let b = bit(inputs, 1);
    match kind {
        ComponentKind::HalfAdder => vec![a != b, a && b],
        ComponentKind::FullAdder => {
            let sum = [a, b, bit(inputs, 2)].iter().filter(|&&v| v).count();
            vec![sum % 2 == 1, sum >= 2]
        }
        ComponentKind::Subtractor => vec![a != b, !a && b],
        ComponentKind::Comparator1Bit => vec![a && !b, a == b, !a && b],
        _ => Vec::new(),
    }
}

/// ALU opcode, decoded from inputs 8 (LSB) and 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AluOp {
    Add,
    Sub,
    And,
    Or,
}

impl AluOp {
    fn decode(code: u32) -> Self {
        match code & 0b11 {
            0 => AluOp::Add,
            1 => AluOp::Sub,
            2 => AluOp::And,
            _ => AluOp::Or,
        }
    }
}

/// 4-bit ALU.
///
/// Inputs are A0..A3, B0..B3, Op0, Op1. Outputs are R0..R3, the carry (or
/// borrow) flag and the zero flag. Subtraction wraps modulo 16.
pub(super) fn eval_alu(inputs: &[bool]) -> Vec<bool> {
    let a = decode_field(inputs, 0, 4);
    let b = decode_field(inputs, 4, 4);
    let (result, carry) = match AluOp::decode(decode_field(inputs, 8, 2)) {
        AluOp::Add => {
            let sum = a + b;
            (sum & 0xF, sum > 0xF)
        }
        AluOp::Sub => ((a + 16 - b) & 0xF, a < b),
        AluOp::And => (a & b, false),
        AluOp::Or => (a | b, false),
    };

    let mut outputs = encode_word(result, 4);
    outputs.push(carry);
    outputs.push(result == 0);
    outputs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alu(a: u32, b: u32, op: u32) -> (u32, bool, bool) {
        let mut inputs = encode_word(a, 4);
        inputs.extend(encode_word(b, 4));
        inputs.extend(encode_word(op, 2));
        let out = eval_alu(&inputs);
        (decode_field(&out, 0, 4), out[4], out[5])
    }

    #[test]
    fn test_half_adder_table() {
        let k = ComponentKind::HalfAdder;
        assert_eq!(eval_bitwise(k, &[false, false]), vec![false, false]);
        assert_eq!(eval_bitwise(k, &[true, false]), vec![true, false]);
        assert_eq!(eval_bitwise(k, &[false, true]), vec![true, false]);
        assert_eq!(eval_bitwise(k, &[true, true]), vec![false, true]);
    }

    #[test]
    fn test_full_adder_table() {
        for n in 0..8u32 {
            let inputs = encode_word(n, 3);
            let ones = n.count_ones();
            assert_eq!(
                eval_bitwise(ComponentKind::FullAdder, &inputs),
                vec![ones % 2 == 1, ones >= 2],
                "inputs {:?}",
                inputs
            );
        }
    }

    #[test]
    fn test_subtractor_table() {
        let k = ComponentKind::Subtractor;
        assert_eq!(eval_bitwise(k, &[false, false]), vec![false, false]);
        assert_eq!(eval_bitwise(k, &[true, false]), vec![true, false]);
        assert_eq!(eval_bitwise(k, &[false, true]), vec![true, true]);
        assert_eq!(eval_bitwise(k, &[true, true]), vec![false, false]);
    }

    #[test]
    fn test_comparator_exclusive() {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let out = eval_bitwise(ComponentKind::Comparator1Bit, &[a, b]);
            assert_eq!(out.iter().filter(|&&v| v).count(), 1);
            assert_eq!(out, vec![a && !b, a == b, !a && b]);
        }
    }

    #[test]
    fn test_alu_add() {
        assert_eq!(alu(3, 4, 0), (7, false, false));
        assert_eq!(alu(9, 8, 0), (1, true, false));
        assert_eq!(alu(8, 8, 0), (0, true, true));
    }

    #[test]
    fn test_alu_sub_wraps() {
        assert_eq!(alu(9, 4, 1), (5, false, false));
        assert_eq!(alu(3, 5, 1), (14, true, false));
        assert_eq!(alu(6, 6, 1), (0, false, true));
    }

    #[test]
    fn test_alu_logic_ops() {
        assert_eq!(alu(0b1100, 0b1010, 2), (0b1000, false, false));
        assert_eq!(alu(0b1100, 0b1010, 3), (0b1110, false, false));
        assert_eq!(alu(0b0101, 0b1010, 2), (0, false, true));
    }
}
