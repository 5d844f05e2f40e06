//! Multiplexers, demultiplexers, decoders and the priority encoder.
//!
//! Select fields are packed LSB-first: select bit 0 is the least
//! significant bit of the chosen index.

use super::bit;
use super::memory::decode_field;

/// `2^k` data inputs followed by `k` select inputs, one output.
pub(super) fn eval_mux(select_bits: usize, inputs: &[bool]) -> Vec<bool> {
    let data = 1 << select_bits;
    let index = decode_field(inputs, data, select_bits) as usize;
    vec![bit(inputs, index)]
}

/// One data input followed by `k` select inputs; `2^k` outputs, all low
/// except the selected one which follows the data input.
pub(super) fn eval_demux(select_bits: usize, inputs: &[bool]) -> Vec<bool> {
    let index = decode_field(inputs, 1, select_bits) as usize;
    let mut outputs = vec![false; 1 << select_bits];
    outputs[index] = bit(inputs, 0);
    outputs
}

/// `k` select inputs; exactly one of `2^k` outputs is high.
pub(super) fn eval_decoder(select_bits: usize, inputs: &[bool]) -> Vec<bool> {
    let index = decode_field(inputs, 0, select_bits) as usize;
    let mut outputs = vec![false; 1 << select_bits];
    outputs[index] = true;
    outputs
}

/// 4-to-2 priority encoder: outputs A0, A1 and the valid flag.
///
/// The highest-indexed asserted input wins.
pub(super) fn eval_priority_encoder(inputs: &[bool]) -> Vec<bool> {
    match (0..4).rev().find(|&i| bit(inputs, i)) {
        Some(index) => vec![index & 1 == 1, index & 2 == 2, true],
        None => vec![false, false, false],
    }
}
