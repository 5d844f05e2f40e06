//! RAM and ROM address/data decoding.
//!
//! Memory nodes pack their inputs as:
//!
//! ```text
//! RAM: A0 .. A(a-1) | D0 .. D(d-1) | WE | CS
//! ROM: A0 .. A(a-1) | CS
//! ```
//!
//! with address and data fields LSB-first. Writes take effect in the same
//! evaluation that sees WE and CS high, so the read that follows returns the
//! freshly written word.

use super::{bit, NodeState};

/// Address and data widths of a memory kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamGeometry {
    pub address_bits: usize,
    pub data_bits: usize,
}

impl RamGeometry {
    pub const fn new(address_bits: usize, data_bits: usize) -> Self {
        Self {
            address_bits,
            data_bits,
        }
    }

    /// Number of addressable words.
    pub fn words(&self) -> usize {
        1 << self.address_bits
    }

    /// Input arity of a RAM with this geometry.
    pub fn input_count(&self) -> usize {
        self.address_bits + self.data_bits + 2
    }

    fn data_mask(&self) -> u32 {
        if self.data_bits >= 32 {
            u32::MAX
        } else {
            (1u32 << self.data_bits) - 1
        }
    }
}

/// Decode `width` inputs starting at `start` as an unsigned LSB-first value.
pub(crate) fn decode_field(inputs: &[bool], start: usize, width: usize) -> u32 {
    (0..width)
        .filter(|&i| bit(inputs, start + i))
        .fold(0, |acc, i| acc | (1 << i))
}

/// Expand the low `width` bits of `value`, LSB first.
pub(crate) fn encode_word(value: u32, width: usize) -> Vec<bool> {
    (0..width).map(|i| i < 32 && (value >> i) & 1 == 1).collect()
}

/// Evaluate a RAM node against its word array.
pub(super) fn eval_ram(geometry: RamGeometry, inputs: &[bool], state: &mut NodeState) -> Vec<bool> {
    let a = geometry.address_bits;
    let d = geometry.data_bits;
    let write_enable = bit(inputs, a + d);
    let chip_select = bit(inputs, a + d + 1);

    if !chip_select {
        return vec![false; d];
    }

    let NodeState::Memory { words } = state else {
        return vec![false; d];
    };
    if words.len() != geometry.words() {
        words.resize(geometry.words(), 0);
    }

    let address = decode_field(inputs, 0, a) as usize;
    if write_enable {
        words[address] = decode_field(inputs, a, d) & geometry.data_mask();
    }
    encode_word(words[address], d)
}

/// Evaluate a ROM node. `contents` maps an address to its fixed word.
pub(super) fn eval_rom(
    geometry: RamGeometry,
    inputs: &[bool],
    contents: impl Fn(usize) -> u32,
) -> Vec<bool> {
    let a = geometry.address_bits;
    if !bit(inputs, a) {
        return vec![false; geometry.data_bits];
    }
    let address = decode_field(inputs, 0, a) as usize;
    encode_word(contents(address), geometry.data_bits)
}
