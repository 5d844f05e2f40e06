//! Component semantics table.
//!
//! This module provides the closed catalogue of component kinds and the
//! evaluation function that maps a kind, its current input vector, its
//! internal state and its configuration to a new output vector:
//! - Gates: AND, OR, NAND, NOR, XOR, XNOR (variable fan-in), NOT, buffers
//! - Arithmetic: adders, subtractor, comparator, 4-bit ALU
//! - Plexers: multiplexers, demultiplexers, decoders, priority encoder
//! - Sequential: latches, flip-flops, shift register, counter, register
//! - Memory: RAM and ROM variants
//! - Sources and sinks: switches, clocks, constants, buses, displays
//!
//! Source kinds are never evaluated; their outputs are driven from outside
//! the engine (editor toggles, the tick driver).

mod arithmetic;
mod gates;
mod memory;
mod plexers;
mod sequential;
mod state;

pub use memory::RamGeometry;
pub(crate) use memory::encode_word;
pub use sequential::ClockEdge;
pub use state::{NodeState, StateFamily};

use serde::{Deserialize, Serialize};

use crate::circuit::NodeConfig;

/// Default fan-in of variable-arity gates.
pub const DEFAULT_GATE_INPUTS: usize = 2;

/// Largest fan-in the editor allows on variable-arity gates.
pub const MAX_GATE_INPUTS: usize = 8;

/// Default clock divider, in ticks per half period.
pub const DEFAULT_CLOCK_INTERVAL: u32 = 20;

/// Read input `index`, treating a missing slot as low.
pub(crate) fn bit(inputs: &[bool], index: usize) -> bool {
    inputs.get(index).copied().unwrap_or(false)
}

/// Every kind of component that can be placed in a network.
///
/// Serialized with the editor's SCREAMING_SNAKE_CASE type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    // Gates
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
    #[serde(rename = "NOT")]
    Not,
    #[serde(rename = "XOR")]
    Xor,
    #[serde(rename = "NAND")]
    Nand,
    #[serde(rename = "NOR")]
    Nor,
    #[serde(rename = "XNOR")]
    Xnor,
    #[serde(rename = "BUFFER")]
    Buffer,
    #[serde(rename = "TRI_STATE_BUFFER")]
    TriStateBuffer,

    // Sources
    #[serde(rename = "SWITCH", alias = "TOGGLE_SWITCH")]
    Switch,
    #[serde(rename = "BUTTON", alias = "PUSH_BUTTON")]
    Button,
    #[serde(rename = "CLOCK")]
    Clock,
    #[serde(rename = "CONSTANT_1", alias = "VCC")]
    Constant1,
    #[serde(rename = "CONSTANT_0", alias = "GND")]
    Constant0,
    #[serde(rename = "INPUT_2BIT")]
    Input2Bit,
    #[serde(rename = "INPUT_4BIT")]
    Input4Bit,
    #[serde(rename = "INPUT_8BIT")]
    Input8Bit,
    #[serde(rename = "INPUT_16BIT")]
    Input16Bit,

    // Sinks
    #[serde(rename = "BULB")]
    Bulb,
    #[serde(rename = "LOGIC_PROBE")]
    LogicProbe,
    #[serde(rename = "HEX_DISPLAY")]
    HexDisplay,
    #[serde(rename = "SEVEN_SEGMENT")]
    SevenSegment,
    #[serde(rename = "OUTPUT_2BIT")]
    Output2Bit,
    #[serde(rename = "OUTPUT_4BIT")]
    Output4Bit,
    #[serde(rename = "OUTPUT_8BIT")]
    Output8Bit,
    #[serde(rename = "OUTPUT_16BIT")]
    Output16Bit,
    #[serde(rename = "BINARY_MONITOR_4BIT")]
    BinaryMonitor4Bit,
    #[serde(rename = "BINARY_MONITOR_8BIT")]
    BinaryMonitor8Bit,

    // Arithmetic
    #[serde(rename = "HALF_ADDER")]
    HalfAdder,
    #[serde(rename = "FULL_ADDER")]
    FullAdder,
    #[serde(rename = "SUBTRACTOR")]
    Subtractor,
    #[serde(rename = "COMPARATOR_1BIT")]
    Comparator1Bit,
    #[serde(rename = "ALU_4BIT")]
    Alu4Bit,

    // Plexers
    #[serde(rename = "MUX_2_1")]
    Mux2To1,
    #[serde(rename = "MUX_4_1")]
    Mux4To1,
    #[serde(rename = "MUX_8_1")]
    Mux8To1,
    #[serde(rename = "DEMUX_1_2")]
    Demux1To2,
    #[serde(rename = "DEMUX_1_4")]
    Demux1To4,
    #[serde(rename = "DEMUX_1_8")]
    Demux1To8,
    #[serde(rename = "DEMUX_1_16")]
    Demux1To16,
    #[serde(rename = "DECODER_2_4")]
    Decoder2To4,
    #[serde(rename = "DECODER_3_8")]
    Decoder3To8,
    #[serde(rename = "PRIORITY_ENCODER_4_2")]
    PriorityEncoder4To2,

    // Latches and flip-flops
    #[serde(rename = "D_LATCH")]
    DLatch,
    #[serde(rename = "GATED_SR_LATCH")]
    GatedSrLatch,
    #[serde(rename = "D_FF")]
    DFlipFlop,
    #[serde(rename = "T_FF")]
    TFlipFlop,
    #[serde(rename = "JK_FF")]
    JkFlipFlop,
    #[serde(rename = "SR_FF")]
    SrFlipFlop,
    #[serde(rename = "JK_MASTER_SLAVE")]
    JkMasterSlave,
    #[serde(rename = "SHIFT_REGISTER_4BIT")]
    ShiftRegister4Bit,
    #[serde(rename = "COUNTER_4BIT")]
    Counter4Bit,
    #[serde(rename = "REG_4BIT")]
    Register4Bit,

    // Memory
    #[serde(rename = "RAM_1BIT", alias = "MEMORY_CELL")]
    Ram1Bit,
    #[serde(rename = "RAM_4BIT")]
    Ram4Bit,
    #[serde(rename = "RAM_8BIT")]
    Ram8Bit,
    #[serde(rename = "RAM_16BIT")]
    Ram16Bit,
    #[serde(rename = "RAM_64_8")]
    Ram64x8,
    #[serde(rename = "RAM_256_8")]
    Ram256x8,
    #[serde(rename = "RAM_64BIT")]
    Ram64Bit,
    #[serde(rename = "RAM_128BIT")]
    Ram128Bit,
    #[serde(rename = "RAM_256BIT")]
    Ram256Bit,
    #[serde(rename = "ROM_1BIT")]
    Rom1Bit,
    #[serde(rename = "ROM_4BIT")]
    Rom4Bit,
    #[serde(rename = "ROM_8BIT")]
    Rom8Bit,

    #[serde(rename = "JUNCTION")]
    Junction,
}

impl ComponentKind {
    /// Kinds whose outputs are driven externally and never evaluated.
    pub fn is_source(&self) -> bool {
        use ComponentKind::*;
        matches!(
            self,
            Switch | Button | Clock | Constant1 | Constant0 | Input2Bit | Input4Bit | Input8Bit | Input16Bit
        )
    }

    /// Kinds exempt from the floating-input check.
    pub fn skips_validation(&self) -> bool {
        self.is_source() || *self == ComponentKind::Junction
    }

    /// Gates whose fan-in is taken from the node configuration.
    pub fn is_variable_arity(&self) -> bool {
        use ComponentKind::*;
        matches!(self, And | Or | Nand | Nor | Xor | Xnor)
    }

    /// The level a constant source always drives.
    pub fn fixed_level(&self) -> Option<bool> {
        match self {
            ComponentKind::Constant1 => Some(true),
            ComponentKind::Constant0 => Some(false),
            _ => None,
        }
    }

    /// Width of a multi-bit bus input or output.
    pub fn bus_width(&self) -> Option<usize> {
        use ComponentKind::*;
        match self {
            Input2Bit | Output2Bit => Some(2),
            Input4Bit | Output4Bit => Some(4),
            Input8Bit | Output8Bit => Some(8),
            Input16Bit | Output16Bit => Some(16),
            _ => None,
        }
    }

    pub fn is_bus_input(&self) -> bool {
        self.is_source() && self.bus_width().is_some()
    }

    pub fn is_bus_output(&self) -> bool {
        !self.is_source() && self.bus_width().is_some()
    }

    /// The bus kind of the same direction with a different width.
    pub fn with_bus_width(&self, width: usize) -> Option<ComponentKind> {
        use ComponentKind::*;
        if self.is_bus_input() {
            match width {
                2 => Some(Input2Bit),
                4 => Some(Input4Bit),
                8 => Some(Input8Bit),
                16 => Some(Input16Bit),
                _ => None,
            }
        } else if self.is_bus_output() {
            match width {
                2 => Some(Output2Bit),
                4 => Some(Output4Bit),
                8 => Some(Output8Bit),
                16 => Some(Output16Bit),
                _ => None,
            }
        } else {
            None
        }
    }

    /// Address and data widths of RAM and ROM kinds.
    pub fn memory_geometry(&self) -> Option<RamGeometry> {
        use ComponentKind::*;
        match self {
            Ram1Bit => Some(RamGeometry::new(0, 1)),
            Ram4Bit => Some(RamGeometry::new(4, 4)),
            Ram8Bit => Some(RamGeometry::new(4, 8)),
            Ram16Bit => Some(RamGeometry::new(4, 16)),
            Ram64x8 => Some(RamGeometry::new(6, 8)),
            Ram256x8 => Some(RamGeometry::new(8, 8)),
            Ram64Bit => Some(RamGeometry::new(3, 8)),
            Ram128Bit => Some(RamGeometry::new(4, 8)),
            Ram256Bit => Some(RamGeometry::new(5, 8)),
            Rom1Bit => Some(RamGeometry::new(0, 1)),
            Rom4Bit => Some(RamGeometry::new(4, 4)),
            Rom8Bit => Some(RamGeometry::new(4, 8)),
            _ => None,
        }
    }

    pub fn is_rom(&self) -> bool {
        use ComponentKind::*;
        matches!(self, Rom1Bit | Rom4Bit | Rom8Bit)
    }

    pub fn is_ram(&self) -> bool {
        !self.is_rom() && self.memory_geometry().is_some()
    }

    /// Number of select lines on a multiplexer, demultiplexer or decoder.
    fn select_bits(&self) -> Option<usize> {
        use ComponentKind::*;
        match self {
            Mux2To1 | Demux1To2 => Some(1),
            Mux4To1 | Demux1To4 | Decoder2To4 => Some(2),
            Mux8To1 | Demux1To8 | Decoder3To8 => Some(3),
            Demux1To16 => Some(4),
            _ => None,
        }
    }

    /// Input arity before any per-node configuration.
    pub fn default_input_count(&self) -> usize {
        use ComponentKind::*;
        if let Some(geometry) = self.memory_geometry() {
            return if self.is_rom() {
                geometry.address_bits + 1
            } else {
                geometry.input_count()
            };
        }
        if let Some(width) = self.bus_width() {
            return if self.is_source() { 0 } else { width };
        }
        match self {
            And | Or | Nand | Nor | Xor | Xnor => DEFAULT_GATE_INPUTS,
            Not | Buffer | Junction | Bulb | LogicProbe => 1,
            TriStateBuffer => 2,
            Switch | Button | Clock | Constant1 | Constant0 => 0,
            HexDisplay | BinaryMonitor4Bit => 4,
            SevenSegment | BinaryMonitor8Bit => 8,
            HalfAdder | Subtractor | Comparator1Bit => 2,
            FullAdder => 3,
            Alu4Bit => 10,
            Mux2To1 | Mux4To1 | Mux8To1 => {
                let k = self.select_bits().unwrap_or(0);
                (1 << k) + k
            }
            Demux1To2 | Demux1To4 | Demux1To8 | Demux1To16 => 1 + self.select_bits().unwrap_or(0),
            Decoder2To4 | Decoder3To8 => self.select_bits().unwrap_or(0),
            PriorityEncoder4To2 => 4,
            DLatch | DFlipFlop | TFlipFlop => 2,
            GatedSrLatch | JkFlipFlop | SrFlipFlop | JkMasterSlave => 3,
            ShiftRegister4Bit | Counter4Bit => 2,
            Register4Bit => 5,
            // Bus and memory kinds returned above.
            _ => 0,
        }
    }

    /// Input arity of a node of this kind with the given configuration.
    pub fn input_count(&self, config: &NodeConfig) -> usize {
        if self.is_variable_arity() {
            config
                .input_count
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_GATE_INPUTS)
        } else {
            self.default_input_count()
        }
    }

    /// Output arity of a node of this kind.
    pub fn output_count(&self) -> usize {
        use ComponentKind::*;
        if let Some(geometry) = self.memory_geometry() {
            return geometry.data_bits;
        }
        if let Some(width) = self.bus_width() {
            return if self.is_source() { width } else { 0 };
        }
        match self {
            Bulb | LogicProbe | HexDisplay | SevenSegment | BinaryMonitor4Bit | BinaryMonitor8Bit => 0,
            HalfAdder | FullAdder | Subtractor => 2,
            Comparator1Bit => 3,
            Alu4Bit => 6,
            Demux1To2 | Demux1To4 | Demux1To8 | Demux1To16 | Decoder2To4 | Decoder3To8 => {
                1 << self.select_bits().unwrap_or(0)
            }
            PriorityEncoder4To2 => 3,
            DLatch | GatedSrLatch | DFlipFlop | TFlipFlop | JkFlipFlop | SrFlipFlop | JkMasterSlave => 2,
            ShiftRegister4Bit | Counter4Bit | Register4Bit => 4,
            _ => 1,
        }
    }

    /// Which internal-state record this kind reads and writes.
    pub fn state_family(&self) -> StateFamily {
        use ComponentKind::*;
        match self {
            DLatch | GatedSrLatch => StateFamily::Latch,
            DFlipFlop | TFlipFlop | JkFlipFlop | SrFlipFlop | JkMasterSlave => StateFamily::FlipFlop,
            ShiftRegister4Bit => StateFamily::Shift,
            Register4Bit => StateFamily::Register,
            Counter4Bit => StateFamily::Counter,
            Clock => StateFamily::Clock,
            k if k.is_ram() => StateFamily::Memory,
            _ => StateFamily::Stateless,
        }
    }

    /// Power-on internal state.
    pub fn initial_state(&self, config: &NodeConfig) -> NodeState {
        match self.state_family() {
            StateFamily::Stateless => NodeState::Stateless,
            StateFamily::Latch => NodeState::Latch {
                stored: config.initial_state,
            },
            StateFamily::FlipFlop => NodeState::FlipFlop {
                last_clock: false,
                stored: config.initial_state,
            },
            StateFamily::Shift => NodeState::Shift {
                last_clock: false,
                bits: [false; 4],
            },
            StateFamily::Register => NodeState::Register {
                last_clock: false,
                bits: [false; 4],
            },
            StateFamily::Counter => NodeState::Counter {
                last_clock: false,
                value: 0,
            },
            StateFamily::Memory => NodeState::Memory {
                words: vec![0; self.memory_geometry().map_or(1, |g| g.words())],
            },
            StateFamily::Clock => NodeState::Clock { tick_count: 0 },
        }
    }

    /// Human-readable name used in validation messages.
    pub fn display_name(&self) -> &'static str {
        use ComponentKind::*;
        match self {
            And => "AND",
            Or => "OR",
            Not => "NOT",
            Xor => "XOR",
            Nand => "NAND",
            Nor => "NOR",
            Xnor => "XNOR",
            Buffer => "Buffer",
            TriStateBuffer => "Tri-State Buffer",
            Switch => "Switch",
            Button => "Button",
            Clock => "Clock",
            Constant1 => "Const 1",
            Constant0 => "Const 0",
            Input2Bit => "Input 2-Bit",
            Input4Bit => "Input 4-Bit",
            Input8Bit => "Input 8-Bit",
            Input16Bit => "Input 16-Bit",
            Bulb => "LED",
            LogicProbe => "Logic Probe",
            HexDisplay => "Hex Display",
            SevenSegment => "7-Segment",
            Output2Bit => "Out 2-Bit",
            Output4Bit => "Out 4-Bit",
            Output8Bit => "Out 8-Bit",
            Output16Bit => "Out 16-Bit",
            BinaryMonitor4Bit => "Bin Monitor 4b",
            BinaryMonitor8Bit => "Bin Monitor 8b",
            HalfAdder => "Half Adder",
            FullAdder => "Full Adder",
            Subtractor => "Subtractor",
            Comparator1Bit => "Comparator",
            Alu4Bit => "ALU 4-Bit",
            Mux2To1 => "Mux 2:1",
            Mux4To1 => "Mux 4:1",
            Mux8To1 => "Mux 8:1",
            Demux1To2 => "Demux 1:2",
            Demux1To4 => "Demux 1:4",
            Demux1To8 => "Demux 1:8",
            Demux1To16 => "Demux 1:16",
            Decoder2To4 => "Decoder 2:4",
            Decoder3To8 => "Decoder 3:8",
            PriorityEncoder4To2 => "Prio Encoder",
            DLatch => "D-Latch",
            GatedSrLatch => "Gated SR Latch",
            DFlipFlop => "D Flip-Flop",
            TFlipFlop => "T Flip-Flop",
            JkFlipFlop => "J-K Flip-Flop",
            SrFlipFlop => "S-R Flip-Flop",
            JkMasterSlave => "JK Master-Slave",
            ShiftRegister4Bit => "Shift Reg 4-Bit",
            Counter4Bit => "Counter 4-Bit",
            Register4Bit => "Register 4-Bit",
            Ram1Bit => "RAM 1-Bit",
            Ram4Bit => "RAM 16x4",
            Ram8Bit => "RAM 16x8",
            Ram16Bit => "RAM 16x16",
            Ram64x8 => "RAM 64x8",
            Ram256x8 => "RAM 256x8",
            Ram64Bit => "RAM 8x8",
            Ram128Bit => "RAM 16x8 (128b)",
            Ram256Bit => "RAM 32x8",
            Rom1Bit => "ROM 1-Bit",
            Rom4Bit => "ROM 16x4",
            Rom8Bit => "ROM 16x8",
            Junction => "Junction",
        }
    }

    /// Cosmetic label of input `index`, where the kind defines one.
    pub fn input_label(&self, index: usize) -> Option<String> {
        use ComponentKind::*;
        let fixed: &[&str] = match self {
            TriStateBuffer => &["In", "En"],
            HalfAdder | Subtractor | Comparator1Bit => &["A", "B"],
            FullAdder => &["A", "B", "Cin"],
            DLatch => &["D", "En"],
            GatedSrLatch => &["S", "En", "R"],
            DFlipFlop => &["D", "Clk"],
            TFlipFlop => &["T", "Clk"],
            JkFlipFlop | JkMasterSlave => &["J", "Clk", "K"],
            SrFlipFlop => &["S", "Clk", "R"],
            ShiftRegister4Bit => &["D", "Clk"],
            Counter4Bit => &["Clk", "Rst"],
            Register4Bit => &["D0", "D1", "D2", "D3", "Clk"],
            PriorityEncoder4To2 => &["0", "1", "2", "3"],
            HexDisplay => &["1", "2", "4", "8"],
            SevenSegment => &["a", "b", "c", "d", "e", "f", "g", "dp"],
            Ram1Bit => &["D", "W", "Sel"],
            Rom1Bit => &["Sel"],
            _ => &[],
        };
        if !fixed.is_empty() {
            return fixed.get(index).map(|s| s.to_string());
        }

        if let Some(geometry) = self.memory_geometry() {
            let a = geometry.address_bits;
            let d = geometry.data_bits;
            return match index {
                i if i < a => Some(format!("A{}", i)),
                i if self.is_rom() && i == a => Some("CS".to_string()),
                _ if self.is_rom() => None,
                i if i < a + d => Some(format!("D{}", i - a)),
                i if i == a + d => Some("WE".to_string()),
                i if i == a + d + 1 => Some("CS".to_string()),
                _ => None,
            };
        }

        if let Some(k) = self.select_bits() {
            let data = match self {
                Mux2To1 | Mux4To1 | Mux8To1 => 1 << k,
                Demux1To2 | Demux1To4 | Demux1To8 | Demux1To16 => 1,
                _ => 0,
            };
            return match index {
                i if i < data && data == 1 => Some("D".to_string()),
                i if i < data => Some(i.to_string()),
                i if i < data + k => Some(format!("S{}", i - data)),
                _ => None,
            };
        }

        match self {
            Alu4Bit => match index {
                0..=3 => Some(format!("A{}", index)),
                4..=7 => Some(format!("B{}", index - 4)),
                8 | 9 => Some(format!("Op{}", index - 8)),
                _ => None,
            },
            k if k.is_bus_output() || matches!(k, BinaryMonitor4Bit | BinaryMonitor8Bit) => {
                (index < k.default_input_count()).then(|| index.to_string())
            }
            _ => None,
        }
    }
}

/// Evaluate one node.
///
/// Returns the new output vector, updating `state` in place, or `None` for
/// source kinds whose outputs are driven externally. A state record that
/// does not belong to the kind is replaced by the kind's power-on state
/// first.
pub fn evaluate(
    kind: ComponentKind,
    inputs: &[bool],
    state: &mut NodeState,
    config: &NodeConfig,
) -> Option<Vec<bool>> {
    use ComponentKind::*;

    if kind.is_source() {
        return None;
    }
    if state.family() != kind.state_family() {
        *state = kind.initial_state(config);
    }

    let outputs = match kind {
        And | Or | Nand | Nor | Xor | Xnor | Not | Buffer | TriStateBuffer => {
            gates::eval_gate(kind, inputs)
        }
        Junction => vec![bit(inputs, 0)],
        HalfAdder | FullAdder | Subtractor | Comparator1Bit => arithmetic::eval_bitwise(kind, inputs),
        Alu4Bit => arithmetic::eval_alu(inputs),
        Mux2To1 | Mux4To1 | Mux8To1 => {
            plexers::eval_mux(kind.select_bits().unwrap_or(0), inputs)
        }
        Demux1To2 | Demux1To4 | Demux1To8 | Demux1To16 => {
            plexers::eval_demux(kind.select_bits().unwrap_or(0), inputs)
        }
        Decoder2To4 | Decoder3To8 => plexers::eval_decoder(kind.select_bits().unwrap_or(0), inputs),
        PriorityEncoder4To2 => plexers::eval_priority_encoder(inputs),
        DLatch | GatedSrLatch => sequential::eval_latch(kind, inputs, state),
        DFlipFlop | TFlipFlop | JkFlipFlop | SrFlipFlop | JkMasterSlave => {
            sequential::eval_flip_flop(kind, inputs, state)
        }
        ShiftRegister4Bit => sequential::eval_shift_register(inputs, state),
        Counter4Bit => sequential::eval_counter(inputs, state),
        Register4Bit => sequential::eval_register(inputs, state),
        Rom1Bit => memory::eval_rom(RamGeometry::new(0, 1), inputs, |_| u32::from(config.rom_value)),
        Rom4Bit | Rom8Bit => {
            let geometry = kind.memory_geometry().unwrap_or(RamGeometry::new(4, 4));
            memory::eval_rom(geometry, inputs, |address| {
                config.rom_data.get(address).copied().unwrap_or(0)
            })
        }
        k if k.is_ram() => {
            let geometry = k.memory_geometry().unwrap_or(RamGeometry::new(0, 1));
            memory::eval_ram(geometry, inputs, state)
        }
        // Sinks only display their inputs.
        _ => Vec::new(),
    };

    Some(outputs)
}
