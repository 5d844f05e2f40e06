//! Network graph structure and editor operations.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::{NodeConfig, NodeId, PortRef, Position, WireId};
use crate::components::{self, encode_word, ComponentKind, NodeState, StateFamily, MAX_GATE_INPUTS};
use crate::error::{LogicError, PortDirection, Result};

/// A placed component instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "NodeRecord")]
pub struct Node {
    /// Unique id within the network
    pub id: NodeId,
    /// Component kind
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// Canvas position (ignored by the engine)
    #[serde(default)]
    pub position: Position,
    /// Current input levels, one per input port
    #[serde(default)]
    pub inputs: Vec<bool>,
    /// Current output levels, one per output port
    #[serde(default)]
    pub outputs: Vec<bool>,
    /// Kind-specific internal state
    #[serde(rename = "internalState")]
    pub state: NodeState,
    /// Kind-specific configuration
    #[serde(default, rename = "properties")]
    pub config: NodeConfig,
}

/// On-disk shape of a node. `internalState` is either this crate's tagged
/// record or the editor's untyped map.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeRecord {
    id: NodeId,
    #[serde(rename = "type")]
    kind: ComponentKind,
    #[serde(default)]
    position: Position,
    #[serde(default)]
    inputs: Vec<bool>,
    #[serde(default)]
    outputs: Vec<bool>,
    #[serde(default)]
    internal_state: Option<StateRecord>,
    #[serde(default)]
    properties: NodeConfig,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StateRecord {
    Tagged(NodeState),
    Editor(EditorState),
    Other(serde::de::IgnoredAny),
}

/// The editor's `internalState` map. Latches and flip-flops keep Q in
/// `outputs[0]` rather than here.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EditorState {
    last_clock: Option<bool>,
    stored_value: Option<bool>,
    register: Option<Vec<bool>>,
    counter_value: Option<u32>,
    memory: Option<Vec<u32>>,
    tick_count: Option<u32>,
}

impl EditorState {
    fn into_state(self, kind: ComponentKind, config: &NodeConfig, outputs: &[bool]) -> NodeState {
        let last_clock = self.last_clock.unwrap_or(false);
        let stored = outputs.first().copied().unwrap_or(config.initial_state);
        let mut bits = [false; 4];
        for (slot, v) in bits.iter_mut().zip(self.register.unwrap_or_default()) {
            *slot = v;
        }

        match kind.state_family() {
            StateFamily::Stateless => NodeState::Stateless,
            StateFamily::Latch => NodeState::Latch { stored },
            StateFamily::FlipFlop => NodeState::FlipFlop { last_clock, stored },
            StateFamily::Shift => NodeState::Shift { last_clock, bits },
            StateFamily::Register => NodeState::Register { last_clock, bits },
            StateFamily::Counter => NodeState::Counter {
                last_clock,
                value: (self.counter_value.unwrap_or(0) % 16) as u8,
            },
            StateFamily::Memory => {
                let mut words = match (self.memory, self.stored_value) {
                    (Some(words), _) => words,
                    (None, Some(bit)) => vec![u32::from(bit)],
                    (None, None) => return kind.initial_state(config),
                };
                words.resize(kind.memory_geometry().map_or(1, |g| g.words()), 0);
                NodeState::Memory { words }
            }
            StateFamily::Clock => NodeState::Clock {
                tick_count: self.tick_count.unwrap_or(0),
            },
        }
    }
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        let state = match record.internal_state {
            Some(StateRecord::Tagged(state)) => state,
            Some(StateRecord::Editor(editor)) => {
                editor.into_state(record.kind, &record.properties, &record.outputs)
            }
            Some(StateRecord::Other(_)) | None => {
                EditorState::default().into_state(record.kind, &record.properties, &record.outputs)
            }
        };
        Self {
            id: record.id,
            kind: record.kind,
            position: record.position,
            inputs: record.inputs,
            outputs: record.outputs,
            state,
            config: record.properties,
        }
    }
}

impl Node {
    /// Create a node with default configuration.
    pub fn new(id: impl Into<NodeId>, kind: ComponentKind) -> Self {
        Self::with_config(id, kind, NodeConfig::default())
    }

    /// Create a node with the given configuration, its ports sized to the
    /// kind's arity and its state at power-on.
    pub fn with_config(id: impl Into<NodeId>, kind: ComponentKind, config: NodeConfig) -> Self {
        let mut node = Self {
            id: id.into(),
            kind,
            position: Position::default(),
            inputs: vec![false; kind.input_count(&config)],
            outputs: vec![false; kind.output_count()],
            state: kind.initial_state(&config),
            config,
        };
        if let Some(level) = kind.fixed_level() {
            node.outputs.fill(level);
        }
        if let Some(q) = node.state.stored_bit() {
            node.outputs = vec![q, !q];
        }
        node
    }

    /// Place the node at a canvas position.
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn input_count(&self) -> usize {
        self.kind.input_count(&self.config)
    }

    pub fn output_count(&self) -> usize {
        self.kind.output_count()
    }

    /// The user label, or the kind's display name.
    pub fn display_label(&self) -> &str {
        self.config.label().unwrap_or(self.kind.display_name())
    }

    /// Restore the arity and state invariants after a deserialization or an
    /// external edit. Returns whether anything was changed.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;
        let inputs = self.input_count();
        if self.inputs.len() != inputs {
            self.inputs.resize(inputs, false);
            changed = true;
        }
        let outputs = self.output_count();
        if self.outputs.len() != outputs {
            self.outputs.resize(outputs, false);
            changed = true;
        }
        if self.state.family() != self.kind.state_family() {
            self.state = self.kind.initial_state(&self.config);
            changed = true;
        }
        changed
    }

    /// Run the semantics table for this node, writing outputs and state back.
    ///
    /// Returns whether any output or state changed. Constants re-assert their
    /// level; other sources are left untouched.
    pub fn evaluate(&mut self) -> bool {
        if let Some(level) = self.kind.fixed_level() {
            let changed = self.outputs.iter().any(|&v| v != level);
            self.outputs.fill(level);
            return changed;
        }

        let before = self.state.clone();
        let Some(outputs) = components::evaluate(self.kind, &self.inputs, &mut self.state, &self.config)
        else {
            return false;
        };

        let mut changed = before != self.state;
        if outputs != self.outputs {
            self.outputs = outputs;
            changed = true;
        }
        changed
    }
}

/// A directed single-bit connection from an output port to an input port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wire {
    pub id: WireId,
    pub source_node_id: NodeId,
    pub source_output_index: usize,
    pub target_node_id: NodeId,
    pub target_input_index: usize,
    /// Cached level of the source output
    #[serde(default)]
    pub state: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f32>,
}

impl Wire {
    /// Create a wire from `source` (an output) to `target` (an input).
    pub fn new(id: impl Into<WireId>, source: PortRef, target: PortRef) -> Self {
        Self {
            id: id.into(),
            source_node_id: source.node_id,
            source_output_index: source.index,
            target_node_id: target.node_id,
            target_input_index: target.index,
            state: false,
            color: None,
            thickness: None,
        }
    }

    pub fn source(&self) -> PortRef {
        PortRef::new(self.source_node_id.clone(), self.source_output_index)
    }

    pub fn target(&self) -> PortRef {
        PortRef::new(self.target_node_id.clone(), self.target_input_index)
    }

    fn touches(&self, node: &NodeId) -> bool {
        self.source_node_id == *node || self.target_node_id == *node
    }
}

/// A set of nodes and the wires between them, evaluated as a unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Network {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub wires: Vec<Wire>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network from existing node and wire lists.
    pub fn from_parts(nodes: Vec<Node>, wires: Vec<Wire>) -> Self {
        Self { nodes, wires }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == *id)
    }

    pub fn wire(&self, id: &WireId) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == *id)
    }

    fn require_node_mut(&mut self, id: &NodeId) -> Result<&mut Node> {
        self.node_mut(id).ok_or_else(|| LogicError::node_not_found(id))
    }

    /// Whether `port` names an existing output port.
    pub fn has_output(&self, port: &PortRef) -> bool {
        self.node(&port.node_id)
            .is_some_and(|n| port.index < n.outputs.len())
    }

    /// Whether `port` names an existing input port.
    pub fn has_input(&self, port: &PortRef) -> bool {
        self.node(&port.node_id)
            .is_some_and(|n| port.index < n.inputs.len())
    }

    /// A wire is live when both of its endpoints resolve.
    pub fn is_live(&self, wire: &Wire) -> bool {
        self.has_output(&wire.source()) && self.has_input(&wire.target())
    }

    /// Wires that target `port`, in wire-list order.
    pub fn drivers<'a>(&'a self, port: &'a PortRef) -> impl Iterator<Item = &'a Wire> + 'a {
        self.wires
            .iter()
            .filter(move |w| w.target_node_id == port.node_id && w.target_input_index == port.index)
    }

    fn fresh_id<'a>(prefix: &str, taken: impl Iterator<Item = &'a str>, start: usize) -> String {
        let taken: HashSet<&str> = taken.collect();
        let mut n = start;
        loop {
            let id = format!("{}-{}", prefix, n);
            if !taken.contains(id.as_str()) {
                return id;
            }
            n += 1;
        }
    }

    /// Place a new component and return its id.
    pub fn add_node(&mut self, kind: ComponentKind, position: Position) -> NodeId {
        let id = NodeId(Self::fresh_id(
            "node",
            self.nodes.iter().map(|n| n.id.as_str()),
            self.nodes.len() + 1,
        ));
        let mut config = NodeConfig::default();
        if kind == ComponentKind::Clock {
            config.interval = Some(components::DEFAULT_CLOCK_INTERVAL);
        }
        if kind.is_variable_arity() {
            config.input_count = Some(kind.default_input_count());
        }
        self.nodes
            .push(Node::with_config(id.clone(), kind, config).at(position));
        id
    }

    /// Delete a node together with every wire attached to it.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<Node> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == *id)
            .ok_or_else(|| LogicError::node_not_found(id))?;
        let node = self.nodes.remove(index);

        let before = self.wires.len();
        self.wires.retain(|w| !w.touches(id));
        log::debug!(
            "removed node {} and {} attached wire(s)",
            id,
            before - self.wires.len()
        );
        Ok(node)
    }

    /// Connect an output port to an input port.
    ///
    /// Refuses to give an input a second driver.
    pub fn connect(&mut self, source: PortRef, target: PortRef) -> Result<WireId> {
        let src = self
            .node(&source.node_id)
            .ok_or_else(|| LogicError::node_not_found(&source.node_id))?;
        if source.index >= src.outputs.len() {
            return Err(LogicError::port_out_of_range(
                &source.node_id,
                source.index,
                PortDirection::Output,
                src.outputs.len(),
            ));
        }

        let dst = self
            .node(&target.node_id)
            .ok_or_else(|| LogicError::node_not_found(&target.node_id))?;
        if target.index >= dst.inputs.len() {
            return Err(LogicError::port_out_of_range(
                &target.node_id,
                target.index,
                PortDirection::Input,
                dst.inputs.len(),
            ));
        }

        if self.drivers(&target).any(|w| self.has_output(&w.source())) {
            return Err(LogicError::InputAlreadyDriven {
                node: target.node_id,
                index: target.index,
            });
        }

        let id = WireId(Self::fresh_id(
            "wire",
            self.wires.iter().map(|w| w.id.0.as_str()),
            self.wires.len() + 1,
        ));
        self.wires.push(Wire::new(id.clone(), source, target));
        Ok(id)
    }

    /// Delete a wire.
    pub fn disconnect(&mut self, id: &WireId) -> Result<Wire> {
        let index = self
            .wires
            .iter()
            .position(|w| w.id == *id)
            .ok_or_else(|| LogicError::WireNotFound { wire: id.to_string() })?;
        Ok(self.wires.remove(index))
    }

    /// Drop wires attached to `id` whose port index no longer exists.
    fn prune_ports_of(&mut self, id: &NodeId) -> usize {
        let Some(node) = self.node(id) else {
            return 0;
        };
        let (inputs, outputs) = (node.inputs.len(), node.outputs.len());
        let before = self.wires.len();
        self.wires.retain(|w| {
            !((w.source_node_id == *id && w.source_output_index >= outputs)
                || (w.target_node_id == *id && w.target_input_index >= inputs))
        });
        let pruned = before - self.wires.len();
        if pruned > 0 {
            log::debug!("pruned {} wire(s) after resizing node {}", pruned, id);
        }
        pruned
    }

    /// Drop every wire whose source or target no longer resolves.
    pub fn prune_dead_wires(&mut self) -> usize {
        let live: Vec<bool> = self.wires.iter().map(|w| self.is_live(w)).collect();
        let before = self.wires.len();
        let mut flags = live.into_iter();
        self.wires.retain(|_| flags.next().unwrap_or(false));
        before - self.wires.len()
    }

    /// Change the fan-in of a variable-arity gate.
    pub fn set_input_count(&mut self, id: &NodeId, count: usize) -> Result<()> {
        let node = self.require_node_mut(id)?;
        if !node.kind.is_variable_arity() {
            return Err(LogicError::unsupported(id, node.kind, "resize the inputs of"));
        }
        if !(2..=MAX_GATE_INPUTS).contains(&count) {
            return Err(LogicError::InvalidInputCount {
                node: id.clone(),
                count,
            });
        }
        node.config.input_count = Some(count);
        node.inputs.resize(count, false);
        self.prune_ports_of(id);
        Ok(())
    }

    /// Change the width of a multi-bit bus input or output.
    pub fn set_bus_width(&mut self, id: &NodeId, width: usize) -> Result<()> {
        let node = self.require_node_mut(id)?;
        if node.kind.bus_width().is_none() {
            return Err(LogicError::unsupported(id, node.kind, "change the bus width of"));
        }
        let kind = node
            .kind
            .with_bus_width(width)
            .ok_or_else(|| LogicError::InvalidBusWidth {
                node: id.clone(),
                width,
            })?;
        node.kind = kind;
        node.normalize();
        self.prune_ports_of(id);
        Ok(())
    }

    /// Flip a switch or button.
    pub fn toggle(&mut self, id: &NodeId) -> Result<()> {
        let node = self.require_node_mut(id)?;
        match node.kind {
            ComponentKind::Switch | ComponentKind::Button => {
                node.normalize();
                node.outputs[0] = !node.outputs[0];
                Ok(())
            }
            kind => Err(LogicError::unsupported(id, kind, "toggle")),
        }
    }

    /// Flip one bit of a multi-bit bus input.
    pub fn toggle_bit(&mut self, id: &NodeId, bit: usize) -> Result<()> {
        let node = self.require_node_mut(id)?;
        if !node.kind.is_bus_input() {
            return Err(LogicError::unsupported(id, node.kind, "toggle a bit of"));
        }
        node_toggle_bit(node, bit)
    }

    /// Drive a multi-bit bus input with `value`, LSB on output 0.
    pub fn set_bus_value(&mut self, id: &NodeId, value: u32) -> Result<()> {
        let node = self.require_node_mut(id)?;
        let Some(width) = node.kind.bus_width().filter(|_| node.kind.is_bus_input()) else {
            return Err(LogicError::unsupported(id, node.kind, "set the value of"));
        };
        node.outputs = encode_word(value, width);
        Ok(())
    }

    /// Replace the contents of a word ROM.
    pub fn set_rom_contents(&mut self, id: &NodeId, words: Vec<u32>) -> Result<()> {
        let node = self.require_node_mut(id)?;
        if !matches!(node.kind, ComponentKind::Rom4Bit | ComponentKind::Rom8Bit) {
            return Err(LogicError::unsupported(id, node.kind, "program"));
        }
        node.config.rom_data = words;
        Ok(())
    }

    /// Set the stored bit of a 1-bit ROM.
    pub fn set_rom_value(&mut self, id: &NodeId, value: bool) -> Result<()> {
        let node = self.require_node_mut(id)?;
        if node.kind != ComponentKind::Rom1Bit {
            return Err(LogicError::unsupported(id, node.kind, "program"));
        }
        node.config.rom_value = value;
        Ok(())
    }

    /// Restore every node's arity and state invariants.
    pub fn normalize(&mut self) {
        for node in &mut self.nodes {
            if node.normalize() {
                log::debug!("normalized node {} ({:?})", node.id, node.kind);
            }
        }
    }
}

fn node_toggle_bit(node: &mut Node, bit: usize) -> Result<()> {
    node.normalize();
    let width = node.outputs.len();
    let slot = node.outputs.get_mut(bit).ok_or_else(|| {
        LogicError::port_out_of_range(&node.id, bit, PortDirection::Output, width)
    })?;
    *slot = !*slot;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn and_gate_network() -> (Network, NodeId, NodeId, NodeId) {
        let mut net = Network::new();
        let a = net.add_node(ComponentKind::Switch, Position::new(0.0, 0.0));
        let b = net.add_node(ComponentKind::Switch, Position::new(0.0, 40.0));
        let and = net.add_node(ComponentKind::And, Position::new(80.0, 20.0));
        net.connect(PortRef::new(a.clone(), 0), PortRef::new(and.clone(), 0))
            .unwrap();
        net.connect(PortRef::new(b.clone(), 0), PortRef::new(and.clone(), 1))
            .unwrap();
        (net, a, b, and)
    }

    #[test]
    fn test_add_node_sizes_ports() {
        let mut net = Network::new();
        let ram = net.add_node(ComponentKind::Ram8Bit, Position::default());
        let node = net.node(&ram).unwrap();
        assert_eq!(node.inputs.len(), 14);
        assert_eq!(node.outputs.len(), 8);
        assert_eq!(node.state, NodeState::Memory { words: vec![0; 16] });

        let vcc = net.add_node(ComponentKind::Constant1, Position::default());
        assert_eq!(net.node(&vcc).unwrap().outputs, vec![true]);

        let clk = net.add_node(ComponentKind::Clock, Position::default());
        assert_eq!(net.node(&clk).unwrap().config.interval, Some(20));
        assert_ne!(ram, vcc);
        assert_ne!(vcc, clk);
    }

    #[test]
    fn test_fresh_ids_skip_taken() {
        let mut net = Network::from_parts(vec![Node::new("node-1", ComponentKind::Not)], vec![]);
        let id = net.add_node(ComponentKind::Not, Position::default());
        assert_eq!(id.as_str(), "node-2");
        net.remove_node(&NodeId::from("node-1")).unwrap();
        let id = net.add_node(ComponentKind::Not, Position::default());
        assert_eq!(id.as_str(), "node-3");
    }

    #[test]
    fn test_remove_node_drops_wires() {
        let (mut net, a, _b, and) = and_gate_network();
        net.remove_node(&a).unwrap();
        assert_eq!(net.wires.len(), 1);
        net.remove_node(&and).unwrap();
        assert!(net.wires.is_empty());
        assert!(matches!(
            net.remove_node(&and),
            Err(LogicError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn test_connect_rejects_bad_ports() {
        let (mut net, a, _b, and) = and_gate_network();
        let err = net
            .connect(PortRef::new(a.clone(), 1), PortRef::new(and.clone(), 0))
            .unwrap_err();
        assert!(matches!(
            err,
            LogicError::PortOutOfRange {
                direction: PortDirection::Output,
                ..
            }
        ));

        let err = net
            .connect(PortRef::new(a.clone(), 0), PortRef::new(and.clone(), 2))
            .unwrap_err();
        assert!(matches!(err, LogicError::PortOutOfRange { index: 2, .. }));

        let err = net
            .connect(PortRef::new(a, 0), PortRef::new(and, 0))
            .unwrap_err();
        assert!(matches!(err, LogicError::InputAlreadyDriven { index: 0, .. }));
    }

    #[test]
    fn test_disconnect() {
        let (mut net, _a, _b, _and) = and_gate_network();
        let id = net.wires[0].id.clone();
        net.disconnect(&id).unwrap();
        assert!(net.wire(&id).is_none());
        assert!(net.disconnect(&id).is_err());
    }

    #[test]
    fn test_shrinking_gate_prunes_wires() {
        let (mut net, _a, _b, and) = and_gate_network();
        net.set_input_count(&and, 4).unwrap();
        assert_eq!(net.node(&and).unwrap().inputs.len(), 4);
        assert_eq!(net.wires.len(), 2);

        net.set_input_count(&and, 2).unwrap();
        assert_eq!(net.wires.len(), 2);

        let c = net.add_node(ComponentKind::Switch, Position::default());
        net.set_input_count(&and, 3).unwrap();
        net.connect(PortRef::new(c, 0), PortRef::new(and.clone(), 2))
            .unwrap();
        net.set_input_count(&and, 2).unwrap();
        assert_eq!(net.wires.len(), 2);
        assert!(net.wires.iter().all(|w| w.target_input_index < 2));

        assert!(matches!(
            net.set_input_count(&and, 9),
            Err(LogicError::InvalidInputCount { count: 9, .. })
        ));
    }

    #[test]
    fn test_resize_rejects_fixed_arity() {
        let mut net = Network::new();
        let not = net.add_node(ComponentKind::Not, Position::default());
        assert!(matches!(
            net.set_input_count(&not, 3),
            Err(LogicError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_bus_width_change_prunes_outputs() {
        let mut net = Network::new();
        let bus = net.add_node(ComponentKind::Input8Bit, Position::default());
        let probe = net.add_node(ComponentKind::Output8Bit, Position::default());
        for i in 0..8 {
            net.connect(PortRef::new(bus.clone(), i), PortRef::new(probe.clone(), i))
                .unwrap();
        }

        net.set_bus_width(&bus, 4).unwrap();
        assert_eq!(net.node(&bus).unwrap().kind, ComponentKind::Input4Bit);
        assert_eq!(net.node(&bus).unwrap().outputs.len(), 4);
        assert_eq!(net.wires.len(), 4);

        net.set_bus_width(&probe, 2).unwrap();
        assert_eq!(net.node(&probe).unwrap().kind, ComponentKind::Output2Bit);
        assert_eq!(net.wires.len(), 2);

        assert!(matches!(
            net.set_bus_width(&bus, 3),
            Err(LogicError::InvalidBusWidth { width: 3, .. })
        ));
    }

    #[test]
    fn test_toggle_and_bus_value() {
        let mut net = Network::new();
        let sw = net.add_node(ComponentKind::Switch, Position::default());
        net.toggle(&sw).unwrap();
        assert_eq!(net.node(&sw).unwrap().outputs, vec![true]);

        let bus = net.add_node(ComponentKind::Input4Bit, Position::default());
        net.set_bus_value(&bus, 0b1010).unwrap();
        assert_eq!(net.node(&bus).unwrap().outputs, vec![false, true, false, true]);
        net.toggle_bit(&bus, 0).unwrap();
        assert!(net.node(&bus).unwrap().outputs[0]);
        assert!(net.toggle_bit(&bus, 4).is_err());

        let and = net.add_node(ComponentKind::And, Position::default());
        assert!(net.toggle(&and).is_err());
    }

    #[test]
    fn test_toggle_rejects_bus_inputs() {
        let mut net = Network::new();
        let bus = net.add_node(ComponentKind::Input8Bit, Position::default());
        assert!(matches!(
            net.toggle(&bus),
            Err(LogicError::UnsupportedOperation { .. })
        ));
        assert_eq!(net.node(&bus).unwrap().outputs, vec![false; 8]);
    }

    #[test]
    fn test_prune_dead_wires() {
        let (mut net, a, _b, _and) = and_gate_network();
        // Simulate a stale snapshot: node gone, wire left behind
        net.nodes.retain(|n| n.id != a);
        assert_eq!(net.prune_dead_wires(), 1);
        assert_eq!(net.wires.len(), 1);
    }

    #[test]
    fn test_normalize_repairs_arity_and_state() {
        let mut node = Node::new("ff", ComponentKind::DFlipFlop);
        node.inputs.clear();
        node.state = NodeState::Memory { words: vec![] };
        assert!(node.normalize());
        assert_eq!(node.inputs.len(), 2);
        assert_eq!(node.state.family(), components::StateFamily::FlipFlop);
        assert!(!node.normalize());
    }

    #[test]
    fn test_initial_state_drives_outputs() {
        let config = NodeConfig {
            initial_state: true,
            ..NodeConfig::default()
        };
        let node = Node::with_config("latch", ComponentKind::DLatch, config);
        assert_eq!(node.outputs, vec![true, false]);
    }
}
