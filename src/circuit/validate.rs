//! Network validation.

use serde::Serialize;

use super::{Network, NodeId, PortRef};

/// Outcome of a floating-input check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when every checked input is driven
    pub ok: bool,
    /// One message per offending node, or a single summary line
    pub messages: Vec<String>,
    /// Nodes with at least one floating input, in node order
    pub offending_node_ids: Vec<NodeId>,
    /// Every floating input port
    pub offending_inputs: Vec<PortRef>,
}

impl ValidationResult {
    fn valid() -> Self {
        Self {
            ok: true,
            messages: vec!["All components are correctly connected.".to_string()],
            offending_node_ids: Vec::new(),
            offending_inputs: Vec::new(),
        }
    }

    fn invalid(message: String) -> Self {
        Self {
            ok: false,
            messages: vec![message],
            offending_node_ids: Vec::new(),
            offending_inputs: Vec::new(),
        }
    }
}

/// Check that every input of every non-source node is driven.
///
/// Sources and junctions are exempt. An input counts as driven only when a
/// live wire (both endpoints resolving) targets exactly that port.
pub fn validate(network: &Network) -> ValidationResult {
    if network.is_empty() {
        return ValidationResult::invalid("Circuit is empty.".to_string());
    }

    let mut result = ValidationResult::valid();
    result.messages.clear();

    for node in network.nodes.iter().filter(|n| !n.kind.skips_validation()) {
        let floating: Vec<PortRef> = (0..node.input_count())
            .map(|i| PortRef::new(node.id.clone(), i))
            .filter(|port| !network.drivers(port).any(|w| network.is_live(w)))
            .collect();

        if floating.is_empty() {
            continue;
        }
        result.ok = false;
        result
            .messages
            .push(format!("{}: Missing input connections.", node.display_label()));
        result.offending_node_ids.push(node.id.clone());
        result.offending_inputs.extend(floating);
    }

    if result.ok {
        return ValidationResult::valid();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Node, NodeConfig, Position, Wire};
    use crate::components::ComponentKind;

    #[test]
    fn test_empty_network_is_invalid() {
        let result = validate(&Network::new());
        assert!(!result.ok);
        assert_eq!(result.messages, vec!["Circuit is empty.".to_string()]);
    }

    #[test]
    fn test_half_wired_gate() {
        let mut net = Network::new();
        let sw = net.add_node(ComponentKind::Switch, Position::default());
        let and = net.add_node(ComponentKind::And, Position::default());
        net.connect(PortRef::new(sw, 0), PortRef::new(and.clone(), 0))
            .unwrap();

        let result = validate(&net);
        assert!(!result.ok);
        assert_eq!(result.offending_node_ids, vec![and.clone()]);
        assert_eq!(result.offending_inputs, vec![PortRef::new(and, 1)]);
        assert_eq!(result.messages, vec!["AND: Missing input connections.".to_string()]);
    }

    #[test]
    fn test_fully_wired_is_valid() {
        let mut net = Network::new();
        let sw = net.add_node(ComponentKind::Switch, Position::default());
        let junction = net.add_node(ComponentKind::Junction, Position::default());
        let not = net.add_node(ComponentKind::Not, Position::default());
        net.connect(PortRef::new(sw, 0), PortRef::new(not.clone(), 0))
            .unwrap();
        let bulb = net.add_node(ComponentKind::Bulb, Position::default());
        net.connect(PortRef::new(not, 0), PortRef::new(bulb, 0))
            .unwrap();

        // Junction has no driver but is exempt
        assert!(net.node(&junction).is_some());
        let result = validate(&net);
        assert!(result.ok);
        assert_eq!(
            result.messages,
            vec!["All components are correctly connected.".to_string()]
        );
    }

    #[test]
    fn test_dead_wire_does_not_drive() {
        let bulb = Node::new("bulb", ComponentKind::Bulb);
        let dangling = Wire::new("w", PortRef::new("gone", 0), PortRef::new("bulb", 0));
        let net = Network::from_parts(vec![bulb], vec![dangling]);

        let result = validate(&net);
        assert!(!result.ok);
        assert_eq!(result.offending_inputs, vec![PortRef::new("bulb", 0)]);
    }

    #[test]
    fn test_label_used_in_message() {
        let config = NodeConfig {
            label: Some("carry".to_string()),
            ..NodeConfig::default()
        };
        let net = Network::from_parts(
            vec![Node::with_config("fa", ComponentKind::FullAdder, config)],
            vec![],
        );
        let result = validate(&net);
        assert_eq!(result.messages, vec!["carry: Missing input connections.".to_string()]);
        assert_eq!(result.offending_inputs.len(), 3);
    }
}
