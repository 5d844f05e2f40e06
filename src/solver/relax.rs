//! Bounded fixed-point relaxation.
//!
//! Each round copies source outputs onto wires, wire levels onto target
//! inputs, then evaluates every node once. Feedback loops are allowed; a
//! network that never settles stops after the round cap with whatever state
//! the last round produced.

use std::collections::HashMap;

use crate::circuit::{Network, Node, NodeId, Wire};

use super::MAX_ITERATIONS;

/// Outcome of one relaxation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelaxReport {
    /// Rounds executed, including the final stable one
    pub rounds: usize,
    /// Whether a round completed with no change
    pub converged: bool,
}

/// A wire resolved against node indices. Either half may be dead.
struct Link {
    wire: usize,
    source: Option<(usize, usize)>,
    target: Option<(usize, usize)>,
}

fn resolve(nodes: &[Node], wires: &[Wire]) -> Vec<Link> {
    let mut index: HashMap<&NodeId, usize> = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        index.entry(&node.id).or_insert(i);
    }

    wires
        .iter()
        .enumerate()
        .map(|(w, wire)| {
            let source = index
                .get(&wire.source_node_id)
                .filter(|&&n| wire.source_output_index < nodes[n].outputs.len())
                .map(|&n| (n, wire.source_output_index));
            let target = index
                .get(&wire.target_node_id)
                .filter(|&&n| wire.target_input_index < nodes[n].inputs.len())
                .map(|&n| (n, wire.target_input_index));
            if source.is_none() || target.is_none() {
                log::trace!("wire {} has a dead endpoint", wire.id);
            }
            Link { wire: w, source, target }
        })
        .collect()
}

/// Keep one driver per input port: the last wire in list order.
fn last_drivers(links: &[Link]) -> Vec<(usize, usize, usize)> {
    let mut drivers: HashMap<(usize, usize), usize> = HashMap::new();
    for link in links {
        if let Some(port) = link.target {
            drivers.insert(port, link.wire);
        }
    }
    let mut drivers: Vec<(usize, usize, usize)> = drivers
        .into_iter()
        .map(|((node, input), wire)| (wire, node, input))
        .collect();
    drivers.sort_unstable();
    drivers
}

/// Settle `network` in place, running at most `max_iterations` rounds.
pub fn relax(network: &mut Network, max_iterations: usize) -> RelaxReport {
    network.normalize();

    let Network { nodes, wires } = network;
    let links = resolve(nodes, wires);
    let drivers = last_drivers(&links);

    for round in 1..=max_iterations {
        let mut changed = false;

        for link in &links {
            if let Some((node, output)) = link.source {
                let level = nodes[node].outputs[output];
                let wire = &mut wires[link.wire];
                if wire.state != level {
                    wire.state = level;
                    changed = true;
                }
            }
        }

        for &(wire, node, input) in &drivers {
            let level = wires[wire].state;
            let slot = &mut nodes[node].inputs[input];
            if *slot != level {
                *slot = level;
                changed = true;
            }
        }

        for node in nodes.iter_mut() {
            changed |= node.evaluate();
        }

        log::trace!("relaxation round {}: changed={}", round, changed);

        if !changed {
            log::debug!("network settled after {} round(s)", round);
            return RelaxReport {
                rounds: round,
                converged: true,
            };
        }
    }

    log::debug!("network did not settle within {} rounds", max_iterations);
    RelaxReport {
        rounds: max_iterations,
        converged: false,
    }
}

/// Evaluate a node and wire list, returning the settled copies.
pub fn evaluate(nodes: &[Node], wires: &[Wire]) -> (Vec<Node>, Vec<Wire>) {
    let mut network = Network::from_parts(nodes.to_vec(), wires.to_vec());
    relax(&mut network, MAX_ITERATIONS);
    (network.nodes, network.wires)
}

/// Evaluate a whole network, returning the settled copy.
pub fn evaluate_network(network: &Network) -> Network {
    let mut settled = network.clone();
    relax(&mut settled, MAX_ITERATIONS);
    settled
}
