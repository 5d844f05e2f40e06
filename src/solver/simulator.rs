//! Tick driver: clocks, external source edits and history.

use std::collections::VecDeque;

use crate::circuit::{Network, Node, NodeId};
use crate::components::{ComponentKind, NodeState};
use crate::error::Result;

use super::relax::{relax, RelaxReport};
use super::{DEFAULT_HISTORY_DEPTH, MAX_ITERATIONS};

/// Configuration for the simulator.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Maximum relaxation rounds per settle.
    pub max_iterations: usize,
    /// Number of pre-tick snapshots kept for `step_back`.
    pub history_depth: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum relaxation rounds.
    ///
    /// Networks with feedback that never settle (ring oscillators) always
    /// run to this cap, so lower values trade fidelity for speed.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set how many ticks can be stepped back.
    pub fn with_history_depth(mut self, history_depth: usize) -> Self {
        self.history_depth = history_depth;
        self
    }
}

/// Advance a clock node by one tick. Returns whether its output toggled.
fn advance_clock(node: &mut Node) -> bool {
    let interval = node.config.clock_interval();
    let NodeState::Clock { tick_count } = &mut node.state else {
        return false;
    };

    *tick_count += 1;
    if *tick_count < interval {
        return false;
    }
    *tick_count = 0;
    match node.outputs.first_mut() {
        Some(level) => {
            *level = !*level;
            true
        }
        None => false,
    }
}

/// The main network simulator.
pub struct Simulator {
    /// The network being simulated
    network: Network,
    config: SimulatorConfig,
    /// Snapshots taken before each tick, oldest first
    history: VecDeque<Network>,
    last_report: RelaxReport,
}

impl Simulator {
    /// Create a simulator with default configuration. The network is
    /// settled immediately.
    pub fn new(network: Network) -> Self {
        Self::with_config(network, SimulatorConfig::default())
    }

    /// Create a simulator with custom configuration.
    pub fn with_config(network: Network, config: SimulatorConfig) -> Self {
        let mut sim = Self {
            network,
            config,
            history: VecDeque::new(),
            last_report: RelaxReport::default(),
        };
        sim.settle();
        sim
    }

    fn settle(&mut self) -> RelaxReport {
        let report = relax(&mut self.network, self.config.max_iterations);
        if !report.converged {
            log::warn!(
                "network did not settle after {} rounds; keeping last state",
                report.rounds
            );
        }
        self.last_report = report;
        report
    }

    fn remember(&mut self) {
        if self.config.history_depth == 0 {
            return;
        }
        while self.history.len() >= self.config.history_depth {
            self.history.pop_front();
        }
        self.history.push_back(self.network.clone());
    }

    /// Advance every clock by one tick, then settle.
    pub fn tick(&mut self) -> RelaxReport {
        self.remember();

        let toggled = self
            .network
            .nodes
            .iter_mut()
            .filter(|n| n.kind == ComponentKind::Clock)
            .map(advance_clock)
            .filter(|&t| t)
            .count();
        if toggled > 0 {
            log::debug!("{} clock(s) toggled", toggled);
        }

        self.settle()
    }

    /// Run `ticks` ticks. Returns the report of the last settle.
    pub fn run(&mut self, ticks: usize) -> RelaxReport {
        for _ in 0..ticks {
            self.tick();
        }
        self.last_report
    }

    /// Restore the snapshot taken before the most recent tick.
    ///
    /// Returns false when there is no history left.
    pub fn step_back(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                self.network = previous;
                true
            }
            None => false,
        }
    }

    /// Number of ticks that can currently be stepped back.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Flip a switch or button, then settle.
    pub fn toggle(&mut self, id: &NodeId) -> Result<RelaxReport> {
        self.network.toggle(id)?;
        Ok(self.settle())
    }

    /// Drive a bus input with `value`, then settle.
    pub fn set_bus_value(&mut self, id: &NodeId, value: u32) -> Result<RelaxReport> {
        self.network.set_bus_value(id, value)?;
        Ok(self.settle())
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn last_report(&self) -> RelaxReport {
        self.last_report
    }
}
