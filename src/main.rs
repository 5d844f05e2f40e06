//! Logicsim - digital logic network evaluator
//!
//! Loads a saved network snapshot, checks it for floating inputs, runs the
//! clock for a number of ticks and prints the settled snapshot.
//!
//! # Usage
//!
//! ```bash
//! logicsim circuit.json --ticks 100 > settled.json
//! ```

use std::path::PathBuf;

use clap::Parser;
use logicsim_core::{
    circuit::validate,
    error::{LogicError, Result},
    format,
    solver::{SimulatorConfig, MAX_ITERATIONS},
    Simulator,
};

/// Digital logic network evaluator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the network snapshot (.json)
    #[arg(value_name = "CIRCUIT_FILE")]
    circuit_file: PathBuf,

    /// Number of clock ticks to run after the initial settle
    #[arg(short, long, default_value_t = 0)]
    ticks: usize,

    /// Maximum relaxation rounds per settle
    #[arg(long, default_value_t = MAX_ITERATIONS)]
    max_iterations: usize,

    /// Only report floating inputs
    #[arg(long)]
    validate_only: bool,

    /// Simulate even when inputs are floating
    #[arg(short, long)]
    force: bool,

    /// Write the settled snapshot here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    // Load the snapshot
    let network = format::parse_file(&args.circuit_file)?;

    // Validate
    let report = validate(&network);
    for message in &report.messages {
        eprintln!("{}", message);
    }
    for port in &report.offending_inputs {
        let pin = network
            .node(&port.node_id)
            .and_then(|n| n.kind.input_label(port.index))
            .unwrap_or_else(|| port.index.to_string());
        eprintln!("  floating: {} input {}", port.node_id, pin);
    }
    if args.validate_only {
        return if report.ok {
            Ok(())
        } else {
            Err(LogicError::InvalidCircuit {
                messages: report.messages,
            })
        };
    }
    if !report.ok && !args.force {
        return Err(LogicError::InvalidCircuit {
            messages: report.messages,
        });
    }

    // Simulate
    let config = SimulatorConfig::new().with_max_iterations(args.max_iterations);
    let mut simulator = Simulator::with_config(network, config);
    let last = simulator.run(args.ticks);
    log::info!(
        "ran {} tick(s); last settle took {} round(s), converged={}",
        args.ticks,
        last.rounds,
        last.converged
    );

    // Emit
    let network = simulator.into_network();
    match &args.output {
        Some(path) => format::write_file(path, &network)?,
        None => println!("{}", format::to_json(&network)?),
    }

    Ok(())
}
