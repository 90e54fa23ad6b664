/*!
 * Partition Simulator - Main Entry Point
 *
 * Builds one simulation from the command line, applies the requested
 * admissions, terminations and compaction, then prints the per-strategy
 * memory maps and fragmentation comparison (or the full state as JSON).
 */

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use partition_sim::simulation::Comparison;
use partition_sim::{
    init_tracing, parse_sequence, LayoutKind, PartitionMode, Simulation, SimulationConfig,
    Strategy,
};

/// Contiguous-memory partition allocation simulator
#[derive(Parser, Debug)]
#[command(name = "partition-sim")]
#[command(about = "Compare first-fit, best-fit and worst-fit partition allocation")]
struct Args {
    /// Total memory in KB (64-10000, out-of-range values fall back to 1024)
    #[arg(long, default_value_t = 1024)]
    memory: usize,

    /// Initial layout: single, multiple, fragmented, mixed
    #[arg(long, default_value_t = LayoutKind::Multiple)]
    layout: LayoutKind,

    /// Partitioning mode: fixed, dynamic
    #[arg(long, default_value_t = PartitionMode::Fixed)]
    mode: PartitionMode,

    /// Seed for reproducible layouts and random processes
    #[arg(long)]
    seed: Option<u64>,

    /// Processes to admit in order, e.g. "P1:100, P2:200"
    #[arg(long)]
    sequence: Option<String>,

    /// Number of randomly sized processes to admit after the sequence
    #[arg(long, default_value_t = 0)]
    random: usize,

    /// Process ids to terminate afterwards
    #[arg(long, value_delimiter = ',')]
    terminate: Vec<String>,

    /// Compact memory after all other operations (dynamic mode only)
    #[arg(long)]
    compact: bool,

    /// Print the final state as JSON instead of a text report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = SimulationConfig::new(args.memory, args.layout, args.mode);
    let mut sim = match args.seed {
        Some(seed) => Simulation::with_seed(config, seed),
        None => Simulation::new(config),
    };
    info!(
        total_memory = sim.total_memory(),
        layout = %args.layout,
        mode = %args.mode,
        "Partition simulation ready"
    );

    if let Some(sequence) = &args.sequence {
        let entries = parse_sequence(sequence).context("parsing --sequence")?;
        for step in sim.admit_sequence(&entries) {
            if let Err(err) = step.result {
                warn!(process = %step.id, error = %err, "Sequence step rejected");
            }
        }
    }

    for _ in 0..args.random {
        match sim.admit_random() {
            Ok(outcome) if outcome.is_partial() => info!(
                process = %outcome.id,
                size = outcome.requested,
                admitted_by = outcome.success_count(),
                "Random process only partially admitted"
            ),
            Ok(_) => {}
            Err(err) => warn!(error = %err, "Random admission rejected"),
        }
    }

    for id in args.terminate.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
        if let Err(err) = sim.terminate(id) {
            warn!(process = id, error = %err, "Termination rejected");
        }
    }

    if args.compact {
        if let Err(err) = sim.compact() {
            warn!(error = %err, "Compaction rejected");
        }
    }

    if args.json {
        let state = serde_json::to_string_pretty(&sim.state()).context("serializing state")?;
        println!("{}", state);
    } else {
        print_report(&sim);
    }
    Ok(())
}

fn print_report(sim: &Simulation) {
    let config = sim.config();
    println!(
        "Memory: {}KB  layout: {}  mode: {}",
        config.total_memory, config.layout, config.mode
    );

    println!("\nProcesses:");
    if sim.processes().is_empty() {
        println!("  (none)");
    }
    for record in sim.processes() {
        let placed: Vec<String> = record
            .admitted_by()
            .iter()
            .map(Strategy::to_string)
            .collect();
        println!(
            "  {:<8} {:>6}KB  placed by: {}",
            record.id,
            record.requested,
            placed.join(", ")
        );
    }

    for strategy in Strategy::ALL {
        println!("\n{}:", strategy);
        for block in sim.snapshot(strategy) {
            println!("  {}", block);
        }
    }

    print_comparison(&sim.comparison());
}

fn print_comparison(comparison: &Comparison) {
    println!(
        "\n{:<10} {:>10} {:>10} {:>10} {:>8} {:>12}",
        "strategy", "allocated", "internal", "external", "free", "utilization"
    );
    for (strategy, report) in comparison.strategies.iter() {
        println!(
            "{:<10} {:>10.0} {:>9.1}% {:>9.1}% {:>8.0} {:>11.1}%",
            strategy.to_string(),
            report.allocated,
            report.internal_percentage,
            report.external_percentage,
            report.free_blocks,
            report.utilization
        );
    }
    let mean = &comparison.aggregate;
    println!(
        "{:<10} {:>10.1} {:>9.1}% {:>9.1}% {:>8.1} {:>11.1}%",
        "mean",
        mean.allocated,
        mean.internal_percentage,
        mean.external_percentage,
        mean.free_blocks,
        mean.utilization
    );
}
