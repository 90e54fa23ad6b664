/*!
 * Scenario Tests
 * End-to-end admissions, terminations and compaction across all strategies
 */

use partition_sim::memory::{LayoutKind, MemoryBlock, PartitionMode, Strategy};
use partition_sim::simulation::ReportScope;
use partition_sim::{ProcessId, Simulation, SimulationConfig, SimulationError};
use pretty_assertions::assert_eq;

fn sim(total: usize, layout: LayoutKind, mode: PartitionMode) -> Simulation {
    Simulation::with_seed(SimulationConfig::new(total, layout, mode), 2024)
}

fn spans(sim: &Simulation, strategy: Strategy) -> Vec<(usize, usize, bool)> {
    sim.snapshot(strategy)
        .iter()
        .map(|b| (b.start, b.end(), b.is_free()))
        .collect()
}

#[test]
fn test_dynamic_single_split() {
    let mut sim = sim(1000, LayoutKind::Single, PartitionMode::Dynamic);

    let outcome = sim.admit("P1", 300).expect("P1 should fit");
    let block = outcome.block(Strategy::FirstFit).unwrap();
    assert_eq!((block.start, block.end()), (0, 299));
    assert_eq!(
        spans(&sim, Strategy::FirstFit),
        vec![(0, 299, false), (300, 999, true)]
    );
}

#[test]
fn test_best_fit_800_on_fresh_memory() {
    let mut sim = sim(1000, LayoutKind::Single, PartitionMode::Dynamic);

    let outcome = sim.admit("P2", 800).expect("800 fits in 1000");
    assert!(!outcome.is_partial());
    assert_eq!(
        spans(&sim, Strategy::BestFit),
        vec![(0, 799, false), (800, 999, true)]
    );
}

#[test]
fn test_fixed_single_partition_exhausted() {
    let mut sim = sim(500, LayoutKind::Single, PartitionMode::Fixed);

    let outcome = sim.admit("P1", 500).unwrap();
    for strategy in Strategy::ALL {
        assert_eq!(outcome.block(strategy).unwrap().internal_fragmentation(), 0);
    }

    let err = sim.admit("P2", 1).unwrap_err();
    assert_eq!(
        err,
        SimulationError::AllAlgorithmsFailed {
            process: ProcessId::from("P2"),
            requested: 1
        }
    );
    assert_eq!(sim.processes().len(), 1);
}

#[test]
fn test_terminate_does_not_merge_across_occupied_block() {
    let mut sim = sim(1000, LayoutKind::Single, PartitionMode::Dynamic);
    sim.admit("P1", 200).unwrap();
    sim.admit("P2", 300).unwrap();

    let record = sim.terminate("P1").unwrap();
    assert_eq!(record.requested, 200);

    for strategy in Strategy::ALL {
        assert_eq!(
            spans(&sim, strategy),
            vec![(0, 199, true), (200, 499, false), (500, 999, true)],
            "{}",
            strategy
        );
    }
}

#[test]
fn test_admit_terminate_round_trip() {
    let mut sim = sim(2000, LayoutKind::Single, PartitionMode::Dynamic);
    let before: Vec<_> = Strategy::ALL.iter().map(|&s| spans(&sim, s)).collect();

    sim.admit("P1", 100).unwrap();
    assert_eq!(sim.snapshot(Strategy::FirstFit).len(), 2);
    sim.terminate("P1").unwrap();

    let after: Vec<_> = Strategy::ALL.iter().map(|&s| spans(&sim, s)).collect();
    assert_eq!(after, before);
    assert!(sim.processes().is_empty());
}

#[test]
fn test_terminate_coalesces_lists_that_never_placed_the_process() {
    // [307, 375, 342]
    let mut sim = sim(1024, LayoutKind::Multiple, PartitionMode::Dynamic);
    sim.admit("A", 300).unwrap();

    // Worst-fit put A in the 375KB partition and has nothing left for B
    let outcome = sim.admit("B", 360).unwrap();
    assert!(outcome.block(Strategy::WorstFit).is_none());

    sim.terminate("B").unwrap();

    for strategy in Strategy::ALL {
        let list = sim.block_list(strategy);
        assert!(
            list.check_coalesced().is_ok(),
            "{}: {:?}",
            strategy,
            list.check_coalesced()
        );
    }
    assert_eq!(
        spans(&sim, Strategy::WorstFit),
        vec![(0, 306, true), (307, 606, false), (607, 1023, true)]
    );
    assert_eq!(
        spans(&sim, Strategy::FirstFit),
        vec![(0, 299, false), (300, 1023, true)]
    );
}

#[test]
fn test_compaction_packs_in_order() {
    let mut sim = sim(1000, LayoutKind::Single, PartitionMode::Dynamic);
    for (id, size) in [("A", 100), ("B", 150), ("C", 200), ("D", 250)] {
        sim.admit(id, size).unwrap();
    }
    sim.terminate("A").unwrap();
    sim.terminate("C").unwrap();

    sim.compact().unwrap();

    for strategy in Strategy::ALL {
        let owners: Vec<Option<&str>> = sim
            .snapshot(strategy)
            .iter()
            .map(|b| b.owner.as_ref().map(ProcessId::as_str))
            .collect();
        assert_eq!(owners, vec![Some("B"), Some("D"), None]);
        assert_eq!(
            spans(&sim, strategy),
            vec![(0, 149, false), (150, 399, false), (400, 999, true)]
        );
    }
}

#[test]
fn test_compaction_of_full_memory_appends_nothing() {
    let mut sim = sim(600, LayoutKind::Single, PartitionMode::Dynamic);
    sim.admit("A", 200).unwrap();
    sim.admit("B", 400).unwrap();

    let tails = sim.compact().unwrap();
    assert_eq!(*tails.get(Strategy::WorstFit), 0);
    assert_eq!(sim.snapshot(Strategy::WorstFit).len(), 2);
}

#[test]
fn test_memory_size_boundaries() {
    for (requested, effective) in [(63, 1024), (64, 64), (10000, 10000), (10001, 1024)] {
        let config = SimulationConfig::new(requested, LayoutKind::Multiple, PartitionMode::Fixed);
        assert_eq!(config.validate().is_ok(), requested == effective);

        let sim = Simulation::with_seed(config, 1);
        assert_eq!(sim.total_memory(), effective, "requested {}", requested);
        assert!(sim.check_invariants().is_ok());
    }
}

#[test]
fn test_report_is_idempotent() {
    let mut sim = sim(1024, LayoutKind::Mixed, PartitionMode::Fixed);
    sim.admit("P1", 90).unwrap();
    sim.admit("P2", 130).unwrap();

    let first = sim.fragmentation_report(ReportScope::Aggregate);
    let second = sim.fragmentation_report(ReportScope::Aggregate);
    assert_eq!(first, second);
    assert_eq!(
        sim.fragmentation_report(Strategy::BestFit),
        sim.comparison().strategies.best_fit
    );
}

#[test]
fn test_aggregate_is_mean_of_strategies() {
    let mut sim = Simulation::with_seed(SimulationConfig::default(), 5);
    sim.admit("A", 300).unwrap();
    // Worst-fit cannot place B
    sim.admit("B", 350).unwrap();

    let comparison = sim.comparison();
    let allocated: Vec<f64> = comparison
        .strategies
        .iter()
        .map(|(_, r)| r.allocated)
        .collect();
    assert_eq!(allocated, vec![650.0, 650.0, 300.0]);
    assert_eq!(comparison.aggregate.allocated, 1600.0 / 3.0);
}

#[test]
fn test_sequence_batch() {
    let mut sim = sim(1000, LayoutKind::Single, PartitionMode::Dynamic);
    let entries = partition_sim::parse_sequence("P1:100, bad, P2:200, P1:50").unwrap();
    assert_eq!(entries.len(), 3);

    let steps = sim.admit_sequence(&entries);
    assert!(steps[0].result.is_ok());
    assert!(steps[1].result.is_ok());
    assert_eq!(
        steps[2].result.as_ref().unwrap_err(),
        &SimulationError::DuplicateProcessId(ProcessId::from("P1"))
    );
}

#[test]
fn test_state_serializes_to_json() {
    let mut sim = sim(1000, LayoutKind::Single, PartitionMode::Dynamic);
    sim.admit("P1", 250).unwrap();

    let json = serde_json::to_value(sim.state()).unwrap();
    assert_eq!(json["config"]["mode"], "dynamic");
    assert_eq!(json["processes"][0]["id"], "P1");
    assert_eq!(json["blocks"]["first_fit"][1]["start"], 250);
}

#[test]
fn test_block_description() {
    let mut sim = sim(500, LayoutKind::Single, PartitionMode::Fixed);
    assert_eq!(
        sim.snapshot(Strategy::FirstFit)[0].to_string(),
        "Free partition: 0-499 (500KB)"
    );

    sim.admit("P1", 400).unwrap();
    let block: &MemoryBlock = &sim.snapshot(Strategy::FirstFit)[0];
    assert_eq!(
        block.to_string(),
        "Allocated to P1: 0-499 (400/500KB, internal frag: 100KB)"
    );
}
