/*!
 * Invariant Tests
 * Block-list structure under random admission, termination and compaction
 */

use partition_sim::memory::{LayoutKind, PartitionMode, Strategy as Fit};
use partition_sim::{Simulation, SimulationConfig};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Admit(usize),
    Terminate(usize),
    Compact,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1usize..600).prop_map(Op::Admit),
        3 => (0usize..16).prop_map(Op::Terminate),
        1 => Just(Op::Compact),
    ]
}

fn layout() -> impl Strategy<Value = LayoutKind> {
    prop_oneof![
        Just(LayoutKind::Single),
        Just(LayoutKind::Multiple),
        Just(LayoutKind::Fragmented),
        Just(LayoutKind::Mixed),
    ]
}

fn mode() -> impl Strategy<Value = PartitionMode> {
    prop_oneof![Just(PartitionMode::Fixed), Just(PartitionMode::Dynamic)]
}

fn run(sim: &mut Simulation, ops: &[Op]) -> Result<(), TestCaseError> {
    // Initial layouts may hold neighbouring free partitions until the first
    // reclaim or compaction coalesces them
    let mut coalesced = false;
    for op in ops {
        match *op {
            Op::Admit(size) => {
                let _ = sim.admit("", size);
            }
            Op::Terminate(index) => {
                let live = sim.processes().len();
                if live > 0 {
                    let id = sim.processes()[index % live].id.clone();
                    prop_assert!(sim.terminate(id.as_str()).is_ok());
                    coalesced = true;
                }
            }
            Op::Compact => {
                let compacted = sim.compact();
                coalesced |= compacted.is_ok();
                prop_assert_eq!(
                    compacted.is_ok(),
                    sim.config().mode == PartitionMode::Dynamic
                );
            }
        }

        prop_assert!(sim.check_invariants().is_ok(), "{:?}", sim.check_invariants());
        if sim.config().mode == PartitionMode::Dynamic && coalesced {
            for strategy in Fit::ALL {
                let list = sim.block_list(strategy);
                prop_assert!(list.check_coalesced().is_ok(), "{} after {:?}", strategy, op);
            }
        }
    }
    Ok(())
}

/// Admissions sized around one of the initial partitions, so strategies
/// that already used that partition fail while others succeed
#[derive(Debug, Clone)]
enum NearOp {
    Admit { partition: usize, delta: i64 },
    Terminate(usize),
}

fn near_op() -> impl Strategy<Value = NearOp> {
    prop_oneof![
        3 => (0usize..8, -40i64..40)
            .prop_map(|(partition, delta)| NearOp::Admit { partition, delta }),
        2 => (0usize..16).prop_map(NearOp::Terminate),
    ]
}

fn partitioned_layout() -> impl Strategy<Value = LayoutKind> {
    prop_oneof![Just(LayoutKind::Multiple), Just(LayoutKind::Mixed)]
}

proptest! {
    #[test]
    fn prop_partial_admissions_keep_lists_coalesced(
        total in 512usize..=4000,
        layout in partitioned_layout(),
        seed in any::<u64>(),
        near in prop::collection::vec(near_op(), 1..50),
    ) {
        let config = SimulationConfig::new(total, layout, PartitionMode::Dynamic);
        let mut sim = Simulation::with_seed(config, seed);
        let partitions: Vec<i64> = sim
            .snapshot(Fit::FirstFit)
            .iter()
            .map(|b| b.size as i64)
            .collect();

        let ops: Vec<Op> = near
            .into_iter()
            .map(|op| match op {
                NearOp::Admit { partition, delta } => {
                    let size = partitions[partition % partitions.len()] + delta;
                    Op::Admit(size.max(1) as usize)
                }
                NearOp::Terminate(index) => Op::Terminate(index),
            })
            .collect();
        run(&mut sim, &ops)?;
    }

    #[test]
    fn prop_lists_stay_contiguous(
        total in 64usize..=4000,
        layout in layout(),
        mode in mode(),
        seed in any::<u64>(),
        ops in prop::collection::vec(op(), 1..60),
    ) {
        let mut sim = Simulation::with_seed(SimulationConfig::new(total, layout, mode), seed);
        run(&mut sim, &ops)?;
    }

    #[test]
    fn prop_records_match_lists(
        seed in any::<u64>(),
        ops in prop::collection::vec(op(), 1..40),
    ) {
        let config = SimulationConfig::new(2000, LayoutKind::Single, PartitionMode::Dynamic);
        let mut sim = Simulation::with_seed(config, seed);
        run(&mut sim, &ops)?;

        for record in sim.processes() {
            for strategy in Fit::ALL {
                prop_assert_eq!(
                    record.placement(strategy),
                    sim.block_list(strategy).find(&record.id)
                );
            }
        }
    }

    #[test]
    fn prop_report_is_stable(
        total in 64usize..=10000,
        layout in layout(),
        seed in any::<u64>(),
        sizes in prop::collection::vec(1usize..500, 0..10),
    ) {
        let config = SimulationConfig::new(total, layout, PartitionMode::Fixed);
        let mut sim = Simulation::with_seed(config, seed);
        for size in sizes {
            let _ = sim.admit("", size);
        }

        let report = sim.comparison();
        prop_assert_eq!(&report, &sim.comparison());
        for (_, r) in report.strategies.iter() {
            prop_assert!(r.utilization <= 100.0 + 1e-9);
            prop_assert!((r.allocated + r.internal_fragmentation + r.external_fragmentation
                - total as f64).abs() < 1e-9);
        }
    }
}
