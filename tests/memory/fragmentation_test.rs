/*!
 * Fragmentation Tests
 * Analyzer figures over lists built through real allocations
 */

use partition_sim::memory::{analyze, BlockList, MemoryBlock, PartitionMode, Strategy};
use partition_sim::ProcessId;
use pretty_assertions::assert_eq;

#[test]
fn test_fixed_internal_fragmentation() {
    let blocks = vec![
        MemoryBlock::free(0, 250),
        MemoryBlock::free(250, 250),
        MemoryBlock::free(500, 500),
    ];
    let mut list = BlockList::new(blocks, 1000, PartitionMode::Fixed);
    list.allocate(Strategy::FirstFit, &ProcessId::from("P1"), 200)
        .unwrap();
    list.allocate(Strategy::FirstFit, &ProcessId::from("P2"), 450)
        .unwrap();

    let report = analyze(list.blocks(), 1000);
    assert_eq!(report.allocated, 650.0);
    assert_eq!(report.internal_fragmentation, 100.0);
    assert_eq!(report.external_fragmentation, 250.0);
    assert_eq!(report.free_blocks, 1.0);
    assert_eq!(report.utilization, 75.0);
    assert_eq!(report.internal_percentage, 10.0);
    assert_eq!(report.external_percentage, 25.0);
}

#[test]
fn test_dynamic_has_no_internal_fragmentation() {
    let mut list = BlockList::new(
        vec![MemoryBlock::free(0, 1000)],
        1000,
        PartitionMode::Dynamic,
    );
    for (id, size) in [("A", 123), ("B", 77), ("C", 300)] {
        list.allocate(Strategy::BestFit, &ProcessId::from(id), size)
            .unwrap();
    }

    let report = analyze(list.blocks(), 1000);
    assert_eq!(report.internal_fragmentation, 0.0);
    assert_eq!(report.allocated, 500.0);
    assert_eq!(report.external_fragmentation, 500.0);
    assert_eq!(report.utilization, 50.0);
}

#[test]
fn test_empty_list_is_fully_external() {
    let report = analyze(&[MemoryBlock::free(0, 640)], 640);
    assert_eq!(report.external_fragmentation, 640.0);
    assert_eq!(report.external_percentage, 100.0);
    assert_eq!(report.utilization, 0.0);
}
