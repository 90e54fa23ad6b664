/*!
 * Partition Simulator Library
 * Contiguous-memory partition allocation with first-fit, best-fit and
 * worst-fit strategies running side by side
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod simulation;

// Re-exports
pub use crate::core::{ProcessId, SimulationError, SimulationResult};
pub use memory::{
    BlockList, FitPolicy, FragmentationReport, LayoutKind, MemoryBlock, PartitionMode, Strategy,
};
pub use monitoring::init_tracing;
pub use simulation::{parse_sequence, PerStrategy, SequenceEntry, Simulation, SimulationConfig};
