/*!
 * Core Types
 * Common types used across the simulator
 */

/// Address type for partition offsets (KB units)
pub type Address = usize;

/// Size type for partitions and requests (KB units)
pub type Size = usize;

/// Common result type for simulation operations
pub type SimulationResult<T> = Result<T, super::errors::SimulationError>;
