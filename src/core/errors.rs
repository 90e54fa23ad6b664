/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::id::ProcessId;
use super::types::Size;
use crate::memory::{PartitionMode, Strategy};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation errors with serialization support
///
/// Every variant is recoverable: a rejected operation leaves the simulation
/// state exactly as it was.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimulationError {
    #[error("Invalid memory size {requested}KB: must be between {min}KB and {max}KB")]
    #[diagnostic(
        code(simulation::invalid_configuration),
        help("Pick a total memory size inside the accepted range.")
    )]
    InvalidConfiguration { requested: Size, min: Size, max: Size },

    #[error("Invalid option: {0}")]
    #[diagnostic(
        code(simulation::invalid_option),
        help("Layouts: single, multiple, fragmented, mixed. Modes: fixed, dynamic. Strategies: first-fit, best-fit, worst-fit.")
    )]
    InvalidOption(String),

    #[error("Process {0} already exists")]
    #[diagnostic(
        code(simulation::duplicate_process_id),
        help("Process ids must be unique among live processes. Terminate it first or pick another id.")
    )]
    DuplicateProcessId(ProcessId),

    #[error("Invalid request size {requested}KB: must be between 1KB and {total}KB")]
    #[diagnostic(
        code(simulation::invalid_request_size),
        help("A process must request at least 1KB and no more than the total memory.")
    )]
    InvalidRequestSize { requested: Size, total: Size },

    #[error("{strategy}: no suitable partition for {requested}KB")]
    #[diagnostic(code(simulation::no_suitable_partition))]
    NoSuitablePartition { strategy: Strategy, requested: Size },

    #[error("Cannot allocate {requested}KB for {process}: no suitable partition found by any algorithm")]
    #[diagnostic(
        code(simulation::all_algorithms_failed),
        help("Terminate processes or compact memory (dynamic mode) to free contiguous space.")
    )]
    AllAlgorithmsFailed { process: ProcessId, requested: Size },

    #[error("Process {0} not found")]
    #[diagnostic(
        code(simulation::process_not_found),
        help("The process may have been terminated already or never admitted.")
    )]
    ProcessNotFound(ProcessId),

    #[error("Compaction not applicable for {0} partitions")]
    #[diagnostic(
        code(simulation::not_applicable),
        help("Fixed partition boundaries never move. Use dynamic mode to compact.")
    )]
    NotApplicable(PartitionMode),

    #[error("Invalid process sequence: {0}")]
    #[diagnostic(
        code(simulation::invalid_sequence),
        help("Use the format: P1:100, P2:200, P3:150")
    )]
    InvalidSequence(String),
}

impl SimulationError {
    /// True for per-strategy allocation failures, which are a normal outcome
    pub fn is_partial_failure(&self) -> bool {
        matches!(self, SimulationError::NoSuitablePartition { .. })
    }
}
