/*!
 * Operation Outcomes
 * Result values handed to the presentation layer after each mutation
 */

use super::config::SimulationConfig;
use super::per_strategy::PerStrategy;
use super::process::ProcessRecord;
use crate::core::id::ProcessId;
use crate::core::types::{SimulationResult, Size};
use crate::memory::{FragmentationReport, MemoryBlock, Strategy};
use serde::{Deserialize, Serialize};

/// Result of (re)initializing the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitOutcome {
    /// Config actually in effect
    pub config: SimulationConfig,
    /// Requested memory size, when it was out of range and replaced by the default
    pub clamped_from: Option<Size>,
}

impl InitOutcome {
    pub fn was_clamped(&self) -> bool {
        self.clamped_from.is_some()
    }
}

/// Per-strategy result of one admission request
///
/// Partial success is normal: some strategies may report
/// `NoSuitablePartition` while others placed the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionOutcome {
    pub id: ProcessId,
    pub requested: Size,
    pub placements: PerStrategy<SimulationResult<MemoryBlock>>,
}

impl AdmissionOutcome {
    pub fn success_count(&self) -> usize {
        self.placements.iter().filter(|(_, r)| r.is_ok()).count()
    }

    pub fn is_partial(&self) -> bool {
        self.success_count() < Strategy::ALL.len()
    }

    pub fn block(&self, strategy: Strategy) -> Option<&MemoryBlock> {
        self.placements.get(strategy).as_ref().ok()
    }
}

/// One step of a sequence admission, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceStep {
    pub id: ProcessId,
    pub requested: Size,
    pub result: SimulationResult<AdmissionOutcome>,
}

/// Which lists a fragmentation report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportScope {
    Strategy(Strategy),
    /// Arithmetic mean across all strategies
    Aggregate,
}

impl From<Strategy> for ReportScope {
    fn from(strategy: Strategy) -> Self {
        ReportScope::Strategy(strategy)
    }
}

/// Side-by-side strategy reports plus their mean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub strategies: PerStrategy<FragmentationReport>,
    pub aggregate: FragmentationReport,
}

/// Full read-only view of the simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub config: SimulationConfig,
    pub processes: Vec<ProcessRecord>,
    pub blocks: PerStrategy<Vec<MemoryBlock>>,
    pub comparison: Comparison,
}
