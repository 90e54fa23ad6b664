/*!
 * Process Records
 * Live processes and where each strategy placed them
 */

use super::per_strategy::PerStrategy;
use crate::core::id::ProcessId;
use crate::core::types::Size;
use crate::memory::{MemoryBlock, Strategy};
use serde::{Deserialize, Serialize};

/// A live process admitted by at least one strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub id: ProcessId,
    pub requested: Size,
    /// Copy of the block holding the process in each strategy's list
    pub placements: PerStrategy<Option<MemoryBlock>>,
}

impl ProcessRecord {
    pub fn placement(&self, strategy: Strategy) -> Option<&MemoryBlock> {
        self.placements.get(strategy).as_ref()
    }

    /// Strategies that admitted this process
    pub fn admitted_by(&self) -> Vec<Strategy> {
        self.placements
            .iter()
            .filter(|(_, block)| block.is_some())
            .map(|(strategy, _)| strategy)
            .collect()
    }

    /// Internal fragmentation caused by this process under `strategy`
    pub fn internal_fragmentation(&self, strategy: Strategy) -> Option<Size> {
        self.placement(strategy)
            .map(MemoryBlock::internal_fragmentation)
    }
}
