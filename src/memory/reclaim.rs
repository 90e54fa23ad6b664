/*!
 * Reclaimer
 * Frees a terminated process's block and coalesces free neighbours
 */

use super::block_list::BlockList;
use super::types::{MemoryBlock, PartitionMode};
use crate::core::errors::SimulationError;
use crate::core::id::ProcessId;
use crate::core::types::SimulationResult;
use tracing::{debug, info};

impl BlockList {
    /// Free the block owned by `id`
    ///
    /// Returns a copy of the block as it was before freeing. Under dynamic
    /// partitioning the whole list is coalesced afterwards.
    pub fn free(&mut self, id: &ProcessId) -> SimulationResult<MemoryBlock> {
        let index = self
            .position(id)
            .ok_or_else(|| SimulationError::ProcessNotFound(id.clone()))?;

        let released = self.blocks[index].clone();
        self.blocks[index].release();

        match self.mode {
            PartitionMode::Fixed => {
                self.blocks[index].partition_boundary = true;
            }
            PartitionMode::Dynamic => {
                self.coalesce();
            }
        }

        info!(
            process = %id,
            start = released.start,
            size = released.size,
            free_blocks = self.free_block_count(),
            "Freed partition"
        );
        Ok(released)
    }

    /// Merge every run of neighbouring free blocks into its first block.
    /// Returns the number of merges performed.
    pub(crate) fn coalesce(&mut self) -> usize {
        if self.blocks.len() < 2 {
            return 0;
        }

        let before = self.blocks.len();
        let mut i = 0;
        let mut merged = 0;
        while i + 1 < self.blocks.len() {
            if self.blocks[i].is_free() && self.blocks[i + 1].is_free() {
                let next = self.blocks.remove(i + 1);
                let current = &mut self.blocks[i];
                current.size += next.size;
                current.partition_boundary = false;
                merged += 1;
            } else {
                i += 1;
            }
        }

        if merged > 0 {
            debug!(
                merged,
                before,
                after = self.blocks.len(),
                "Coalesced adjacent free blocks"
            );
        }
        merged
    }
}
