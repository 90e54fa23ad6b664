/*!
 * Allocator
 * Places a request into one strategy's block list
 */

use super::block_list::BlockList;
use super::traits::FitPolicy;
use super::types::{MemoryBlock, PartitionMode, Strategy};
use crate::core::errors::SimulationError;
use crate::core::id::ProcessId;
use crate::core::types::{SimulationResult, Size};
use tracing::{debug, info, warn};

impl BlockList {
    /// Allocate `size` KB for `id` using `strategy`'s selection policy
    ///
    /// Returns a copy of the occupied block. On failure the list is untouched.
    pub fn allocate(
        &mut self,
        strategy: Strategy,
        id: &ProcessId,
        size: Size,
    ) -> SimulationResult<MemoryBlock> {
        match self.allocate_with(strategy.policy(), id, size) {
            Some(block) => {
                info!(
                    strategy = %strategy,
                    process = %id,
                    size,
                    start = block.start,
                    end = block.end(),
                    internal_frag = block.internal_fragmentation(),
                    "Allocated partition"
                );
                Ok(block)
            }
            None => {
                warn!(
                    strategy = %strategy,
                    process = %id,
                    size,
                    "No suitable partition"
                );
                Err(SimulationError::NoSuitablePartition {
                    strategy,
                    requested: size,
                })
            }
        }
    }

    /// Allocate with an arbitrary selection policy
    pub fn allocate_with(
        &mut self,
        policy: &dyn FitPolicy,
        id: &ProcessId,
        size: Size,
    ) -> Option<MemoryBlock> {
        if size == 0 {
            return None;
        }

        let index = policy.select(&self.blocks, size)?;
        // Policies only see the list; re-check rather than trust them
        let block = self.blocks.get(index)?;
        if !block.is_free() || block.size < size {
            return None;
        }

        match self.mode {
            PartitionMode::Fixed => self.occupy_in_place(index, id, size),
            PartitionMode::Dynamic => self.occupy_with_split(index, id, size),
        }

        Some(self.blocks[index].clone())
    }

    /// Fixed partitioning: boundaries stay, the slack becomes internal fragmentation
    fn occupy_in_place(&mut self, index: usize, id: &ProcessId, size: Size) {
        self.blocks[index].occupy(id.clone(), size);
    }

    /// Dynamic partitioning: carve exactly `size` KB and return the rest as a free block
    fn occupy_with_split(&mut self, index: usize, id: &ProcessId, size: Size) {
        let block = &mut self.blocks[index];
        let remainder = block.size - size;

        block.occupy(id.clone(), size);
        block.partition_boundary = false;

        if remainder > 0 {
            block.size = size;
            let remainder_start = block.next_start();
            self.blocks.insert(
                index + 1,
                MemoryBlock::free_fragment(remainder_start, remainder),
            );
            debug!(
                process = %id,
                kept = size,
                remainder,
                remainder_start,
                "Split block"
            );
        }
    }
}
