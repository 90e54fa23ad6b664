/*!
 * Compactor
 * Slides occupied blocks to the front under dynamic partitioning
 */

use super::block_list::BlockList;
use super::types::{MemoryBlock, PartitionMode};
use crate::core::errors::SimulationError;
use crate::core::types::{SimulationResult, Size};
use tracing::info;

impl BlockList {
    /// Relocate occupied blocks to start at address 0, in their current order
    /// and with their current sizes, followed by a single free block holding
    /// all remaining space (none if memory is full).
    ///
    /// Returns the size of the trailing free block.
    pub fn compact(&mut self) -> SimulationResult<Size> {
        if self.mode == PartitionMode::Fixed {
            return Err(SimulationError::NotApplicable(self.mode));
        }

        let mut address = 0;
        let mut moved = 0;
        let mut compacted: Vec<MemoryBlock> = Vec::with_capacity(self.blocks.len());
        for mut block in self.blocks.drain(..).filter(|b| !b.is_free()) {
            if block.start != address {
                block.start = address;
                moved += 1;
            }
            address += block.size;
            compacted.push(block);
        }

        let free_tail = self.total - address;
        if free_tail > 0 {
            compacted.push(MemoryBlock::free_fragment(address, free_tail));
        }
        self.blocks = compacted;

        info!(
            moved,
            occupied = address,
            free_tail,
            "Compacted memory"
        );
        Ok(free_tail)
    }
}
