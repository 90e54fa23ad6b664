/*!
 * Block List
 * One strategy's ordered partition list and its structural invariants
 */

use super::types::{MemoryBlock, PartitionMode};
use crate::core::id::ProcessId;
use crate::core::types::{Address, Size};
use thiserror::Error;

/// Structural invariant violations of a block list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutViolation {
    #[error("Block at {start} has zero size")]
    EmptyBlock { start: Address },

    #[error("Block at {found} should start at {expected}")]
    Discontiguous { expected: Address, found: Address },

    #[error("Blocks cover {covered}KB of {total}KB")]
    Coverage { covered: Size, total: Size },

    #[error("Block at {start} records {occupied}KB occupied: {reason}")]
    Occupancy {
        start: Address,
        occupied: Size,
        reason: &'static str,
    },

    #[error("Adjacent free blocks at {first} and {second}")]
    AdjacentFree { first: Address, second: Address },
}

/// Ordered, contiguous list of blocks covering `[0, total)`
///
/// Owned by exactly one strategy. Mutations go through the allocator,
/// reclaimer, and compactor; readers get slices or cloned snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockList {
    pub(super) blocks: Vec<MemoryBlock>,
    pub(super) total: Size,
    pub(super) mode: PartitionMode,
}

impl BlockList {
    /// Wrap a generated layout
    pub fn new(blocks: Vec<MemoryBlock>, total: Size, mode: PartitionMode) -> Self {
        let list = Self {
            blocks,
            total,
            mode,
        };
        debug_assert!(list.check_invariants().is_ok());
        list
    }

    pub fn blocks(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    /// Cloned copy of the current blocks
    pub fn snapshot(&self) -> Vec<MemoryBlock> {
        self.blocks.clone()
    }

    pub fn total(&self) -> Size {
        self.total
    }

    pub fn mode(&self) -> PartitionMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn free_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_free()).count()
    }

    /// Index of the block owned by `id`
    pub fn position(&self, id: &ProcessId) -> Option<usize> {
        self.blocks.iter().position(|b| b.is_owned_by(id))
    }

    /// Block owned by `id`
    pub fn find(&self, id: &ProcessId) -> Option<&MemoryBlock> {
        self.blocks.iter().find(|b| b.is_owned_by(id))
    }

    /// Verify ordering, contiguity, coverage, and occupancy bookkeeping
    pub fn check_invariants(&self) -> Result<(), LayoutViolation> {
        let mut expected = 0;
        for block in &self.blocks {
            if block.size == 0 {
                return Err(LayoutViolation::EmptyBlock { start: block.start });
            }
            if block.start != expected {
                return Err(LayoutViolation::Discontiguous {
                    expected,
                    found: block.start,
                });
            }
            if block.is_free() && block.occupied != 0 {
                return Err(LayoutViolation::Occupancy {
                    start: block.start,
                    occupied: block.occupied,
                    reason: "free block must be empty",
                });
            }
            if !block.is_free() && (block.occupied == 0 || block.occupied > block.size) {
                return Err(LayoutViolation::Occupancy {
                    start: block.start,
                    occupied: block.occupied,
                    reason: "occupied size must be within (0, size]",
                });
            }
            expected = block.next_start();
        }

        if expected != self.total {
            return Err(LayoutViolation::Coverage {
                covered: expected,
                total: self.total,
            });
        }

        Ok(())
    }

    /// Verify no two neighbouring blocks are both free.
    /// Holds for dynamic lists after any reclaim or compaction; freshly
    /// generated layouts may still hold neighbouring free partitions.
    pub fn check_coalesced(&self) -> Result<(), LayoutViolation> {
        match self
            .blocks
            .windows(2)
            .find(|pair| pair[0].is_free() && pair[1].is_free())
        {
            Some(pair) => Err(LayoutViolation::AdjacentFree {
                first: pair[0].start,
                second: pair[1].start,
            }),
            None => Ok(()),
        }
    }
}
