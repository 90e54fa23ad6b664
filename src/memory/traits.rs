/*!
 * Memory Traits
 * Partition selection abstractions
 */

use super::types::MemoryBlock;
use crate::core::types::Size;

/// Candidate selection for one fitting strategy
///
/// Implementations only choose; the block list performs the allocation.
pub trait FitPolicy: Send + Sync {
    /// Index of the free block to place a `size` KB request in, if any fits
    fn select(&self, blocks: &[MemoryBlock], size: Size) -> Option<usize>;
}

/// Iterate over the free blocks that can hold `size` KB, with their indices
pub(crate) fn candidates(
    blocks: &[MemoryBlock],
    size: Size,
) -> impl Iterator<Item = (usize, &MemoryBlock)> {
    blocks
        .iter()
        .enumerate()
        .filter(move |(_, block)| block.is_free() && block.size >= size)
}
