/*!
 * Fragmentation Analyzer
 * Read-only statistics over a block list snapshot
 */

use super::types::MemoryBlock;
use crate::core::types::Size;
use serde::{Deserialize, Serialize};

/// Raw figures for one block list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentationStats {
    /// Sum of requested sizes over occupied blocks
    pub allocated: Size,
    /// Unused space inside occupied blocks
    pub internal: Size,
    /// Total space in free blocks
    pub external: Size,
    pub free_blocks: usize,
    pub occupied_blocks: usize,
    /// Largest single free block
    pub largest_free: Size,
}

impl FragmentationStats {
    /// Single pass over `blocks`
    pub fn analyze(blocks: &[MemoryBlock]) -> Self {
        blocks.iter().fold(Self::default(), |mut stats, block| {
            if block.is_free() {
                stats.external += block.size;
                stats.free_blocks += 1;
                stats.largest_free = stats.largest_free.max(block.size);
            } else {
                stats.internal += block.internal_fragmentation();
                stats.allocated += block.occupied;
                stats.occupied_blocks += 1;
            }
            stats
        })
    }
}

/// Fragmentation report relative to total memory
///
/// Figures are `f64` because aggregate reports are arithmetic means across
/// strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FragmentationReport {
    pub total_memory: Size,
    pub allocated: f64,
    pub internal_fragmentation: f64,
    pub external_fragmentation: f64,
    pub free_blocks: f64,
    pub internal_percentage: f64,
    pub external_percentage: f64,
    /// `(allocated + internal) / total * 100`
    pub utilization: f64,
}

impl FragmentationReport {
    /// Report for one block list
    pub fn from_stats(stats: &FragmentationStats, total_memory: Size) -> Self {
        Self::mean(std::slice::from_ref(stats), total_memory)
    }

    /// Arithmetic mean of each figure across `stats`
    pub fn mean(stats: &[FragmentationStats], total_memory: Size) -> Self {
        let count = stats.len().max(1) as f64;
        let avg = |f: fn(&FragmentationStats) -> usize| {
            stats.iter().map(|s| f(s) as f64).sum::<f64>() / count
        };

        let allocated = avg(|s| s.allocated);
        let internal = avg(|s| s.internal);
        let external = avg(|s| s.external);
        let free_blocks = avg(|s| s.free_blocks);

        let percent = |value: f64| {
            if total_memory == 0 {
                0.0
            } else {
                value * 100.0 / total_memory as f64
            }
        };

        Self {
            total_memory,
            allocated,
            internal_fragmentation: internal,
            external_fragmentation: external,
            free_blocks,
            internal_percentage: percent(internal),
            external_percentage: percent(external),
            utilization: percent(allocated + internal),
        }
    }
}

/// Analyze a block list snapshot against its total memory size
pub fn analyze(blocks: &[MemoryBlock], total_memory: Size) -> FragmentationReport {
    FragmentationReport::from_stats(&FragmentationStats::analyze(blocks), total_memory)
}
