/*!
 * Fit Policies
 * First-fit, best-fit, and worst-fit candidate selection
 */

use super::traits::{candidates, FitPolicy};
use super::types::{MemoryBlock, Strategy};
use crate::core::types::Size;

/// First candidate in ascending address order
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

/// Smallest candidate; ties go to the lowest address
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFit;

/// Largest candidate; ties go to the lowest address
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstFit;

impl FitPolicy for FirstFit {
    fn select(&self, blocks: &[MemoryBlock], size: Size) -> Option<usize> {
        candidates(blocks, size).next().map(|(index, _)| index)
    }
}

impl FitPolicy for BestFit {
    fn select(&self, blocks: &[MemoryBlock], size: Size) -> Option<usize> {
        let mut best: Option<(usize, Size)> = None;
        for (index, block) in candidates(blocks, size) {
            // Strict comparison keeps the earliest of equal sizes
            if best.map_or(true, |(_, best_size)| block.size < best_size) {
                best = Some((index, block.size));
            }
        }
        best.map(|(index, _)| index)
    }
}

impl FitPolicy for WorstFit {
    fn select(&self, blocks: &[MemoryBlock], size: Size) -> Option<usize> {
        let mut worst: Option<(usize, Size)> = None;
        for (index, block) in candidates(blocks, size) {
            if worst.map_or(true, |(_, worst_size)| block.size > worst_size) {
                worst = Some((index, block.size));
            }
        }
        worst.map(|(index, _)| index)
    }
}

impl Strategy {
    /// Selection policy implementing this strategy
    pub fn policy(self) -> &'static dyn FitPolicy {
        match self {
            Strategy::FirstFit => &FirstFit,
            Strategy::BestFit => &BestFit,
            Strategy::WorstFit => &WorstFit,
        }
    }
}
