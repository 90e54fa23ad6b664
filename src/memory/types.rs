/*!
 * Memory Types
 * Common types for partition management
 */

use crate::core::errors::SimulationError;
use crate::core::id::ProcessId;
use crate::core::types::{Address, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Memory block metadata
///
/// A contiguous range `[start, start + size)`, either free or owned by one
/// process. `occupied` is the size the owner actually requested and is 0
/// while the block is free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    pub start: Address,
    pub size: Size,
    pub owner: Option<ProcessId>,
    pub occupied: Size,
    /// Block corresponds to an original fixed partition (rendering only)
    pub partition_boundary: bool,
}

impl MemoryBlock {
    /// Free block that marks an original partition
    pub fn free(start: Address, size: Size) -> Self {
        Self {
            start,
            size,
            owner: None,
            occupied: 0,
            partition_boundary: true,
        }
    }

    /// Free block carved out at runtime (split remainder, compaction tail)
    pub fn free_fragment(start: Address, size: Size) -> Self {
        Self {
            partition_boundary: false,
            ..Self::free(start, size)
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    /// Last address covered by the block (inclusive)
    #[inline]
    pub fn end(&self) -> Address {
        self.start + self.size - 1
    }

    /// First address after the block
    #[inline]
    pub fn next_start(&self) -> Address {
        self.start + self.size
    }

    /// Unused space inside an occupied block
    #[inline]
    pub fn internal_fragmentation(&self) -> Size {
        if self.is_free() {
            0
        } else {
            self.size.saturating_sub(self.occupied)
        }
    }

    pub fn is_owned_by(&self, id: &ProcessId) -> bool {
        self.owner.as_ref() == Some(id)
    }

    pub(crate) fn occupy(&mut self, id: ProcessId, requested: Size) {
        self.owner = Some(id);
        self.occupied = requested;
    }

    pub(crate) fn release(&mut self) {
        self.owner = None;
        self.occupied = 0;
    }
}

impl fmt::Display for MemoryBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            None => write!(
                f,
                "Free partition: {}-{} ({}KB)",
                self.start,
                self.end(),
                self.size
            ),
            Some(owner) => write!(
                f,
                "Allocated to {}: {}-{} ({}/{}KB, internal frag: {}KB)",
                owner,
                self.start,
                self.end(),
                self.occupied,
                self.size,
                self.internal_fragmentation()
            ),
        }
    }
}

/// Partitioning mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionMode {
    /// Block boundaries never change; allocation flips status in place
    #[default]
    Fixed,
    /// Blocks split on allocation and merge on free
    Dynamic,
}

impl fmt::Display for PartitionMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PartitionMode::Fixed => write!(f, "fixed"),
            PartitionMode::Dynamic => write!(f, "dynamic"),
        }
    }
}

impl FromStr for PartitionMode {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(PartitionMode::Fixed),
            "dynamic" => Ok(PartitionMode::Dynamic),
            other => Err(SimulationError::InvalidOption(format!(
                "unknown partition mode '{}'",
                other
            ))),
        }
    }
}

/// Fitting strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    FirstFit,
    BestFit,
    WorstFit,
}

impl Strategy {
    /// Every strategy, in reporting order
    pub const ALL: [Strategy; 3] = [Strategy::FirstFit, Strategy::BestFit, Strategy::WorstFit];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::FirstFit => write!(f, "first-fit"),
            Strategy::BestFit => write!(f, "best-fit"),
            Strategy::WorstFit => write!(f, "worst-fit"),
        }
    }
}

impl FromStr for Strategy {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "first-fit" | "firstfit" | "first" => Ok(Strategy::FirstFit),
            "best-fit" | "bestfit" | "best" => Ok(Strategy::BestFit),
            "worst-fit" | "worstfit" | "worst" => Ok(Strategy::WorstFit),
            other => Err(SimulationError::InvalidOption(format!(
                "unknown strategy '{}'",
                other
            ))),
        }
    }
}

/// Initial partition layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// One free block spanning all memory
    Single,
    /// A handful of alternating smaller/larger partitions
    #[default]
    Multiple,
    /// Randomly sized fragments, each drawn from the remaining memory
    Fragmented,
    /// Randomly sized partitions drawn from fixed proportional ranges
    Mixed,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LayoutKind::Single => write!(f, "single"),
            LayoutKind::Multiple => write!(f, "multiple"),
            LayoutKind::Fragmented => write!(f, "fragmented"),
            LayoutKind::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for LayoutKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(LayoutKind::Single),
            "multiple" => Ok(LayoutKind::Multiple),
            "fragmented" => Ok(LayoutKind::Fragmented),
            "mixed" => Ok(LayoutKind::Mixed),
            other => Err(SimulationError::InvalidOption(format!(
                "unknown layout '{}'",
                other
            ))),
        }
    }
}
