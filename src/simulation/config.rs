/*!
 * Simulation Configuration
 * Total memory size, initial layout, and partitioning mode
 */

use crate::core::errors::SimulationError;
use crate::core::limits::{DEFAULT_MEMORY_SIZE, MAX_MEMORY_SIZE, MIN_MEMORY_SIZE};
use crate::core::types::{SimulationResult, Size};
use crate::memory::{LayoutKind, PartitionMode};
use serde::{Deserialize, Serialize};

/// Parameters a simulation is initialized (and reset) from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Total memory in KB, within `[MIN_MEMORY_SIZE, MAX_MEMORY_SIZE]`
    pub total_memory: Size,
    pub layout: LayoutKind,
    pub mode: PartitionMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_memory: DEFAULT_MEMORY_SIZE,
            layout: LayoutKind::default(),
            mode: PartitionMode::default(),
        }
    }
}

impl SimulationConfig {
    pub fn new(total_memory: Size, layout: LayoutKind, mode: PartitionMode) -> Self {
        Self {
            total_memory,
            layout,
            mode,
        }
    }

    pub fn with_total_memory(mut self, total_memory: Size) -> Self {
        self.total_memory = total_memory;
        self
    }

    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_mode(mut self, mode: PartitionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Reject out-of-range memory sizes
    pub fn validate(&self) -> SimulationResult<()> {
        if (MIN_MEMORY_SIZE..=MAX_MEMORY_SIZE).contains(&self.total_memory) {
            Ok(())
        } else {
            Err(SimulationError::InvalidConfiguration {
                requested: self.total_memory,
                min: MIN_MEMORY_SIZE,
                max: MAX_MEMORY_SIZE,
            })
        }
    }

    /// Clamp an out-of-range memory size to the default.
    /// Returns the adjusted config and the rejected size, if any.
    pub fn sanitized(self) -> (Self, Option<Size>) {
        match self.validate() {
            Ok(()) => (self, None),
            Err(_) => (
                self.with_total_memory(DEFAULT_MEMORY_SIZE),
                Some(self.total_memory),
            ),
        }
    }
}
