/*!
 * Process Sequences
 * Parsing of `id:size` admission batches such as `P1:100, P2:200`
 */

use crate::core::errors::SimulationError;
use crate::core::id::ProcessId;
use crate::core::types::{SimulationResult, Size};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One admission request of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceEntry {
    pub id: ProcessId,
    pub size: Size,
}

impl SequenceEntry {
    pub fn new(id: impl Into<ProcessId>, size: Size) -> Self {
        Self {
            id: id.into(),
            size,
        }
    }
}

impl FromStr for SequenceEntry {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SimulationError::InvalidSequence(format!("'{}' is not id:size", s.trim()));

        let (id, size) = s.trim().split_once(':').ok_or_else(invalid)?;
        let id = id.trim();
        let size: Size = size.trim().parse().map_err(|_| invalid())?;
        if id.is_empty() || size == 0 {
            return Err(invalid());
        }
        Ok(SequenceEntry::new(id, size))
    }
}

/// Parse a comma-separated batch, skipping malformed entries
///
/// Fails only when nothing usable remains.
pub fn parse_sequence(input: &str) -> SimulationResult<Vec<SequenceEntry>> {
    let entries: Vec<SequenceEntry> = input
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .filter_map(|part| part.parse().ok())
        .collect();

    if entries.is_empty() {
        return Err(SimulationError::InvalidSequence(if input.trim().is_empty() {
            "empty sequence".to_string()
        } else {
            format!("no valid id:size entries in '{}'", input.trim())
        }));
    }
    Ok(entries)
}
