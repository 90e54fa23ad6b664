/*!
 * Simulator Limits and Constants
 *
 * Centralized location for memory bounds, layout bands, and the magic numbers
 * used by random process generation. Grouped by domain.
 */

use super::types::Size;

// =============================================================================
// MEMORY BOUNDS
// =============================================================================

/// Smallest accepted total memory size (KB)
pub const MIN_MEMORY_SIZE: Size = 64;

/// Largest accepted total memory size (KB)
pub const MAX_MEMORY_SIZE: Size = 10_000;

/// Fallback total memory size when the requested one is out of range (KB)
pub const DEFAULT_MEMORY_SIZE: Size = 1024;

/// Minimum size of a generated partition in the multiple and mixed layouts (KB)
pub const MIN_PARTITION_SIZE: Size = 64;

// =============================================================================
// LAYOUT BANDS
// =============================================================================

/// Multiple layout: (upper bound of total size, partition count)
/// Sizes above the last bound use [`MULTIPLE_MAX_PARTITIONS`].
pub const MULTIPLE_BANDS: [(Size, usize); 4] = [(512, 2), (1536, 3), (3072, 4), (6144, 5)];
pub const MULTIPLE_MAX_PARTITIONS: usize = 6;

/// Scale applied to even-indexed partitions of the multiple layout
pub const MULTIPLE_EVEN_SCALE: f64 = 0.9;

/// Scale applied to odd-indexed partitions of the multiple layout
pub const MULTIPLE_ODD_SCALE: f64 = 1.1;

/// Fragmented layout: one fragment per this many KB, clamped to the bounds below
pub const FRAGMENT_UNIT: Size = 500;
pub const MIN_FRAGMENTS: usize = 3;
pub const MAX_FRAGMENTS: usize = 8;

/// Fragment size range as a fraction of the remaining memory, `[min, max)`
pub const FRAGMENT_MIN_FRACTION: f64 = 0.08;
pub const FRAGMENT_MAX_FRACTION: f64 = 0.25;

/// Mixed layout: (upper bound of total size, partition count)
pub const MIXED_BANDS: [(Size, usize); 2] = [(2048, 4), (6144, 5)];
pub const MIXED_MAX_PARTITIONS: usize = 6;

/// Mixed layout proportional ranges `(base, span)` of the total size, by partition index.
/// Indices past the table use [`MIXED_DEFAULT_RANGE`].
pub const MIXED_RANGES: [(f64, f64); 3] = [(0.08, 0.07), (0.15, 0.10), (0.20, 0.10)];
pub const MIXED_DEFAULT_RANGE: (f64, f64) = (0.10, 0.10);

// =============================================================================
// RANDOM PROCESSES
// =============================================================================

/// Smallest size of a randomly generated process (KB)
pub const RANDOM_PROCESS_BASE: Size = 100;

/// Upper cap on the random part of a generated process size (KB)
pub const RANDOM_PROCESS_CAP: Size = 800;

/// Random part never exceeds this fraction of total memory
pub const RANDOM_PROCESS_FRACTION: f64 = 0.4;
