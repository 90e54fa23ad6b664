/*!
 * Memory Module
 *
 * Contiguous partition management over an ordered block list.
 *
 * ## Operations
 *
 * - **Layout generation**: single, multiple, fragmented, and mixed initial layouts
 * - **Allocation**: first-fit, best-fit, and worst-fit selection; in-place under
 *   fixed partitioning, split under dynamic partitioning
 * - **Reclaim**: frees a process's block; dynamic lists coalesce free neighbours
 * - **Compaction**: slides occupied blocks to address 0 (dynamic only)
 * - **Fragmentation analysis**: internal/external fragmentation and utilization
 */

mod allocator;
pub mod block_list;
mod compaction;
pub mod fragmentation;
pub mod layout;
pub mod policy;
mod reclaim;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use block_list::{BlockList, LayoutViolation};
pub use fragmentation::{analyze, FragmentationReport, FragmentationStats};
pub use layout::generate_layout;
pub use policy::{BestFit, FirstFit, WorstFit};
pub use traits::FitPolicy;
pub use types::*;
