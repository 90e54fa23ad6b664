/*!
 * Simulation
 *
 * Owns the three per-strategy block lists and the live process set.
 *
 * Every admission runs independently against all three lists with the same
 * process id and size, so the lists diverge only through their strategies.
 * Termination and compaction likewise apply to every list. Rejected
 * operations leave the state untouched.
 */

mod config;
mod outcome;
mod per_strategy;
mod process;
mod sequence;

pub use config::SimulationConfig;
pub use outcome::{
    AdmissionOutcome, Comparison, InitOutcome, ReportScope, SequenceStep, SimulationSnapshot,
};
pub use per_strategy::PerStrategy;
pub use process::ProcessRecord;
pub use sequence::{parse_sequence, SequenceEntry};

use crate::core::errors::SimulationError;
use crate::core::id::ProcessId;
use crate::core::limits::{RANDOM_PROCESS_BASE, RANDOM_PROCESS_CAP, RANDOM_PROCESS_FRACTION};
use crate::core::types::{SimulationResult, Size};
use crate::memory::{
    generate_layout, BlockList, FragmentationReport, FragmentationStats, LayoutViolation,
    MemoryBlock, PartitionMode, Strategy,
};
use crate::monitoring::span_operation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info, warn};

/// Partition allocation simulation
pub struct Simulation {
    config: SimulationConfig,
    lists: PerStrategy<BlockList>,
    processes: Vec<ProcessRecord>,
    // Counter behind automatically generated `P{n}` ids
    next_pid: u64,
    rng: StdRng,
}

impl Simulation {
    /// Simulation with an entropy-seeded random source
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Simulation with reproducible layouts and random processes
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: SimulationConfig, rng: StdRng) -> Self {
        let (initial, _) = config.sanitized();
        let mut sim = Self {
            config: initial,
            lists: PerStrategy::splat(BlockList::new(
                vec![MemoryBlock::free(0, initial.total_memory)],
                initial.total_memory,
                initial.mode,
            )),
            processes: Vec::new(),
            next_pid: 1,
            rng,
        };
        sim.initialize(config);
        sim
    }

    /// Reinitialize from `config`, discarding every process
    ///
    /// An out-of-range memory size is replaced by the default; the outcome
    /// reports the rejected value.
    pub fn initialize(&mut self, config: SimulationConfig) -> InitOutcome {
        let (config, clamped_from) = config.sanitized();
        if let Some(requested) = clamped_from {
            warn!(
                requested,
                default = config.total_memory,
                "Memory size out of range, using default"
            );
        }

        self.config = config;
        self.regenerate();

        info!(
            total_memory = config.total_memory,
            layout = %config.layout,
            mode = %config.mode,
            partitions = self.lists.first_fit.len(),
            "Memory initialized"
        );
        InitOutcome {
            config,
            clamped_from,
        }
    }

    /// Clear all processes and regenerate the layout from the current config.
    /// Returns the number of processes cleared.
    pub fn reset(&mut self) -> usize {
        let cleared = self.processes.len();
        self.regenerate();
        info!(cleared, "Cleared all processes");
        cleared
    }

    /// One layout, shared by all three strategies
    fn regenerate(&mut self) {
        let blocks = generate_layout(self.config.total_memory, self.config.layout, &mut self.rng);
        self.lists = PerStrategy::splat(BlockList::new(
            blocks,
            self.config.total_memory,
            self.config.mode,
        ));
        self.processes.clear();
        self.next_pid = 1;
    }

    /// Admit a process into every strategy's list
    ///
    /// An empty id takes the next generated one. Fails with
    /// `AllAlgorithmsFailed` only when no strategy could place it.
    pub fn admit(
        &mut self,
        id: impl Into<ProcessId>,
        size: Size,
    ) -> SimulationResult<AdmissionOutcome> {
        let id = id.into();
        let id = if id.is_empty() {
            self.next_process_id()
        } else {
            id
        };

        let total = self.config.total_memory;
        if size == 0 || size > total {
            warn!(process = %id, size, total, "Invalid request size");
            return Err(SimulationError::InvalidRequestSize {
                requested: size,
                total,
            });
        }
        if self.process(id.as_str()).is_some() {
            warn!(process = %id, "Duplicate process id");
            return Err(SimulationError::DuplicateProcessId(id));
        }

        let lists = &mut self.lists;
        let placements = PerStrategy::from_fn(|strategy| {
            lists.get_mut(strategy).allocate(strategy, &id, size)
        });

        let outcome = AdmissionOutcome {
            id: id.clone(),
            requested: size,
            placements,
        };
        if outcome.success_count() == 0 {
            warn!(process = %id, size, "No strategy could admit process");
            return Err(SimulationError::AllAlgorithmsFailed {
                process: id,
                requested: size,
            });
        }

        self.processes.push(ProcessRecord {
            id: id.clone(),
            requested: size,
            placements: outcome
                .placements
                .map(|_, result| result.as_ref().ok().cloned()),
        });
        self.next_pid += 1;

        info!(
            process = %id,
            size,
            admitted_by = outcome.success_count(),
            "Process admitted"
        );
        Ok(outcome)
    }

    /// Admit a process with a generated id and a random size
    pub fn admit_random(&mut self) -> SimulationResult<AdmissionOutcome> {
        let id = self.next_process_id();
        let size = self.random_process_size();
        self.admit(id, size)
    }

    fn random_process_size(&mut self) -> Size {
        let total = self.config.total_memory;
        let span = (RANDOM_PROCESS_CAP as f64).min(total as f64 * RANDOM_PROCESS_FRACTION);
        let size = (self.rng.gen::<f64>() * span).floor() as Size + RANDOM_PROCESS_BASE;
        size.min(total)
    }

    /// Admit a batch one request at a time, in order
    ///
    /// Each step is independent: a failed step does not stop the batch.
    pub fn admit_sequence(&mut self, entries: &[SequenceEntry]) -> Vec<SequenceStep> {
        let span = span_operation("admit_sequence");
        let _guard = span.enter();
        span.record_items(entries.len());

        entries
            .iter()
            .map(|entry| SequenceStep {
                id: entry.id.clone(),
                requested: entry.size,
                result: self.admit(entry.id.clone(), entry.size),
            })
            .collect()
    }

    /// Terminate a live process, freeing its block in every list
    pub fn terminate(&mut self, id: &str) -> SimulationResult<ProcessRecord> {
        let index = self
            .processes
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| {
                warn!(process = id, "Terminate: process not found");
                SimulationError::ProcessNotFound(ProcessId::from(id))
            })?;

        let record = self.processes.remove(index);
        self.lists.for_each_mut(|strategy, list| {
            let placed = record.placement(strategy).is_some();
            if let Err(err) = list.free(&record.id) {
                // Strategies that never admitted the process have nothing to free
                if placed {
                    error!(
                        strategy = %strategy,
                        process = %record.id,
                        error = %err,
                        "Process record and block list disagree"
                    );
                }
                debug_assert!(!placed, "{}: {}", strategy, err);
                // Split remainders may still border untouched partitions
                if list.mode() == PartitionMode::Dynamic {
                    list.coalesce();
                }
            }
        });

        info!(process = %record.id, remaining = self.processes.len(), "Process terminated");
        Ok(record)
    }

    /// Compact every list; dynamic partitioning only.
    /// Returns the trailing free space per strategy.
    pub fn compact(&mut self) -> SimulationResult<PerStrategy<Size>> {
        if self.config.mode == PartitionMode::Fixed {
            warn!("Compaction not applicable for fixed partitions");
            return Err(SimulationError::NotApplicable(self.config.mode));
        }

        let span = span_operation("compact");
        let _guard = span.enter();
        span.record_items(self.processes.len());

        let mut free_tails = PerStrategy::splat(0);
        for strategy in Strategy::ALL {
            *free_tails.get_mut(strategy) = self.lists.get_mut(strategy).compact()?;
        }
        self.refresh_placements();

        info!("Memory compacted for all algorithms");
        Ok(free_tails)
    }

    /// Re-read each record's block copies after blocks moved
    fn refresh_placements(&mut self) {
        let lists = &self.lists;
        for record in &mut self.processes {
            record.placements = lists.map(|_, list| list.find(&record.id).cloned());
        }
    }

    /// Suggested id for the next admission (`P{n}`), skipping live ids
    pub fn next_process_id(&self) -> ProcessId {
        (self.next_pid..)
            .map(ProcessId::numbered)
            .find(|id| self.process(id.as_str()).is_none())
            .unwrap_or_else(|| ProcessId::numbered(self.next_pid))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn total_memory(&self) -> Size {
        self.config.total_memory
    }

    /// Live processes in admission order
    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    pub fn process(&self, id: &str) -> Option<&ProcessRecord> {
        self.processes.iter().find(|p| p.id == id)
    }

    pub fn block_list(&self, strategy: Strategy) -> &BlockList {
        self.lists.get(strategy)
    }

    /// Read-only view of one strategy's blocks
    pub fn snapshot(&self, strategy: Strategy) -> &[MemoryBlock] {
        self.lists.get(strategy).blocks()
    }

    pub fn fragmentation_report(&self, scope: impl Into<ReportScope>) -> FragmentationReport {
        let total = self.config.total_memory;
        match scope.into() {
            ReportScope::Strategy(strategy) => FragmentationReport::from_stats(
                &FragmentationStats::analyze(self.snapshot(strategy)),
                total,
            ),
            ReportScope::Aggregate => {
                let stats: Vec<FragmentationStats> = Strategy::ALL
                    .iter()
                    .map(|&s| FragmentationStats::analyze(self.snapshot(s)))
                    .collect();
                FragmentationReport::mean(&stats, total)
            }
        }
    }

    pub fn comparison(&self) -> Comparison {
        Comparison {
            strategies: self
                .lists
                .map(|strategy, _| self.fragmentation_report(strategy)),
            aggregate: self.fragmentation_report(ReportScope::Aggregate),
        }
    }

    /// Full cloned state for reporting
    pub fn state(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            config: self.config,
            processes: self.processes.clone(),
            blocks: self.lists.map(|_, list| list.snapshot()),
            comparison: self.comparison(),
        }
    }

    /// Structural invariants of every list
    pub fn check_invariants(&self) -> Result<(), LayoutViolation> {
        self.lists
            .iter()
            .try_for_each(|(_, list)| list.check_invariants())
    }
}
