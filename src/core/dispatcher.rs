// dispatcher.rs - Bounded worker pool fan-out of group comparisons

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use crossbeam_channel::unbounded;
use indicatif::{ProgressBar, ProgressStyle};
use crate::core::window::{process_sequences, GroupOutcome};
use crate::data::comparison::ComparisonRecord;
use crate::data::sequence::{AlignmentSet, SequenceRecord};
use crate::data::table::ComparisonTable;
use crate::error::{KmerError, Result};
use crate::logging::Logger;

/// Worker count used when none is configured
pub const DEFAULT_WORKERS: usize = 10;

/// One independent piece of work: compare a single group
#[derive(Debug, Clone)]
pub struct GroupUnit {
    pub file_name: String,
    pub sequences: Vec<SequenceRecord>,
    pub k: usize,
}

impl GroupUnit {
    pub fn new(file_name: String, sequences: Vec<SequenceRecord>, k: usize) -> Self {
        Self {
            file_name,
            sequences,
            k,
        }
    }

    pub fn run(&self, logger: &Logger) -> GroupOutcome {
        process_sequences(&self.file_name, &self.sequences, self.k, logger)
    }
}

/// Aggregated output of a dispatch: rows of all successful groups plus one
/// `Error in <file>: <message>` line per failed group.
#[derive(Debug, Clone, Default)]
pub struct ComparisonRun {
    pub processed: Vec<ComparisonRecord>,
    pub errors: Vec<String>,
    pub groups_submitted: usize,
    pub groups_failed: usize,
}

impl ComparisonRun {
    fn absorb(&mut self, outcome: GroupOutcome) {
        if let Some(error) = outcome.error {
            self.errors.push(format!("Error in {}: {}", outcome.file_name, error));
            self.groups_failed += 1;
        }
        self.processed.extend(outcome.results);
    }

    pub fn groups_succeeded(&self) -> usize {
        self.groups_submitted - self.groups_failed
    }

    pub fn into_table(self) -> ComparisonTable {
        ComparisonTable::from_records(self.processed)
    }
}

/// Fans group units out to a fixed-size rayon pool and gathers outcomes
/// from a channel as they complete.
pub struct Dispatcher {
    workers: usize,
    show_progress: bool,
    logger: Logger,
}

impl Dispatcher {
    pub fn new(workers: Option<usize>, logger: &Logger) -> Self {
        Self {
            workers: workers.unwrap_or(DEFAULT_WORKERS).max(1),
            show_progress: true,
            logger: logger.scoped("dispatcher"),
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Compare every group of an alignment set
    pub fn dispatch_groups(&self, alignments: AlignmentSet, k: usize) -> Result<ComparisonRun> {
        let units = alignments
            .groups
            .into_iter()
            .map(|(file_name, sequences)| GroupUnit::new(file_name, sequences, k))
            .collect();
        self.dispatch(units)
    }

    /// Run all units. A failing or panicking unit only adds an error line;
    /// only failing to build the pool aborts.
    pub fn dispatch(&self, units: Vec<GroupUnit>) -> Result<ComparisonRun> {
        self.dispatch_with(units, |unit, logger| unit.run(logger))
    }

    /// [`dispatch`](Self::dispatch) with a custom unit body
    pub fn dispatch_with<F>(&self, units: Vec<GroupUnit>, body: F) -> Result<ComparisonRun>
    where
        F: Fn(&GroupUnit, &Logger) -> GroupOutcome + Send + Sync + 'static,
    {
        let start = Instant::now();
        let total = units.len();
        self.logger.info(format!(
            "Starting comparison of {} groups with {} workers",
            total, self.workers
        ));

        let panic_logger = self.logger.clone();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("kmersig-worker-{}", i))
            .panic_handler(move |_| panic_logger.error("Worker panicked while comparing a group"))
            .build()
            .map_err(|e| KmerError::ThreadPool(e.to_string()))?;

        let body = Arc::new(body);
        let (tx, rx) = unbounded::<GroupOutcome>();
        let mut pending: HashMap<String, usize> = HashMap::with_capacity(total);

        for unit in units {
            *pending.entry(unit.file_name.clone()).or_default() += 1;
            let tx = tx.clone();
            let logger = self.logger.scoped("group");
            let body = Arc::clone(&body);
            pool.spawn(move || {
                let outcome = body(&unit, &logger);
                // Receiver outlives every sender
                let _ = tx.send(outcome);
            });
        }
        drop(tx);

        let pb = self.progress_bar(total);
        let mut run = ComparisonRun {
            groups_submitted: total,
            ..ComparisonRun::default()
        };

        for outcome in rx.iter() {
            if let Some(count) = pending.get_mut(&outcome.file_name) {
                *count -= 1;
                if *count == 0 {
                    pending.remove(&outcome.file_name);
                }
            }
            run.absorb(outcome);
            pb.inc(1);
        }
        pb.finish_with_message(format!("{} groups compared", total));

        // Units whose worker died never sent an outcome
        let mut lost: Vec<(String, usize)> = pending.into_iter().collect();
        lost.sort();
        for (file_name, count) in lost {
            for _ in 0..count {
                run.absorb(GroupOutcome {
                    file_name: file_name.clone(),
                    results: Vec::new(),
                    error: Some("worker terminated without a result".to_string()),
                });
            }
        }

        self.logger.info(format!(
            "Compared {} groups in {:.2}s: {} rows, {} failed",
            total,
            start.elapsed().as_secs_f64(),
            run.processed.len(),
            run.groups_failed
        ));
        Ok(run)
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} groups {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
        pb.set_style(style);
        pb
    }
}
