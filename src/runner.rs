//! Chunked runner: classifies a whole address list cooperatively

use std::time::Instant;
use tracing::{debug, info, trace};

use crate::classify::Classifier;
use crate::error::Result;
use crate::types::{ClassificationResult, ProcessResult, RunStats, ValidationRules};

/// Cadence of progress reports and scheduler yields, in processed items.
/// A value of zero disables that cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    pub progress_every: usize,
    pub yield_every: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            progress_every: 100,
            yield_every: 1000,
        }
    }
}

/// Receives `(processed, total)` while a run advances
pub trait ProgressObserver {
    fn on_progress(&mut self, processed: usize, total: usize);
}

impl<F: FnMut(usize, usize)> ProgressObserver for F {
    fn on_progress(&mut self, processed: usize, total: usize) {
        self(processed, total);
    }
}

/// Observer that ignores every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _processed: usize, _total: usize) {}
}

const fn on_cadence(every: usize, processed: usize, total: usize) -> bool {
    every > 0 && processed < total && processed % every == 0
}

/// Drives the [`Classifier`] over an ordered address list.
///
/// One run at a time; there is no cancellation once a run has started.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    classifier: Classifier,
    config: RunnerConfig,
}

impl Runner {
    #[must_use]
    pub const fn new(classifier: Classifier, config: RunnerConfig) -> Self {
        Self { classifier, config }
    }

    #[must_use]
    pub const fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    #[must_use]
    pub const fn config(&self) -> RunnerConfig {
        self.config
    }

    /// Classify `addresses` without progress reporting
    pub async fn run<S: AsRef<str>>(
        &self,
        addresses: &[S],
        rules: &ValidationRules,
    ) -> Result<ProcessResult> {
        self.run_with_progress(addresses, rules, &mut NoProgress).await
    }

    /// Classify `addresses` in input order.
    ///
    /// Fails before touching any address when `rules` has nothing enabled.
    /// `progress` is called every `progress_every` items and exactly once
    /// with `(total, total)` at the end. Control goes back to the scheduler
    /// every `yield_every` items.
    pub async fn run_with_progress<S, P>(
        &self,
        addresses: &[S],
        rules: &ValidationRules,
        progress: &mut P,
    ) -> Result<ProcessResult>
    where
        S: AsRef<str>,
        P: ProgressObserver + ?Sized,
    {
        rules.validate()?;

        let start = Instant::now();
        let total = addresses.len();
        let mut valid = Vec::new();
        let mut invalid = Vec::new();

        debug!("Classifying {total} addresses with {rules:?}");

        for (index, address) in addresses.iter().enumerate() {
            match self.classifier.classify(address.as_ref(), rules) {
                ClassificationResult::Valid(address) => valid.push(address),
                ClassificationResult::Invalid(rejected) => invalid.push(rejected),
            }

            let processed = index + 1;
            if on_cadence(self.config.progress_every, processed, total) {
                trace!("Progress {processed}/{total}");
                progress.on_progress(processed, total);
            }
            if on_cadence(self.config.yield_every, processed, total) {
                tokio::task::yield_now().await;
            }
        }

        progress.on_progress(total, total);

        let stats = RunStats {
            total,
            valid_count: valid.len(),
            invalid_count: invalid.len(),
            elapsed: start.elapsed(),
        };

        info!(
            "Run complete: {} valid, {} invalid of {total} in {:?}",
            stats.valid_count, stats.invalid_count, stats.elapsed
        );

        Ok(ProcessResult {
            total,
            valid,
            invalid,
            stats,
        })
    }
}
