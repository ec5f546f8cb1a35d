//! Batch scheduler - main orchestration loop
//!
//! Partitions the target list into fixed-size batches, runs every target of a
//! batch concurrently, and waits for the whole batch (retries included) before
//! pacing into the next one.

use crate::orchestrator::progress::{self, ProgressCallback, ProgressSnapshot};
use crate::orchestrator::report::{self, OrchestrationReport};
use crate::orchestrator::{OrchestrationOptions, OutcomeLists, Target, TargetOutcome};
use crate::persistence::Persistence;
use crate::provider::ProviderFactory;
use crate::ConfigError;
use chrono::{DateTime, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::{sleep, Instant};

type TargetFilter = Box<dyn Fn(&Target) -> bool + Send + Sync>;

/// Result lists of one run and when it started
#[derive(Debug)]
pub(crate) struct RunState {
    pub(crate) lists: OutcomeLists,
    pub(crate) started_at: DateTime<Utc>,
}

impl RunState {
    fn start() -> Self {
        Self {
            lists: OutcomeLists::default(),
            started_at: Utc::now(),
        }
    }
}

/// Multi-target scrape orchestrator
///
/// Every [`Orchestrator::scrape_all`] call accumulates into its own result
/// lists, so overlapping runs on one instance never see each other's
/// outcomes. The lists of the most recently finished run are kept for
/// [`Orchestrator::compute_snapshot`] and [`Orchestrator::build_report`].
pub struct Orchestrator {
    pub(crate) options: OrchestrationOptions,
    pub(crate) factory: Arc<dyn ProviderFactory>,
    pub(crate) persistence: Option<Arc<dyn Persistence>>,
    filter: Option<TargetFilter>,
    last_run: Mutex<RunState>,
}

impl Orchestrator {
    /// Creates a new orchestrator
    ///
    /// # Arguments
    ///
    /// * `options` - Run-wide settings, validated here
    /// * `factory` - Resolves provider type tags to fresh provider instances
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Ready to run
    /// * `Err(ConfigError)` - The options violate an invariant
    pub fn new(
        options: OrchestrationOptions,
        factory: Arc<dyn ProviderFactory>,
    ) -> Result<Self, ConfigError> {
        options.validate()?;

        Ok(Self {
            options,
            factory,
            persistence: None,
            filter: None,
            last_run: Mutex::new(RunState::start()),
        })
    }

    /// Attaches the sink used when `save_to_database` is enabled
    pub fn with_persistence(mut self, persistence: Arc<dyn Persistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Excludes targets for which `filter` returns false; they are reported as skipped
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Target) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn options(&self) -> &OrchestrationOptions {
        &self.options
    }

    /// Scrapes every target and returns the final report
    ///
    /// Targets run `concurrency` at a time. Each batch is a barrier: batch N
    /// finishes completely before batch N + 1 starts, with
    /// `delay_between_batches` in between. `on_progress` is called once per
    /// finished batch. Per-target failures end up in the report; this method
    /// itself never fails.
    pub async fn scrape_all(
        &self,
        targets: &[Target],
        mut on_progress: Option<ProgressCallback<'_>>,
    ) -> OrchestrationReport {
        let started = Instant::now();
        let mut run = RunState::start();
        let runnable = self.partition(targets, &mut run.lists);

        let batch_size = self.options.concurrency.max(1);
        let total_batches = self.options.total_batches(runnable.len());

        tracing::info!(
            targets = runnable.len(),
            skipped = run.lists.skipped.len(),
            batch_size,
            total_batches,
            "Starting scrape run"
        );

        for (index, batch) in runnable.chunks(batch_size).enumerate() {
            let current_batch = index + 1;
            tracing::info!(
                batch = current_batch,
                total_batches,
                size = batch.len(),
                "Starting batch"
            );

            let mut pending: FuturesUnordered<_> = batch
                .iter()
                .enumerate()
                .map(|(position, target)| self.run_staggered(target, position))
                .collect();
            while let Some(outcome) = pending.next().await {
                run.lists.record(outcome);
            }

            let snapshot = progress::compute_snapshot(
                &run.lists,
                current_batch,
                total_batches,
                runnable.len(),
            );
            tracing::info!(
                batch = snapshot.current_batch,
                total_batches = snapshot.total_batches,
                completed = snapshot.completed,
                total = snapshot.total,
                successful = snapshot.successful,
                failed = snapshot.failed,
                "Progress: {:.1}% success",
                snapshot.success_rate
            );
            if let Some(callback) = on_progress.as_deref_mut() {
                callback(&snapshot);
            }

            if current_batch < total_batches {
                tracing::debug!(
                    delay_ms = self.options.delay_between_batches,
                    "Waiting before next batch"
                );
                sleep(self.options.batch_delay()).await;
            }
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        let report = report::build_report(&run.lists, run.started_at, duration_ms);
        *self.last_run() = run;

        tracing::info!(
            total = report.summary.total,
            successful = report.summary.successful,
            failed = report.summary.failed,
            skipped = report.summary.skipped,
            duration = %report.summary.duration,
            "Scrape run completed"
        );
        report
    }

    /// Progress of the most recently finished run; pure read
    pub fn compute_snapshot(
        &self,
        current_batch: usize,
        total_batches: usize,
        total_targets: usize,
    ) -> ProgressSnapshot {
        progress::compute_snapshot(
            &self.last_run().lists,
            current_batch,
            total_batches,
            total_targets,
        )
    }

    /// Report over the most recently finished run, as if it lasted `duration_ms`
    pub fn build_report(&self, duration_ms: u64) -> OrchestrationReport {
        let run = self.last_run();
        report::build_report(&run.lists, run.started_at, duration_ms)
    }

    /// Splits off filtered targets into `lists.skipped`, returning the rest
    fn partition<'a>(&self, targets: &'a [Target], lists: &mut OutcomeLists) -> Vec<&'a Target> {
        let mut runnable = Vec::with_capacity(targets.len());
        for target in targets {
            match &self.filter {
                Some(filter) if !filter(target) => {
                    tracing::debug!(
                        target_id = %target.id,
                        target_name = %target.name,
                        "Skipping target"
                    );
                    lists.skipped.push(target.clone());
                }
                _ => runnable.push(target),
            }
        }
        runnable
    }

    async fn run_staggered(&self, target: &Target, position: usize) -> TargetOutcome {
        let offset = self.options.target_stagger(position);
        if !offset.is_zero() {
            sleep(offset).await;
        }
        self.run_with_retry(target).await
    }

    fn last_run(&self) -> MutexGuard<'_, RunState> {
        self.last_run.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("options", &self.options)
            .field("persistence", &self.persistence.is_some())
            .field("filter", &self.filter.is_some())
            .finish()
    }
}
