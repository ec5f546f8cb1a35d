//! Orchestrator module for multi-target scrape runs
//!
//! This module contains the core orchestration logic, including:
//! - Target and run option types
//! - The per-target retry runner
//! - The batch scheduler with inter-batch pacing
//! - Progress snapshots and the final report

mod options;
mod outcome;
pub mod progress;
pub mod report;
mod runner;
mod scheduler;
mod target;

pub use options::{
    OrchestrationOptions, DEFAULT_CONCURRENCY, DEFAULT_DELAY_BETWEEN_BATCHES_MS,
    DEFAULT_RETRIES, DEFAULT_RETRY_BACKOFF_MS,
};
pub use outcome::{OutcomeLists, TargetOutcome};
pub use progress::{ProgressCallback, ProgressSnapshot};
pub use report::{OrchestrationReport, ReportSummary};
pub use scheduler::Orchestrator;
pub use target::{DateRange, Target, TargetId};
