use crate::orchestrator::DateRange;
use crate::ConfigError;
use std::time::Duration;

/// Default number of targets run in parallel per batch
pub const DEFAULT_CONCURRENCY: usize = 3;

/// Default maximum attempts per target
pub const DEFAULT_RETRIES: u32 = 3;

/// Default pause between batches (milliseconds)
pub const DEFAULT_DELAY_BETWEEN_BATCHES_MS: u64 = 10_000;

/// Base of the linear retry backoff; attempt `n` waits `n * base` (milliseconds)
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 30_000;

/// Run-wide orchestration settings
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestrationOptions {
    /// Targets run concurrently within one batch
    pub concurrency: usize,

    /// Maximum attempts per target, the first attempt included
    pub retries: u32,

    /// Pause between consecutive batches (milliseconds)
    pub delay_between_batches: u64,

    /// Start offset between targets of the same batch (milliseconds)
    pub delay_between_targets: u64,

    /// Linear backoff base between attempts (milliseconds)
    pub retry_backoff: u64,

    pub save_to_database: bool,
    pub save_to_file: bool,
    pub date_range: DateRange,
}

impl Default for OrchestrationOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            retries: DEFAULT_RETRIES,
            delay_between_batches: DEFAULT_DELAY_BETWEEN_BATCHES_MS,
            delay_between_targets: 0,
            retry_backoff: DEFAULT_RETRY_BACKOFF_MS,
            save_to_database: false,
            save_to_file: false,
            date_range: DateRange::default(),
        }
    }
}

impl OrchestrationOptions {
    /// Checks the run-wide invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency < 1 {
            return Err(ConfigError::Validation(format!(
                "concurrency must be >= 1, got {}",
                self.concurrency
            )));
        }

        if self.retries < 1 {
            return Err(ConfigError::Validation(format!(
                "retries must be >= 1, got {}",
                self.retries
            )));
        }

        if !self.date_range.is_valid() {
            return Err(ConfigError::Validation(format!(
                "date range start {} is after end {}",
                self.date_range.start, self.date_range.end
            )));
        }

        Ok(())
    }

    /// Number of batches needed for `target_count` targets
    pub fn total_batches(&self, target_count: usize) -> usize {
        target_count.div_ceil(self.concurrency.max(1))
    }

    /// Sleep before attempt `attempt + 1` after attempt `attempt` failed
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff.saturating_mul(u64::from(attempt)))
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.delay_between_batches)
    }

    /// Start offset of the target at `index` within its batch
    pub fn target_stagger(&self, index: usize) -> Duration {
        Duration::from_millis(self.delay_between_targets.saturating_mul(index as u64))
    }
}
