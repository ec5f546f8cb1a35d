use crate::orchestrator::{
    DateRange, OrchestrationOptions, Target, TargetId, DEFAULT_CONCURRENCY,
    DEFAULT_DELAY_BETWEEN_BATCHES_MS, DEFAULT_RETRIES, DEFAULT_RETRY_BACKOFF_MS,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Default availability window when none is configured
pub const DEFAULT_DAYS_AHEAD: u32 = 30;

/// Main configuration structure for Hut-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub orchestration: OrchestrationConfig,
    #[serde(rename = "date-range", default)]
    pub date_range: DateRangeConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(rename = "target", default)]
    pub targets: Vec<TargetEntry>,
}

impl Config {
    /// Run options with the date window resolved against the current time
    pub fn orchestration_options(&self) -> OrchestrationOptions {
        OrchestrationOptions {
            concurrency: self.orchestration.concurrency,
            retries: self.orchestration.retries,
            delay_between_batches: self.orchestration.delay_between_batches,
            delay_between_targets: self.orchestration.delay_between_targets,
            retry_backoff: self.orchestration.retry_backoff,
            save_to_database: self.orchestration.save_to_database,
            save_to_file: self.orchestration.save_to_file,
            date_range: self.date_range.resolve(),
        }
    }

    /// Configured targets in file order
    pub fn targets(&self) -> Vec<Target> {
        self.targets.iter().map(TargetEntry::to_target).collect()
    }
}

/// Batching, retry and saving behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrchestrationConfig {
    /// Targets scraped in parallel per batch
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Maximum attempts per target
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Pause between batches (milliseconds)
    #[serde(default = "default_delay_between_batches")]
    pub delay_between_batches: u64,

    /// Start offset between targets of one batch (milliseconds)
    #[serde(default)]
    pub delay_between_targets: u64,

    /// Linear backoff base between attempts (milliseconds)
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff: u64,

    /// Hand successful results to the results sink
    #[serde(default)]
    pub save_to_database: bool,

    /// Write the final report to `output.report-path`
    #[serde(default)]
    pub save_to_file: bool,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            retries: DEFAULT_RETRIES,
            delay_between_batches: DEFAULT_DELAY_BETWEEN_BATCHES_MS,
            delay_between_targets: 0,
            retry_backoff: DEFAULT_RETRY_BACKOFF_MS,
            save_to_database: false,
            save_to_file: false,
        }
    }
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

fn default_delay_between_batches() -> u64 {
    DEFAULT_DELAY_BETWEEN_BATCHES_MS
}

fn default_retry_backoff() -> u64 {
    DEFAULT_RETRY_BACKOFF_MS
}

/// Availability window: explicit bounds, or a number of days from start/now
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DateRangeConfig {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub days_ahead: Option<u32>,
}

impl DateRangeConfig {
    pub fn resolve(&self) -> DateRange {
        let start = self.start.unwrap_or_else(Utc::now);
        let end = match (self.end, self.days_ahead) {
            (Some(end), _) => end,
            (None, Some(days)) => start + Duration::days(i64::from(days)),
            (None, None) => start + Duration::days(i64::from(DEFAULT_DAYS_AHEAD)),
        };
        DateRange::new(start, end)
    }
}

/// Settings for HTTP-based providers
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("hut-ripple/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the JSON report written when `save-to-file` is set
    pub report_path: String,

    /// Path of the JSON Lines results file written when `save-to-database` is set
    pub results_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: "./report.json".to_string(),
            results_path: "./results.jsonl".to_string(),
        }
    }
}

/// One `[[target]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetEntry {
    pub id: TargetId,
    pub name: String,

    /// Provider type tag (e.g. "json-api")
    pub provider: String,

    pub url: String,

    #[serde(default)]
    pub sub_resources: Option<Vec<String>>,
}

impl TargetEntry {
    pub fn to_target(&self) -> Target {
        Target {
            id: self.id.clone(),
            name: self.name.clone(),
            provider_type: self.provider.clone(),
            url: self.url.clone(),
            sub_resources: self.sub_resources.clone(),
        }
    }
}
