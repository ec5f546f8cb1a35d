use crate::orchestrator::{OutcomeLists, Target, TargetOutcome};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Aggregate figures of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,

    /// Share of all targets that succeeded, e.g. `"80.00%"`
    pub success_rate: String,

    /// Wall-clock run time, e.g. `"12.50s"`
    pub duration: String,
    pub duration_ms: u64,
    pub avg_time_per_target: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Final result of a multi-target run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationReport {
    pub summary: ReportSummary,
    pub successful: Vec<TargetOutcome>,
    pub failed: Vec<TargetOutcome>,
    pub skipped: Vec<Target>,
}

impl OrchestrationReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Assembles the final report from the frozen result lists
///
/// Count fields depend only on `lists`; `duration_ms` and `start_time` only
/// affect the timing fields.
pub fn build_report(
    lists: &OutcomeLists,
    start_time: DateTime<Utc>,
    duration_ms: u64,
) -> OrchestrationReport {
    let successful = lists.successful.len();
    let failed = lists.failed.len();
    let skipped = lists.skipped.len();
    let total = lists.total();

    let success_rate = if total > 0 {
        successful as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    let avg_time_per_target = if total > 0 {
        duration_ms as f64 / total as f64
    } else {
        0.0
    };
    let end_time = start_time + Duration::milliseconds(duration_ms as i64);

    OrchestrationReport {
        summary: ReportSummary {
            total,
            successful,
            failed,
            skipped,
            success_rate: format!("{:.2}%", success_rate),
            duration: format_seconds(duration_ms as f64),
            duration_ms,
            avg_time_per_target: format_seconds(avg_time_per_target),
            start_time,
            end_time,
        },
        successful: lists.successful.clone(),
        failed: lists.failed.clone(),
        skipped: lists.skipped.clone(),
    }
}

fn format_seconds(ms: f64) -> String {
    format!("{:.2}s", ms / 1000.0)
}
