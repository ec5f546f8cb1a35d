use crate::orchestrator::OutcomeLists;
use serde::Serialize;

/// Point-in-time view of run progress, emitted after every batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// 1-based index of the batch that just finished
    pub current_batch: usize,
    pub total_batches: usize,
    pub completed: usize,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,

    /// Percentage of completed targets that succeeded
    pub success_rate: f64,
}

/// Callback receiving progress snapshots
pub type ProgressCallback<'a> = &'a mut (dyn FnMut(&ProgressSnapshot) + Send);

/// Reads the current progress out of the result lists
pub fn compute_snapshot(
    lists: &OutcomeLists,
    current_batch: usize,
    total_batches: usize,
    total_targets: usize,
) -> ProgressSnapshot {
    let successful = lists.successful.len();
    let failed = lists.failed.len();
    let completed = lists.completed();
    let success_rate = if completed > 0 {
        successful as f64 / completed as f64 * 100.0
    } else {
        0.0
    };

    ProgressSnapshot {
        current_batch,
        total_batches,
        completed,
        total: total_targets,
        successful,
        failed,
        success_rate,
    }
}
