use crate::orchestrator::{Target, TargetId};
use crate::provider::ScrapeResult;
use serde::Serialize;

/// Terminal record of one target's (possibly multi-attempt) run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetOutcome {
    pub target_id: TargetId,
    pub target_name: String,
    pub provider_type: String,
    pub url: String,
    pub success: bool,

    /// Attempts actually made, at least 1
    pub attempts: u32,

    /// Wall-clock time of the whole run, backoff included
    pub duration_ms: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_resources_scraped: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_records: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScrapeResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TargetOutcome {
    pub fn succeeded(
        target: &Target,
        attempts: u32,
        duration_ms: u64,
        result: ScrapeResult,
    ) -> Self {
        Self {
            target_id: target.id.clone(),
            target_name: target.name.clone(),
            provider_type: target.provider_type.clone(),
            url: target.url.clone(),
            success: true,
            attempts,
            duration_ms,
            sub_resources_scraped: Some(result.sub_resource_count()),
            availability_records: Some(result.availability_count()),
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(target: &Target, attempts: u32, duration_ms: u64, error: String) -> Self {
        Self {
            target_id: target.id.clone(),
            target_name: target.name.clone(),
            provider_type: target.provider_type.clone(),
            url: target.url.clone(),
            success: false,
            attempts,
            duration_ms,
            sub_resources_scraped: None,
            availability_records: None,
            result: None,
            error: Some(error),
        }
    }
}

/// Result collections of one run, in completion order
#[derive(Debug, Clone, Default)]
pub struct OutcomeLists {
    pub successful: Vec<TargetOutcome>,
    pub failed: Vec<TargetOutcome>,
    pub skipped: Vec<Target>,
}

impl OutcomeLists {
    pub fn record(&mut self, outcome: TargetOutcome) {
        if outcome.success {
            self.successful.push(outcome);
        } else {
            self.failed.push(outcome);
        }
    }

    pub fn completed(&self) -> usize {
        self.successful.len() + self.failed.len()
    }

    pub fn total(&self) -> usize {
        self.completed() + self.skipped.len()
    }

    pub fn clear(&mut self) {
        self.successful.clear();
        self.failed.clear();
        self.skipped.clear();
    }
}
