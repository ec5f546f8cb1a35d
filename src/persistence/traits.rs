//! Persistence traits and error types

use crate::provider::ScrapeResult;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while saving scrape results
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Rejected: {0}")]
    Rejected(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Identifiers assigned to a saved result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub property_id: String,
    pub sub_resource_ids: Vec<String>,
}

/// Durable sink for successful scrape results
///
/// Failures are reported to the caller, which logs and absorbs them; a failed
/// save never turns a successful scrape into a failed one.
#[async_trait]
pub trait Persistence: Send + Sync {
    async fn save_scrape_result(
        &self,
        result: &ScrapeResult,
        target_name: &str,
        url: &str,
        provider_type: &str,
    ) -> PersistenceResult<SaveReceipt>;
}
