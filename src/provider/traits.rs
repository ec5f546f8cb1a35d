//! Provider traits and error types
//!
//! This module defines the lifecycle contract every scrape provider implements
//! and the factory seam the orchestrator uses to obtain providers.

use crate::provider::{ScrapeRequest, ScrapeResult};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while driving a provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider '{0}' not found")]
    NotFound(String),

    #[error("Provider used before initialize()")]
    NotInitialized,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Reported(String),

    #[error("{0}")]
    Other(String),
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Lifecycle of a single scrape attempt against one external system
///
/// A provider instance is used for exactly one attempt: `initialize`, then
/// `scrape`, then `cleanup`. Instances hold session state (clients, tokens)
/// and are never shared between targets.
#[async_trait]
pub trait ScrapeProvider: Send + Sync {
    /// Prepares sessions, clients or browsers needed for scraping
    async fn initialize(&mut self) -> ProviderResult<()>;

    /// Scrapes availability for the request
    ///
    /// A returned result whose `metadata.success` is false is a soft failure
    /// and is retried like an error.
    async fn scrape(&mut self, request: &ScrapeRequest) -> ProviderResult<ScrapeResult>;

    /// Releases whatever `initialize` acquired
    async fn cleanup(&mut self) -> ProviderResult<()>;
}

/// Resolves a provider type tag to a fresh provider instance
///
/// Lookups must be cheap and synchronous; expensive setup belongs in
/// [`ScrapeProvider::initialize`].
pub trait ProviderFactory: Send + Sync {
    fn create(&self, provider_type: &str) -> Option<Box<dyn ScrapeProvider>>;
}

impl<F> ProviderFactory for F
where
    F: Fn(&str) -> Option<Box<dyn ScrapeProvider>> + Send + Sync,
{
    fn create(&self, provider_type: &str) -> Option<Box<dyn ScrapeProvider>> {
        self(provider_type)
    }
}
