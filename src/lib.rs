//! Hut-Ripple: batch orchestration for mountain-hut availability scrapes
//!
//! This crate runs a list of heterogeneous scrape targets through pluggable
//! provider adapters with bounded concurrency, linear retry backoff, progress
//! reporting and a final structured report.

pub mod config;
pub mod orchestrator;
pub mod output;
pub mod persistence;
pub mod provider;

use thiserror::Error;

/// Main error type for Hut-Ripple operations
#[derive(Debug, Error)]
pub enum HutRippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] provider::ProviderError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] persistence::PersistenceError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Hut-Ripple operations
pub type Result<T> = std::result::Result<T, HutRippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use orchestrator::{
    DateRange, OrchestrationOptions, OrchestrationReport, Orchestrator, ProgressSnapshot, Target,
    TargetId, TargetOutcome,
};
pub use provider::{ProviderFactory, ProviderRegistry, ScrapeProvider, ScrapeRequest, ScrapeResult};
