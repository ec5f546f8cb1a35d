use crate::config::types::{
    Config, DateRangeConfig, HttpConfig, OrchestrationConfig, OutputConfig, TargetEntry,
};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_orchestration_config(&config.orchestration)?;
    validate_date_range(&config.date_range)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    validate_targets(&config.targets)?;
    Ok(())
}

/// Validates batching and retry settings
fn validate_orchestration_config(config: &OrchestrationConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > 50 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 50, got {}",
            config.concurrency
        )));
    }

    if config.retries < 1 || config.retries > 10 {
        return Err(ConfigError::Validation(format!(
            "retries must be between 1 and 10, got {}",
            config.retries
        )));
    }

    Ok(())
}

fn validate_date_range(config: &DateRangeConfig) -> Result<(), ConfigError> {
    if let Some(0) = config.days_ahead {
        return Err(ConfigError::Validation("days-ahead must be >= 1".to_string()));
    }

    if config.end.is_some() && config.days_ahead.is_some() {
        return Err(ConfigError::Validation(
            "date-range accepts either end or days-ahead, not both".to_string(),
        ));
    }

    if let (Some(start), Some(end)) = (config.start, config.end) {
        if start > end {
            return Err(ConfigError::Validation(format!(
                "date-range start {} is after end {}",
                start, end
            )));
        }
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation("user-agent cannot be empty".to_string()));
    }

    if config.timeout_secs < 1 || config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeouts must be >= 1s, got timeout-secs={} connect-timeout-secs={}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.is_empty() {
        return Err(ConfigError::Validation("report-path cannot be empty".to_string()));
    }

    if config.results_path.is_empty() {
        return Err(ConfigError::Validation("results-path cannot be empty".to_string()));
    }

    Ok(())
}

/// Validates target entries
fn validate_targets(targets: &[TargetEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in targets {
        if !seen.insert(&entry.id) {
            return Err(ConfigError::Validation(format!(
                "Duplicate target id '{}'",
                entry.id
            )));
        }

        if entry.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Target '{}' must have a name",
                entry.id
            )));
        }

        if entry.provider.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Target '{}' must name a provider",
                entry.id
            )));
        }

        let url = Url::parse(&entry.url).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "Invalid URL '{}' for target '{}': {}",
                entry.url, entry.id, e
            ))
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::InvalidUrl(format!(
                "Target '{}' URL must use http or https, got '{}'",
                entry.id,
                url.scheme()
            )));
        }
    }

    Ok(())
}
