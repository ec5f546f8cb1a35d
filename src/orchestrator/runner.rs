//! Per-target retry runner
//!
//! Drives a single target through the provider lifecycle, retrying failed
//! attempts with a linear backoff, and produces the terminal outcome.

use crate::orchestrator::{Orchestrator, Target, TargetOutcome};
use crate::provider::{ProviderError, ProviderResult, ScrapeProvider, ScrapeRequest, ScrapeResult};
use tokio::time::{sleep, Instant};

/// Fallback message when a provider reports failure without saying why
const UNSPECIFIED_FAILURE: &str = "Scrape reported failure";

impl Orchestrator {
    /// Runs one target to success or to exhaustion of its attempts
    ///
    /// Every failure (unknown provider, initialization error, scrape error or
    /// a result flagged unsuccessful) is retried the same way: after attempt
    /// `n` fails the runner sleeps `n * retry_backoff` before attempt `n + 1`.
    /// No error escapes: the returned outcome carries either the result or
    /// the last attempt's error.
    pub async fn run_with_retry(&self, target: &Target) -> TargetOutcome {
        let started = Instant::now();
        let max_attempts = self.options.retries.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;
            tracing::info!(
                target_id = %target.id,
                target_name = %target.name,
                provider = %target.provider_type,
                attempt,
                max_attempts,
                "Starting scrape attempt"
            );

            match self.attempt(target).await {
                Ok(result) => {
                    self.persist(target, &result).await;

                    let outcome =
                        TargetOutcome::succeeded(target, attempt, elapsed_ms(started), result);
                    tracing::info!(
                        target_id = %target.id,
                        target_name = %target.name,
                        attempt,
                        sub_resources = outcome.sub_resources_scraped.unwrap_or(0),
                        availability_records = outcome.availability_records.unwrap_or(0),
                        "Scrape succeeded"
                    );
                    return outcome;
                }
                Err(error) if attempt < max_attempts => {
                    let backoff = self.options.backoff_after(attempt);
                    tracing::warn!(
                        target_id = %target.id,
                        target_name = %target.name,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %error,
                        "Scrape attempt failed, retrying"
                    );
                    sleep(backoff).await;
                }
                Err(error) => {
                    tracing::error!(
                        target_id = %target.id,
                        target_name = %target.name,
                        attempts = attempt,
                        error = %error,
                        "Scrape failed, attempts exhausted"
                    );
                    return TargetOutcome::failed(
                        target,
                        attempt,
                        elapsed_ms(started),
                        error.to_string(),
                    );
                }
            }
        }
    }

    /// One attempt: fresh provider, initialize, scrape, cleanup
    async fn attempt(&self, target: &Target) -> ProviderResult<ScrapeResult> {
        let mut provider = self
            .factory
            .create(&target.provider_type)
            .ok_or_else(|| ProviderError::NotFound(target.provider_type.clone()))?;

        let scraped = self.drive(provider.as_mut(), target).await;

        // Cleanup errors never replace the attempt's own outcome
        if let Err(e) = provider.cleanup().await {
            tracing::warn!(
                target_id = %target.id,
                target_name = %target.name,
                error = %e,
                "Provider cleanup failed"
            );
        }

        let result = scraped?;
        if !result.is_success() {
            let message = result
                .metadata
                .error
                .clone()
                .unwrap_or_else(|| UNSPECIFIED_FAILURE.to_string());
            return Err(ProviderError::Reported(message));
        }

        Ok(result)
    }

    async fn drive(
        &self,
        provider: &mut dyn ScrapeProvider,
        target: &Target,
    ) -> ProviderResult<ScrapeResult> {
        provider.initialize().await?;
        let request = self.build_request(target);
        provider.scrape(&request).await
    }

    /// Builds the provider request for a target and the run's date window
    pub fn build_request(&self, target: &Target) -> ScrapeRequest {
        ScrapeRequest {
            target_id: target.id.clone(),
            target_name: target.name.clone(),
            url: target.url.clone(),
            date_range: self.options.date_range,
            sub_resources: target.sub_resources.clone(),
        }
    }

    /// Hands a successful result to the persistence sink, absorbing failures
    async fn persist(&self, target: &Target, result: &ScrapeResult) {
        if !self.options.save_to_database {
            return;
        }

        let Some(persistence) = &self.persistence else {
            tracing::debug!(
                target_name = %target.name,
                "Saving enabled but no persistence sink attached"
            );
            return;
        };

        match persistence
            .save_scrape_result(result, &target.name, &target.url, &target.provider_type)
            .await
        {
            Ok(receipt) => tracing::debug!(
                target_name = %target.name,
                property_id = %receipt.property_id,
                sub_resources = receipt.sub_resource_ids.len(),
                "Saved scrape result"
            ),
            Err(e) => tracing::error!(
                target_id = %target.id,
                target_name = %target.name,
                error = %e,
                "Failed to save scrape result"
            ),
        }
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    since.elapsed().as_millis() as u64
}
