//! Request and result shapes exchanged with scrape providers

use crate::orchestrator::{DateRange, TargetId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// What a provider is asked to scrape for one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    pub target_id: TargetId,
    pub target_name: String,
    pub url: String,
    pub date_range: DateRange,

    /// Restricts scraping to these sub-resources (room types) when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_resources: Option<Vec<String>>,
}

/// Availability of one sub-resource on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    pub date: NaiveDate,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_places: Option<u32>,
}

/// Calendar of a single sub-resource (room type, dormitory, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubResourceAvailability {
    pub name: String,
    #[serde(default)]
    pub availability: Vec<AvailabilityRecord>,
}

/// Provider-reported status of a scrape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeMetadata {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub provider: String,
    pub scraped_at: DateTime<Utc>,
}

/// Normalized output of one scrape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    #[serde(default)]
    pub sub_resources: Vec<SubResourceAvailability>,
    pub metadata: ScrapeMetadata,
}

impl ScrapeResult {
    /// Builds a successful result
    pub fn succeeded(
        provider: impl Into<String>,
        sub_resources: Vec<SubResourceAvailability>,
    ) -> Self {
        Self {
            sub_resources,
            metadata: ScrapeMetadata {
                success: true,
                error: None,
                provider: provider.into(),
                scraped_at: Utc::now(),
            },
        }
    }

    /// Builds a soft failure: the provider ran but could not produce data
    pub fn failed(provider: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            sub_resources: Vec::new(),
            metadata: ScrapeMetadata {
                success: false,
                error: Some(error.into()),
                provider: provider.into(),
                scraped_at: Utc::now(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.metadata.success
    }

    /// Number of sub-resources scraped
    pub fn sub_resource_count(&self) -> usize {
        self.sub_resources.len()
    }

    /// Number of availability records across all sub-resources
    pub fn availability_count(&self) -> usize {
        self.sub_resources
            .iter()
            .map(|sub| sub.availability.len())
            .sum()
    }
}
