//! Provider module for pluggable scrape adapters
//!
//! This module contains:
//! - The `ScrapeProvider` lifecycle trait and the `ProviderFactory` seam
//! - The request/result shapes shared by all providers
//! - A registry resolving provider type tags at scrape time
//! - The built-in JSON feed provider

mod http_json;
mod registry;
mod traits;
mod types;

pub use http_json::{HttpJsonProvider, JSON_API_PROVIDER};
pub use registry::ProviderRegistry;
pub use traits::{ProviderError, ProviderFactory, ProviderResult, ScrapeProvider};
pub use types::{
    AvailabilityRecord, ScrapeMetadata, ScrapeRequest, ScrapeResult, SubResourceAvailability,
};
