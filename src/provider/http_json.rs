//! JSON availability feed provider
//!
//! Scrapes booking systems that expose availability as a JSON calendar feed.
//! The feed is requested with the date window as query parameters:
//!
//! ```text
//! GET <url>?from=2026-07-01&to=2026-07-31&rooms=Dorm,Double
//! ```
//!
//! and is expected to answer with
//!
//! ```json
//! {
//!   "rooms": [
//!     { "name": "Dorm", "days": [ { "date": "2026-07-01", "available": true, "freePlaces": 4 } ] }
//!   ]
//! }
//! ```

use crate::config::HttpConfig;
use crate::provider::traits::{ProviderError, ProviderResult, ScrapeProvider};
use crate::provider::{AvailabilityRecord, ScrapeRequest, ScrapeResult, SubResourceAvailability};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Type tag under which this provider is registered
pub const JSON_API_PROVIDER: &str = "json-api";

#[derive(Debug, Deserialize)]
struct AvailabilityFeed {
    #[serde(default)]
    rooms: Vec<FeedRoom>,
}

#[derive(Debug, Deserialize)]
struct FeedRoom {
    name: String,
    #[serde(default)]
    days: Vec<FeedDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedDay {
    date: NaiveDate,
    available: bool,
    #[serde(default)]
    free_places: Option<u32>,
}

/// Provider for JSON availability feeds
pub struct HttpJsonProvider {
    settings: HttpConfig,
    client: Option<Client>,
}

impl HttpJsonProvider {
    pub fn new(settings: HttpConfig) -> Self {
        Self {
            settings,
            client: None,
        }
    }

    fn build_client(&self) -> Result<Client, reqwest::Error> {
        Client::builder()
            .user_agent(self.settings.user_agent.as_str())
            .timeout(Duration::from_secs(self.settings.timeout_secs))
            .connect_timeout(Duration::from_secs(self.settings.connect_timeout_secs))
            .gzip(true)
            .brotli(true)
            .build()
    }
}

#[async_trait]
impl ScrapeProvider for HttpJsonProvider {
    async fn initialize(&mut self) -> ProviderResult<()> {
        self.client = Some(self.build_client()?);
        Ok(())
    }

    async fn scrape(&mut self, request: &ScrapeRequest) -> ProviderResult<ScrapeResult> {
        let client = self.client.as_ref().ok_or(ProviderError::NotInitialized)?;

        let mut query = vec![
            ("from", request.date_range.start_date().to_string()),
            ("to", request.date_range.end_date().to_string()),
        ];
        if let Some(rooms) = &request.sub_resources {
            query.push(("rooms", rooms.join(",")));
        }

        tracing::debug!(
            url = %request.url,
            target_name = %request.target_name,
            "Requesting availability feed"
        );
        let response = client.get(&request.url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(ScrapeResult::failed(
                JSON_API_PROVIDER,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let body = response.text().await?;
        let feed: AvailabilityFeed = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(ScrapeResult::succeeded(
            JSON_API_PROVIDER,
            normalize_feed(feed, request),
        ))
    }

    async fn cleanup(&mut self) -> ProviderResult<()> {
        self.client = None;
        Ok(())
    }
}

/// Keeps requested rooms and days inside the requested window
fn normalize_feed(feed: AvailabilityFeed, request: &ScrapeRequest) -> Vec<SubResourceAvailability> {
    feed.rooms
        .into_iter()
        .filter(|room| match &request.sub_resources {
            Some(wanted) => wanted.iter().any(|name| name == &room.name),
            None => true,
        })
        .map(|room| SubResourceAvailability {
            name: room.name,
            availability: room
                .days
                .into_iter()
                .filter(|day| request.date_range.contains_date(day.date))
                .map(|day| AvailabilityRecord {
                    date: day.date,
                    available: day.available,
                    free_places: day.free_places,
                })
                .collect(),
        })
        .collect()
}
