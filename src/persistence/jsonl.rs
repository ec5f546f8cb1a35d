//! JSON Lines persistence sink
//!
//! Appends one JSON object per saved scrape result to a file.

use crate::persistence::traits::{Persistence, PersistenceResult, SaveReceipt};
use crate::provider::ScrapeResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SavedRecord<'a> {
    property_id: &'a str,
    sub_resource_ids: &'a [String],
    target_name: &'a str,
    url: &'a str,
    provider_type: &'a str,
    saved_at: DateTime<Utc>,
    result: &'a ScrapeResult,
}

/// File-backed sink writing JSON Lines
pub struct JsonLinesPersistence {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesPersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Persistence for JsonLinesPersistence {
    async fn save_scrape_result(
        &self,
        result: &ScrapeResult,
        target_name: &str,
        url: &str,
        provider_type: &str,
    ) -> PersistenceResult<SaveReceipt> {
        let property_id = slugify(target_name);
        let sub_resource_ids: Vec<String> = result
            .sub_resources
            .iter()
            .map(|sub| format!("{}/{}", property_id, slugify(&sub.name)))
            .collect();

        let mut line = serde_json::to_string(&SavedRecord {
            property_id: &property_id,
            sub_resource_ids: &sub_resource_ids,
            target_name,
            url,
            provider_type,
            saved_at: Utc::now(),
            result,
        })?;
        line.push('\n');

        // Concurrent targets of a batch share the file
        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(SaveReceipt {
            property_id,
            sub_resource_ids,
        })
    }
}

/// Lowercase ASCII slug: alphanumerics kept, everything else collapsed to '-'
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
