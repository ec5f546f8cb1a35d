use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a target, numeric or textual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{}", id),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for TargetId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// One unit of scraping work: a single hut/property on one booking system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: TargetId,
    pub name: String,

    /// Provider type tag used to resolve the scrape adapter
    #[serde(alias = "provider")]
    pub provider_type: String,

    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_resources: Option<Vec<String>>,
}

impl Target {
    pub fn new(
        id: impl Into<TargetId>,
        name: impl Into<String>,
        provider_type: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            provider_type: provider_type.into(),
            url: url.into(),
            sub_resources: None,
        }
    }

    /// Restricts scraping to the given sub-resources
    pub fn with_sub_resources<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_resources = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

/// Availability window each provider should scrape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window from now to `days` days ahead
    pub fn days_ahead(days: u32) -> Self {
        let start = Utc::now();
        Self {
            start,
            end: start + Duration::days(i64::from(days)),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Whether a calendar day falls inside the window, both ends inclusive
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::days_ahead(30)
    }
}
