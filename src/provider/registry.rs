//! Provider registry mapping type tags to constructors

use crate::config::HttpConfig;
use crate::provider::http_json::{HttpJsonProvider, JSON_API_PROVIDER};
use crate::provider::traits::{ProviderFactory, ScrapeProvider};
use std::collections::BTreeMap;
use std::sync::Arc;

type Constructor = Arc<dyn Fn() -> Box<dyn ScrapeProvider> + Send + Sync>;

/// Registry of provider constructors, resolved by type tag at scrape time
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    constructors: BTreeMap<String, Constructor>,
}

impl ProviderRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in providers registered
    ///
    /// # Arguments
    ///
    /// * `http` - HTTP settings shared by the HTTP-based providers
    pub fn with_defaults(http: &HttpConfig) -> Self {
        let http = http.clone();
        Self::new().register(JSON_API_PROVIDER, move || {
            Box::new(HttpJsonProvider::new(http.clone()))
        })
    }

    /// Registers a constructor for a provider type, replacing any previous one
    pub fn register<F>(mut self, provider_type: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> Box<dyn ScrapeProvider> + Send + Sync + 'static,
    {
        self.constructors
            .insert(provider_type.into(), Arc::new(constructor));
        self
    }

    /// Returns whether a provider type is registered
    pub fn contains(&self, provider_type: &str) -> bool {
        self.constructors.contains_key(provider_type)
    }

    /// Registered type tags, sorted
    pub fn provider_types(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }
}

impl ProviderFactory for ProviderRegistry {
    fn create(&self, provider_type: &str) -> Option<Box<dyn ScrapeProvider>> {
        self.constructors
            .get(provider_type)
            .map(|constructor| constructor())
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("provider_types", &self.provider_types())
            .finish()
    }
}
