//! Scriptable fakes for driving the orchestrator without real sites

use async_trait::async_trait;
use hut_ripple::orchestrator::{OrchestrationOptions, Orchestrator, Target};
use hut_ripple::persistence::{Persistence, PersistenceError, PersistenceResult, SaveReceipt};
use hut_ripple::provider::{
    AvailabilityRecord, ProviderError, ProviderResult, ScrapeProvider, ScrapeRequest,
    ScrapeResult, SubResourceAvailability,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How a fake provider behaves on each attempt
#[derive(Clone)]
pub enum Script {
    /// Succeeds after `delay` with one room holding `records` days
    Succeed { delay: Duration, records: usize },
    /// Returns a result flagged unsuccessful
    SoftFail(&'static str),
    /// `scrape` returns an error
    ScrapeError(&'static str),
    /// `initialize` returns an error
    InitError(&'static str),
    /// Soft-fails until the given attempt number, then succeeds
    SucceedOnAttempt(usize),
    /// Succeeds but `cleanup` errors
    CleanupError,
    /// `scrape` returns an error and `cleanup` errors too
    ScrapeAndCleanupError(&'static str),
}

/// Lifecycle calls observed across every provider instance of a factory
#[derive(Default)]
pub struct CallLog {
    pub created: AtomicUsize,
    pub initialized: AtomicUsize,
    pub scraped: AtomicUsize,
    pub cleaned: AtomicUsize,
    pub requests: Mutex<Vec<ScrapeRequest>>,
}

impl CallLog {
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

pub struct FakeProvider {
    script: Script,
    log: Arc<CallLog>,
}

#[async_trait]
impl ScrapeProvider for FakeProvider {
    async fn initialize(&mut self) -> ProviderResult<()> {
        self.log.initialized.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::InitError(message) => Err(ProviderError::Other(message.to_string())),
            _ => Ok(()),
        }
    }

    async fn scrape(&mut self, request: &ScrapeRequest) -> ProviderResult<ScrapeResult> {
        let attempt = self.log.scraped.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.requests.lock().unwrap().push(request.clone());

        match &self.script {
            Script::Succeed { delay, records } => {
                tokio::time::sleep(*delay).await;
                Ok(ScrapeResult::succeeded("fake", rooms(*records)))
            }
            Script::SoftFail(message) => Ok(ScrapeResult::failed("fake", *message)),
            Script::ScrapeError(message) => Err(ProviderError::Other(message.to_string())),
            Script::InitError(_) => unreachable!("scrape after failed initialize"),
            Script::SucceedOnAttempt(n) if attempt >= *n => {
                Ok(ScrapeResult::succeeded("fake", rooms(2)))
            }
            Script::SucceedOnAttempt(_) => Ok(ScrapeResult::failed("fake", "not yet")),
            Script::CleanupError => Ok(ScrapeResult::succeeded("fake", rooms(1))),
            Script::ScrapeAndCleanupError(message) => {
                Err(ProviderError::Other(message.to_string()))
            }
        }
    }

    async fn cleanup(&mut self) -> ProviderResult<()> {
        self.log.cleaned.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::CleanupError | Script::ScrapeAndCleanupError(_) => {
                Err(ProviderError::Other("cleanup boom".to_string()))
            }
            _ => Ok(()),
        }
    }
}

fn rooms(records: usize) -> Vec<SubResourceAvailability> {
    let start = chrono::NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
    vec![SubResourceAvailability {
        name: "Dorm".to_string(),
        availability: (0..records)
            .map(|offset| AvailabilityRecord {
                date: start + chrono::Duration::days(offset as i64),
                available: true,
                free_places: Some(3),
            })
            .collect(),
    }]
}

/// Factory resolving provider type tags to scripted fakes; unknown tags yield `None`
pub fn scripted_factory(
    scripts: Vec<(&'static str, Script)>,
    log: Arc<CallLog>,
) -> Arc<dyn hut_ripple::ProviderFactory> {
    let scripts: HashMap<&'static str, Script> = scripts.into_iter().collect();
    Arc::new(move |provider_type: &str| -> Option<Box<dyn ScrapeProvider>> {
        let script = scripts.get(provider_type)?.clone();
        log.created.fetch_add(1, Ordering::SeqCst);
        Some(Box::new(FakeProvider {
            script,
            log: log.clone(),
        }))
    })
}

pub fn orchestrator(
    options: OrchestrationOptions,
    scripts: Vec<(&'static str, Script)>,
) -> (Orchestrator, Arc<CallLog>) {
    let log = Arc::new(CallLog::default());
    let orchestrator = Orchestrator::new(options, scripted_factory(scripts, log.clone()))
        .expect("valid options");
    (orchestrator, log)
}

pub fn targets(count: usize, provider_type: &str) -> Vec<Target> {
    (1..=count as i64)
        .map(|id| {
            Target::new(
                id,
                format!("Hut {}", id),
                provider_type,
                format!("https://huts.example.com/{}", id),
            )
        })
        .collect()
}

pub fn instant_success() -> Script {
    Script::Succeed {
        delay: Duration::ZERO,
        records: 3,
    }
}

/// Persistence sink counting calls, optionally failing every save
#[derive(Default)]
pub struct CountingPersistence {
    pub fail: bool,
    pub saves: AtomicUsize,
}

#[async_trait]
impl Persistence for CountingPersistence {
    async fn save_scrape_result(
        &self,
        result: &ScrapeResult,
        target_name: &str,
        _url: &str,
        _provider_type: &str,
    ) -> PersistenceResult<SaveReceipt> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PersistenceError::Rejected("database unavailable".to_string()));
        }
        Ok(SaveReceipt {
            property_id: target_name.to_string(),
            sub_resource_ids: result.sub_resources.iter().map(|s| s.name.clone()).collect(),
        })
    }
}
