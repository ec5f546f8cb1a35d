//! JSON feed provider tests against a mock HTTP server

use hut_ripple::config::HttpConfig;
use hut_ripple::orchestrator::{DateRange, OrchestrationOptions, Orchestrator, Target};
use hut_ripple::persistence::JsonLinesPersistence;
use hut_ripple::provider::{
    HttpJsonProvider, ProviderError, ProviderRegistry, ScrapeProvider, ScrapeRequest,
    JSON_API_PROVIDER,
};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn july_window() -> DateRange {
    DateRange::new(
        Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 7, 3, 0, 0, 0).unwrap(),
    )
}

fn feed() -> serde_json::Value {
    json!({
        "rooms": [
            {
                "name": "Dorm",
                "days": [
                    { "date": "2026-07-01", "available": true, "freePlaces": 12 },
                    { "date": "2026-07-02", "available": false, "freePlaces": 0 },
                    { "date": "2026-07-09", "available": true, "freePlaces": 4 }
                ]
            },
            {
                "name": "Double",
                "days": [
                    { "date": "2026-07-03", "available": true }
                ]
            }
        ]
    })
}

fn request(url: String, sub_resources: Option<Vec<String>>) -> ScrapeRequest {
    ScrapeRequest {
        target_id: "komna".into(),
        target_name: "Dom na Komni".to_string(),
        url,
        date_range: july_window(),
        sub_resources,
    }
}

async fn initialized_provider() -> HttpJsonProvider {
    let mut provider = HttpJsonProvider::new(HttpConfig::default());
    provider.initialize().await.unwrap();
    provider
}

#[tokio::test]
async fn test_scrape_sends_window_and_rooms() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/huts/komna"))
        .and(query_param("from", "2026-07-01"))
        .and(query_param("to", "2026-07-03"))
        .and(query_param("rooms", "Dorm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed()))
        .expect(1)
        .mount(&server)
        .await;

    let mut provider = initialized_provider().await;
    let result = provider
        .scrape(&request(
            format!("{}/huts/komna", server.uri()),
            Some(vec!["Dorm".to_string()]),
        ))
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.metadata.provider, JSON_API_PROVIDER);
    assert_eq!(result.sub_resource_count(), 1);
    assert_eq!(result.sub_resources[0].name, "Dorm");
    // The 9th is outside the window
    assert_eq!(result.availability_count(), 2);
    assert_eq!(
        result.sub_resources[0].availability[0].date,
        NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
    );
    assert_eq!(result.sub_resources[0].availability[0].free_places, Some(12));

    provider.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_error_status_is_a_soft_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut provider = initialized_provider().await;
    let result = provider
        .scrape(&request(format!("{}/huts/komna", server.uri()), None))
        .await
        .unwrap();

    assert!(!result.is_success());
    assert_eq!(result.metadata.error.as_deref(), Some("HTTP 503"));
    assert!(result.sub_resources.is_empty());
}

#[tokio::test]
async fn test_malformed_feed_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let mut provider = initialized_provider().await;
    let error = provider
        .scrape(&request(format!("{}/huts/komna", server.uri()), None))
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_run_through_registry_and_jsonl_sink() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/huts/komna"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/huts/closed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let results_path = dir.path().join("results.jsonl");

    let options = OrchestrationOptions {
        concurrency: 2,
        retries: 2,
        delay_between_batches: 0,
        retry_backoff: 10,
        save_to_database: true,
        date_range: july_window(),
        ..Default::default()
    };
    let registry = ProviderRegistry::with_defaults(&HttpConfig::default());
    let orchestrator = Orchestrator::new(options, Arc::new(registry))
        .unwrap()
        .with_persistence(Arc::new(JsonLinesPersistence::new(&results_path)));

    let targets = vec![
        Target::new(
            "komna",
            "Dom na Komni",
            JSON_API_PROVIDER,
            format!("{}/huts/komna", server.uri()),
        ),
        Target::new(
            "closed",
            "Closed Hut",
            JSON_API_PROVIDER,
            format!("{}/huts/closed", server.uri()),
        ),
        Target::new("legacy", "Legacy Hut", "bentral", format!("{}/legacy", server.uri())),
    ];

    let report = orchestrator.scrape_all(&targets, None).await;

    assert_eq!(report.summary.total, 3);
    assert_eq!(report.successful.len(), 1);
    assert_eq!(report.successful[0].target_name, "Dom na Komni");
    assert_eq!(report.successful[0].sub_resources_scraped, Some(2));
    assert_eq!(report.successful[0].availability_records, Some(3));

    assert_eq!(report.failed.len(), 2);
    let closed = report
        .failed
        .iter()
        .find(|o| o.target_name == "Closed Hut")
        .unwrap();
    assert_eq!(closed.error.as_deref(), Some("HTTP 500"));
    assert_eq!(closed.attempts, 2);
    let legacy = report
        .failed
        .iter()
        .find(|o| o.target_name == "Legacy Hut")
        .unwrap();
    assert_eq!(legacy.error.as_deref(), Some("Provider 'bentral' not found"));

    let saved = tokio::fs::read_to_string(&results_path).await.unwrap();
    let lines: Vec<&str> = saved.lines().collect();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["targetName"], "Dom na Komni");
    assert_eq!(record["propertyId"], "dom-na-komni");
}
