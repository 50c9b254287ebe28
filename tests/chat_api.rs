//! End-to-end tests for the /api/chat route, driving the axum router with
//! fake providers that honor the structured-output schemas they are given.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use ideagauge_server::error::AppError;
use ideagauge_server::orchestrator::Orchestrator;
use ideagauge_server::providers::mock::FixtureSearchProvider;
use ideagauge_server::providers::{CompletionProvider, SearchProvider};
use ideagauge_server::server::{router, AppState};
use ideagauge_server::types::{MarketAnalysis, SearchDepth};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Returns a deterministic analysis, adding the founder-fit section exactly
/// when the personalized schema was selected.
struct SchemaAwareSearch;

#[async_trait]
impl SearchProvider for SchemaAwareSearch {
    async fn search(
        &self,
        _query: &str,
        _depth: SearchDepth,
        schema: Value,
    ) -> Result<MarketAnalysis, AppError> {
        let personalized = schema["properties"].get("founderfit").is_some();
        let mut analysis = json!({
            "title": "Peer-to-Peer Parking Marketplace",
            "overview": "Moderate demand with entrenched competitors.",
            "score": 6,
            "feasibilityscore": 7,
            "summary": "Urban parking scarcity is a persistent pain point.",
            "details": "Demand concentrates in city centers.",
            "marketDemand": {
                "painPoints": {
                    "primaryPainPoint": "Time wasted searching for parking",
                    "urgency": "High",
                    "evidence": "Congestion studies"
                },
                "timingTrends": {
                    "marketReadiness": "Ready in large metros",
                    "emergingTrends": "Sharing economy growth",
                    "timingAssessment": "Reasonable"
                }
            },
            "competitors": [
                { "name": "SpotHero", "description": "Garage reservations", "popularity": "High",
                  "locations": "US", "pricing": "Commission", "pros": ["Brand"], "weaknesses": ["No P2P"] }
            ],
            "targetAudience": [
                { "group": "Urban commuters", "onlineDestinations": [] }
            ],
            "personalizedstatus": personalized
        });
        if personalized {
            let obj = analysis.as_object_mut().unwrap();
            obj.insert("founderfit".into(), json!("You have relevant marketplace experience."));
            obj.insert("founderfitscore".into(), json!(7));
            obj.insert(
                "positivefounderfit".into(),
                json!([{ "skill": "Marketplace ops", "description": "Prior two-sided marketplace work." }]),
            );
            obj.insert(
                "negativefounderfit".into(),
                json!([{ "skill": "Local regulation", "description": "No zoning or municipal experience." }]),
            );
        }
        Ok(serde_json::from_value(analysis).unwrap())
    }
}

struct SchemaAwareCompletion;

#[async_trait]
impl CompletionProvider for SchemaAwareCompletion {
    async fn generate(
        &self,
        _model: &str,
        _prompt: &str,
        schema: Value,
    ) -> Result<Value, AppError> {
        let props = schema["properties"].as_object().unwrap();
        if props.contains_key("pitch") {
            Ok(json!({ "pitch": "Parking wasted is money wasted; we turn idle driveways into income." }))
        } else if props.contains_key("revenueModels") {
            Ok(json!({ "revenueModels": [
                "Booking commission",
                "Host subscription tier",
                "Event-day surge pricing share",
                "B2B partnerships with venues"
            ]}))
        } else {
            Ok(json!({
                "mvpDesign": "Mobile-first app with map search and instant booking.",
                "mvpFeatures": [
                    { "feature": "Spot listing with photos", "priority": "High", "effort": "Medium" },
                    { "feature": "Map search by destination", "priority": "High", "effort": "High" },
                    { "feature": "In-app payments", "priority": "High", "effort": "High" },
                    { "feature": "Host calendar", "priority": "Medium", "effort": "Medium" },
                    { "feature": "Reviews and ratings", "priority": "Medium", "effort": "Low" },
                    { "feature": "Event-day pricing", "priority": "Low", "effort": "Medium" }
                ]
            }))
        }
    }
}

struct FailingSearch;

#[async_trait]
impl SearchProvider for FailingSearch {
    async fn search(
        &self,
        _query: &str,
        _depth: SearchDepth,
        _schema: Value,
    ) -> Result<MarketAnalysis, AppError> {
        Err(AppError::UpstreamUnavailable {
            provider: "linkup",
            message: "rate limited".into(),
        })
    }
}

struct FailingCompletion;

#[async_trait]
impl CompletionProvider for FailingCompletion {
    async fn generate(
        &self,
        _model: &str,
        _prompt: &str,
        _schema: Value,
    ) -> Result<Value, AppError> {
        Err(AppError::UpstreamUnavailable {
            provider: "gemini",
            message: "quota exceeded".into(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn app(
    search: Arc<dyn SearchProvider>,
    completion: Arc<dyn CompletionProvider>,
    mock_mode: bool,
) -> axum::Router {
    let state = Arc::new(AppState {
        orchestrator: Orchestrator::new(search, completion, mock_mode),
    });
    router(state)
}

async fn post_chat(app: axum::Router, body: Value) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn level_ok(value: &Value) -> bool {
    matches!(value.as_str(), Some("High" | "Medium" | "Low"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn quick_search_returns_combined_result() {
    let app = app(Arc::new(SchemaAwareSearch), Arc::new(SchemaAwareCompletion), false);
    let (status, body) = post_chat(
        app,
        json!({
            "message": "A marketplace for renting unused parking spots",
            "model": "Quick Search",
            "personalized": false
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_slice(&body).unwrap();
    let reply = &value["reply"];

    assert!(reply["title"].is_string());
    let score = reply["score"].as_f64().unwrap();
    assert!((1.0..=10.0).contains(&score));
    assert!(reply["competitors"].is_array());
    assert_eq!(reply["personalizedstatus"], false);

    assert!(!reply["pitch"].as_str().unwrap().is_empty());
    let revenue = reply["revenueModels"].as_array().unwrap();
    assert!((3..=5).contains(&revenue.len()));
    let features = reply["mvpFeatures"].as_array().unwrap();
    assert!((5..=10).contains(&features.len()));
    for feature in features {
        assert!(level_ok(&feature["priority"]));
        assert!(level_ok(&feature["effort"]));
    }
}

#[tokio::test]
async fn personalized_request_returns_founder_fit_section() {
    let app = app(Arc::new(SchemaAwareSearch), Arc::new(SchemaAwareCompletion), false);
    let (status, body) = post_chat(
        app,
        json!({
            "message": "A marketplace for renting unused parking spots",
            "model": "Deep Search",
            "personalized": true,
            "userProfile": {
                "firstName": "Sam",
                "lastName": "Rivera",
                "location": { "city": "Austin", "state": "TX", "country": "USA" },
                "background": "Urban planning",
                "technicalSkills": "Rust, React",
                "previousExperience": "One prior marketplace startup",
                "startupName": "SpotShare",
                "startupDescription": "Parking spot marketplace",
                "industry": "Mobility",
                "customerType": "B2C",
                "stage": "Pre-seed",
                "teamSize": "3",
                "techStack": "Rust + Postgres",
                "funding": "$50k"
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_slice(&body).unwrap();
    let reply = &value["reply"];

    assert_eq!(reply["personalizedstatus"], true);
    assert!(!reply["founderfit"].as_str().unwrap().is_empty());
    let fit_score = reply["founderfitscore"].as_f64().unwrap();
    assert!((1.0..=10.0).contains(&fit_score));
    assert!(!reply["positivefounderfit"].as_array().unwrap().is_empty());
    assert!(!reply["negativefounderfit"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn empty_message_is_a_bad_request() {
    let app = app(Arc::new(SchemaAwareSearch), Arc::new(SchemaAwareCompletion), false);
    let (status, _) = post_chat(app, json!({ "message": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upstream_failure_returns_legacy_error_body() {
    let app = app(Arc::new(FailingSearch), Arc::new(SchemaAwareCompletion), false);
    let (status, body) = post_chat(app, json!({ "message": "some idea" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let text = String::from_utf8(body).unwrap();
    assert!(text.starts_with("Error communicating with APIs:"));
    assert!(text.contains("rate limited"));
}

#[tokio::test]
async fn mock_mode_serves_fixture_when_generation_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let fixture = json!({
        "title": "Fixture idea",
        "score": 5,
        "competitors": [],
        "personalizedstatus": false
    });
    write!(file, "{fixture}").unwrap();

    let search = Arc::new(FixtureSearchProvider::new(file.path().to_path_buf()));
    let app = app(search, Arc::new(FailingCompletion), true);
    let (status, body) = post_chat(app, json!({ "message": "some idea" })).await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["reply"], fixture);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = app(Arc::new(SchemaAwareSearch), Arc::new(SchemaAwareCompletion), false);
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["status"], "ok");
}
