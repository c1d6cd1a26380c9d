//! Integration tests for API routes.
//!
//! Uses `tower::ServiceExt` to test Axum routes without a real HTTP server;
//! the Airstack source is replaced by an in-memory fake, so no test touches
//! the network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use moxie_api::routes::create_router;
use moxie_api::state::AppState;
use moxie_common::config::AppConfig;
use moxie_common::error::AppError;
use moxie_common::types::{RawEarningStat, Timeframe};
use moxie_engine::airstack::EarningsSource;
use moxie_engine::earnings::EarningsAggregator;
use moxie_engine::frames::EnvelopeVerifier;

// ============================================================
// Helpers
// ============================================================

/// In-memory Airstack stand-in with per-timeframe canned responses and a
/// remote-call counter.
#[derive(Default)]
struct FakeAirstack {
    responses: Mutex<HashMap<Timeframe, Result<Vec<RawEarningStat>, String>>>,
    calls: AtomicUsize,
}

impl FakeAirstack {
    fn set_response(&self, timeframe: Timeframe, stats: Vec<RawEarningStat>) {
        self.responses
            .lock()
            .unwrap()
            .insert(timeframe, Ok(stats));
    }

    fn set_error(&self, timeframe: Timeframe, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(timeframe, Err(message.to_string()));
    }
}

#[async_trait]
impl EarningsSource for FakeAirstack {
    async fn earning_stats(
        &self,
        _entity_id: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<RawEarningStat>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.lock().unwrap().get(&timeframe) {
            Some(Ok(stats)) => Ok(stats.clone()),
            Some(Err(msg)) => Err(AppError::Upstream(msg.clone())),
            None => Ok(vec![]),
        }
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        airstack_api_key: "test-api-key".to_string(),
        airstack_api_url: "http://unused".to_string(),
        app_url: "https://moxie.example".to_string(),
        bind_port: 3000,
    }
}

fn build_test_state(source: Arc<FakeAirstack>) -> AppState {
    AppState::new(
        EarningsAggregator::new(source),
        Arc::new(EnvelopeVerifier),
        test_config(),
    )
}

fn sample_stat() -> RawEarningStat {
    RawEarningStat {
        all_earnings_amount: Some(100.0),
        cast_earnings_amount: Some(60.0),
        frame_dev_earnings_amount: Some(30.0),
        other_earnings_amount: Some(10.0),
        entity_id: Some("fc_42".to_string()),
        entity_type: Some("USER".to_string()),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// ============================================================
// Earnings endpoint
// ============================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(build_test_state(Arc::new(FakeAirstack::default())));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "moxie-frame-api");
}

#[tokio::test]
async fn test_missing_entity_id_is_rejected_without_remote_calls() {
    let source = Arc::new(FakeAirstack::default());
    let app = create_router(build_test_state(source.clone()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/moxie-earnings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "entityId parameter is required");
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_entity_id_is_rejected_without_remote_calls() {
    let source = Arc::new(FakeAirstack::default());
    let app = create_router(build_test_state(source.clone()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/moxie-earnings?entityId=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_snapshot_mixes_populated_and_zero_filled_timeframes() {
    let source = Arc::new(FakeAirstack::default());
    // TODAY populated, WEEKLY/LIFETIME empty upstream
    source.set_response(Timeframe::Today, vec![sample_stat()]);
    source.set_response(Timeframe::Weekly, vec![]);
    source.set_response(Timeframe::Lifetime, vec![]);

    let app = create_router(build_test_state(source.clone()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/moxie-earnings?entityId=fc_42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(source.calls.load(Ordering::SeqCst), 3);

    let json = body_json(response).await;
    assert_eq!(
        json["today"],
        serde_json::json!({
            "allEarningsAmount": 100.0,
            "frameDevEarningsAmount": 30.0,
            "entityId": "fc_42",
            "entityType": "USER",
            "castEarningsAmount": 60.0,
            "otherEarningsAmount": 10.0
        })
    );

    let zeroed = serde_json::json!({
        "allEarningsAmount": 0.0,
        "frameDevEarningsAmount": 0.0,
        "entityId": "fc_42",
        "entityType": "USER",
        "castEarningsAmount": 0.0,
        "otherEarningsAmount": 0.0
    });
    assert_eq!(json["weekly"], zeroed);
    assert_eq!(json["lifetime"], zeroed);
}

#[tokio::test]
async fn test_every_timeframe_key_is_fully_populated() {
    let app = create_router(build_test_state(Arc::new(FakeAirstack::default())));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/moxie-earnings?entityId=anyone")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    for key in ["today", "weekly", "lifetime"] {
        let record = &json[key];
        for field in [
            "allEarningsAmount",
            "castEarningsAmount",
            "frameDevEarningsAmount",
            "otherEarningsAmount",
        ] {
            assert!(record[field].is_number(), "{}.{} must be numeric", key, field);
        }
        assert_eq!(record["entityId"], "anyone");
        assert_eq!(record["entityType"], "USER");
    }
}

#[tokio::test]
async fn test_upstream_error_yields_500() {
    let source = Arc::new(FakeAirstack::default());
    source.set_error(Timeframe::Weekly, "upstream unavailable");

    let app = create_router(build_test_state(source));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/moxie-earnings?entityId=fc_42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "upstream unavailable");
}

#[tokio::test]
async fn test_repeated_requests_are_idempotent() {
    let source = Arc::new(FakeAirstack::default());
    source.set_response(Timeframe::Lifetime, vec![sample_stat()]);
    let state = build_test_state(source);

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let app = create_router(state.clone());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/moxie-earnings?entityId=fc_42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        bodies.push(body_json(response).await);
    }

    assert_eq!(bodies[0], bodies[1]);
}

// ============================================================
// Cast action endpoints
// ============================================================

#[tokio::test]
async fn test_cast_action_discovery_is_static() {
    let state = build_test_state(Arc::new(FakeAirstack::default()));

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let app = create_router(state.clone());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/cast-action")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        bodies.push(body_json(response).await);
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0]["action"]["type"], "post");
    assert_eq!(bodies[0]["icon"], "pulse");
    assert_eq!(bodies[0]["name"], "Moxie Stats Frame");
    assert_eq!(bodies[0]["aboutUrl"], "https://moxie.example");
}

#[tokio::test]
async fn test_cast_action_invocation_redirects_with_author_fid() {
    let app = create_router(build_test_state(Arc::new(FakeAirstack::default())));

    let frame_message = serde_json::json!({
        "untrustedData": {
            "fid": 999,
            "castId": {"fid": 12345, "hash": "0xabc"}
        },
        "trustedData": {"messageBytes": "deadbeef"}
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/cast-action")
                .header("content-type", "application/json")
                .body(Body::from(frame_message.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["type"], "frame");
    assert_eq!(json["frameUrl"], "https://moxie.example?userfid=12345");
}

#[tokio::test]
async fn test_cast_action_invocation_without_fid_omits_parameter() {
    let app = create_router(build_test_state(Arc::new(FakeAirstack::default())));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/cast-action")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"untrustedData": {"fid": 999}}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["frameUrl"], "https://moxie.example");
}

// ============================================================
// Hosting page
// ============================================================

#[tokio::test]
async fn test_page_carries_frame_metadata_tags() {
    let app = create_router(build_test_state(Arc::new(FakeAirstack::default())));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();

    assert!(html.contains("fc:frame"));
    assert!(html.contains("https://moxie.example/frames"));
    assert!(html.contains("https://moxie.example/api/og"));
    assert!(html.contains("https://moxie.example/api/cast-action"));
}

#[tokio::test]
async fn test_page_personalizes_frames_url_for_userfid() {
    let app = create_router(build_test_state(Arc::new(FakeAirstack::default())));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?userfid=12345")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();

    assert!(html.contains("/frames?userfid=12345&action=fetch"));
}

#[tokio::test]
async fn test_page_encodes_markup_in_userfid() {
    let app = create_router(build_test_state(Arc::new(FakeAirstack::default())));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?userfid=%22%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();

    // The decoded query value must be re-encoded, never reflected as markup
    assert!(!html.contains("<script>"));
    assert!(html.contains("userfid=%22%3E%3Cscript%3E"));
    assert!(html.contains("action=fetch"));
}
