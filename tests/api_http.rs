// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /analyze (contract fields, malformed input, internal failure)
// - GET /test

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::json;
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use teranga_sentiment::{router, AppState, SentimentTables, SmartAnalyzer};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Offline router (no language oracle).
fn test_router() -> Router {
    let tables = SentimentTables::builtin();
    router(AppState::new(SmartAnalyzer::offline(Arc::new(tables))))
}

async fn post_analyze(app: Router, body: Body) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(body)
        .expect("build POST /analyze");
    let resp = app.oneshot(req).await.expect("oneshot /analyze");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read json")
        .to_vec();
    (status, serde_json::from_slice(&bytes).expect("parse analyze json"))
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    assert_eq!(String::from_utf8(bytes).expect("utf8"), "ok");
}

#[tokio::test]
async fn api_analyze_returns_expected_json_fields() {
    let payload = json!({ "message": "C'est SUPER GÉNIAL !!!" });
    let (status, v) = post_analyze(test_router(), Body::from(payload.to_string())).await;
    assert_eq!(status, StatusCode::OK);

    // Contract checks for UI consumers
    assert_eq!(v["sentiment"], "positive");
    assert_eq!(v["message"], "C'est SUPER GÉNIAL !!!");
    let score = v["score"].as_f64().expect("numeric score");
    assert!((-1.0..=1.0).contains(&score));

    let debug = v.get("debug").expect("missing 'debug'");
    for key in [
        "base_score",
        "intensified_score",
        "emotional_intensity",
        "negation_factor",
        "final_score",
        "translation_info",
    ] {
        assert!(debug.get(key).is_some(), "debug.{key} missing: {debug}");
    }
    assert!(debug["translation_info"].is_null());
}

#[tokio::test]
async fn api_analyze_treats_malformed_input_as_empty() {
    for body in [
        json!({}).to_string(),
        json!({ "message": null }).to_string(),
        json!({ "message": 12 }).to_string(),
        "definitely not json".to_string(),
    ] {
        let (status, v) = post_analyze(test_router(), Body::from(body.clone())).await;
        assert_eq!(status, StatusCode::OK, "body {body}");
        assert_eq!(v["sentiment"], "neutral", "body {body}");
        assert_eq!(v["score"].as_f64(), Some(0.0), "body {body}");
        assert_eq!(v["message"], "", "body {body}");
    }
}

#[tokio::test]
async fn api_analyze_reports_internal_failure_as_neutral_error() {
    // A non-finite valence makes the base score NaN.
    let mut tables = SentimentTables::builtin();
    tables.lexicon.overlay([("boom", f32::INFINITY)]);
    let app = router(AppState::new(SmartAnalyzer::offline(Arc::new(tables))));

    let payload = json!({ "message": "boom" });
    let (status, v) = post_analyze(app, Body::from(payload.to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(v["sentiment"], "neutral");
    let err = v["error"].as_str().expect("error string");
    assert!(err.contains("non-finite"), "unexpected error: {err}");
    assert!(v.get("score").is_none());
}

#[tokio::test]
async fn api_test_endpoint_runs_all_samples() {
    let req = Request::builder()
        .method("GET")
        .uri("/test")
        .body(Body::empty())
        .unwrap();
    let resp = test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    let v: Json = serde_json::from_slice(&bytes).unwrap();
    let tests = v["tests"].as_array().expect("tests array");
    assert_eq!(tests.len(), teranga_sentiment::api::SAMPLE_MESSAGES.len());

    let label_of = |msg: &str| {
        tests
            .iter()
            .find(|t| t["message"] == msg)
            .map(|t| t["sentiment"].as_str().unwrap_or_default().to_string())
            .unwrap_or_default()
    };
    assert_eq!(label_of("C'est SUPER GÉNIAL !!!"), "positive");
    assert_eq!(label_of("Mungi xiif lool"), "negative");
    assert_eq!(label_of("Ana baax rek"), "positive");
    assert_eq!(label_of("Je suis vraiment déçu de ce résultat"), "negative");
    assert_eq!(label_of("¿Cómo estás?"), "neutral");
}
