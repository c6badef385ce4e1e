use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::analyze::{AnalysisTrace, SentimentLabel, SmartAnalyzer};

/// Messages run by `GET /test`: plain French, intense Wolof, shouting,
/// negation with repetition, Spanish, mixed Wolof, and a compound negation.
pub const SAMPLE_MESSAGES: &[&str] = &[
    "Je suis vraiment déçu de ce résultat",
    "Mungi xiif lool",
    "C'est SUPER GÉNIAL !!!",
    "Noooon pas du tout",
    "¿Cómo estás?",
    "Ana baax rek",
    "Je suis pas content du tout...",
];

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SmartAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: SmartAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .route("/test", get(run_samples))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct AnalyzeResp {
    sentiment: SentimentLabel,
    score: f32,
    debug: AnalysisTrace,
    message: String,
}

#[derive(Serialize)]
struct ErrorResp {
    sentiment: SentimentLabel,
    error: String,
}

#[derive(Serialize)]
struct SampleOut {
    message: String,
    sentiment: SentimentLabel,
    score: f32,
    debug: AnalysisTrace,
}

#[derive(Serialize)]
struct SamplesResp {
    tests: Vec<SampleOut>,
}

/// `message` from a JSON body; anything missing or malformed becomes "".
fn extract_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_owned))
        .unwrap_or_default()
}

fn internal_error(e: anyhow::Error) -> Response {
    tracing::error!(error = %format!("{e:#}"), "analysis failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResp {
            sentiment: SentimentLabel::Neutral,
            error: e.to_string(),
        }),
    )
        .into_response()
}

async fn analyze(State(state): State<AppState>, body: Bytes) -> Response {
    let message = extract_message(&body);
    match state.analyzer.analyze(&message).await {
        Ok(a) => Json(AnalyzeResp {
            sentiment: a.label,
            score: a.score,
            debug: a.trace,
            message,
        })
        .into_response(),
        Err(e) => internal_error(e),
    }
}

async fn run_samples(State(state): State<AppState>) -> Response {
    let mut tests = Vec::with_capacity(SAMPLE_MESSAGES.len());
    for msg in SAMPLE_MESSAGES {
        match state.analyzer.analyze(msg).await {
            Ok(a) => tests.push(SampleOut {
                message: msg.to_string(),
                sentiment: a.label,
                score: a.score,
                debug: a.trace,
            }),
            Err(e) => return internal_error(e),
        }
    }
    Json(SamplesResp { tests }).into_response()
}
