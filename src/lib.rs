// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod debug;
pub mod metrics;

use std::sync::Arc;

use axum::Router;
use tracing::info;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{Analysis, AnalysisTrace, SentimentLabel, SentimentTables, SmartAnalyzer};
pub use crate::api::{router, AppState};

use crate::analyze::{build_oracle, TranslationPolicy};
use crate::config::oracle::OracleConfig;
use crate::config::tables::load_tables_default;

/// Build the analyzer from on-disk/env configuration.
/// Fails only when a configured resource is missing or invalid.
pub fn analyzer_from_env() -> anyhow::Result<SmartAnalyzer> {
    let tables = load_tables_default()?;
    let cfg = OracleConfig::load_default()?;
    let oracle = build_oracle(&cfg)?;
    info!(
        provider = oracle.name(),
        lexicon = tables.lexicon.len(),
        intensifiers = tables.intensifiers.len(),
        negations = tables.negations.len(),
        "sentiment analyzer ready"
    );
    Ok(SmartAnalyzer::new(
        Arc::new(tables),
        oracle,
        TranslationPolicy::from_config(&cfg),
    ))
}

/// Full application router: API routes plus `/metrics`.
pub fn app() -> anyhow::Result<Router> {
    let analyzer = analyzer_from_env()?;
    let metrics = crate::metrics::Metrics::global()?;
    Ok(router(AppState::new(analyzer)).merge(metrics.router()))
}
