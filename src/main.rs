//! Sentiment service: binary entrypoint.
//! Boots the Axum HTTP server with the analyzer built from config/.

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - SENTIMENT_DEV_LOG=1
fn enable_dev_tracing() {
    if !teranga_sentiment::debug::dev_logging_enabled() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("teranga_sentiment=debug,warn"));

    // The runtime may already have installed a subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let router = teranga_sentiment::app()?;
    Ok(router.into())
}
