use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static METRICS: OnceCell<Metrics> = OnceCell::new();

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the process-wide Prometheus recorder (once) and describe the
    /// pipeline series so they show up on /metrics.
    pub fn global() -> anyhow::Result<&'static Metrics> {
        METRICS.get_or_try_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;

            describe_counter!(
                "sentiment_analyses_total",
                "Analyses completed, by sentiment label."
            );
            describe_counter!(
                "sentiment_translations_total",
                "Messages translated and re-scored."
            );
            describe_counter!(
                "sentiment_oracle_errors_total",
                "Language oracle failures and timeouts, by stage."
            );
            describe_histogram!(
                "sentiment_analysis_ms",
                "End-to-end analysis time in milliseconds."
            );

            Ok(Metrics { handle })
        })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
