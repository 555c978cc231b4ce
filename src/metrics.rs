use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder once per process and describe the
    /// series this service emits. Later calls reuse the same handle.
    pub fn init() -> anyhow::Result<Self> {
        let handle = HANDLE.get_or_try_init(|| {
            // Use default buckets to avoid API differences across crate versions.
            let handle = PrometheusBuilder::new().install_recorder()?;

            describe_counter!("slop_analyze_total", "Analyses served over HTTP.");
            describe_histogram!("slop_analyze_duration_ms", "Analysis time in milliseconds.");
            describe_histogram!("slop_score", "Distribution of final slop scores.");
            describe_counter!(
                "slop_ai_provider_success_total",
                "AI provider calls that produced a usable opinion."
            );
            describe_counter!(
                "slop_ai_provider_errors_total",
                "AI provider calls that failed or returned malformed output."
            );
            Ok::<_, anyhow::Error>(handle)
        })?;

        Ok(Self {
            handle: handle.clone(),
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
