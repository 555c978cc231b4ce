//! Slop Detector binary entrypoint.
//! Boots the Axum HTTP server via Shuttle, wiring routes, shared state, and metrics.

use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    slop_detector::telemetry::init_tracing();

    if std::env::var("AI_PROBE_ON_START").ok().as_deref() == Some("1") {
        if let Err(e) = slop_detector::run_ai_quick_probe().await {
            tracing::warn!(error = ?e, "AI quick probe didn't run");
        }
    }

    let router = slop_detector::app().await?;
    Ok(router.into())
}
