// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod ai_bootstrap;
pub mod analyze;
pub mod api;
pub mod config;
pub mod consensus;
pub mod error;
pub mod metrics;
pub mod telemetry;
pub mod transcript;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{analyze, color_of, rating_of, AnalysisResult, Factors, SlopRating};
pub use crate::api::router;
pub use crate::consensus::{ai_adapter, aggregate, blend, enrich, BlendWeights, Consensus};

use axum::Router;
use tracing::info;

/// Build the full in-process app: API routes plus `/metrics`.
/// Used by the Shuttle entrypoint and by HTTP tests.
pub async fn app() -> anyhow::Result<Router> {
    let state = api::AppState::from_env()?;
    let metrics = metrics::Metrics::init()?;
    info!(ai_enabled = state.ai.is_enabled(), "slop detector app built");
    Ok(api::router(state).merge(metrics.router()))
}

/// Call this from your Shuttle entrypoint (after tracing init) to perform a one-off
/// smoke test of the configured AI providers. It won't panic on failure; it just logs the result.
pub async fn run_ai_quick_probe() -> anyhow::Result<()> {
    let ai = ai_bootstrap::AiRuntime::from_env()?;
    ai.quick_probe().await;
    Ok(())
}
