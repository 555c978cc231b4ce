use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::ai_bootstrap::AiRuntime;
use crate::analyze::{analyze, word_count, AnalysisResult};
use crate::config;
use crate::consensus::{Consensus, EnrichedAnalysis};
use crate::error::ApiError;
use crate::telemetry::anon_hash;
use crate::transcript::{extract_video_id, TranscriptSource, YoutubeTimedText};

#[derive(Clone)]
pub struct AppState {
    pub ai: Arc<AiRuntime>,
    pub transcripts: Arc<dyn TranscriptSource>,
    pub max_content_chars: usize,
}

impl AppState {
    /// AI config from disk/env, YouTube transcripts, size limit from env.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            ai: Arc::new(AiRuntime::from_env()?),
            transcripts: Arc::new(YoutubeTimedText::new()?),
            max_content_chars: config::max_content_chars(),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze_handler))
        .route("/analyze/ai", post(analyze_ai_handler))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeReq {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Text,
    Youtube,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResp {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub rating: &'static str,
    pub color: &'static str,
    pub source: ContentSource,
    pub word_count: usize,
}

impl AnalyzeResp {
    fn new(result: AnalysisResult, source: ContentSource, word_count: usize) -> Self {
        let rating = result.rating();
        Self {
            result,
            rating: rating.label(),
            color: rating.color(),
            source,
            word_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeAiResp {
    #[serde(flatten)]
    pub internal: AnalyzeResp,
    pub consensus: Option<Consensus>,
    pub final_score: u8,
    pub final_rating: &'static str,
    pub final_color: &'static str,
    pub warnings: Vec<String>,
}

/// Text wins over url when both are present.
async fn resolve_content(
    state: &AppState,
    req: AnalyzeReq,
) -> Result<(String, ContentSource), ApiError> {
    let (content, source) = match (req.text, req.url) {
        (Some(text), _) => (text, ContentSource::Text),
        (None, Some(url)) => {
            let id = extract_video_id(&url).ok_or(ApiError::InvalidUrl(url))?;
            let transcript = state
                .transcripts
                .fetch_transcript(&id)
                .await
                .map_err(|e| ApiError::TranscriptUnavailable(format!("{e:#}")))?;
            (transcript, ContentSource::Youtube)
        }
        (None, None) => return Err(ApiError::MissingInput),
    };

    if content.chars().count() > state.max_content_chars {
        return Err(ApiError::TooLarge {
            limit: state.max_content_chars,
        });
    }
    Ok((content, source))
}

fn record(content: &str, source: ContentSource, score: u8, started: Instant) {
    let ms = started.elapsed().as_secs_f64() * 1_000.0;
    counter!("slop_analyze_total").increment(1);
    histogram!("slop_analyze_duration_ms").record(ms);
    histogram!("slop_score").record(f64::from(score));
    // Never log raw text. Only hashed id.
    info!(id = %anon_hash(content), ?source, score, ms, "analysis complete");
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<AnalyzeResp>, ApiError> {
    let started = Instant::now();
    let (content, source) = resolve_content(&state, body).await?;

    let result = analyze(&content);
    record(&content, source, result.score, started);
    Ok(Json(AnalyzeResp::new(result, source, word_count(&content))))
}

async fn analyze_ai_handler(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<AnalyzeAiResp>, ApiError> {
    let started = Instant::now();
    let (content, source) = resolve_content(&state, body).await?;

    let EnrichedAnalysis {
        internal,
        consensus,
        final_score,
        final_rating,
        warnings,
    } = state.ai.enrich(&content).await;
    record(&content, source, final_score, started);

    Ok(Json(AnalyzeAiResp {
        internal: AnalyzeResp::new(internal, source, word_count(&content)),
        consensus,
        final_score,
        final_rating: final_rating.label(),
        final_color: final_rating.color(),
        warnings,
    }))
}
