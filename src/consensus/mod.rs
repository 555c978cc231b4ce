// src/consensus/mod.rs
//! Optional AI enrichment: gathers provider opinions, reduces them to a
//! confidence-weighted consensus and blends that with the internal score.

pub mod ai_adapter;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analyze::{analyze, AnalysisResult, SlopRating};
pub use crate::consensus::ai_adapter::{
    gather_opinions, AiProvider, DynProvider, ProviderError, ProviderOpinion,
};

/// Score spread (max - min) above which providers are reported as disagreeing.
const DISAGREEMENT_SPREAD: f64 = 30.0;
const AGREEMENT_SPREAD: f64 = 10.0;

pub const WARN_AI_DISABLED: &str = "AI analysis is not configured; showing internal score only";
pub const WARN_AI_UNAVAILABLE: &str = "AI analysis unavailable; showing internal score only";
pub const WARN_AI_NO_CONFIDENCE: &str =
    "AI providers reported no confidence; showing internal score only";

/// Aggregate of several provider opinions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consensus {
    pub score: u8,
    /// Mean of provider confidences, `[0, 1]`.
    pub confidence: f64,
    pub insights: Vec<String>,
    pub opinions: Vec<ProviderOpinion>,
}

/// Confidence-weighted mean of the opinions. Zero total weight gives a zero
/// consensus with an explanatory insight instead of dividing by zero.
pub fn aggregate(opinions: Vec<ProviderOpinion>) -> Consensus {
    if opinions.is_empty() {
        return Consensus {
            score: 0,
            confidence: 0.0,
            insights: vec!["No AI provider returned a usable opinion".to_string()],
            opinions,
        };
    }

    let total_weight: f64 = opinions.iter().map(|o| o.confidence).sum();
    if total_weight <= f64::EPSILON {
        return Consensus {
            score: 0,
            confidence: 0.0,
            insights: vec![format!(
                "{} AI provider(s) responded but none reported any confidence",
                opinions.len()
            )],
            opinions,
        };
    }

    let weighted: f64 = opinions.iter().map(|o| o.score * o.confidence).sum();
    let score = (weighted / total_weight).round().clamp(0.0, 100.0) as u8;
    let confidence = total_weight / opinions.len() as f64;

    let mut insights = vec![format!(
        "{} AI provider(s) analyzed the content",
        opinions.len()
    )];
    if opinions.len() > 1 {
        let (lo, hi) = opinions
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), o| (lo.min(o.score), hi.max(o.score)));
        let spread = (hi - lo).round();
        let verdict = if spread > DISAGREEMENT_SPREAD {
            "Providers disagree significantly"
        } else if spread <= AGREEMENT_SPREAD {
            "Providers strongly agree"
        } else {
            "Providers broadly agree"
        };
        insights.push(format!("{verdict} ({spread} point spread)"));
    }
    if let Some(top) = opinions
        .iter()
        .filter(|o| !o.reasoning.is_empty())
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    {
        insights.push(format!(
            "Most confident: {} ({}%): {}",
            top.provider,
            (top.confidence * 100.0).round(),
            top.reasoning
        ));
    }

    Consensus {
        score,
        confidence,
        insights,
        opinions,
    }
}

/// Relative weight of the internal and AI scores in the final blend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub internal: f64,
    pub ai: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            internal: 0.6,
            ai: 0.4,
        }
    }
}

impl BlendWeights {
    /// Clamp into `[0, 1]` and rescale to sum to 1. Non-finite weights fall
    /// back to the defaults; two zeros become an even split.
    pub fn normalized(self) -> Self {
        let d = Self::default();
        let fix = |w: f64, fallback: f64| {
            if w.is_finite() {
                w.clamp(0.0, 1.0)
            } else {
                fallback
            }
        };
        let internal = fix(self.internal, d.internal);
        let ai = fix(self.ai, d.ai);
        let sum = internal + ai;
        if sum <= f64::EPSILON {
            return Self {
                internal: 0.5,
                ai: 0.5,
            };
        }
        Self {
            internal: internal / sum,
            ai: ai / sum,
        }
    }
}

/// `round(internal * w_internal + consensus * w_ai)` with normalized weights.
pub fn blend(internal: u8, consensus: u8, weights: BlendWeights) -> u8 {
    let w = weights.normalized();
    let raw = f64::from(internal) * w.internal + f64::from(consensus) * w.ai;
    raw.round().clamp(0.0, 100.0) as u8
}

/// Internal analysis plus whatever AI consensus could be obtained.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAnalysis {
    pub internal: AnalysisResult,
    pub consensus: Option<Consensus>,
    pub final_score: u8,
    pub final_rating: SlopRating,
    pub warnings: Vec<String>,
}

/// Run the internal analyzer and, when providers are configured, blend in
/// their consensus. Provider failures never fail the call.
pub async fn enrich(
    content: &str,
    providers: &[DynProvider],
    weights: BlendWeights,
) -> EnrichedAnalysis {
    let internal = analyze(content);

    if providers.is_empty() {
        return internal_only(internal, None, WARN_AI_DISABLED);
    }

    let opinions = gather_opinions(providers, content).await;
    if opinions.is_empty() {
        warn!(providers = providers.len(), "all AI providers failed");
        return internal_only(internal, None, WARN_AI_UNAVAILABLE);
    }

    let consensus = aggregate(opinions);
    if consensus.confidence <= 0.0 {
        return internal_only(internal, Some(consensus), WARN_AI_NO_CONFIDENCE);
    }

    let final_score = blend(internal.score, consensus.score, weights);
    info!(
        internal = internal.score,
        consensus = consensus.score,
        final_score,
        "blended AI consensus"
    );
    EnrichedAnalysis {
        final_rating: SlopRating::of(final_score),
        final_score,
        internal,
        consensus: Some(consensus),
        warnings: Vec::new(),
    }
}

fn internal_only(
    internal: AnalysisResult,
    consensus: Option<Consensus>,
    warning: &str,
) -> EnrichedAnalysis {
    EnrichedAnalysis {
        final_score: internal.score,
        final_rating: internal.rating(),
        internal,
        consensus,
        warnings: vec![warning.to_string()],
    }
}
