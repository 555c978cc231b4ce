// tests/consensus_enrich.rs
//
// End-to-end enrichment with in-process providers: partial failure,
// total failure, ordering and the zero-confidence fallback.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use slop_detector::ai_adapter::{AiProvider, DynProvider, MockProvider, ProviderError, ProviderOpinion};
use slop_detector::consensus::{WARN_AI_DISABLED, WARN_AI_NO_CONFIDENCE, WARN_AI_UNAVAILABLE};
use slop_detector::{analyze, blend, enrich, BlendWeights};

const TEXT: &str = "Shocking! You won't believe this one trick. Basically it is a game-changer.";

struct Failing;

#[async_trait]
impl AiProvider for Failing {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn analyze(&self, _content: &str) -> Result<ProviderOpinion, ProviderError> {
        Err(ProviderError::Status {
            status: 503,
            body: "overloaded".into(),
        })
    }
}

/// Answers after a delay so completion order differs from registration order.
struct Slow {
    name: &'static str,
    score: f64,
    delay_ms: u64,
}

#[async_trait]
impl AiProvider for Slow {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn analyze(&self, _content: &str) -> Result<ProviderOpinion, ProviderError> {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        Ok(ProviderOpinion {
            provider: self.name.to_string(),
            score: self.score,
            confidence: 1.0,
            reasoning: format!("{} done", self.name),
            factors: None,
        })
    }
}

fn mock(score: f64, confidence: f64) -> DynProvider {
    Arc::new(MockProvider {
        score,
        confidence,
        reasoning: "fixed".into(),
    })
}

#[tokio::test]
async fn no_providers_is_internal_only() {
    let out = enrich(TEXT, &[], BlendWeights::default()).await;
    assert!(out.consensus.is_none());
    assert_eq!(out.final_score, analyze(TEXT).score);
    assert_eq!(out.warnings, vec![WARN_AI_DISABLED.to_string()]);
}

#[tokio::test]
async fn all_failing_is_internal_only_with_warning() {
    let providers: Vec<DynProvider> = vec![Arc::new(Failing), Arc::new(Failing)];
    let out = enrich(TEXT, &providers, BlendWeights::default()).await;
    assert!(out.consensus.is_none());
    assert_eq!(out.final_score, out.internal.score);
    assert_eq!(out.final_rating, out.internal.rating());
    assert_eq!(out.warnings, vec![WARN_AI_UNAVAILABLE.to_string()]);
}

#[tokio::test]
async fn failures_are_skipped_and_the_rest_blended() {
    let providers: Vec<DynProvider> = vec![Arc::new(Failing), mock(90.0, 1.0)];
    let out = enrich(TEXT, &providers, BlendWeights::default()).await;

    let consensus = out.consensus.expect("one provider succeeded");
    assert_eq!(consensus.score, 90);
    assert_eq!(consensus.opinions.len(), 1);
    assert!(out.warnings.is_empty());
    assert_eq!(
        out.final_score,
        blend(out.internal.score, 90, BlendWeights::default())
    );
}

#[tokio::test]
async fn opinions_keep_registration_order() {
    let providers: Vec<DynProvider> = vec![
        Arc::new(Slow {
            name: "first",
            score: 10.0,
            delay_ms: 60,
        }),
        Arc::new(Slow {
            name: "second",
            score: 30.0,
            delay_ms: 0,
        }),
    ];
    let out = enrich(TEXT, &providers, BlendWeights::default()).await;
    let consensus = out.consensus.expect("consensus");
    let names: Vec<&str> = consensus.opinions.iter().map(|o| o.provider.as_str()).collect();
    assert_eq!(names, ["first", "second"]);
    assert_eq!(consensus.score, 20);
}

#[tokio::test]
async fn zero_confidence_keeps_internal_score() {
    let providers = vec![mock(95.0, 0.0)];
    let out = enrich(TEXT, &providers, BlendWeights::default()).await;
    assert_eq!(out.final_score, out.internal.score);
    assert_eq!(out.warnings, vec![WARN_AI_NO_CONFIDENCE.to_string()]);
    let consensus = out.consensus.expect("consensus is still reported");
    assert_eq!(consensus.score, 0);
    assert_eq!(consensus.confidence, 0.0);
}

#[tokio::test]
async fn ai_only_weights_take_the_consensus() {
    let weights = BlendWeights {
        internal: 0.0,
        ai: 1.0,
    };
    let out = enrich(TEXT, &[mock(73.0, 0.8)], weights).await;
    assert_eq!(out.final_score, 73);
}
