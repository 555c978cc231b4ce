// src/ai_bootstrap.rs
use crate::config::ai::{AiConfig, ProviderConfig, ProviderKind};
use crate::consensus::ai_adapter::{
    AnthropicProvider, DynProvider, MockProvider, OpenAiProvider, ProviderError,
};
use crate::consensus::{enrich, BlendWeights, EnrichedAnalysis};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub const ENV_AI_TEST_MODE: &str = "AI_TEST_MODE";

/// Configured AI providers plus blend weights, shared by request handlers.
pub struct AiRuntime {
    pub cfg: AiConfig,
    pub providers: Vec<DynProvider>,
}

impl AiRuntime {
    /// Runtime with no providers; enrichment always falls back to internal-only.
    pub fn disabled() -> Self {
        Self {
            cfg: AiConfig::default(),
            providers: Vec::new(),
        }
    }

    pub fn with_providers(providers: Vec<DynProvider>, weights: BlendWeights) -> Self {
        Self {
            cfg: AiConfig {
                enabled: !providers.is_empty(),
                weights,
                ..AiConfig::default()
            },
            providers,
        }
    }

    /// Load config via `AiConfig::load_default()` and build providers.
    pub fn from_env() -> anyhow::Result<Self> {
        let cfg = AiConfig::load_default()?;
        Ok(Self::from_config(cfg))
    }

    /// * `AI_TEST_MODE=mock` → one deterministic mock provider.
    /// * `enabled == false` → no providers.
    /// * otherwise one provider per entry; entries that fail to build are
    ///   logged and skipped.
    pub fn from_config(cfg: AiConfig) -> Self {
        if std::env::var(ENV_AI_TEST_MODE).is_ok_and(|v| v == "mock") {
            info!("AI test mode: using mock provider");
            let providers: Vec<DynProvider> = vec![Arc::new(MockProvider::default())];
            return Self { cfg, providers };
        }

        if !cfg.enabled {
            return Self {
                cfg,
                providers: Vec::new(),
            };
        }

        let timeout = Duration::from_secs(cfg.timeout_secs);
        let mut providers: Vec<DynProvider> = Vec::with_capacity(cfg.providers.len());
        for p in &cfg.providers {
            match build_provider(p, timeout) {
                Ok(built) => providers.push(built),
                Err(e) => warn!(provider = %p.name, error = %e, "skipping AI provider"),
            }
        }
        // Safe diagnostics: only names + key lengths
        info!(
            providers = ?cfg.providers.iter().map(|p| (p.name.as_str(), p.api_key.len())).collect::<Vec<_>>(),
            "AI cfg loaded"
        );
        Self { cfg, providers }
    }

    pub fn is_enabled(&self) -> bool {
        !self.providers.is_empty()
    }

    pub async fn enrich(&self, content: &str) -> EnrichedAnalysis {
        enrich(content, &self.providers, self.cfg.weights).await
    }

    /// One-off smoke test of the configured providers. Never fails; logs the result.
    pub async fn quick_probe(&self) {
        if !self.is_enabled() {
            warn!("AI quick_probe skipped: no AI providers configured");
            return;
        }
        let sample = "In today's digital age, you won't believe this one trick. \
                      Basically, it will revolutionize everything!!!!!!";
        let out = self.enrich(sample).await;
        info!(
            final_score = out.final_score,
            consensus = ?out.consensus.as_ref().map(|c| c.score),
            warnings = ?out.warnings,
            "AI quick_probe finished"
        );
    }
}

fn build_provider(p: &ProviderConfig, timeout: Duration) -> Result<DynProvider, ProviderError> {
    let model = p.model.as_deref();
    let base_url = p.base_url.as_deref();
    match p.kind() {
        Some(ProviderKind::OpenAi) => Ok(Arc::new(OpenAiProvider::new(
            p.api_key.clone(),
            model,
            base_url,
            timeout,
        )?)),
        Some(ProviderKind::Anthropic) => Ok(Arc::new(AnthropicProvider::new(
            p.api_key.clone(),
            model,
            base_url,
            timeout,
        )?)),
        Some(ProviderKind::Mock) => Ok(Arc::new(MockProvider::default())),
        None => Err(ProviderError::Unsupported(p.name.clone())),
    }
}
