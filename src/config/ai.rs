// src/config/ai.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::consensus::BlendWeights;

pub const ENV_AI_CONFIG_PATH: &str = "SLOP_AI_CONFIG";
pub const ENV_OPENAI_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ANTHROPIC_KEY: &str = "ANTHROPIC_API_KEY";

fn default_timeout_secs() -> u64 {
    20
}
fn default_api_key() -> String {
    "ENV".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Mock,
}

impl ProviderKind {
    /// Case-insensitive; "claude" is accepted for Anthropic.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "anthropic" | "claude" => Some(Self::Anthropic),
            "mock" => Some(Self::Mock),
            _ => None,
        }
    }

    fn key_env(self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some(ENV_OPENAI_KEY),
            Self::Anthropic => Some(ENV_ANTHROPIC_KEY),
            Self::Mock => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// "openai" | "anthropic" | "mock" (case-insensitive)
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    /// "ENV" means: read from OPENAI_API_KEY / ANTHROPIC_API_KEY (by provider)
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn kind(&self) -> Option<ProviderKind> {
        ProviderKind::parse(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    #[serde(default)]
    pub weights: BlendWeights,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            providers: Vec::new(),
            weights: BlendWeights::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AiConfig {
    /// Load from a `.json` or `.toml` file (by extension; JSON otherwise).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading AI config from {}", path.display()))?;
        let is_toml = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        let cfg = if is_toml {
            Self::from_toml_str(&data)
        } else {
            Self::from_json_str(&data)
        }
        .with_context(|| format!("parsing AI config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: AiConfig = serde_json::from_str(s)?;
        cfg.finalize()
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: AiConfig = toml::from_str(s)?;
        cfg.finalize()
    }

    /// Lookup order:
    /// 1) $SLOP_AI_CONFIG (must exist)
    /// 2) config/ai.json
    /// 3) config/ai.toml
    /// 4) disabled default
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = env::var(ENV_AI_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                bail!("{ENV_AI_CONFIG_PATH} points to non-existent path {}", pb.display());
            }
            return Self::load_from_file(&pb);
        }
        for candidate in ["config/ai.json", "config/ai.toml"] {
            let pb = PathBuf::from(candidate);
            if pb.exists() {
                return Self::load_from_file(&pb);
            }
        }
        Ok(Self::default())
    }

    /// Validate provider names, resolve "ENV" keys and sanitize numbers.
    fn finalize(mut self) -> Result<Self> {
        for p in &mut self.providers {
            let kind = p
                .kind()
                .ok_or_else(|| anyhow!("Unsupported provider in config: {}", p.name))?;
            p.name = p.name.trim().to_ascii_lowercase();

            // Keys only matter for providers that will actually be called.
            if self.enabled && p.api_key.trim().eq_ignore_ascii_case("env") {
                if let Some(var) = kind.key_env() {
                    p.api_key = env::var(var).map_err(|_| anyhow!("Missing {var} env var"))?;
                } else {
                    p.api_key.clear();
                }
            }
        }

        self.weights = self.weights.normalized();
        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
        }
        Ok(self)
    }
}
