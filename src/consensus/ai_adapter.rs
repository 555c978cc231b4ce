//! AI adapter: provider abstraction, concrete providers, response parsing and
//! the fan-out gather used by the consensus step.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{debug, warn};

// ------------------------------------------------------------
// Public surface
// ------------------------------------------------------------

/// One provider's view of a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOpinion {
    pub provider: String,
    /// Slop score in `[0, 100]`.
    pub score: f64,
    /// Self-reported confidence in `[0, 1]`.
    pub confidence: f64,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("provider returned no content")]
    EmptyResponse,
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("response has no numeric `score` field")]
    MissingScore,
    #[error("unsupported provider `{0}`")]
    Unsupported(String),
}

/// Something that can judge a text and return a score/confidence/reasoning triple.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Provider name for diagnostics and the response payload.
    fn name(&self) -> &'static str;
    async fn analyze(&self, content: &str) -> Result<ProviderOpinion, ProviderError>;
}

pub type DynProvider = Arc<dyn AiProvider>;

/// Instruction sent to every remote provider.
pub const SYSTEM_PROMPT: &str = "You rate text for 'slop': repetitive, AI-templated, clickbait, \
low-effort or filler-heavy writing. Reply with ONLY a JSON object: \
{\"score\": <0-100, higher is sloppier>, \"confidence\": <0-1>, \
\"reasoning\": \"<one sentence>\", \"factors\": {\"repetitiveness\": <0-100>, \
\"aiGenerated\": <0-100>, \"clickbait\": <0-100>, \"lowEffort\": <0-100>, \"fluff\": <0-100>}}";

/// Longest input forwarded to a provider, in chars.
pub const MAX_PROMPT_CHARS: usize = 12_000;
const MAX_REASON_CHARS: usize = 280;
const DEFAULT_CONFIDENCE: f64 = 0.5;
const MAX_TOKENS: u32 = 400;

// ------------------------------------------------------------
// Fan-out
// ------------------------------------------------------------

/// Ask every provider concurrently. Failures are logged and dropped; the
/// survivors come back in registration order.
pub async fn gather_opinions(providers: &[DynProvider], content: &str) -> Vec<ProviderOpinion> {
    let content: Arc<str> = Arc::from(truncate_chars(content, MAX_PROMPT_CHARS));
    let mut set = JoinSet::new();
    for (idx, provider) in providers.iter().enumerate() {
        let provider = Arc::clone(provider);
        let content = Arc::clone(&content);
        set.spawn(async move {
            let name = provider.name();
            (idx, name, provider.analyze(&content).await)
        });
    }

    let mut ok = Vec::with_capacity(providers.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((idx, name, Ok(opinion))) => {
                counter!("slop_ai_provider_success_total", "provider" => name).increment(1);
                debug!(provider = name, score = opinion.score, "provider opinion received");
                ok.push((idx, opinion));
            }
            Ok((_, name, Err(e))) => {
                counter!("slop_ai_provider_errors_total", "provider" => name).increment(1);
                warn!(provider = name, error = %e, "AI provider failed; excluded from consensus");
            }
            Err(e) => {
                warn!(error = %e, "AI provider task aborted");
            }
        }
    }
    ok.sort_by_key(|(idx, _)| *idx);
    ok.into_iter().map(|(_, o)| o).collect()
}

// ------------------------------------------------------------
// Concrete providers
// ------------------------------------------------------------

fn http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    let client = reqwest::Client::builder()
        .user_agent("slop-detector/0.1")
        .connect_timeout(Duration::from_secs(4))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

async fn read_success(resp: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        status: status.as_u16(),
        body: truncate_chars(&body, 200).to_string(),
    })
}

/// OpenAI Chat Completions.
pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com";

    pub fn new(
        api_key: impl Into<String>,
        model: Option<&str>,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client(timeout)?,
            api_key: api_key.into(),
            model: model.unwrap_or(Self::DEFAULT_MODEL).to_string(),
            base_url: base_url
                .unwrap_or(Self::DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn analyze(&self, content: &str) -> Result<ProviderOpinion, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct ResponseFormat {
            #[serde(rename = "type")]
            kind: &'static str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
            max_tokens: u32,
            response_format: ResponseFormat,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: Option<String>,
        }

        let req = Req {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Msg {
                    role: "user",
                    content,
                },
            ],
            temperature: 0.2,
            max_tokens: MAX_TOKENS,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let resp = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await?;
        let body: Resp = read_success(resp)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ProviderError::EmptyResponse)?;
        parse_opinion(self.name(), &text)
    }
}

/// Anthropic Messages API.
pub struct AnthropicProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicProvider {
    pub const DEFAULT_MODEL: &'static str = "claude-3-5-haiku-latest";
    pub const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com";
    const API_VERSION: &'static str = "2023-06-01";

    pub fn new(
        api_key: impl Into<String>,
        model: Option<&str>,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client(timeout)?,
            api_key: api_key.into(),
            model: model.unwrap_or(Self::DEFAULT_MODEL).to_string(),
            base_url: base_url
                .unwrap_or(Self::DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn analyze(&self, content: &str) -> Result<ProviderOpinion, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            max_tokens: u32,
            system: &'a str,
            messages: Vec<Msg<'a>>,
        }
        #[derive(Deserialize)]
        struct Resp {
            content: Vec<Block>,
        }
        #[derive(Deserialize)]
        struct Block {
            #[serde(default)]
            text: Option<String>,
        }

        let req = Req {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages: vec![Msg {
                role: "user",
                content,
            }],
        };

        let resp = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", Self::API_VERSION)
            .json(&req)
            .send()
            .await?;
        let body: Resp = read_success(resp)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        let text = body
            .content
            .into_iter()
            .find_map(|b| b.text)
            .ok_or(ProviderError::EmptyResponse)?;
        parse_opinion(self.name(), &text)
    }
}

/// Deterministic provider for tests/local runs.
#[derive(Debug, Clone)]
pub struct MockProvider {
    pub score: f64,
    pub confidence: f64,
    pub reasoning: String,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            score: 50.0,
            confidence: 0.5,
            reasoning: "Neutral opinion (mock)".to_string(),
        }
    }
}

#[async_trait]
impl AiProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn analyze(&self, _content: &str) -> Result<ProviderOpinion, ProviderError> {
        Ok(ProviderOpinion {
            provider: self.name().to_string(),
            score: self.score.clamp(0.0, 100.0),
            confidence: self.confidence.clamp(0.0, 1.0),
            reasoning: self.reasoning.clone(),
            factors: None,
        })
    }
}

// ------------------------------------------------------------
// Response parsing
// ------------------------------------------------------------

/// Parse a model reply into an opinion. The first `{ ... }` span is taken as
/// the JSON payload so stray prose or code fences around it are tolerated.
/// A missing or non-numeric `score` is an error, never a default.
pub fn parse_opinion(provider: &str, raw: &str) -> Result<ProviderOpinion, ProviderError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    let (start, end) = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(s), Some(e)) if s < e => (s, e),
        _ => {
            return Err(ProviderError::Malformed(
                "no JSON object in reply".to_string(),
            ))
        }
    };
    let value: serde_json::Value = serde_json::from_str(&trimmed[start..=end])
        .map_err(|e| ProviderError::Malformed(e.to_string()))?;
    let obj = value
        .as_object()
        .ok_or_else(|| ProviderError::Malformed("reply is not a JSON object".to_string()))?;

    let score = obj
        .get("score")
        .and_then(serde_json::Value::as_f64)
        .ok_or(ProviderError::MissingScore)?;
    let confidence = obj
        .get("confidence")
        .and_then(serde_json::Value::as_f64)
        .unwrap_or(DEFAULT_CONFIDENCE);
    let reasoning = obj
        .get("reasoning")
        .and_then(serde_json::Value::as_str)
        .map(sanitize_reason)
        .unwrap_or_default();
    let factors = obj.get("factors").and_then(|f| f.as_object()).map(|m| {
        m.iter()
            .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n.clamp(0.0, 100.0))))
            .collect::<BTreeMap<_, _>>()
    });

    Ok(ProviderOpinion {
        provider: provider.to_string(),
        score: score.clamp(0.0, 100.0),
        confidence: confidence.clamp(0.0, 1.0),
        reasoning,
        factors: factors.filter(|m| !m.is_empty()),
    })
}

// ------------------------------------------------------------
// Sanitization
// ------------------------------------------------------------

/// Single line, whitespace collapsed, at most 280 chars.
pub fn sanitize_reason(input: &str) -> String {
    let mut out = String::with_capacity(MAX_REASON_CHARS);
    let mut prev_space = false;
    let mut len = 0usize;
    for ch in input.chars() {
        let c = if ch.is_whitespace() || ch.is_control() {
            ' '
        } else {
            ch
        };
        if c == ' ' {
            if !prev_space && !out.is_empty() {
                out.push(' ');
                len += 1;
            }
            prev_space = true;
        } else {
            out.push(c);
            len += 1;
            prev_space = false;
        }
        if len >= MAX_REASON_CHARS {
            break;
        }
    }
    out.trim().to_string()
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fenced_json() {
        let raw = "```json\n{\"score\": 72, \"confidence\": 0.8, \"reasoning\": \"Listicle\\nformat\"}\n```";
        let op = parse_opinion("openai", raw).unwrap();
        assert_eq!(op.provider, "openai");
        assert_eq!(op.score, 72.0);
        assert_eq!(op.confidence, 0.8);
        assert_eq!(op.reasoning, "Listicle format");
        assert!(op.factors.is_none());
    }

    #[test]
    fn missing_score_is_rejected() {
        let err = parse_opinion("openai", r#"{"confidence": 0.9}"#).unwrap_err();
        assert!(matches!(err, ProviderError::MissingScore));
    }

    #[test]
    fn string_score_is_rejected() {
        let err = parse_opinion("openai", r#"{"score": "80"}"#).unwrap_err();
        assert!(matches!(err, ProviderError::MissingScore));
    }

    #[test]
    fn prose_without_json_is_malformed() {
        let err = parse_opinion("anthropic", "I think it is quite sloppy.").unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
        assert!(matches!(
            parse_opinion("anthropic", "   ").unwrap_err(),
            ProviderError::EmptyResponse
        ));
    }

    #[test]
    fn clamps_and_defaults() {
        let op = parse_opinion(
            "mock",
            r#"{"score": 140, "factors": {"clickbait": 300, "note": "x"}}"#,
        )
        .unwrap();
        assert_eq!(op.score, 100.0);
        assert_eq!(op.confidence, 0.5);
        let f = op.factors.unwrap();
        assert_eq!(f.get("clickbait"), Some(&100.0));
        assert!(!f.contains_key("note"));
    }

    #[test]
    fn sanitize_collapses_and_caps() {
        assert_eq!(sanitize_reason("  a \n\t b  "), "a b");
        let long = "x".repeat(1000);
        assert_eq!(sanitize_reason(&long).chars().count(), 280);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
