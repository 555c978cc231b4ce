// src/transcript.rs
//! Video transcript source: id extraction, timedtext fetch, caption parsing.
//! The analyzer treats the joined transcript as ordinary text.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use quick_xml::de::from_str;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;

static URL_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:^|[/.])(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|shorts/|embed/|live/)|youtu\.be/)([A-Za-z0-9_-]{11})",
    )
    .expect("video url regex")
});
static BARE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video id regex"));
static WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Pull an 11-char video id out of a URL or accept a bare id.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if BARE_ID.is_match(input) {
        return Some(input.to_string());
    }
    URL_ID
        .captures(input)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_transcript(&self, video_id: &str) -> Result<String>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(rename = "text", default)]
    lines: Vec<Caption>,
}

#[derive(Debug, Deserialize)]
struct Caption {
    #[serde(rename = "$text", default)]
    body: String,
}

/// Parse timedtext XML into one whitespace-normalized string.
/// Caption bodies are HTML-escaped a second time inside the XML, so each line
/// is entity-decoded after XML unescaping.
pub fn parse_timedtext(xml: &str) -> Result<String> {
    let xml_clean = scrub_html_entities_for_xml(xml);
    let doc: TimedText = from_str(&xml_clean).context("parsing timedtext xml")?;

    let joined = doc
        .lines
        .iter()
        .map(|c| html_escape::decode_html_entities(&c.body).into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let text = WS.replace_all(&joined, " ").trim().to_string();
    if text.is_empty() {
        bail!("transcript is empty");
    }
    Ok(text)
}

/// Entities that HTML allows but XML does not.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}

/// YouTube's public timedtext endpoint.
pub struct YoutubeTimedText {
    client: reqwest::Client,
    base_url: String,
    lang: String,
}

impl YoutubeTimedText {
    pub const DEFAULT_BASE_URL: &'static str = "https://www.youtube.com";

    pub fn new() -> Result<Self> {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("slop-detector/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()
            .context("building transcript http client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            lang: "en".to_string(),
        })
    }

    pub fn lang(mut self, lang: &str) -> Self {
        self.lang = lang.to_string();
        self
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTimedText {
    async fn fetch_transcript(&self, video_id: &str) -> Result<String> {
        let resp = self
            .client
            .get(format!("{}/api/timedtext", self.base_url))
            .query(&[("lang", self.lang.as_str()), ("v", video_id)])
            .send()
            .await
            .context("timedtext http get()")?;
        let status = resp.status();
        if !status.is_success() {
            bail!("timedtext returned HTTP {status}");
        }
        let body = resp.text().await.context("timedtext http .text()")?;
        if body.trim().is_empty() {
            bail!("no captions available for video {video_id}");
        }
        parse_timedtext(&body)
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}
