// src/analyze/mod.rs
//! Slop analysis entry: tokenizes once, runs the five factor scorers in fixed
//! order, and combines them into one weighted score.

pub mod clickbait;
pub mod fluff;
pub mod low_effort;
pub mod phrases;
pub mod rating;
pub mod repetition;
pub mod sheet;
pub mod tokenize;

use serde::Serialize;

pub use crate::analyze::rating::{color_of, rating_of, SlopRating};
pub use crate::analyze::tokenize::Tokens;

/// Per-factor weights of the combined score. They sum to 1.0.
pub const WEIGHT_REPETITIVENESS: f64 = 0.25;
pub const WEIGHT_AI_GENERATED: f64 = 0.25;
pub const WEIGHT_CLICKBAIT: f64 = 0.20;
pub const WEIGHT_LOW_EFFORT: f64 = 0.15;
pub const WEIGHT_FLUFF: f64 = 0.15;

/// The five factor scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Factors {
    pub repetitiveness: u8,
    pub ai_generated: u8,
    pub clickbait: u8,
    pub low_effort: u8,
    pub fluff: u8,
}

impl Factors {
    /// Weighted combination, rounded half away from zero.
    pub fn combined(&self) -> u8 {
        let raw = f64::from(self.repetitiveness) * WEIGHT_REPETITIVENESS
            + f64::from(self.ai_generated) * WEIGHT_AI_GENERATED
            + f64::from(self.clickbait) * WEIGHT_CLICKBAIT
            + f64::from(self.low_effort) * WEIGHT_LOW_EFFORT
            + f64::from(self.fluff) * WEIGHT_FLUFF;
        raw.round().clamp(0.0, 100.0) as u8
    }
}

/// Result of one `analyze` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub factors: Factors,
    /// Triggered rules, in scorer order:
    /// repetitiveness, AI phrases, clickbait, low effort, fluff.
    pub details: Vec<String>,
}

impl AnalysisResult {
    pub fn rating(&self) -> SlopRating {
        SlopRating::of(self.score)
    }
}

/// Score `content`. Total over every input, including the empty string.
pub fn analyze(content: &str) -> AnalysisResult {
    let tokens = Tokens::new(content);
    let lower = content.to_lowercase();
    let mut details = Vec::new();

    let factors = Factors {
        repetitiveness: repetition::score(&tokens.words, &tokens.sentences, &mut details),
        ai_generated: phrases::score(&lower, &mut details),
        clickbait: clickbait::score(content, &mut details),
        low_effort: low_effort::score(&tokens.words, &tokens.sentences, &mut details),
        fluff: fluff::score(&lower, &tokens.words, &mut details),
    };

    AnalysisResult {
        score: factors.combined(),
        factors,
        details,
    }
}

/// Word count as seen by the scorers.
pub fn word_count(content: &str) -> usize {
    tokenize::words(content).len()
}
