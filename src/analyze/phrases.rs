//! AI-generated phrasing factor: presence of stock LLM phrases.

use super::sheet::ScoreSheet;

/// Matched as plain substrings of the lowercased content.
pub const AI_PHRASES: &[&str] = &[
    "delve into",
    "dive deep",
    "it's important to note",
    "in conclusion",
    "in today's digital age",
    "revolutionize",
    "game-changer",
    "unlock the secrets",
    "ultimate guide",
    "comprehensive guide",
    "navigate the complexities",
    "multifaceted",
    "holistic approach",
    "leverage",
    "synergy",
    "paradigm shift",
];

const PHRASE_POINTS: u32 = 15;
const LISTED: usize = 3;

pub fn score(lower: &str, details: &mut Vec<String>) -> u8 {
    let found: Vec<&str> = AI_PHRASES
        .iter()
        .copied()
        .filter(|p| lower.contains(p))
        .collect();

    let mut sheet = ScoreSheet::new(details);
    sheet.rule(
        !found.is_empty(),
        PHRASE_POINTS * found.len() as u32,
        || {
            let more = if found.len() > LISTED { "..." } else { "" };
            format!(
                "AI-typical phrases detected: {}{more}",
                found[..found.len().min(LISTED)].join(", ")
            )
        },
    );
    sheet.finish()
}
