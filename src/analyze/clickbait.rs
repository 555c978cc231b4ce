//! Clickbait factor: sensational patterns plus exclamation-mark abuse.

use once_cell::sync::Lazy;
use regex::Regex;

use super::sheet::ScoreSheet;

/// Case-insensitive patterns, evaluated in this order.
pub const CLICKBAIT_PATTERNS: &[&str] = &[
    r"you won't believe",
    r"shocking",
    r"this one trick",
    r"doctors hate",
    r"number \d+ will shock you",
    r"what happens next",
    r"\d+ secrets",
    r"the truth about",
    r"they don't want you to know",
];

static COMPILED: Lazy<Vec<Regex>> = Lazy::new(|| {
    CLICKBAIT_PATTERNS
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("clickbait pattern"))
        .collect()
});

const PATTERN_POINTS: u32 = 25;
const EXCLAMATION_LIMIT: usize = 5;
const EXCLAMATION_POINTS: u32 = 20;
const LISTED: usize = 2;

pub fn score(content: &str, details: &mut Vec<String>) -> u8 {
    let matched: Vec<&str> = COMPILED
        .iter()
        .filter_map(|re| re.find(content).map(|m| m.as_str()))
        .collect();
    let exclamations = content.matches('!').count();

    let mut sheet = ScoreSheet::new(details);
    sheet
        .rule(exclamations > EXCLAMATION_LIMIT, EXCLAMATION_POINTS, || {
            format!("Excessive exclamation marks ({exclamations})")
        })
        .rule(
            !matched.is_empty(),
            PATTERN_POINTS * matched.len() as u32,
            || {
                format!(
                    "Clickbait patterns found: {}",
                    matched[..matched.len().min(LISTED)].join(", ")
                )
            },
        );
    sheet.finish()
}
