//! Fluff factor: density of conversational filler words.

use once_cell::sync::Lazy;
use regex::Regex;

use super::sheet::ScoreSheet;

/// Whole-word, case-insensitive; every occurrence counts.
pub const FILLER_WORDS: &[&str] = &[
    "basically",
    "literally",
    "actually",
    "honestly",
    "so yeah",
    "um",
    "uh",
    "you know",
    "like",
    "sort of",
    "kind of",
];

static COMPILED: Lazy<Vec<Regex>> = Lazy::new(|| {
    FILLER_WORDS
        .iter()
        .map(|w| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(w))).expect("filler pattern"))
        .collect()
});

const HIGH_DENSITY: f64 = 0.05;
const MODERATE_DENSITY: f64 = 0.02;

pub fn score(lower: &str, words: &[&str], details: &mut Vec<String>) -> u8 {
    let filler_count = count_fillers(lower);
    let density = filler_count as f64;
    let total = words.len() as f64;
    let high = density > total * HIGH_DENSITY;
    let moderate = !high && density > total * MODERATE_DENSITY;

    let mut sheet = ScoreSheet::new(details);
    sheet
        .rule(high, 50, || {
            format!("High filler word usage ({filler_count} instances)")
        })
        .rule(moderate, 25, || {
            format!("Moderate filler word usage ({filler_count} instances)")
        });
    sheet.finish()
}

/// Total matches summed over every filler term.
pub fn count_fillers(text: &str) -> usize {
    COMPILED.iter().map(|re| re.find_iter(text).count()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::tokenize::words;

    fn run(text: &str) -> (u8, Vec<String>) {
        let lower = text.to_lowercase();
        let w = words(text);
        let mut details = Vec::new();
        let s = score(&lower, &w, &mut details);
        (s, details)
    }

    fn padded(fillers: &[&str], total_words: usize) -> String {
        let used: usize = fillers.iter().map(|f| words(f).len()).sum();
        let mut parts: Vec<&str> = fillers.to_vec();
        parts.extend(std::iter::repeat("plain").take(total_words - used));
        parts.join(" ")
    }

    #[test]
    fn whole_words_only() {
        assert_eq!(count_fillers("umbrella likely uhura"), 0);
        assert_eq!(count_fillers("um, like, uh"), 3);
    }

    #[test]
    fn counts_every_occurrence() {
        assert_eq!(count_fillers("like like like you know"), 4);
    }

    #[test]
    fn six_percent_is_high_bucket() {
        let text = padded(&["basically"; 6], 100);
        let (s, d) = run(&text);
        assert_eq!(s, 50);
        assert_eq!(d, vec!["High filler word usage (6 instances)"]);
    }

    #[test]
    fn exactly_five_percent_is_moderate() {
        let text = padded(&["literally"; 5], 100);
        let (s, d) = run(&text);
        assert_eq!(s, 25);
        assert_eq!(d, vec!["Moderate filler word usage (5 instances)"]);
    }

    #[test]
    fn two_percent_is_nothing() {
        let text = padded(&["honestly"; 2], 100);
        assert_eq!(run(&text).0, 0);
    }

    #[test]
    fn empty_text_is_zero() {
        assert_eq!(run("").0, 0);
    }
}
