//! Low-effort factor: structural signals (too short, run-on, unpunctuated).

use super::sheet::ScoreSheet;

const MIN_WORDS: usize = 50;
const MAX_AVG_SENTENCE_WORDS: f64 = 50.0;
const MIN_SENTENCES: usize = 3;
const UNSTRUCTURED_MIN_WORDS: usize = 30;

pub fn score(words: &[&str], sentences: &[&str], details: &mut Vec<String>) -> u8 {
    let word_count = words.len();
    let avg = word_count as f64 / sentences.len().max(1) as f64;

    let mut sheet = ScoreSheet::new(details);
    sheet
        .rule(word_count < MIN_WORDS, 40, || {
            format!("Very short content ({word_count} words)")
        })
        .rule(avg > MAX_AVG_SENTENCE_WORDS, 30, || {
            format!("Extremely long sentences (avg {} words)", avg.round())
        })
        .rule(
            sentences.len() < MIN_SENTENCES && word_count > UNSTRUCTURED_MIN_WORDS,
            20,
            || "Lacks proper sentence structure".to_string(),
        );
    sheet.finish()
}
