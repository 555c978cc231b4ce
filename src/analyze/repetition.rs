//! Repetitiveness factor: over-used words and verbatim repeated sentences.

use std::collections::HashMap;

use super::sheet::ScoreSheet;

const MIN_WORD_LEN: usize = 4;
const WORD_REPEAT_THRESHOLD: usize = 5;
const TOP_WORDS: usize = 3;
const MIN_SENTENCE_LEN: usize = 11;

const WORD_POINTS: u32 = 30;
const SENTENCE_POINTS: u32 = 40;

pub fn score(words: &[&str], sentences: &[&str], details: &mut Vec<String>) -> u8 {
    let top = frequent_words(words);
    let repeated = repeated_sentence_count(sentences);

    let mut sheet = ScoreSheet::new(details);
    sheet
        .rule(!top.is_empty(), WORD_POINTS, || {
            let listed = top
                .iter()
                .map(|(w, n)| format!("\"{w}\" ({n}x)"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Repetitive words detected: {listed}")
        })
        .rule(repeated > 0, SENTENCE_POINTS, || {
            format!("Found {repeated} repeated sentence(s)")
        });
    sheet.finish()
}

/// Lowercase and drop every non-alphanumeric char. Letters in any script
/// survive, so "Über," and "über" count as the same word.
fn normalize_word(w: &str) -> String {
    w.to_lowercase().chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Words seen more than five times, most frequent first, at most three.
/// Equal counts keep first-seen order.
fn frequent_words(words: &[&str]) -> Vec<(String, usize)> {
    let counts = count_in_order(
        words
            .iter()
            .map(|w| normalize_word(w))
            .filter(|w| w.chars().count() >= MIN_WORD_LEN),
    );

    let mut hits: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, n)| *n > WORD_REPEAT_THRESHOLD)
        .collect();
    hits.sort_by(|a, b| b.1.cmp(&a.1));
    hits.truncate(TOP_WORDS);
    hits
}

/// Number of distinct normalized sentences occurring more than once.
fn repeated_sentence_count(sentences: &[&str]) -> usize {
    count_in_order(
        sentences
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| s.chars().count() >= MIN_SENTENCE_LEN),
    )
    .into_iter()
    .filter(|(_, n)| *n > 1)
    .count()
}

/// Frequency table that remembers first-seen order, so output never depends
/// on hash iteration order.
fn count_in_order<I>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut table: Vec<(String, usize)> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&i) => table[i].1 += 1,
            None => {
                index.insert(item.clone(), table.len());
                table.push((item, 1));
            }
        }
    }
    table
}
