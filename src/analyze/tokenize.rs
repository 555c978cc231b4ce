//! Whitespace/punctuation tokenizer shared by all scorers.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence regex"));

/// Word and sentence views of one input, owned by a single `analyze` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens<'a> {
    pub words: Vec<&'a str>,
    pub sentences: Vec<&'a str>,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            words: words(text),
            sentences: sentences(text),
        }
    }
}

/// Non-empty whitespace-delimited substrings.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Segments between runs of `.`, `!`, `?`; trimmed, empties dropped.
pub fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_tokens() {
        let t = Tokens::new("");
        assert!(t.words.is_empty());
        assert!(t.sentences.is_empty());
    }

    #[test]
    fn splits_on_runs_of_terminators() {
        let s = sentences("Wait... what?! Really.  ");
        assert_eq!(s, vec!["Wait", "what", "Really"]);
    }

    #[test]
    fn words_ignore_repeated_whitespace() {
        assert_eq!(words("  a\tb \n\n c "), vec!["a", "b", "c"]);
    }
}
