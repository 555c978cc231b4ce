// tests/analyze_properties.rs
//
// Behavioural properties of the public `analyze` entry point.

use rand::{rngs::StdRng, Rng, SeedableRng};
use slop_detector::{analyze, rating_of};

fn padded(head: &str, total_words: usize) -> String {
    let used = head.split_whitespace().count();
    let mut out = head.to_string();
    for _ in used..total_words {
        out.push_str(" plain");
    }
    out
}

#[test]
fn empty_input_is_valid_and_only_low_effort() {
    let r = analyze("");
    assert_eq!(r.factors.low_effort, 40);
    assert_eq!(r.factors.repetitiveness, 0);
    assert_eq!(r.factors.ai_generated, 0);
    assert_eq!(r.factors.clickbait, 0);
    assert_eq!(r.factors.fluff, 0);
    // 40 * 0.15
    assert_eq!(r.score, 6);
    assert_eq!(r.details.len(), 1);
}

#[test]
fn repeated_word_is_reported_with_count() {
    let r = analyze("banana banana banana banana banana banana");
    assert!(r.factors.repetitiveness >= 30);
    assert!(
        r.details.iter().any(|d| d.contains("\"banana\" (6x)")),
        "details: {:?}",
        r.details
    );
}

#[test]
fn repeated_non_english_words_are_reported() {
    for word in ["café", "über", "Привет"] {
        let text = vec![word; 6].join(" ");
        let r = analyze(&text);
        assert!(r.factors.repetitiveness >= 30, "{word}: {:?}", r.details);
        let expected = format!("\"{}\" (6x)", word.to_lowercase());
        assert!(
            r.details.iter().any(|d| d.contains(&expected)),
            "details: {:?}",
            r.details
        );
    }
}

#[test]
fn repeated_sentence_is_reported() {
    let r = analyze(
        "This sentence repeats itself. Something else entirely here. THIS sentence repeats itself.",
    );
    assert!(r.factors.repetitiveness >= 40);
    assert!(r.details.iter().any(|d| d.contains("repeated sentence")));
}

#[test]
fn word_and_sentence_repetition_stack_to_seventy() {
    let s = "Cheese cheese cheese cheese cheese cheese is great.";
    let r = analyze(&format!("{s} {s}"));
    assert_eq!(r.factors.repetitiveness, 70);
}

#[test]
fn clickbait_pattern_plus_exclamations() {
    let r = analyze("This is shocking!!!!!!");
    assert!(r.factors.clickbait >= 45);
    assert!(r.details.contains(&"Excessive exclamation marks (6)".to_string()));
    assert!(r.details.contains(&"Clickbait patterns found: shocking".to_string()));
}

#[test]
fn six_percent_filler_is_high_bucket() {
    let text = padded("basically um like honestly you know literally", 100);
    assert_eq!(text.split_whitespace().count(), 100);
    let r = analyze(&text);
    assert_eq!(r.factors.fluff, 50);
}

#[test]
fn two_ai_phrases_score_thirty() {
    let r = analyze("We leverage synergy across teams.");
    assert_eq!(r.factors.ai_generated, 30);
    assert!(r
        .details
        .contains(&"AI-typical phrases detected: leverage, synergy".to_string()));
}

#[test]
fn details_follow_scorer_order() {
    let r = analyze("leverage leverage leverage leverage leverage leverage shocking basically");
    let prefixes = [
        "Repetitive words detected",
        "AI-typical phrases detected",
        "Clickbait patterns found",
        "Very short content",
        "High filler word usage",
    ];
    assert_eq!(r.details.len(), prefixes.len(), "details: {:?}", r.details);
    for (d, p) in r.details.iter().zip(prefixes) {
        assert!(d.starts_with(p), "expected `{p}`, got `{d}`");
    }
}

#[test]
fn clean_prose_scores_minimal() {
    let paragraph = "The committee met on Tuesday to review the budget. \
        Each department submitted estimates for the next two quarters. \
        Several members asked about travel costs and the new printer lease. \
        The treasurer answered most questions with figures from last year. \
        A vote on the final numbers is planned for early March. \
        Minutes were shared with staff by email the following morning. \
        Nobody raised objections to the proposed timeline for the move.";
    let r = analyze(paragraph);
    assert_eq!(r.score, 0, "details: {:?}", r.details);
    assert_eq!(rating_of(r.score), "Minimal Slop");
}

#[test]
fn rating_boundaries() {
    assert_eq!(rating_of(80), "Extreme Slop");
    assert_eq!(rating_of(79), "High Slop");
}

const VOCAB: &[&str] = &[
    "the", "data", "basically", "like", "you know", "shocking", "leverage", "delve into",
    "7 secrets", "!", "!!!", "?", ".", "...", "Data", "DATA.", "model", "um", "growth",
    "synergy", "\n", "\t", "é", "🙂", "number 3 will shock you", "",
];

fn random_text(rng: &mut StdRng) -> String {
    let n = rng.random_range(0..400);
    let mut out = String::new();
    for _ in 0..n {
        let w = VOCAB[rng.random_range(0..VOCAB.len())];
        out.push_str(w);
        if rng.random_range(0..4) != 0 {
            out.push(' ');
        }
    }
    out
}

#[test]
fn scores_stay_in_range_and_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(0x5106);
    for _ in 0..300 {
        let text = random_text(&mut rng);
        let a = analyze(&text);
        assert!(a.score <= 100);
        for f in [
            a.factors.repetitiveness,
            a.factors.ai_generated,
            a.factors.clickbait,
            a.factors.low_effort,
            a.factors.fluff,
        ] {
            assert!(f <= 100);
        }
        assert_eq!(a, analyze(&text), "analyze must be pure for {text:?}");
    }
}
