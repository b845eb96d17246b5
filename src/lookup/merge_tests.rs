//! Tests for suggestion ranking

use super::*;
use proptest::prelude::*;

fn rank_words(candidates: &[&str], words: usize, limit: usize) -> Vec<String> {
    rank_suggestions(
        candidates.iter().copied(),
        WordBoundaryPattern::new(words),
        CompletionScope::Word,
        limit,
    )
}

#[test]
fn test_dedup_is_case_insensitive_and_keeps_first() {
    let ranked = rank_words(&["Cat", "dog", "cat", "Dog"], 1, 7);
    assert_eq!(ranked, vec!["Cat", "dog"]);
}

#[test]
fn test_empty_candidates_yield_empty_list() {
    let ranked = rank_words(&[], 1, 7);
    assert!(ranked.is_empty());
}

#[test]
fn test_extracts_word_being_typed() {
    let ranked = rank_words(&["blue cat", "blue car", "blue cathedral window"], 2, 7);
    assert_eq!(ranked, vec!["cat", "car", "cathedral"]);
}

#[test]
fn test_non_matching_candidates_are_dropped() {
    let ranked = rank_words(&["cat", "blue cat", " blue car", ""], 2, 7);
    assert_eq!(ranked, vec!["cat"]);
}

#[test]
fn test_dedup_applies_after_extraction() {
    // Different phrases that complete to the same word collapse together
    let ranked = rank_words(&["blue cat", "blue Cat food", "blue cats"], 2, 7);
    assert_eq!(ranked, vec!["cat", "cats"]);
}

#[test]
fn test_truncates_to_limit() {
    let candidates = ["a", "b", "c", "d", "e", "f", "g", "h", "i"];
    let ranked = rank_words(&candidates, 1, 7);
    assert_eq!(ranked, vec!["a", "b", "c", "d", "e", "f", "g"]);
}

#[test]
fn test_limit_counts_unique_suggestions() {
    let ranked = rank_words(&["a", "A", "b", "B", "c"], 1, 3);
    assert_eq!(ranked, vec!["a", "b", "c"]);
}

#[test]
fn test_zero_limit_yields_nothing() {
    assert!(rank_words(&["cat"], 1, 0).is_empty());
}

#[test]
fn test_phrase_scope_keeps_typed_prefix() {
    let ranked = rank_suggestions(
        ["blue cat food", "Blue Cat", "blue car"],
        WordBoundaryPattern::new(2),
        CompletionScope::Phrase,
        7,
    );
    assert_eq!(ranked, vec!["blue cat", "blue car"]);
}

#[test]
fn test_extract_completion_word_scope() {
    let pattern = WordBoundaryPattern::new(2);
    assert_eq!(
        extract_completion("blue car wash", pattern, CompletionScope::Word),
        Some("car")
    );
    assert_eq!(extract_completion("blue", pattern, CompletionScope::Word), None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // The ranked list never exceeds the limit, whatever the backend returns.
    #[test]
    fn prop_never_exceeds_limit(
        candidates in prop::collection::vec("[a-zA-Z]{1,6}( [a-zA-Z]{1,6}){0,2}", 0..120),
        words in 1usize..3,
        limit in 0usize..12,
    ) {
        let ranked = rank_suggestions(
            candidates.iter(),
            WordBoundaryPattern::new(words),
            CompletionScope::Word,
            limit,
        );
        prop_assert!(ranked.len() <= limit);
    }

    // No two ranked suggestions are equal ignoring case, and they appear in
    // the order of their first occurrence among the candidates.
    #[test]
    fn prop_unique_and_order_preserving(
        candidates in prop::collection::vec("[a-cA-C]{1,3}", 0..40),
    ) {
        let ranked = rank_suggestions(
            candidates.iter(),
            WordBoundaryPattern::new(1),
            CompletionScope::Word,
            usize::MAX,
        );

        let keys: Vec<String> = ranked.iter().map(|s| s.to_lowercase()).collect();
        let unique: HashSet<&String> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len());

        let first_positions: Vec<usize> = ranked
            .iter()
            .map(|s| candidates.iter().position(|c| c == s).unwrap())
            .collect();
        prop_assert!(first_positions.windows(2).all(|w| w[0] < w[1]));
    }
}
