//! Suggestion ranking
//!
//! Turns the concatenated backend matches of one lookup cycle into the list
//! shown to the user. Order is purely positional: full-phrase matches come
//! before last-word matches because the coordinator concatenates them that
//! way, and nothing here re-sorts.

use std::collections::HashSet;

use super::segment::WordBoundaryPattern;
use crate::config::CompletionScope;

/// Extract, deduplicate and bound suggestions
///
/// - Each candidate is cut down with `pattern`; candidates that do not match
///   are dropped.
/// - Duplicates are detected case-insensitively and the first occurrence is
///   kept.
/// - At most `limit` suggestions are returned.
pub fn rank_suggestions<I, S>(
    candidates: I,
    pattern: WordBoundaryPattern,
    scope: CompletionScope,
    limit: usize,
) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    for candidate in candidates {
        if suggestions.len() >= limit {
            break;
        }

        let Some(suggestion) = extract_completion(candidate.as_ref(), pattern, scope) else {
            continue;
        };

        if seen.insert(suggestion.to_lowercase()) {
            suggestions.push(suggestion.to_string());
        }
    }

    suggestions
}

/// The part of a candidate that completes what is being typed
pub fn extract_completion(
    candidate: &str,
    pattern: WordBoundaryPattern,
    scope: CompletionScope,
) -> Option<&str> {
    let matched = pattern.split(candidate)?;
    match scope {
        CompletionScope::Word => Some(matched.final_word),
        CompletionScope::Phrase => Some(matched.prefix.trim_end()),
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod merge_tests;
