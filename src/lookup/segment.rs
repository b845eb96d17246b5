//! Input segmentation
//!
//! Splits raw search input into the full phrase and the word currently being
//! typed, and builds the pattern used to cut that word back out of
//! multi-word backend matches.

/// Matches the first N whitespace-delimited words at the start of a string
///
/// N comes from the word count of the original input, not of the candidate,
/// since candidates are whole phrases the typed words were substituted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordBoundaryPattern {
    words: usize,
}

/// Result of applying a [`WordBoundaryPattern`] to a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryMatch<'a> {
    /// The N matched words, each with the whitespace that trails it
    pub prefix: &'a str,
    /// The N-th word of the match
    pub final_word: &'a str,
}

impl WordBoundaryPattern {
    pub fn new(words: usize) -> Self {
        Self { words }
    }

    pub fn words(&self) -> usize {
        self.words
    }

    /// Match the pattern against the start of `candidate`
    ///
    /// Returns None when the candidate has fewer than N words or starts with
    /// whitespace.
    pub fn split<'a>(&self, candidate: &'a str) -> Option<BoundaryMatch<'a>> {
        let mut end = 0;
        let mut final_word = None;

        for _ in 0..self.words {
            let rest = &candidate[end..];
            let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            if word_len == 0 {
                return None;
            }

            let after_word = &rest[word_len..];
            let space_len = after_word.len() - after_word.trim_start().len();

            final_word = Some(&rest[..word_len]);
            end += word_len + space_len;
        }

        Some(BoundaryMatch {
            prefix: &candidate[..end],
            final_word: final_word?,
        })
    }
}

/// Search input split for one lookup cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedInput {
    full_phrase: String,
    word_count: usize,
    last_word_start: usize,
}

impl SegmentedInput {
    /// The trimmed input, used verbatim as the full-phrase search term
    pub fn full_phrase(&self) -> &str {
        &self.full_phrase
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// The final word, present only for multi-word input
    pub fn last_word(&self) -> Option<&str> {
        (self.word_count > 1).then(|| &self.full_phrase[self.last_word_start..])
    }

    pub fn pattern(&self) -> WordBoundaryPattern {
        WordBoundaryPattern::new(self.word_count)
    }

    /// The full phrase with its last word replaced by `text`
    pub fn substitute_last_word(&self, text: &str) -> String {
        let mut phrase = String::with_capacity(self.last_word_start + text.len());
        phrase.push_str(&self.full_phrase[..self.last_word_start]);
        phrase.push_str(text);
        phrase
    }
}

/// Segment raw input. Returns None when nothing but whitespace was typed.
pub fn segment(input: &str) -> Option<SegmentedInput> {
    let full_phrase = input.trim();
    if full_phrase.is_empty() {
        return None;
    }

    let word_count = full_phrase.split_whitespace().count();
    let last_word_start = full_phrase
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(idx, c)| idx + c.len_utf8());

    Some(SegmentedInput {
        full_phrase: full_phrase.to_string(),
        word_count,
        last_word_start,
    })
}

#[cfg(test)]
#[path = "segment_tests.rs"]
mod segment_tests;
