//! Sentence length filtering
//!
//! Keeps sentences whose word count falls inside an inclusive band, without
//! reordering and without touching original indices.

use crate::types::Sentence;
use unicode_segmentation::UnicodeSegmentation;

/// Default minimum sentence length in tokens
pub const DEFAULT_MIN_TOKENS: usize = 3;
/// Default maximum sentence length in tokens
pub const DEFAULT_MAX_TOKENS: usize = 50;

/// Count word tokens (UAX #29 words; punctuation is not a token)
pub fn count_tokens(text: &str) -> usize {
    text.unicode_words().count()
}

/// Sentences that survived the length filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredSentences {
    sentences: Vec<Sentence>,
    original_count: usize,
}

impl FilteredSentences {
    /// Surviving sentences in document order
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Number of sentences before filtering
    pub fn original_count(&self) -> usize {
        self.original_count
    }

    /// Number of surviving sentences
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Check if nothing survived
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Texts of the surviving sentences
    pub fn texts(&self) -> Vec<&str> {
        self.sentences.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Filters sentences by token count
#[derive(Debug, Clone, Copy)]
pub struct SentenceFilter {
    min_tokens: usize,
    max_tokens: usize,
}

impl Default for SentenceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKENS, DEFAULT_MAX_TOKENS)
    }
}

impl SentenceFilter {
    /// Create a filter keeping sentences with `min..=max` tokens
    pub fn new(min_tokens: usize, max_tokens: usize) -> Self {
        Self {
            min_tokens,
            max_tokens,
        }
    }

    pub fn min_tokens(&self) -> usize {
        self.min_tokens
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Check a single token count against the band
    pub fn accepts(&self, token_count: usize) -> bool {
        (self.min_tokens..=self.max_tokens).contains(&token_count)
    }

    /// Filter sentences, recording each survivor's token count
    pub fn filter(&self, sentences: &[Sentence]) -> FilteredSentences {
        let kept = sentences
            .iter()
            .filter_map(|s| {
                let token_count = count_tokens(&s.text);
                self.accepts(token_count)
                    .then(|| s.clone().with_token_count(token_count))
            })
            .collect();

        FilteredSentences {
            sentences: kept,
            original_count: sentences.len(),
        }
    }
}
