//! Text normalization for similarity computation
//!
//! The normalized form only feeds the similarity engine; summaries are always
//! assembled from the original sentence text.

use super::stopwords::StopwordFilter;
use crate::types::Language;

/// Lowercases, strips punctuation and digits, and removes stopwords
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    language: Language,
    stopwords: StopwordFilter,
}

impl TextNormalizer {
    /// Create a normalizer with the language's built-in stopwords
    pub fn new(language: Language) -> Self {
        Self::with_stopwords(language, StopwordFilter::new(language))
    }

    /// Create a normalizer with a custom stopword filter
    pub fn with_stopwords(language: Language, stopwords: StopwordFilter) -> Self {
        Self {
            language,
            stopwords,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Normalize one sentence.
    ///
    /// If stopword removal would leave nothing, the stripped words are kept
    /// instead. A sentence without any letters normalizes to `""`.
    pub fn normalize(&self, sentence: &str) -> String {
        let lowered = self.language.to_lowercase(sentence);

        let words: Vec<&str> = lowered.split_whitespace().collect();
        let mut stripped: Vec<String> = Vec::with_capacity(words.len());
        let mut content: Vec<usize> = Vec::with_capacity(words.len());

        for raw in words {
            let word = strip_word(raw);
            if word.is_empty() {
                continue;
            }
            if !self.stopwords.is_stopword(raw) && !self.stopwords.is_stopword(&word) {
                content.push(stripped.len());
            }
            stripped.push(word);
        }

        if content.is_empty() {
            return stripped.join(" ");
        }

        content
            .into_iter()
            .map(|i| stripped[i].as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Normalize a batch of sentences
    pub fn normalize_all<S: AsRef<str>>(&self, sentences: &[S]) -> Vec<String> {
        sentences.iter().map(|s| self.normalize(s.as_ref())).collect()
    }
}

/// Drop punctuation, symbols and digits from a whitespace-delimited word
fn strip_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphabetic() || *c == '_')
        .collect()
}
