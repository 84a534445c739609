//! Stopword filtering
//!
//! Turkish uses a curated list kept in this module; every other language
//! loads its list from the `stop-words` crate.

use crate::types::Language;
use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// A filter for removing stopwords from normalized text
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords, lowercased with the language's casing rules
    stopwords: FxHashSet<String>,
    language: Language,
}

impl StopwordFilter {
    /// Create a stopword filter for the given language
    pub fn new(language: Language) -> Self {
        let stopwords = Self::load_stopwords(language);
        Self {
            stopwords,
            language,
        }
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty(language: Language) -> Self {
        Self {
            stopwords: FxHashSet::default(),
            language,
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(language: Language, words: &[&str]) -> Self {
        let stopwords = words.iter().map(|w| language.to_lowercase(w)).collect();
        Self {
            stopwords,
            language,
        }
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(self.language.to_lowercase(word));
        }
    }

    /// Check if a word is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word) || self.stopwords.contains(&self.language.to_lowercase(word))
    }

    /// The language this filter was built for
    pub fn language(&self) -> Language {
        self.language
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    /// Sorted built-in stopword list for a language
    pub fn built_in_list(language: Language) -> Vec<String> {
        let mut words: Vec<String> = Self::load_stopwords(language).into_iter().collect();
        words.sort();
        words
    }

    fn load_stopwords(language: Language) -> FxHashSet<String> {
        let lang = match language {
            Language::Turkish => return Self::turkish_stopwords(),
            Language::English => LANGUAGE::English,
            Language::German => LANGUAGE::German,
            Language::French => LANGUAGE::French,
            Language::Spanish => LANGUAGE::Spanish,
            Language::Italian => LANGUAGE::Italian,
            Language::Portuguese => LANGUAGE::Portuguese,
            Language::Dutch => LANGUAGE::Dutch,
        };

        get(lang)
            .iter()
            .map(|s| language.to_lowercase(s))
            .collect()
    }

    /// Curated Turkish stopwords
    fn turkish_stopwords() -> FxHashSet<String> {
        [
            "acaba", "ama", "ancak", "artık", "aslında", "az", "bana", "bazen", "bazı",
            "belki", "ben", "beni", "benim", "bile", "bir", "biraz", "birçok", "biri",
            "birkaç", "birşey", "biz", "bize", "bizi", "bizim", "bu", "buna", "bunda",
            "bundan", "bunlar", "bunları", "bunların", "bunu", "bunun", "burada", "çok",
            "çünkü", "da", "daha", "dahi", "de", "defa", "değil", "diğer", "diye", "dolayı",
            "en", "gibi", "göre", "hem", "hep", "hepsi", "her", "hiç", "için", "ile", "ise",
            "işte", "kadar", "ki", "kim", "kimi", "kimse", "mi", "mı", "mu", "mü", "nasıl",
            "ne", "neden", "nerde", "nerede", "nereye", "niçin", "niye", "o", "olan",
            "olarak", "oldu", "olduğu", "olduğunu", "olmak", "olması", "olup", "olur",
            "ona", "ondan", "onlar", "onları", "onların", "onu", "onun", "orada", "öyle",
            "sadece", "sanki", "şey", "siz", "size", "sizi", "sizin", "şöyle", "şu", "şuna",
            "şunlar", "şunu", "tüm", "ve", "veya", "ya", "yani", "yine", "zaten",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}
