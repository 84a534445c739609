//! Core types for rapid_summarizer
//!
//! Sentences, languages, similarity strategies and the configuration that
//! drives a summarization run.

use crate::errors::{Result, SummarizerError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Sentence
// ============================================================================

/// A sentence of the input document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// The sentence text, trimmed
    pub text: String,
    /// Position in the segmented document; the sole ordering key for output
    pub index: usize,
    /// Start byte offset in the original text
    pub start: usize,
    /// End byte offset in the original text
    pub end: usize,
    /// Number of word tokens
    pub token_count: usize,
}

impl Sentence {
    /// Create a new sentence
    pub fn new(text: impl Into<String>, index: usize, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            index,
            start,
            end,
            token_count: 0,
        }
    }

    /// Builder method: set the token count
    pub fn with_token_count(mut self, token_count: usize) -> Self {
        self.token_count = token_count;
        self
    }
}

// ============================================================================
// Language
// ============================================================================

/// Document language; selects stopwords, abbreviations and casing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Turkish,
    English,
    German,
    French,
    Spanish,
    Italian,
    Portuguese,
    Dutch,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Turkish => "tr",
            Language::English => "en",
            Language::German => "de",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Dutch => "nl",
        }
    }

    /// Full lowercase name, as used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            Language::Turkish => "turkish",
            Language::English => "english",
            Language::German => "german",
            Language::French => "french",
            Language::Spanish => "spanish",
            Language::Italian => "italian",
            Language::Portuguese => "portuguese",
            Language::Dutch => "dutch",
        }
    }

    /// Whether TF-IDF strips accents for this language by default.
    ///
    /// Turkish diacritics distinguish words (ş/s, ı/i, ğ/g), so they stay.
    pub fn strips_accents_by_default(&self) -> bool {
        !matches!(self, Language::Turkish)
    }

    /// Lowercase a string with the language's casing rules
    pub fn to_lowercase(&self, text: &str) -> String {
        match self {
            Language::Turkish => {
                let mut out = String::with_capacity(text.len());
                for c in text.chars() {
                    match c {
                        'I' => out.push('ı'),
                        'İ' => out.push('i'),
                        _ => out.extend(c.to_lowercase()),
                    }
                }
                out
            }
            _ => text.to_lowercase(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Language {
    type Err = SummarizerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "tr" | "turkish" | "türkçe" => Ok(Language::Turkish),
            "en" | "english" => Ok(Language::English),
            "de" | "german" => Ok(Language::German),
            "fr" | "french" => Ok(Language::French),
            "es" | "spanish" => Ok(Language::Spanish),
            "it" | "italian" => Ok(Language::Italian),
            "pt" | "portuguese" => Ok(Language::Portuguese),
            "nl" | "dutch" => Ok(Language::Dutch),
            other => Err(SummarizerError::invalid_config(format!(
                "unsupported language '{}'",
                other
            ))),
        }
    }
}

// ============================================================================
// Similarity strategy
// ============================================================================

/// How sentence similarity is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityStrategy {
    /// Sparse TF-IDF term vectors
    #[default]
    Lexical,
    /// Dense sentence embeddings from a pretrained model
    Semantic,
}

impl SimilarityStrategy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "lexical" | "tfidf" | "tf-idf" | "sparse" => Some(SimilarityStrategy::Lexical),
            "semantic" | "dense" | "embedding" | "embeddings" | "transformer" => {
                Some(SimilarityStrategy::Semantic)
            }
            _ => None,
        }
    }

    /// Human-readable model family name
    pub fn model_type(&self) -> &'static str {
        match self {
            SimilarityStrategy::Lexical => "TF-IDF",
            SimilarityStrategy::Semantic => "Sentence Embeddings",
        }
    }
}

impl fmt::Display for SimilarityStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityStrategy::Lexical => f.write_str("lexical"),
            SimilarityStrategy::Semantic => f.write_str("semantic"),
        }
    }
}

impl std::str::FromStr for SimilarityStrategy {
    type Err = SummarizerError;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value).ok_or_else(|| {
            SummarizerError::invalid_config(format!("unknown similarity strategy '{}'", value))
        })
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Document-frequency bound for vocabulary pruning.
///
/// Integers are absolute document counts, floats are proportions of the
/// sentence set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocFrequency {
    Count(usize),
    Proportion(f64),
}

impl DocFrequency {
    /// Smallest document count allowed when used as a lower bound
    pub fn resolve_min(&self, n_docs: usize) -> usize {
        match *self {
            DocFrequency::Count(count) => count,
            DocFrequency::Proportion(p) => (p * n_docs as f64).ceil() as usize,
        }
    }

    /// Largest document count allowed when used as an upper bound
    pub fn resolve_max(&self, n_docs: usize) -> usize {
        match *self {
            DocFrequency::Count(count) => count,
            DocFrequency::Proportion(p) => (p * n_docs as f64).floor() as usize,
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if let DocFrequency::Proportion(p) = *self {
            if !(0.0..=1.0).contains(&p) {
                return Err(SummarizerError::invalid_config(format!(
                    "{} proportion must be between 0 and 1, got {}",
                    name, p
                )));
            }
        }
        Ok(())
    }
}

/// TF-IDF vectorizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfidfConfig {
    /// Ignore terms appearing in fewer documents than this
    pub min_df: DocFrequency,
    /// Ignore terms appearing in more documents than this
    pub max_df: DocFrequency,
    /// Inclusive n-gram range
    pub ngram_range: (usize, usize),
    /// Strip accents before building terms (None = language default)
    pub strip_accents: Option<bool>,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            min_df: DocFrequency::Count(1),
            max_df: DocFrequency::Proportion(1.0),
            ngram_range: (1, 2),
            strip_accents: None,
        }
    }
}

impl TfidfConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.min_df.validate("min_df")?;
        self.max_df.validate("max_df")?;

        let (lo, hi) = self.ngram_range;
        if lo == 0 || hi < lo {
            return Err(SummarizerError::invalid_config(format!(
                "ngram_range must satisfy 1 <= min <= max, got ({}, {})",
                lo, hi
            )));
        }

        Ok(())
    }
}

/// PageRank settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum power iterations
    pub max_iterations: usize,
    /// L1 convergence threshold
    pub convergence_threshold: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-6,
        }
    }
}

/// Configuration for a summarizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Document language
    pub language: Language,
    /// Similarity strategy
    pub strategy: SimilarityStrategy,
    /// Number of sentences in the summary (K)
    pub num_sentences: usize,
    /// Minimum sentence length in tokens (inclusive)
    pub min_tokens: usize,
    /// Maximum sentence length in tokens (inclusive)
    pub max_tokens: usize,
    /// Include every sentence score and the debug payload in results
    pub debug: bool,
    /// Upper bound on sentences sent to the encoder per batch
    pub max_batch_size: usize,
    /// TF-IDF settings (lexical strategy)
    pub tfidf: TfidfConfig,
    /// PageRank settings
    pub rank: RankConfig,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            language: Language::Turkish,
            strategy: SimilarityStrategy::Lexical,
            num_sentences: 3,
            min_tokens: 3,
            max_tokens: 50,
            debug: false,
            max_batch_size: 32,
            tfidf: TfidfConfig::default(),
            rank: RankConfig::default(),
        }
    }
}

impl SummarizerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.num_sentences == 0 {
            return Err(SummarizerError::invalid_config("num_sentences must be > 0"));
        }

        if self.max_tokens < self.min_tokens {
            return Err(SummarizerError::invalid_config(format!(
                "max_tokens ({}) must be >= min_tokens ({})",
                self.max_tokens, self.min_tokens
            )));
        }

        if self.max_batch_size == 0 {
            return Err(SummarizerError::invalid_config("max_batch_size must be > 0"));
        }

        if !(0.0..=1.0).contains(&self.rank.damping) {
            return Err(SummarizerError::invalid_config(format!(
                "damping must be between 0 and 1, got {}",
                self.rank.damping
            )));
        }

        if self.rank.max_iterations == 0 {
            return Err(SummarizerError::invalid_config("max_iterations must be > 0"));
        }

        if self.rank.convergence_threshold <= 0.0 {
            return Err(SummarizerError::invalid_config(
                "convergence_threshold must be > 0",
            ));
        }

        self.tfidf.validate()
    }

    /// Whether TF-IDF strips accents, resolving the language default
    pub fn strip_accents(&self) -> bool {
        self.tfidf
            .strip_accents
            .unwrap_or_else(|| self.language.strips_accents_by_default())
    }

    /// Builder method: set language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Builder method: set similarity strategy
    pub fn with_strategy(mut self, strategy: SimilarityStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder method: set number of summary sentences
    pub fn with_num_sentences(mut self, num_sentences: usize) -> Self {
        self.num_sentences = num_sentences;
        self
    }

    /// Builder method: set the token-length band
    pub fn with_token_bounds(mut self, min_tokens: usize, max_tokens: usize) -> Self {
        self.min_tokens = min_tokens;
        self.max_tokens = max_tokens;
        self
    }

    /// Builder method: enable debug output
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builder method: set damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.rank.damping = damping;
        self
    }

    /// Builder method: set TF-IDF settings
    pub fn with_tfidf(mut self, tfidf: TfidfConfig) -> Self {
        self.tfidf = tfidf;
        self
    }
}
