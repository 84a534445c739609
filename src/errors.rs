//! Error types for rapid_summarizer
//!
//! Policy outcomes (empty input, everything filtered out) and real failures
//! (similarity computation, model loading) share one error type so stages can
//! propagate with `?`. The summarizer decides which of them become fallback
//! results at its boundary.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SummarizerError>;

/// Main error type for rapid_summarizer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummarizerError {
    /// No sentences were found in the input
    #[error("Empty input: {message}")]
    EmptyInput { message: String },

    /// Every sentence fell outside the token-length band
    #[error("All {count} sentences filtered out (allowed length {min}..={max} tokens)")]
    AllFilteredOut { count: usize, min: usize, max: usize },

    /// The lexical vectorizer produced no features
    #[error("Empty vocabulary: {message}")]
    EmptyVocabulary { message: String },

    /// Sentence encoding or similarity computation failed
    #[error("Encoding failed: {message}")]
    Encoding { message: String },

    /// The embedding model could not be initialized
    #[error("Failed to load model '{model}': {reason}")]
    ModelLoad { model: String, reason: String },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl SummarizerError {
    /// Create an empty input error
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput {
            message: message.into(),
        }
    }

    /// Create an all-filtered-out error
    pub fn all_filtered_out(count: usize, min: usize, max: usize) -> Self {
        Self::AllFilteredOut { count, min, max }
    }

    /// Create an empty vocabulary error
    pub fn empty_vocabulary(message: impl Into<String>) -> Self {
        Self::EmptyVocabulary {
            message: message.into(),
        }
    }

    /// Create an encoding error
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Create a model load error
    pub fn model_load(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            model: model.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Check if this error came out of the similarity step
    /// (vectorization or encoding, not model initialization)
    pub fn is_similarity_failure(&self) -> bool {
        matches!(self, Self::EmptyVocabulary { .. } | Self::Encoding { .. })
    }

    /// Check if this error is a model initialization failure
    pub fn is_model_load(&self) -> bool {
        matches!(self, Self::ModelLoad { .. })
    }
}

impl From<serde_json::Error> for SummarizerError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
