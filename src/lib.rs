//! # rapid_summarizer
//!
//! Extractive text summarization with TextRank, with Python bindings.
//!
//! A document is split into sentences, sentences outside a token-length band
//! are dropped, and the rest are compared pairwise, lexically (TF-IDF) or
//! semantically (sentence embeddings). PageRank over the resulting similarity
//! graph scores each sentence, and the top K are returned in document order.
//!
//! ```no_run
//! use rapid_summarizer::{Summarizer, SummarizerConfig, Language};
//!
//! let config = SummarizerConfig::default()
//!     .with_language(Language::English)
//!     .with_num_sentences(2);
//! let summarizer = Summarizer::lexical(config)?;
//! let result = summarizer.summarize("First sentence here. Second one there. Third one too.");
//! println!("{}", result.summary);
//! # Ok::<(), rapid_summarizer::SummarizerError>(())
//! ```
//!
//! ## Features
//!
//! - `onnx`: ONNX Runtime sentence encoder with Hugging Face Hub downloads
//! - `python`: PyO3 bindings

pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod similarity;
pub mod summarizer;
pub mod types;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use errors::{Result, SummarizerError};
pub use types::{
    DocFrequency, Language, RankConfig, Sentence, SimilarityStrategy, SummarizerConfig,
    TfidfConfig,
};

// Re-export main functionality
pub use graph::{builder::GraphBuilder, csr::CsrGraph};
pub use nlp::{
    filter::SentenceFilter, normalizer::TextNormalizer, segmenter::SentenceSegmenter,
    stopwords::StopwordFilter,
};
pub use pagerank::{standard::StandardPageRank, PageRankResult};
pub use similarity::{
    DenseSimilarity, SentenceEncoder, SharedEncoder, SimilarityEngine, SimilarityMatrix,
    TfidfVectorizer,
};
pub use summarizer::{
    summarize_text, DebugInfo, Outcome, SentenceScore, SentenceSelector, Summarizer,
    SummaryResult,
};

#[cfg(feature = "onnx")]
pub use similarity::onnx::{OnnxEncoder, OnnxEncoderConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Initialize the Python module
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register_module(m)?;
    Ok(())
}
