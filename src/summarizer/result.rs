//! Summarization results

use crate::errors::Result;
use crate::types::SimilarityStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a summary was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Sentences were ranked and the top K selected
    Ranked,
    /// The document had no more sentences than requested; text returned as is
    ShortCircuit,
    /// No sentences in the input; empty summary
    EmptyInput,
    /// Every sentence fell outside the token band; text returned as is
    AllFilteredOut,
    /// Similarity or model loading failed; text returned as is
    Fallback,
}

impl Outcome {
    /// Whether the summary is the input text returned unchanged
    pub fn is_verbatim(&self) -> bool {
        matches!(
            self,
            Outcome::ShortCircuit | Outcome::AllFilteredOut | Outcome::Fallback
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::Ranked => "ranked",
            Outcome::ShortCircuit => "short_circuit",
            Outcome::EmptyInput => "empty_input",
            Outcome::AllFilteredOut => "all_filtered_out",
            Outcome::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// Score of one filtered sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceScore {
    /// Position in the filtered sentence sequence (graph node ID)
    pub position: usize,
    /// Index in the segmented document
    pub index: usize,
    /// Sentence text
    pub text: String,
    /// PageRank score
    pub score: f64,
    /// Whether the sentence is part of the summary
    pub selected: bool,
}

/// Diagnostics attached when debug output is enabled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    /// Sentences after segmentation
    pub original_length: usize,
    /// Sentences after length filtering
    pub filtered_length: usize,
    pub strategy: SimilarityStrategy,
    /// Model family behind the similarity matrix ("TF-IDF" or "Sentence Embeddings")
    pub model_type: String,
    /// Mean score over filtered sentences (0.0 when nothing was ranked)
    pub average_score: f64,
    pub outcome: Outcome,
    /// Error behind a fallback
    pub error: Option<String>,
    /// PageRank iterations (0 when nothing was ranked)
    pub iterations: usize,
    /// Whether PageRank converged (false when nothing was ranked)
    pub converged: bool,
}

/// The result of summarizing one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// The summary text
    pub summary: String,
    /// Selected sentences, or every scored sentence in debug mode
    pub scores: Vec<SentenceScore>,
    pub outcome: Outcome,
    /// Present only in debug mode
    pub debug: Option<DebugInfo>,
}

impl SummaryResult {
    /// Whether the summary came from ranking rather than a policy shortcut
    pub fn is_ranked(&self) -> bool {
        self.outcome == Outcome::Ranked
    }

    /// Selected sentences in document order
    pub fn selected(&self) -> impl Iterator<Item = &SentenceScore> {
        self.scores.iter().filter(|s| s.selected)
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
