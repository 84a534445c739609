//! Summarization pipeline
//!
//! ```text
//! segment -> [empty?] -> [count <= K?] -> filter -> [none left?]
//!         -> normalize -> similarity -> graph -> PageRank -> select
//! ```
//!
//! The bracketed checks are policy decisions that return early with an
//! [`Outcome`] other than `Ranked`. Failures in the similarity stage (and
//! encoder loading) become a `Fallback` in [`Summarizer::summarize`] and are
//! returned as errors by [`Summarizer::try_summarize`].

use super::result::{DebugInfo, Outcome, SentenceScore, SummaryResult};
use super::selector::SentenceSelector;
use crate::errors::{Result, SummarizerError};
use crate::graph::{CsrGraph, GraphBuilder};
use crate::nlp::filter::{FilteredSentences, SentenceFilter};
use crate::nlp::normalizer::TextNormalizer;
use crate::nlp::segmenter::SentenceSegmenter;
use crate::pagerank::{PageRankResult, StandardPageRank};
use crate::similarity::{SharedEncoder, SimilarityEngine};
use crate::types::{Language, SimilarityStrategy, SummarizerConfig};
use std::time::Instant;

/// Extractive TextRank summarizer.
///
/// Stateless across calls: one instance can summarize any number of
/// documents, from any number of threads.
#[derive(Debug, Clone)]
pub struct Summarizer {
    config: SummarizerConfig,
    segmenter: SentenceSegmenter,
    filter: SentenceFilter,
    normalizer: TextNormalizer,
    engine: SimilarityEngine,
    ranker: StandardPageRank,
    selector: SentenceSelector,
}

/// Where a document stands after segmentation and filtering
enum Stage {
    /// A policy outcome settled the result
    Finished(SummaryResult),
    /// Sentences survived and need ranking
    Rank {
        filtered: FilteredSentences,
        counts: Counts,
    },
}

/// Sentence counts carried into the result builders
#[derive(Debug, Clone, Copy)]
struct Counts {
    original: usize,
    filtered: usize,
}

impl Summarizer {
    /// Create a summarizer.
    ///
    /// The semantic strategy needs `encoder`; the lexical strategy ignores it.
    pub fn new(config: SummarizerConfig, encoder: Option<SharedEncoder>) -> Result<Self> {
        config.validate()?;
        let engine = SimilarityEngine::from_config(&config, encoder)?;

        Ok(Self {
            segmenter: SentenceSegmenter::new(config.language),
            filter: SentenceFilter::new(config.min_tokens, config.max_tokens),
            normalizer: TextNormalizer::new(config.language),
            ranker: StandardPageRank::from_config(&config.rank),
            selector: SentenceSelector::new(config.num_sentences),
            engine,
            config,
        })
    }

    /// Create a summarizer using the lexical strategy
    pub fn lexical(config: SummarizerConfig) -> Result<Self> {
        Self::new(config.with_strategy(SimilarityStrategy::Lexical), None)
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn strategy(&self) -> SimilarityStrategy {
        self.engine.strategy()
    }

    /// Load the sentence encoder now instead of on first use.
    ///
    /// A no-op for the lexical strategy. A load failure is terminal for the
    /// encoder handle; there is no switch to the lexical strategy.
    pub fn warm_up(&self) -> Result<()> {
        if let SimilarityEngine::Semantic(dense) = &self.engine {
            dense.encoder().get()?;
        }
        Ok(())
    }

    /// Summarize a document. Never fails: similarity and model-loading
    /// errors produce a `Fallback` result holding the original text.
    pub fn summarize(&self, text: &str) -> SummaryResult {
        let started = Instant::now();
        let (filtered, counts) = match self.prepare(text) {
            Stage::Finished(result) => return result,
            Stage::Rank { filtered, counts } => (filtered, counts),
        };

        match self.rank(&filtered) {
            Ok(ranking) => self.ranked_result(&filtered, &ranking, counts, started),
            Err(err) => {
                tracing::warn!(
                    strategy = %self.strategy(),
                    error = %err,
                    "similarity computation failed, returning original text"
                );
                self.unranked(text.to_string(), counts, Outcome::Fallback, Some(err))
            }
        }
    }

    /// Summarize a document, returning similarity and model-loading errors
    /// to the caller instead of falling back
    pub fn try_summarize(&self, text: &str) -> Result<SummaryResult> {
        let started = Instant::now();
        match self.prepare(text) {
            Stage::Finished(result) => Ok(result),
            Stage::Rank { filtered, counts } => {
                let ranking = self.rank(&filtered)?;
                Ok(self.ranked_result(&filtered, &ranking, counts, started))
            }
        }
    }

    /// Segment and filter, settling the policy outcomes that need no ranking
    fn prepare(&self, text: &str) -> Stage {
        let sentences = self.segmenter.segment(text);
        tracing::debug!(sentences = sentences.len(), "segmented document");

        let mut counts = Counts {
            original: sentences.len(),
            filtered: 0,
        };

        if sentences.is_empty() {
            let reason = SummarizerError::empty_input("no sentences found");
            return Stage::Finished(self.unranked(
                String::new(),
                counts,
                Outcome::EmptyInput,
                Some(reason),
            ));
        }

        if sentences.len() <= self.config.num_sentences {
            tracing::debug!(
                sentences = sentences.len(),
                requested = self.config.num_sentences,
                "document already short enough, returning text as is"
            );
            return Stage::Finished(self.unranked(
                text.to_string(),
                counts,
                Outcome::ShortCircuit,
                None,
            ));
        }

        let filtered = self.filter.filter(&sentences);
        counts.filtered = filtered.len();
        tracing::debug!(
            kept = filtered.len(),
            dropped = sentences.len() - filtered.len(),
            min_tokens = self.filter.min_tokens(),
            max_tokens = self.filter.max_tokens(),
            "filtered sentences by length"
        );

        if filtered.is_empty() {
            let reason = SummarizerError::all_filtered_out(
                sentences.len(),
                self.filter.min_tokens(),
                self.filter.max_tokens(),
            );
            return Stage::Finished(self.unranked(
                text.to_string(),
                counts,
                Outcome::AllFilteredOut,
                Some(reason),
            ));
        }

        Stage::Rank { filtered, counts }
    }

    /// Normalize, compare, and rank the filtered sentences
    fn rank(&self, filtered: &FilteredSentences) -> Result<PageRankResult> {
        let normalized = self.normalizer.normalize_all(&filtered.texts());

        let matrix = self.engine.compute(&normalized)?;
        tracing::debug!(
            size = matrix.size(),
            strategy = %self.engine.strategy(),
            "computed similarity matrix"
        );

        let graph = CsrGraph::from_builder(&GraphBuilder::from_similarity(&matrix));
        let ranking = self.ranker.run(&graph);
        if !ranking.converged {
            tracing::debug!(
                iterations = ranking.iterations,
                delta = ranking.delta,
                "pagerank stopped before converging"
            );
        }
        Ok(ranking)
    }

    fn ranked_result(
        &self,
        filtered: &FilteredSentences,
        ranking: &PageRankResult,
        counts: Counts,
        started: Instant,
    ) -> SummaryResult {
        let sentences = filtered.sentences();
        let positions = self.selector.select(&ranking.scores);
        let summary = self.selector.assemble(sentences, &positions);

        let mut selected = vec![false; sentences.len()];
        for &p in &positions {
            selected[p] = true;
        }

        let scores = sentences
            .iter()
            .enumerate()
            .filter(|(position, _)| self.config.debug || selected[*position])
            .map(|(position, sentence)| SentenceScore {
                position,
                index: sentence.index,
                text: sentence.text.clone(),
                score: ranking.score(position as u32),
                selected: selected[position],
            })
            .collect();

        let debug = self.config.debug.then(|| DebugInfo {
            original_length: counts.original,
            filtered_length: counts.filtered,
            strategy: self.strategy(),
            model_type: self.strategy().model_type().to_string(),
            average_score: ranking.average(),
            outcome: Outcome::Ranked,
            error: None,
            iterations: ranking.iterations,
            converged: ranking.converged,
        });

        tracing::debug!(
            selected = positions.len(),
            iterations = ranking.iterations,
            converged = ranking.converged,
            elapsed_us = started.elapsed().as_micros() as u64,
            "summarized document"
        );

        SummaryResult {
            summary,
            scores,
            outcome: Outcome::Ranked,
            debug,
        }
    }

    fn unranked(
        &self,
        summary: String,
        counts: Counts,
        outcome: Outcome,
        reason: Option<SummarizerError>,
    ) -> SummaryResult {
        let debug = self.config.debug.then(|| DebugInfo {
            original_length: counts.original,
            filtered_length: counts.filtered,
            strategy: self.strategy(),
            model_type: self.strategy().model_type().to_string(),
            average_score: 0.0,
            outcome,
            error: reason.map(|e| e.to_string()),
            iterations: 0,
            converged: false,
        });

        SummaryResult {
            summary,
            scores: Vec::new(),
            outcome,
            debug,
        }
    }
}

/// Summarize `text` with default settings for everything but the arguments.
///
/// The semantic strategy uses the process-wide default encoder, which needs
/// the `onnx` feature; without it, asking for the semantic strategy is a
/// configuration error.
pub fn summarize_text(
    text: &str,
    language: Language,
    strategy: SimilarityStrategy,
    num_sentences: usize,
    debug: bool,
) -> Result<SummaryResult> {
    let config = SummarizerConfig::default()
        .with_language(language)
        .with_strategy(strategy)
        .with_num_sentences(num_sentences)
        .with_debug(debug);

    let summarizer = Summarizer::new(config, default_encoder(strategy))?;
    Ok(summarizer.summarize(text))
}

#[cfg(feature = "onnx")]
fn default_encoder(strategy: SimilarityStrategy) -> Option<SharedEncoder> {
    (strategy == SimilarityStrategy::Semantic).then(SharedEncoder::global_onnx)
}

#[cfg(not(feature = "onnx"))]
fn default_encoder(_strategy: SimilarityStrategy) -> Option<SharedEncoder> {
    None
}
