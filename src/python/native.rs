//! Native Python interface

use crate::errors::SummarizerError;
use crate::nlp::stopwords::StopwordFilter;
use crate::similarity::SharedEncoder;
use crate::summarizer::{DebugInfo, SentenceScore, Summarizer, SummaryResult};
use crate::types::{Language, SimilarityStrategy, SummarizerConfig};
use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(err: SummarizerError) -> PyErr {
    match err {
        SummarizerError::ModelLoad { .. }
        | SummarizerError::Encoding { .. }
        | SummarizerError::EmptyVocabulary { .. } => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn parse_language(language: &str) -> PyResult<Language> {
    language.parse().map_err(to_py_err)
}

fn parse_strategy(strategy: &str) -> PyResult<SimilarityStrategy> {
    strategy.parse().map_err(to_py_err)
}

#[cfg(feature = "onnx")]
fn encoder_for(strategy: SimilarityStrategy) -> Option<SharedEncoder> {
    (strategy == SimilarityStrategy::Semantic).then(SharedEncoder::global_onnx)
}

#[cfg(not(feature = "onnx"))]
fn encoder_for(_strategy: SimilarityStrategy) -> Option<SharedEncoder> {
    None
}

/// Score of one sentence
#[pyclass(name = "SentenceScore")]
#[derive(Clone)]
pub struct PySentenceScore {
    #[pyo3(get)]
    pub position: usize,
    #[pyo3(get)]
    pub index: usize,
    #[pyo3(get)]
    pub text: String,
    #[pyo3(get)]
    pub score: f64,
    #[pyo3(get)]
    pub selected: bool,
}

#[pymethods]
impl PySentenceScore {
    fn __repr__(&self) -> String {
        format!(
            "SentenceScore(index={}, score={:.4}, selected={})",
            self.index, self.score, self.selected
        )
    }

    fn __str__(&self) -> String {
        self.text.clone()
    }
}

impl From<SentenceScore> for PySentenceScore {
    fn from(s: SentenceScore) -> Self {
        Self {
            position: s.position,
            index: s.index,
            text: s.text,
            score: s.score,
            selected: s.selected,
        }
    }
}

/// Diagnostics of a summarization run
#[pyclass(name = "DebugInfo")]
#[derive(Clone)]
pub struct PyDebugInfo {
    #[pyo3(get)]
    pub original_length: usize,
    #[pyo3(get)]
    pub filtered_length: usize,
    #[pyo3(get)]
    pub strategy: String,
    #[pyo3(get)]
    pub model_type: String,
    #[pyo3(get)]
    pub average_score: f64,
    #[pyo3(get)]
    pub outcome: String,
    #[pyo3(get)]
    pub error: Option<String>,
    #[pyo3(get)]
    pub iterations: usize,
    #[pyo3(get)]
    pub converged: bool,
}

#[pymethods]
impl PyDebugInfo {
    fn __repr__(&self) -> String {
        format!(
            "DebugInfo(original_length={}, filtered_length={}, strategy='{}', outcome='{}')",
            self.original_length, self.filtered_length, self.strategy, self.outcome
        )
    }
}

impl From<DebugInfo> for PyDebugInfo {
    fn from(d: DebugInfo) -> Self {
        Self {
            original_length: d.original_length,
            filtered_length: d.filtered_length,
            strategy: d.strategy.to_string(),
            model_type: d.model_type,
            average_score: d.average_score,
            outcome: d.outcome.to_string(),
            error: d.error,
            iterations: d.iterations,
            converged: d.converged,
        }
    }
}

/// Result of summarizing a document
#[pyclass(name = "SummaryResult")]
#[derive(Clone)]
pub struct PySummaryResult {
    #[pyo3(get)]
    pub summary: String,
    #[pyo3(get)]
    pub scores: Vec<PySentenceScore>,
    #[pyo3(get)]
    pub outcome: String,
    #[pyo3(get)]
    pub debug: Option<PyDebugInfo>,
}

#[pymethods]
impl PySummaryResult {
    fn __repr__(&self) -> String {
        format!(
            "SummaryResult(outcome='{}', sentences={}, debug={})",
            self.outcome,
            self.scores.iter().filter(|s| s.selected).count(),
            self.debug.is_some()
        )
    }

    fn __str__(&self) -> String {
        self.summary.clone()
    }

    fn __len__(&self) -> usize {
        self.scores.len()
    }

    fn __getitem__(&self, idx: usize) -> PyResult<PySentenceScore> {
        self.scores
            .get(idx)
            .cloned()
            .ok_or_else(|| PyIndexError::new_err("index out of range"))
    }

    /// Scores as a `{index: score}` dict
    fn score_map(&self) -> std::collections::HashMap<usize, f64> {
        self.scores.iter().map(|s| (s.index, s.score)).collect()
    }
}

impl From<SummaryResult> for PySummaryResult {
    fn from(r: SummaryResult) -> Self {
        Self {
            summary: r.summary,
            scores: r.scores.into_iter().map(PySentenceScore::from).collect(),
            outcome: r.outcome.to_string(),
            debug: r.debug.map(PyDebugInfo::from),
        }
    }
}

/// Extractive TextRank summarizer
#[pyclass(name = "Summarizer")]
pub struct PySummarizer {
    inner: Summarizer,
}

#[pymethods]
impl PySummarizer {
    #[new]
    #[pyo3(signature = (
        language="tr",
        strategy="lexical",
        num_sentences=3,
        min_tokens=3,
        max_tokens=50,
        debug=false,
        config_json=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        language: &str,
        strategy: &str,
        num_sentences: usize,
        min_tokens: usize,
        max_tokens: usize,
        debug: bool,
        config_json: Option<&str>,
    ) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => SummarizerConfig::from_json(json).map_err(to_py_err)?,
            None => SummarizerConfig::default()
                .with_language(parse_language(language)?)
                .with_strategy(parse_strategy(strategy)?)
                .with_num_sentences(num_sentences)
                .with_token_bounds(min_tokens, max_tokens)
                .with_debug(debug),
        };

        let encoder = encoder_for(config.strategy);
        let inner = Summarizer::new(config, encoder).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Summarize text; never raises for similarity or model failures
    #[pyo3(signature = (text))]
    fn summarize(&self, text: &str) -> PySummaryResult {
        self.inner.summarize(text).into()
    }

    /// Summarize text, raising instead of falling back to the original text
    #[pyo3(signature = (text))]
    fn try_summarize(&self, text: &str) -> PyResult<PySummaryResult> {
        self.inner
            .try_summarize(text)
            .map(PySummaryResult::from)
            .map_err(to_py_err)
    }

    /// Load the sentence encoder now (semantic strategy)
    fn warm_up(&self) -> PyResult<()> {
        self.inner.warm_up().map_err(to_py_err)
    }

    #[getter]
    fn strategy(&self) -> String {
        self.inner.strategy().to_string()
    }

    #[getter]
    fn language(&self) -> String {
        self.inner.config().language.code().to_string()
    }

    fn __repr__(&self) -> String {
        let config = self.inner.config();
        format!(
            "Summarizer(language='{}', strategy='{}', num_sentences={})",
            config.language.code(),
            config.strategy,
            config.num_sentences
        )
    }
}

/// Summarize text in one call
#[pyfunction]
#[pyo3(signature = (text, language="tr", strategy="lexical", num_sentences=3, debug=false))]
pub fn summarize_text(
    text: &str,
    language: &str,
    strategy: &str,
    num_sentences: usize,
    debug: bool,
) -> PyResult<PySummaryResult> {
    crate::summarizer::summarize_text(
        text,
        parse_language(language)?,
        parse_strategy(strategy)?,
        num_sentences,
        debug,
    )
    .map(PySummaryResult::from)
    .map_err(to_py_err)
}

/// Get the built-in stopword list for a language.
#[pyfunction]
#[pyo3(signature = (language = "tr"))]
pub fn get_stopwords(language: &str) -> PyResult<Vec<String>> {
    Ok(StopwordFilter::built_in_list(parse_language(language)?))
}
