//! Sentence similarity
//!
//! Two interchangeable strategies share one contract, sentences in and a
//! square similarity matrix out:
//!
//! - [`SimilarityEngine::Lexical`]: TF-IDF term vectors and sparse cosine
//! - [`SimilarityEngine::Semantic`]: dense embeddings from a [`SentenceEncoder`]
//!
//! The strategy is picked from configuration; nothing downstream needs to
//! know which one produced the matrix.

pub mod dense;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod tfidf;
pub mod unit_vector;

pub use dense::{DenseSimilarity, SentenceEncoder, SharedEncoder};
pub use tfidf::{TfidfMatrix, TfidfVectorizer};

use crate::errors::{Result, SummarizerError};
use crate::types::{SimilarityStrategy, SummarizerConfig};

/// Square, symmetric, non-negative similarity matrix.
///
/// Indexed by position in the filtered sentence sequence, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Create an all-zero matrix
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// Build from a pairwise function evaluated on the upper triangle
    /// (diagonal included) and mirrored. Negative values are clamped to 0.
    pub fn from_pairwise(size: usize, mut similarity: impl FnMut(usize, usize) -> f64) -> Self {
        let mut matrix = Self::zeros(size);
        for i in 0..size {
            for j in i..size {
                matrix.set(i, j, similarity(i, j));
            }
        }
        matrix
    }

    /// Build from explicit rows, validating shape, symmetry and sign
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if let Some(bad) = rows.iter().position(|r| r.len() != size) {
            return Err(SummarizerError::encoding(format!(
                "similarity matrix row {} has {} columns, expected {}",
                bad,
                rows[bad].len(),
                size
            )));
        }

        let values: Vec<f64> = rows.into_iter().flatten().collect();
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(SummarizerError::encoding(
                "similarity values must be finite and non-negative",
            ));
        }

        let matrix = Self { size, values };
        if !matrix.is_symmetric(1e-9) {
            return Err(SummarizerError::encoding("similarity matrix is not symmetric"));
        }
        Ok(matrix)
    }

    /// Set `(i, j)` and `(j, i)`
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        self.values[i * self.size + j] = value;
        self.values[j * self.size + i] = value;
    }

    /// Similarity between positions `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    /// One row of the matrix
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Check symmetry within a tolerance
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.size).all(|i| {
            ((i + 1)..self.size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tolerance)
        })
    }
}

/// Similarity engine, one variant per strategy
#[derive(Debug, Clone)]
pub enum SimilarityEngine {
    Lexical(TfidfVectorizer),
    Semantic(DenseSimilarity),
}

impl SimilarityEngine {
    /// Lexical engine configured from a summarizer config
    pub fn lexical(config: &SummarizerConfig) -> Self {
        SimilarityEngine::Lexical(TfidfVectorizer::from_config(config))
    }

    /// Semantic engine backed by a shared encoder handle
    pub fn semantic(encoder: SharedEncoder, max_batch_size: usize) -> Self {
        SimilarityEngine::Semantic(DenseSimilarity::new(encoder, max_batch_size))
    }

    /// Build the engine a config asks for.
    ///
    /// The semantic strategy needs an encoder; asking for it without one is a
    /// configuration error, never a silent switch to the lexical strategy.
    pub fn from_config(config: &SummarizerConfig, encoder: Option<SharedEncoder>) -> Result<Self> {
        match config.strategy {
            SimilarityStrategy::Lexical => Ok(Self::lexical(config)),
            SimilarityStrategy::Semantic => encoder
                .map(|e| Self::semantic(e, config.max_batch_size))
                .ok_or_else(|| {
                    SummarizerError::invalid_config(
                        "semantic strategy requires a sentence encoder",
                    )
                }),
        }
    }

    /// The strategy this engine implements
    pub fn strategy(&self) -> SimilarityStrategy {
        match self {
            SimilarityEngine::Lexical(_) => SimilarityStrategy::Lexical,
            SimilarityEngine::Semantic(_) => SimilarityStrategy::Semantic,
        }
    }

    /// Compute the pairwise similarity matrix for normalized sentences
    pub fn compute<S: AsRef<str>>(&self, sentences: &[S]) -> Result<SimilarityMatrix> {
        match self {
            SimilarityEngine::Lexical(vectorizer) => {
                Ok(vectorizer.fit_transform(sentences)?.cosine_similarity())
            }
            SimilarityEngine::Semantic(dense) => dense.similarity(sentences),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairwise_is_symmetric() {
        let m = SimilarityMatrix::from_pairwise(3, |i, j| (i + j) as f64);
        assert!(m.is_symmetric(0.0));
        assert_eq!(m.get(0, 2), 2.0);
        assert_eq!(m.get(2, 0), 2.0);
        assert_eq!(m.row(1), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_negative_values_clamped() {
        let m = SimilarityMatrix::from_pairwise(2, |i, j| if i == j { 1.0 } else { -0.4 });
        assert_eq!(m.get(0, 1), 0.0);
    }

    #[test]
    fn test_from_rows_validation() {
        assert!(SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).is_ok());
        assert!(SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.2, 1.0]]).is_err());
        assert!(SimilarityMatrix::from_rows(vec![vec![1.0], vec![0.2, 1.0]]).is_err());
        assert!(SimilarityMatrix::from_rows(vec![vec![1.0, -0.5], vec![-0.5, 1.0]]).is_err());
    }

    #[test]
    fn test_engine_from_config() {
        let config = SummarizerConfig::default();
        let engine = SimilarityEngine::from_config(&config, None).unwrap();
        assert_eq!(engine.strategy(), SimilarityStrategy::Lexical);

        let semantic = config.with_strategy(SimilarityStrategy::Semantic);
        let err = SimilarityEngine::from_config(&semantic, None).unwrap_err();
        assert!(matches!(err, SummarizerError::InvalidConfig { .. }));
    }

    #[test]
    fn test_lexical_engine_compute() {
        let engine = SimilarityEngine::lexical(&SummarizerConfig::default());
        let m = engine
            .compute(&["kedi süt içti", "kedi uyudu", "araba hızlı gitti"])
            .unwrap();

        assert_eq!(m.size(), 3);
        assert!(m.get(0, 1) > 0.0);
        assert_eq!(m.get(0, 2), 0.0);
        assert!(m.is_symmetric(1e-12));
    }
}
