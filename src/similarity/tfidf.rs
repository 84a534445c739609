//! TF-IDF vectorization
//!
//! Fits a vocabulary of word n-grams over the sentence set, prunes it by
//! document frequency, and weights raw term counts by smoothed inverse
//! document frequency:
//!
//! ```text
//! idf(t) = ln((1 + n) / (1 + df(t))) + 1
//! ```
//!
//! Rows are L2-normalized, so cosine similarity is a sparse dot product.

use super::unit_vector::UnitVector;
use super::SimilarityMatrix;
use crate::errors::{Result, SummarizerError};
use crate::types::{SummarizerConfig, TfidfConfig};
use rustc_hash::FxHashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// A TF-IDF vectorizer (unfitted; every call to `fit_transform` refits)
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    config: TfidfConfig,
    strip_accents: bool,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(TfidfConfig::default(), false)
    }
}

impl TfidfVectorizer {
    /// Create a vectorizer
    pub fn new(config: TfidfConfig, strip_accents: bool) -> Self {
        Self {
            config,
            strip_accents,
        }
    }

    /// Create a vectorizer from a summarizer config, resolving the
    /// language's accent-stripping default
    pub fn from_config(config: &SummarizerConfig) -> Self {
        Self::new(config.tfidf.clone(), config.strip_accents())
    }

    pub fn config(&self) -> &TfidfConfig {
        &self.config
    }

    /// Split a document into its n-gram terms
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let prepared = if self.strip_accents {
            strip_accents(document)
        } else {
            document.to_string()
        };
        let words: Vec<&str> = prepared.unicode_words().collect();

        let (lo, hi) = self.config.ngram_range;
        let mut terms = Vec::new();
        for n in lo..=hi {
            if n > words.len() {
                break;
            }
            terms.extend(words.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    /// Fit the vocabulary and transform the documents into unit vectors.
    ///
    /// Fails with `EmptyVocabulary` when no term survives, e.g. when every
    /// sentence normalized to the empty string.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<TfidfMatrix> {
        let n_docs = documents.len();
        let analyzed: Vec<Vec<String>> = documents
            .iter()
            .map(|d| self.analyze(d.as_ref()))
            .collect();

        let mut doc_freq: FxHashMap<&str, usize> = FxHashMap::default();
        for terms in &analyzed {
            let mut seen: Vec<&str> = terms.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let min_df = self.config.min_df.resolve_min(n_docs);
        let max_df = self.config.max_df.resolve_max(n_docs);

        let mut vocabulary: Vec<String> = doc_freq
            .iter()
            .filter(|&(_, &df)| df >= min_df && df <= max_df)
            .map(|(term, _)| term.to_string())
            .collect();

        if vocabulary.is_empty() {
            return Err(SummarizerError::empty_vocabulary(format!(
                "no terms left from {} documents ({} candidates, df band {}..={})",
                n_docs,
                doc_freq.len(),
                min_df,
                max_df
            )));
        }
        vocabulary.sort_unstable();

        let index: FxHashMap<&str, u32> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i as u32))
            .collect();

        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = doc_freq[term.as_str()] as f64;
                ((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = analyzed
            .iter()
            .map(|terms| {
                let mut counts: FxHashMap<u32, f64> = FxHashMap::default();
                for term in terms {
                    if let Some(&id) = index.get(term.as_str()) {
                        *counts.entry(id).or_insert(0.0) += 1.0;
                    }
                }
                for (id, value) in counts.iter_mut() {
                    *value *= idf[*id as usize];
                }
                UnitVector::from_dimensions(counts)
            })
            .collect();

        tracing::debug!(
            documents = n_docs,
            features = vocabulary.len(),
            "fitted tf-idf vocabulary"
        );

        Ok(TfidfMatrix {
            vocabulary,
            idf,
            rows,
        })
    }
}

/// A fitted TF-IDF document-term matrix
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    rows: Vec<UnitVector>,
}

impl TfidfMatrix {
    /// Sorted vocabulary; a term's position is its feature ID
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Inverse document frequency per feature
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// One unit vector per document
    pub fn rows(&self) -> &[UnitVector] {
        &self.rows
    }

    pub fn num_features(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn num_documents(&self) -> usize {
        self.rows.len()
    }

    /// Feature ID of a term
    pub fn feature_id(&self, term: &str) -> Option<u32> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
            .map(|i| i as u32)
    }

    /// Pairwise cosine similarity between documents
    pub fn cosine_similarity(&self) -> SimilarityMatrix {
        SimilarityMatrix::from_pairwise(self.rows.len(), |i, j| {
            self.rows[i].cosine_similarity(&self.rows[j]).min(1.0)
        })
    }
}

/// Decompose and drop combining marks ("café" -> "cafe")
fn strip_accents(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocFrequency;

    fn unigrams() -> TfidfConfig {
        TfidfConfig {
            ngram_range: (1, 1),
            ..TfidfConfig::default()
        }
    }

    #[test]
    fn test_analyze_ngrams() {
        let vectorizer = TfidfVectorizer::default();
        let terms = vectorizer.analyze("machine learning models");

        assert_eq!(
            terms,
            vec![
                "machine",
                "learning",
                "models",
                "machine learning",
                "learning models"
            ]
        );
    }

    #[test]
    fn test_analyze_short_document() {
        let vectorizer = TfidfVectorizer::default();
        assert_eq!(vectorizer.analyze("tek"), vec!["tek"]);
        assert!(vectorizer.analyze("").is_empty());
    }

    #[test]
    fn test_strip_accents() {
        let vectorizer = TfidfVectorizer::new(unigrams(), true);
        assert_eq!(vectorizer.analyze("café naïve"), vec!["cafe", "naive"]);

        let keep = TfidfVectorizer::new(unigrams(), false);
        assert_eq!(keep.analyze("güzel şehir"), vec!["güzel", "şehir"]);
    }

    #[test]
    fn test_vocabulary_sorted_and_idf() {
        let vectorizer = TfidfVectorizer::new(unigrams(), false);
        let matrix = vectorizer.fit_transform(&["b a", "a c"]).unwrap();

        assert_eq!(matrix.vocabulary(), &["a", "b", "c"]);
        // "a" appears in both documents: ln(3/3) + 1 = 1
        assert!((matrix.idf()[0] - 1.0).abs() < 1e-12);
        // "b" appears once: ln(3/2) + 1
        assert!((matrix.idf()[1] - (1.5f64.ln() + 1.0)).abs() < 1e-12);
        assert_eq!(matrix.feature_id("c"), Some(2));
        assert_eq!(matrix.feature_id("z"), None);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let vectorizer = TfidfVectorizer::default();
        let matrix = vectorizer
            .fit_transform(&["kedi süt içti", "köpek kemik yedi", "kedi uyudu"])
            .unwrap();

        for row in matrix.rows() {
            let norm: f64 = row.dimensions.values().map(|v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cosine_similarity_matrix() {
        let vectorizer = TfidfVectorizer::default();
        let matrix = vectorizer
            .fit_transform(&["kedi süt içti", "kedi süt içti", "araba yolda"])
            .unwrap();
        let sim = matrix.cosine_similarity();

        assert!((sim.get(0, 0) - 1.0).abs() < 1e-9);
        assert!((sim.get(0, 1) - 1.0).abs() < 1e-9);
        assert_eq!(sim.get(0, 2), 0.0);
        assert!(sim.is_symmetric(1e-12));
    }

    #[test]
    fn test_empty_vocabulary() {
        let vectorizer = TfidfVectorizer::default();
        let err = vectorizer.fit_transform(&["", "", ""]).unwrap_err();
        assert!(matches!(err, SummarizerError::EmptyVocabulary { .. }));
    }

    #[test]
    fn test_document_frequency_pruning() {
        let config = TfidfConfig {
            min_df: DocFrequency::Count(2),
            ngram_range: (1, 1),
            ..TfidfConfig::default()
        };
        let vectorizer = TfidfVectorizer::new(config, false);
        let matrix = vectorizer.fit_transform(&["a b", "a c", "a d"]).unwrap();

        assert_eq!(matrix.vocabulary(), &["a"]);

        let strict = TfidfConfig {
            max_df: DocFrequency::Proportion(0.5),
            ngram_range: (1, 1),
            ..TfidfConfig::default()
        };
        let matrix = TfidfVectorizer::new(strict, false)
            .fit_transform(&["a b", "a c", "a d"])
            .unwrap();
        assert_eq!(matrix.vocabulary(), &["b", "c", "d"]);
    }

    #[test]
    fn test_pruning_everything_is_an_error() {
        let config = TfidfConfig {
            min_df: DocFrequency::Count(5),
            ..TfidfConfig::default()
        };
        let vectorizer = TfidfVectorizer::new(config, false);
        assert!(vectorizer.fit_transform(&["a b", "a c"]).is_err());
    }
}
