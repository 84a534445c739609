//! Dense (semantic) sentence similarity
//!
//! Sentences are encoded independently by a [`SentenceEncoder`] and compared
//! by cosine similarity. Encoders are expensive to load, so they are reached
//! through a [`SharedEncoder`] handle: a lazily initialized, exactly-once
//! cell that is created by the host and injected into every summarizer that
//! should share the model.

use super::SimilarityMatrix;
use crate::errors::{Result, SummarizerError};
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

/// Encodes sentences into fixed-size dense vectors
pub trait SentenceEncoder: Send + Sync {
    /// Model name, for logs and debug output
    fn name(&self) -> &str;

    /// Encode a batch of sentences, one vector per sentence
    fn encode(&self, sentences: &[&str]) -> Result<Vec<Vec<f32>>>;
}

type Loader = dyn Fn() -> Result<Arc<dyn SentenceEncoder>> + Send + Sync;

struct SharedEncoderInner {
    name: String,
    cell: OnceLock<Result<Arc<dyn SentenceEncoder>>>,
    loader: Box<Loader>,
}

/// Lazily loaded encoder shared across summarizers and threads.
///
/// Cloning the handle shares the same cell. The loader runs at most once per
/// handle even under concurrent first use; its outcome, success or failure,
/// is cached for the lifetime of the handle.
#[derive(Clone)]
pub struct SharedEncoder {
    inner: Arc<SharedEncoderInner>,
}

impl SharedEncoder {
    /// Create a handle that loads the encoder on first use
    pub fn lazy<F>(name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn SentenceEncoder>> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(SharedEncoderInner {
                name: name.into(),
                cell: OnceLock::new(),
                loader: Box::new(loader),
            }),
        }
    }

    /// Wrap an already constructed encoder
    pub fn ready(encoder: Arc<dyn SentenceEncoder>) -> Self {
        let name = encoder.name().to_string();
        let cell = OnceLock::new();
        let _ = cell.set(Ok(encoder));
        Self {
            inner: Arc::new(SharedEncoderInner {
                name,
                cell,
                loader: Box::new(|| -> Result<Arc<dyn SentenceEncoder>> {
                    Err(SummarizerError::model_load(
                        "ready",
                        "pre-loaded encoder cell was empty",
                    ))
                }),
            }),
        }
    }

    /// Get the encoder, loading it on first call
    pub fn get(&self) -> Result<Arc<dyn SentenceEncoder>> {
        self.inner
            .cell
            .get_or_init(|| {
                let started = Instant::now();
                tracing::info!(model = %self.inner.name, "loading sentence encoder");
                let loaded = (self.inner.loader)();
                match &loaded {
                    Ok(_) => tracing::info!(
                        model = %self.inner.name,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "sentence encoder loaded"
                    ),
                    Err(err) => tracing::error!(
                        model = %self.inner.name,
                        error = %err,
                        "sentence encoder failed to load"
                    ),
                }
                loaded
            })
            .clone()
    }

    /// Whether the loader has run (successfully or not)
    pub fn is_initialized(&self) -> bool {
        self.inner.cell.get().is_some()
    }

    /// Name the handle was created with
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Whether two handles share the same cell
    pub fn ptr_eq(&self, other: &SharedEncoder) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SharedEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedEncoder")
            .field("name", &self.inner.name)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// Cosine similarity of sentence embeddings
#[derive(Debug, Clone)]
pub struct DenseSimilarity {
    encoder: SharedEncoder,
    max_batch_size: usize,
}

impl DenseSimilarity {
    /// Create a dense similarity engine
    pub fn new(encoder: SharedEncoder, max_batch_size: usize) -> Self {
        Self {
            encoder,
            max_batch_size: max_batch_size.max(1),
        }
    }

    pub fn encoder(&self) -> &SharedEncoder {
        &self.encoder
    }

    /// Batch size for `n` sentences: all of them, up to the configured cap
    pub fn batch_size(&self, n: usize) -> usize {
        n.clamp(1, self.max_batch_size)
    }

    /// Encode all sentences, validating count and dimensionality
    pub fn embed<S: AsRef<str>>(&self, sentences: &[S]) -> Result<Vec<Vec<f32>>> {
        let encoder = self.encoder.get()?;
        let texts: Vec<&str> = sentences.iter().map(|s| s.as_ref()).collect();
        let batch_size = self.batch_size(texts.len());

        let mut embeddings = Vec::with_capacity(texts.len());
        for batch in texts.chunks(batch_size) {
            let vectors = encoder.encode(batch)?;
            if vectors.len() != batch.len() {
                return Err(SummarizerError::encoding(format!(
                    "encoder '{}' returned {} vectors for {} sentences",
                    encoder.name(),
                    vectors.len(),
                    batch.len()
                )));
            }
            embeddings.extend(vectors);
        }

        if let Some(first) = embeddings.first() {
            let dims = first.len();
            if dims == 0 || embeddings.iter().any(|v| v.len() != dims) {
                return Err(SummarizerError::encoding(format!(
                    "encoder '{}' returned inconsistent embedding dimensions",
                    encoder.name()
                )));
            }
        }

        tracing::debug!(
            model = encoder.name(),
            sentences = embeddings.len(),
            batch_size,
            "encoded sentences"
        );

        Ok(embeddings)
    }

    /// Pairwise cosine similarity of the sentences' embeddings
    pub fn similarity<S: AsRef<str>>(&self, sentences: &[S]) -> Result<SimilarityMatrix> {
        let embeddings = self.embed(sentences)?;
        let norms: Vec<f64> = embeddings.iter().map(|v| norm(v)).collect();

        Ok(SimilarityMatrix::from_pairwise(embeddings.len(), |i, j| {
            cosine(&embeddings[i], norms[i], &embeddings[j], norms[j])
        }))
    }
}

fn norm(v: &[f32]) -> f64 {
    v.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>().sqrt()
}

/// Cosine similarity in [0, 1]; zero vectors and negative cosines give 0
fn cosine(a: &[f32], norm_a: f64, b: &[f32], norm_b: f64) -> f64 {
    if norm_a <= f64::EPSILON || norm_b <= f64::EPSILON {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(&x, &y)| x as f64 * y as f64).sum();
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic stub: a bag-of-characters vector over a-z
    struct LetterEncoder;

    impl SentenceEncoder for LetterEncoder {
        fn name(&self) -> &str {
            "letters"
        }

        fn encode(&self, sentences: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(sentences
                .iter()
                .map(|s| {
                    let mut v = vec![0.0f32; 26];
                    for c in s.chars().filter(|c| c.is_ascii_lowercase()) {
                        v[(c as u8 - b'a') as usize] += 1.0;
                    }
                    v
                })
                .collect())
        }
    }

    struct ShortEncoder;

    impl SentenceEncoder for ShortEncoder {
        fn name(&self) -> &str {
            "short"
        }

        fn encode(&self, sentences: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(vec![vec![1.0]; sentences.len().saturating_sub(1)])
        }
    }

    #[test]
    fn test_lazy_loads_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);
        let handle = SharedEncoder::lazy("letters", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(LetterEncoder) as Arc<dyn SentenceEncoder>)
        });

        assert!(!handle.is_initialized());
        let clone = handle.clone();
        assert!(handle.get().is_ok());
        assert!(clone.get().is_ok());
        assert!(handle.is_initialized());
        assert!(handle.ptr_eq(&clone));
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_first_use_loads_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);
        let handle = SharedEncoder::lazy("letters", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(20));
            Ok(Arc::new(LetterEncoder) as Arc<dyn SentenceEncoder>)
        });

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let h = handle.clone();
                std::thread::spawn(move || h.get().is_ok())
            })
            .collect();

        for t in threads {
            assert!(t.join().unwrap());
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_load_failure_is_cached() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);
        let handle = SharedEncoder::lazy("broken", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(SummarizerError::model_load("broken", "no such file"))
        });

        assert!(handle.get().err().unwrap().is_model_load());
        assert!(handle.get().err().unwrap().is_model_load());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_ready_handle() {
        let handle = SharedEncoder::ready(Arc::new(LetterEncoder));
        assert!(handle.is_initialized());
        assert_eq!(handle.name(), "letters");
        assert_eq!(handle.get().unwrap().name(), "letters");
    }

    #[test]
    fn test_dense_similarity() {
        let dense = DenseSimilarity::new(SharedEncoder::ready(Arc::new(LetterEncoder)), 2);
        let m = dense.similarity(&["abc", "abc", "xyz"]).unwrap();

        assert_eq!(m.size(), 3);
        assert!((m.get(0, 1) - 1.0).abs() < 1e-9);
        assert_eq!(m.get(0, 2), 0.0);
        assert!(m.is_symmetric(1e-12));
    }

    #[test]
    fn test_zero_vectors_have_zero_similarity() {
        let dense = DenseSimilarity::new(SharedEncoder::ready(Arc::new(LetterEncoder)), 8);
        let m = dense.similarity(&["", "abc"]).unwrap();
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(0, 1), 0.0);
    }

    #[test]
    fn test_wrong_vector_count_is_an_error() {
        let dense = DenseSimilarity::new(SharedEncoder::ready(Arc::new(ShortEncoder)), 8);
        let err = dense.similarity(&["a", "b"]).unwrap_err();
        assert!(err.is_similarity_failure());
    }

    #[test]
    fn test_batch_size_scales_with_input() {
        let dense = DenseSimilarity::new(SharedEncoder::ready(Arc::new(LetterEncoder)), 32);
        assert_eq!(dense.batch_size(5), 5);
        assert_eq!(dense.batch_size(100), 32);
        assert_eq!(dense.batch_size(0), 1);
    }

    #[test]
    fn test_cosine_clamps_negative() {
        let a = [1.0f32, 0.0];
        let b = [-1.0f32, 0.0];
        assert_eq!(cosine(&a, norm(&a), &b, norm(&b)), 0.0);
    }
}
