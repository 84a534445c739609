//! ONNX Runtime sentence encoder
//!
//! Runs a transformer sentence-embedding model exported to ONNX, with a
//! Hugging Face `tokenizer.json`. Token embeddings are mean-pooled under the
//! attention mask and L2-normalized. Model files come from a local directory
//! or are downloaded from the Hugging Face Hub.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use hf_hub::api::sync::Api;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

use super::dense::{SentenceEncoder, SharedEncoder};
use crate::errors::{Result, SummarizerError};

/// Default multilingual model (covers Turkish and English)
pub const DEFAULT_MODEL: &str = "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2";

/// Settings for loading an ONNX encoder
#[derive(Debug, Clone)]
pub struct OnnxEncoderConfig {
    /// Hub repository ID or local directory
    pub model: String,
    /// ONNX file path relative to the model root
    pub onnx_file: String,
    /// Maximum tokens per sentence
    pub max_length: usize,
    /// Whether the model takes a `token_type_ids` input (BERT family)
    pub use_token_type_ids: bool,
    /// Intra-op threads for ONNX Runtime
    pub intra_threads: usize,
}

impl Default for OnnxEncoderConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            onnx_file: "onnx/model.onnx".to_string(),
            max_length: 128,
            use_token_type_ids: true,
            intra_threads: 2,
        }
    }
}

/// Paths to the files an encoder needs
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub onnx_path: PathBuf,
    pub tokenizer_path: PathBuf,
}

impl ModelFiles {
    /// Resolve model files from a local directory or the Hub
    pub fn resolve(config: &OnnxEncoderConfig) -> Result<Self> {
        let local = Path::new(&config.model);
        if local.is_dir() {
            Self::from_dir(local, &config.onnx_file)
        } else {
            Self::download(&config.model, &config.onnx_file)
        }
    }

    fn from_dir(dir: &Path, onnx_file: &str) -> Result<Self> {
        let onnx_path = dir.join(onnx_file);
        let tokenizer_path = dir.join("tokenizer.json");
        for path in [&onnx_path, &tokenizer_path] {
            if !path.exists() {
                return Err(SummarizerError::model_load(
                    dir.display().to_string(),
                    format!("{} not found", path.display()),
                ));
            }
        }
        Ok(Self {
            onnx_path,
            tokenizer_path,
        })
    }

    fn download(repo_id: &str, onnx_file: &str) -> Result<Self> {
        tracing::info!(repo = repo_id, "downloading model from Hugging Face Hub");

        let api = Api::new().map_err(|e| SummarizerError::model_load(repo_id, e.to_string()))?;
        let repo = api.model(repo_id.to_string());

        let tokenizer_path = repo.get("tokenizer.json").map_err(|e| {
            SummarizerError::model_load(repo_id, format!("tokenizer.json: {}", e))
        })?;
        let onnx_path = repo
            .get(onnx_file)
            .map_err(|e| SummarizerError::model_load(repo_id, format!("{}: {}", onnx_file, e)))?;

        Ok(Self {
            onnx_path,
            tokenizer_path,
        })
    }
}

/// Sentence encoder backed by an ONNX Runtime session
pub struct OnnxEncoder {
    /// `Session::run` needs `&mut`, the encoder is shared behind `&self`
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    use_token_type_ids: bool,
    name: String,
}

impl OnnxEncoder {
    /// Load from a config, downloading files if needed
    pub fn load(config: &OnnxEncoderConfig) -> Result<Self> {
        let files = ModelFiles::resolve(config)?;
        Self::from_files(&config.model, &files, config)
    }

    /// Load from already resolved files
    pub fn from_files(name: &str, files: &ModelFiles, config: &OnnxEncoderConfig) -> Result<Self> {
        let load_err = |e: &dyn std::fmt::Display| SummarizerError::model_load(name, e.to_string());

        let session = Session::builder()
            .map_err(|e| load_err(&e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| load_err(&e))?
            .with_intra_threads(config.intra_threads)
            .map_err(|e| load_err(&e))?
            .commit_from_file(&files.onnx_path)
            .map_err(|e| load_err(&e))?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer_path).map_err(|e| load_err(&e))?;
        tokenizer.with_padding(Some(PaddingParams::default()));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_length,
                ..TruncationParams::default()
            }))
            .map_err(|e| load_err(&e))?;

        tracing::debug!(model = name, onnx = %files.onnx_path.display(), "ONNX session ready");

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            use_token_type_ids: config.use_token_type_ids,
            name: name.to_string(),
        })
    }

    fn infer(&self, sentences: &[&str]) -> Result<Vec<Vec<f32>>> {
        let encodings = self
            .tokenizer
            .encode_batch(sentences.to_vec(), true)
            .map_err(|e| SummarizerError::encoding(format!("tokenization failed: {}", e)))?;

        let batch = encodings.len();
        let seq_len = encodings.iter().map(|e| e.get_ids().len()).max().unwrap_or(0);
        if batch == 0 || seq_len == 0 {
            return Ok(vec![Vec::new(); batch]);
        }

        let mut input_ids = Vec::with_capacity(batch * seq_len);
        let mut attention_mask = Vec::with_capacity(batch * seq_len);
        let mut token_type_ids = Vec::with_capacity(batch * seq_len);
        for encoding in &encodings {
            input_ids.extend(encoding.get_ids().iter().map(|&x| x as i64));
            attention_mask.extend(encoding.get_attention_mask().iter().map(|&x| x as i64));
            token_type_ids.extend(encoding.get_type_ids().iter().map(|&x| x as i64));
        }

        let shape = vec![batch as i64, seq_len as i64];
        let tensor_err = |e: ort::Error| SummarizerError::encoding(format!("tensor creation: {}", e));
        let ids_tensor = Tensor::from_array((shape.clone(), input_ids)).map_err(tensor_err)?;
        let mask_tensor =
            Tensor::from_array((shape.clone(), attention_mask.clone())).map_err(tensor_err)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| SummarizerError::encoding(format!("session lock poisoned: {}", e)))?;

        let outputs = if self.use_token_type_ids {
            let types_tensor = Tensor::from_array((shape, token_type_ids)).map_err(tensor_err)?;
            session.run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
                "token_type_ids" => types_tensor
            ])
        } else {
            session.run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor
            ])
        }
        .map_err(|e| SummarizerError::encoding(format!("inference failed: {}", e)))?;

        let (_name, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| SummarizerError::encoding("model produced no outputs"))?;
        let (out_shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| SummarizerError::encoding(format!("tensor extraction failed: {}", e)))?;

        embeddings_from_output(&out_shape[..], data, &attention_mask, batch, seq_len)
    }
}

impl SentenceEncoder for OnnxEncoder {
    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, sentences: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.infer(sentences)
    }
}

/// Turn a model output into one normalized embedding per sentence
fn embeddings_from_output(
    shape: &[i64],
    data: &[f32],
    mask: &[i64],
    batch: usize,
    seq: usize,
) -> Result<Vec<Vec<f32>>> {
    let dims = match shape.last() {
        Some(&d) if d > 0 && (shape.len() == 2 || shape.len() == 3) => d as usize,
        _ => {
            return Err(SummarizerError::encoding(format!(
                "unexpected output shape {:?}",
                shape
            )))
        }
    };

    let expected = if shape.len() == 3 { batch * seq * dims } else { batch * dims };
    if data.len() < expected {
        return Err(SummarizerError::encoding(format!(
            "output has {} values, expected {}",
            data.len(),
            expected
        )));
    }

    if shape.len() == 3 {
        // [batch, seq, dims]: token embeddings, pool them
        Ok(mean_pool(data, mask, batch, seq, dims))
    } else {
        // [batch, dims]: already pooled
        Ok(data[..expected].chunks(dims).map(l2_normalize).collect())
    }
}

/// Mean of token embeddings where the attention mask is set
fn mean_pool(data: &[f32], mask: &[i64], batch: usize, seq: usize, dims: usize) -> Vec<Vec<f32>> {
    (0..batch)
        .map(|b| {
            let mut pooled = vec![0.0f32; dims];
            let mut count = 0.0f32;
            for s in 0..seq {
                if mask[b * seq + s] == 0 {
                    continue;
                }
                count += 1.0;
                let offset = (b * seq + s) * dims;
                for (d, value) in pooled.iter_mut().enumerate() {
                    *value += data[offset + d];
                }
            }
            if count > 0.0 {
                for value in &mut pooled {
                    *value /= count;
                }
            }
            l2_normalize(&pooled)
        })
        .collect()
}

fn l2_normalize(v: &[f32]) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        v.iter().map(|x| x / norm).collect()
    } else {
        v.to_vec()
    }
}

impl SharedEncoder {
    /// Lazy handle that loads an ONNX encoder on first use
    pub fn onnx(config: OnnxEncoderConfig) -> Self {
        let name = config.model.clone();
        SharedEncoder::lazy(name, move || {
            OnnxEncoder::load(&config).map(|e| Arc::new(e) as Arc<dyn SentenceEncoder>)
        })
    }

    /// The process-wide handle for the default model
    pub fn global_onnx() -> SharedEncoder {
        static GLOBAL: OnceLock<SharedEncoder> = OnceLock::new();
        GLOBAL
            .get_or_init(|| SharedEncoder::onnx(OnnxEncoderConfig::default()))
            .clone()
    }
}
