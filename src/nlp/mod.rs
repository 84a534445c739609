//! Natural Language Processing components
//!
//! Sentence segmentation, length filtering, stopwords and normalization.

pub mod filter;
pub mod normalizer;
pub mod segmenter;
pub mod stopwords;
