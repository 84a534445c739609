//! Extractive summarization
//!
//! Ranks filtered sentences with PageRank over their similarity graph and
//! returns the top K in document order.

pub mod pipeline;
pub mod result;
pub mod selector;

pub use pipeline::{summarize_text, Summarizer};
pub use result::{DebugInfo, Outcome, SentenceScore, SummaryResult};
pub use selector::SentenceSelector;
