//! Sentence graph construction and representation
//!
//! The ranker works on a weighted undirected graph whose nodes are
//! filtered sentence positions.

pub mod builder;
pub mod csr;

pub use builder::GraphBuilder;
pub use csr::CsrGraph;
