//! Python bindings via PyO3
//!
//! This module provides the Python interface for rapid_summarizer.

pub mod native;

use pyo3::prelude::*;

/// Register all Python classes and functions
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    m.add_class::<native::PySentenceScore>()?;
    m.add_class::<native::PyDebugInfo>()?;
    m.add_class::<native::PySummaryResult>()?;
    m.add_class::<native::PySummarizer>()?;
    m.add_function(wrap_pyfunction!(native::summarize_text, m)?)?;
    m.add_function(wrap_pyfunction!(native::get_stopwords, m)?)?;

    Ok(())
}
