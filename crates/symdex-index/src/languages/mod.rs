//! Language registry for symbol extraction.
//!
//! Each language implements the `SymbolExtractor` trait and is registered here.

pub mod python;
pub mod rust;
pub mod typescript;

use crate::extractor::SymbolExtractor;

/// Returns all available language extractors.
pub fn all_extractors() -> Vec<Box<dyn SymbolExtractor>> {
    vec![
        Box::new(typescript::TypeScriptExtractor::new()),
        Box::new(python::PythonExtractor::new()),
        Box::new(rust::RustExtractor::new()),
    ]
}

/// Find an extractor for a given file extension.
pub fn extractor_for_extension(ext: &str) -> Option<Box<dyn SymbolExtractor>> {
    all_extractors()
        .into_iter()
        .find(|extractor| extractor.file_extensions().contains(&ext))
}
