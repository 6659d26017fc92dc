//! Extraction coordinator.
//!
//! Detects language from file extension, selects the appropriate extractor,
//! and runs symbol extraction.

use crate::extractor::SymbolExtractor;
use crate::languages;
use std::path::Path;
use symdex_core::Symbol;

/// Result of extracting a single file.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Path to the extracted file.
    pub file_path: String,
    /// Language that was detected and used.
    pub language: String,
    /// All symbols extracted from the file.
    pub symbols: Vec<Symbol>,
}

/// Coordinates symbol extraction across multiple languages.
pub struct CodeParser {
    extractors: Vec<Box<dyn SymbolExtractor>>,
}

impl CodeParser {
    /// Create a new CodeParser with all built-in language extractors.
    pub fn new() -> Self {
        Self {
            extractors: languages::all_extractors(),
        }
    }

    /// Register an extractor ahead of the built-in ones. It takes over every
    /// extension it claims.
    pub fn with_extractor(mut self, extractor: Box<dyn SymbolExtractor>) -> Self {
        self.extractors.insert(0, extractor);
        self
    }

    /// Extract symbols from a single file.
    ///
    /// Returns `None` if the file extension is not supported.
    pub fn parse_file(&self, path: &str, content: &str) -> Option<ParseResult> {
        let extension = Path::new(path).extension().and_then(|ext| ext.to_str())?;
        let extractor = self.find_extractor(extension)?;

        Some(ParseResult {
            file_path: path.to_string(),
            language: extractor.language_name().to_string(),
            symbols: extractor.extract_symbols(content, path),
        })
    }

    /// Returns the list of all supported file extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.extractors
            .iter()
            .flat_map(|e| e.file_extensions().iter().copied())
            .collect()
    }

    /// Check if a given file extension is supported.
    pub fn supports_extension(&self, ext: &str) -> bool {
        self.extractors
            .iter()
            .any(|e| e.file_extensions().contains(&ext))
    }

    /// Find the extractor for a given file extension.
    fn find_extractor(&self, ext: &str) -> Option<&dyn SymbolExtractor> {
        self.extractors
            .iter()
            .find(|e| e.file_extensions().contains(&ext))
            .map(|e| e.as_ref())
    }
}

impl Default for CodeParser {
    fn default() -> Self {
        Self::new()
    }
}
