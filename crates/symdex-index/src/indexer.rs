//! The symbol index service.
//!
//! `SymbolIndexer` owns the parser, the index state behind a single
//! `RwLock`, and the change detector used when walking directories. Hosts
//! construct one explicitly and share it via `Arc`.

use crate::incremental::ChangeDetector;
use crate::parser::CodeParser;
use crate::resolver;
use crate::search;
use crate::store::IndexState;
use ignore::WalkBuilder;
use serde::Serialize;
use std::path::Path;
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use symdex_core::{IndexConfig, IndexStats, Reference, SearchOptions, Symbol, SymdexConfig, SymdexError};

/// Result of indexing a directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryIndexResult {
    /// Files with a configured extension that were visited.
    pub files_scanned: usize,
    /// Files passed to `index_file`.
    pub files_indexed: usize,
    /// Files skipped because their content hash was unchanged.
    pub files_skipped: usize,
    /// Symbols extracted from the indexed files.
    pub total_symbols: usize,
}

/// In-memory symbol index with ranked search and reference lookup.
pub struct SymbolIndexer {
    parser: CodeParser,
    config: IndexConfig,
    default_max_results: usize,
    state: RwLock<IndexState>,
    change_detector: Mutex<ChangeDetector>,
}

impl SymbolIndexer {
    /// Create an indexer with the default configuration and built-in extractors.
    pub fn new() -> Self {
        Self::with_config(&SymdexConfig::default())
    }

    pub fn with_config(config: &SymdexConfig) -> Self {
        Self {
            parser: CodeParser::new(),
            config: config.index.clone(),
            default_max_results: config.search.max_results,
            state: RwLock::new(IndexState::new(config.index.max_recent_files)),
            change_detector: Mutex::new(ChangeDetector::new()),
        }
    }

    /// Replace the extractor set.
    pub fn with_parser(mut self, parser: CodeParser) -> Self {
        self.parser = parser;
        self
    }

    /// Bound the recency list. Resets the index.
    pub fn with_max_recent_files(mut self, max_recent_files: usize) -> Self {
        self.config.max_recent_files = max_recent_files;
        self.state = RwLock::new(IndexState::new(max_recent_files));
        self
    }

    fn read_state(&self) -> RwLockReadGuard<'_, IndexState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, IndexState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Extract symbols from `content` and replace everything known about
    /// `path`. Returns the freshly extracted symbols.
    ///
    /// Unsupported extensions index zero symbols, but the content is still
    /// cached and visible to reference search.
    pub fn index_file(&self, path: &str, content: &str) -> Vec<Symbol> {
        let symbols = self
            .parser
            .parse_file(path, content)
            .map(|result| result.symbols)
            .unwrap_or_default();

        self.write_state().insert_file(path, symbols.clone(), content);
        tracing::debug!("Indexed {} ({} symbols)", path, symbols.len());
        symbols
    }

    /// Forget `path`. Returns false if it was never indexed.
    pub fn remove_file(&self, path: &str) -> bool {
        let removed = self.write_state().remove_file(path);
        self.change_detector
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_hash(path);
        if removed {
            tracing::debug!("Removed {} from index", path);
        }
        removed
    }

    /// Symbols from the last indexing of `path`; empty if never indexed.
    pub fn get_file_symbols(&self, path: &str) -> Vec<Symbol> {
        self.read_state()
            .file(path)
            .map(|f| f.symbols.clone())
            .unwrap_or_default()
    }

    /// Ranked prefix search.
    pub fn search(&self, prefix: &str, options: &SearchOptions) -> Vec<Symbol> {
        let max_results = options.max_results.unwrap_or(self.default_max_results);
        search::search(
            &self.read_state(),
            prefix,
            max_results,
            options.exclude_current_file.as_deref(),
        )
    }

    /// Best-scoring symbol named exactly `name`.
    pub fn get_symbol_definition(&self, name: &str) -> Option<Symbol> {
        search::best_definition(&self.read_state(), name).cloned()
    }

    /// Definition first, then every whole-word occurrence in other files.
    pub fn find_references(&self, name: &str) -> Vec<Reference> {
        resolver::find_references(&self.read_state(), name)
    }

    /// Classes and interfaces declared as implementing or extending `name`.
    pub fn find_implementations(&self, name: &str) -> Vec<Symbol> {
        resolver::find_implementations(&self.read_state(), name)
    }

    /// Every indexed path, in first-indexed order.
    pub fn indexed_files(&self) -> Vec<String> {
        self.read_state()
            .files()
            .map(|f| f.file_path.clone())
            .collect()
    }

    /// Cached content of an indexed file.
    pub fn file_content(&self, path: &str) -> Option<String> {
        self.read_state().content(path).map(str::to_string)
    }

    /// Empty the index, the recency list and the known file hashes.
    pub fn clear(&self) {
        self.write_state().clear();
        self.change_detector
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        tracing::debug!("Index cleared");
    }

    pub fn get_stats(&self) -> IndexStats {
        let state = self.read_state();
        IndexStats {
            files_indexed: state.file_count(),
            total_symbols: state.symbol_count(),
            recent_files: state.recency().to_vec(),
        }
    }

    /// Walk `root` and index every file with a configured extension.
    ///
    /// Honours `.gitignore` and skips hidden entries when
    /// `respect_gitignore` is set. Files whose content hash is unchanged
    /// since the last walk are skipped.
    pub fn index_directory(&self, root: &Path) -> Result<DirectoryIndexResult, SymdexError> {
        if !root.exists() {
            return Err(SymdexError::NotFound(format!(
                "directory {}",
                root.display()
            )));
        }

        let mut result = DirectoryIndexResult::default();
        let respect = self.config.respect_gitignore;
        let walker = WalkBuilder::new(root)
            .hidden(respect)
            .git_ignore(respect)
            .git_global(respect)
            .git_exclude(respect)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!("Walk error: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !self.config.extensions.iter().any(|e| e == ext) {
                continue;
            }

            result.files_scanned += 1;

            let content = match std::fs::read_to_string(path) {
                Ok(c) => c,
                Err(err) => {
                    tracing::warn!("Failed to read {}: {}", path.display(), err);
                    continue;
                }
            };

            let path_str = path.to_string_lossy().to_string();
            let unchanged = !self
                .change_detector
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_changed(&path_str, content.as_bytes());
            if unchanged && self.read_state().file(&path_str).is_some() {
                result.files_skipped += 1;
                continue;
            }

            let symbols = self.index_file(&path_str, &content);
            result.total_symbols += symbols.len();
            result.files_indexed += 1;
            self.change_detector
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .update_hash(&path_str, content.as_bytes());
        }

        tracing::info!(
            "Indexed {}: {} scanned, {} indexed, {} skipped, {} symbols",
            root.display(),
            result.files_scanned,
            result.files_indexed,
            result.files_skipped,
            result.total_symbols,
        );

        Ok(result)
    }
}

impl Default for SymbolIndexer {
    fn default() -> Self {
        Self::new()
    }
}
