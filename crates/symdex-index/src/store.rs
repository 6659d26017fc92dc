//! In-memory index state: per-file symbols, the inverted name index, the
//! content cache and the recency list.
//!
//! All four are kept in one struct so a single lock guards them together.
//! Maps are insertion-ordered so iteration ("discovery order") is stable.

use crate::recency::RecencyTracker;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use symdex_core::Symbol;

/// Symbols extracted from one file on its last indexing.
#[derive(Debug, Clone, Serialize)]
pub struct FileIndex {
    pub file_path: String,
    pub symbols: Vec<Symbol>,
    pub indexed_at: DateTime<Utc>,
}

/// Everything the indexer knows, guarded as one unit.
#[derive(Debug, Default)]
pub struct IndexState {
    /// path -> symbols of that file.
    files: IndexMap<String, FileIndex>,
    /// name -> symbols with that name, across files.
    names: IndexMap<String, Vec<Symbol>>,
    /// path -> last content passed to `insert_file`.
    contents: IndexMap<String, String>,
    recency: RecencyTracker,
}

impl IndexState {
    pub fn new(max_recent_files: usize) -> Self {
        Self {
            recency: RecencyTracker::new(max_recent_files),
            ..Self::default()
        }
    }

    /// Replace everything known about `path`.
    ///
    /// Entries from the previous indexing of `path` are purged from every
    /// name bucket first, so the name index always mirrors the file index.
    pub fn insert_file(&mut self, path: &str, symbols: Vec<Symbol>, content: &str) {
        self.purge_names(path);

        for symbol in &symbols {
            self.names
                .entry(symbol.name.clone())
                .or_default()
                .push(symbol.clone());
        }

        self.files.insert(
            path.to_string(),
            FileIndex {
                file_path: path.to_string(),
                symbols,
                indexed_at: Utc::now(),
            },
        );
        self.contents.insert(path.to_string(), content.to_string());
        self.recency.touch(path);
    }

    /// Forget `path` entirely. Returns false if it was never indexed.
    pub fn remove_file(&mut self, path: &str) -> bool {
        self.purge_names(path);
        self.contents.shift_remove(path);
        self.recency.forget(path);
        self.files.shift_remove(path).is_some()
    }

    fn purge_names(&mut self, path: &str) {
        let Some(previous) = self.files.get(path) else {
            return;
        };

        let mut stale: Vec<&str> = previous.symbols.iter().map(|s| s.name.as_str()).collect();
        stale.sort_unstable();
        stale.dedup();

        for name in stale {
            let emptied = match self.names.get_mut(name) {
                Some(bucket) => {
                    bucket.retain(|s| s.file_path != path);
                    bucket.is_empty()
                }
                None => false,
            };
            if emptied {
                self.names.shift_remove(name);
            }
        }
    }

    pub fn file(&self, path: &str) -> Option<&FileIndex> {
        self.files.get(path)
    }

    pub fn files(&self) -> impl Iterator<Item = &FileIndex> {
        self.files.values()
    }

    /// Symbols registered under `name`, in discovery order.
    pub fn symbols_named(&self, name: &str) -> &[Symbol] {
        self.names.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every `(name, symbols)` bucket, in discovery order.
    pub fn names(&self) -> impl Iterator<Item = (&str, &[Symbol])> {
        self.names.iter().map(|(n, s)| (n.as_str(), s.as_slice()))
    }

    pub fn content(&self, path: &str) -> Option<&str> {
        self.contents.get(path).map(String::as_str)
    }

    /// Every cached `(path, content)` pair, in first-indexed order.
    pub fn contents(&self) -> impl Iterator<Item = (&str, &str)> {
        self.contents.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn recency(&self) -> &RecencyTracker {
        &self.recency
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.files.values().map(|f| f.symbols.len()).sum()
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.names.clear();
        self.contents.clear();
        self.recency.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symdex_core::SymbolKind;

    fn sym(name: &str, file: &str, line: usize) -> Symbol {
        Symbol {
            name: name.to_string(),
            kind: SymbolKind::Function,
            file_path: file.to_string(),
            line,
            column: Some(1),
            parent: None,
            documentation: None,
            detail: None,
        }
    }

    #[test]
    fn insert_populates_all_maps() {
        let mut state = IndexState::new(10);
        state.insert_file("/a.ts", vec![sym("a", "/a.ts", 1)], "function a() {}");

        assert_eq!(state.file_count(), 1);
        assert_eq!(state.symbols_named("a").len(), 1);
        assert_eq!(state.content("/a.ts"), Some("function a() {}"));
        assert_eq!(state.recency().to_vec(), vec!["/a.ts"]);
    }

    #[test]
    fn reinsert_purges_stale_name_entries() {
        let mut state = IndexState::new(10);
        state.insert_file("/a.ts", vec![sym("old", "/a.ts", 1), sym("keep", "/a.ts", 2)], "");
        state.insert_file("/b.ts", vec![sym("keep", "/b.ts", 1)], "");
        state.insert_file("/a.ts", vec![sym("keep", "/a.ts", 5)], "");

        assert!(state.symbols_named("old").is_empty());
        assert!(state.names().all(|(n, _)| n != "old"));
        let keep = state.symbols_named("keep");
        assert_eq!(keep.len(), 2);
        assert_eq!(keep[0].file_path, "/b.ts");
        assert_eq!(keep[1].line, 5);
        assert_eq!(state.symbol_count(), 2);
    }

    #[test]
    fn remove_file_forgets_everything() {
        let mut state = IndexState::new(10);
        state.insert_file("/a.ts", vec![sym("a", "/a.ts", 1)], "x");
        assert!(state.remove_file("/a.ts"));
        assert!(!state.remove_file("/a.ts"));
        assert!(state.symbols_named("a").is_empty());
        assert!(state.content("/a.ts").is_none());
        assert!(state.recency().is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut state = IndexState::new(10);
        state.insert_file("/a.ts", vec![sym("a", "/a.ts", 1)], "x");
        state.clear();
        state.clear();
        assert_eq!(state.file_count(), 0);
        assert_eq!(state.names().count(), 0);
        assert_eq!(state.contents().count(), 0);
        assert!(state.recency().is_empty());
    }
}
