//! Most-recently-indexed file list, used only as a ranking signal.
//!
//! Falling off the list never evicts anything from the index itself.

use std::collections::VecDeque;

/// Default bound on the recency list.
pub const DEFAULT_MAX_RECENT_FILES: usize = 1000;

/// Bounded move-to-front list of file paths, most recent first.
#[derive(Debug, Clone)]
pub struct RecencyTracker {
    files: VecDeque<String>,
    max_files: usize,
}

impl RecencyTracker {
    pub fn new(max_files: usize) -> Self {
        Self {
            files: VecDeque::new(),
            max_files,
        }
    }

    /// Move `path` to the front, dropping the oldest entries beyond the bound.
    pub fn touch(&mut self, path: &str) {
        if let Some(pos) = self.position(path) {
            self.files.remove(pos);
        }
        self.files.push_front(path.to_string());
        self.files.truncate(self.max_files);
    }

    /// Drop `path` from the list if present.
    pub fn forget(&mut self, path: &str) {
        if let Some(pos) = self.position(path) {
            self.files.remove(pos);
        }
    }

    /// 0-based position of `path`, where 0 is the most recent.
    pub fn position(&self, path: &str) -> Option<usize> {
        self.files.iter().position(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.files.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

impl Default for RecencyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECENT_FILES)
    }
}
