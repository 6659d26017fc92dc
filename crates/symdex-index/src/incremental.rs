//! SHA-256 change detection for directory indexing.
//!
//! Remembers the content hash each file had when it was last indexed so a
//! repeated directory walk can skip files that did not change.

use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Tracks file content hashes between indexing runs.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    /// file_path -> SHA-256 hex digest at last indexing.
    known_hashes: HashMap<String, String>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if the file is unknown or its content hash differs.
    pub fn is_changed(&self, path: &str, content: &[u8]) -> bool {
        let hash = Self::hash_content(content);
        self.known_hashes.get(path) != Some(&hash)
    }

    /// Record the hash of content that was just indexed.
    pub fn update_hash(&mut self, path: &str, content: &[u8]) {
        let hash = Self::hash_content(content);
        self.known_hashes.insert(path.to_string(), hash);
    }

    pub fn remove_hash(&mut self, path: &str) {
        self.known_hashes.remove(path);
    }

    pub fn tracked_count(&self) -> usize {
        self.known_hashes.len()
    }

    pub fn clear(&mut self) {
        self.known_hashes.clear();
    }

    fn hash_content(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_file_is_changed() {
        let detector = ChangeDetector::new();
        assert!(detector.is_changed("a.ts", b"const a = 1;"));
    }

    #[test]
    fn same_content_is_unchanged_until_edited() {
        let mut detector = ChangeDetector::new();
        detector.update_hash("a.ts", b"const a = 1;");
        assert!(!detector.is_changed("a.ts", b"const a = 1;"));
        assert!(detector.is_changed("a.ts", b"const a = 2;"));
    }

    #[test]
    fn remove_and_clear_forget_hashes() {
        let mut detector = ChangeDetector::new();
        detector.update_hash("a.ts", b"a");
        detector.update_hash("b.ts", b"b");
        assert_eq!(detector.tracked_count(), 2);

        detector.remove_hash("a.ts");
        assert!(detector.is_changed("a.ts", b"a"));
        assert_eq!(detector.tracked_count(), 1);

        detector.clear();
        assert_eq!(detector.tracked_count(), 0);
    }
}
