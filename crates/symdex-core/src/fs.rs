//! `FileSystem` implementations: the local disk and an in-memory map.

use crate::{FileSystem, SymdexError};
use std::collections::HashMap;
use std::sync::RwLock;

/// Reads and writes files on the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn read_file_content(&self, path: &str) -> Result<String, SymdexError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write_file_content(&self, path: &str, content: &str) -> Result<(), SymdexError> {
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// In-memory file map, for unsaved editor buffers and tests.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<HashMap<String, String>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(path, content)` pairs.
    pub fn with_files<I, P, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        let map = files
            .into_iter()
            .map(|(p, c)| (p.into(), c.into()))
            .collect();
        Self {
            files: RwLock::new(map),
        }
    }

    pub fn insert(&self, path: impl Into<String>, content: impl Into<String>) {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        files.insert(path.into(), content.into());
    }

    pub fn get(&self, path: &str) -> Option<String> {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files.get(path).cloned()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_file_content(&self, path: &str) -> Result<String, SymdexError> {
        self.get(path)
            .ok_or_else(|| SymdexError::NotFound(format!("file {path}")))
    }

    fn write_file_content(&self, path: &str, content: &str) -> Result<(), SymdexError> {
        self.insert(path, content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_fs_read_missing_is_not_found() {
        let fs = MemoryFileSystem::new();
        let err = fs.read_file_content("/missing.ts").unwrap_err();
        assert!(matches!(err, SymdexError::NotFound(_)));
    }

    #[test]
    fn memory_fs_write_then_read() {
        let fs = MemoryFileSystem::with_files([("/a.ts", "const a = 1;")]);
        assert_eq!(fs.read_file_content("/a.ts").unwrap(), "const a = 1;");
        fs.write_file_content("/a.ts", "const b = 2;").unwrap();
        assert_eq!(fs.get("/a.ts").as_deref(), Some("const b = 2;"));
    }

    #[test]
    fn local_fs_roundtrip() {
        let dir = std::env::temp_dir().join("symdex_local_fs_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("a.py");
        let path_str = path.to_string_lossy().to_string();

        let fs = LocalFileSystem;
        fs.write_file_content(&path_str, "MAX = 3\n").unwrap();
        assert_eq!(fs.read_file_content(&path_str).unwrap(), "MAX = 3\n");

        let missing = dir.join("nope.py").to_string_lossy().to_string();
        assert!(matches!(
            fs.read_file_content(&missing),
            Err(SymdexError::Io(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
