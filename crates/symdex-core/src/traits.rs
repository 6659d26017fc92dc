use crate::SymdexError;

// ── File I/O Collaborator ───────────────────────────────────────────────────

/// File access used by the refactoring engine.
///
/// The index itself never touches the file system; only previews that need
/// current file text and executed refactors go through this trait. Calls are
/// made sequentially, one file at a time.
pub trait FileSystem: Send + Sync {
    /// Read the full text of a file. Fails if the file is missing or unreadable.
    fn read_file_content(&self, path: &str) -> Result<String, SymdexError>;

    /// Replace the full text of a file.
    fn write_file_content(&self, path: &str, content: &str) -> Result<(), SymdexError>;
}

impl<T: FileSystem + ?Sized> FileSystem for std::sync::Arc<T> {
    fn read_file_content(&self, path: &str) -> Result<String, SymdexError> {
        (**self).read_file_content(path)
    }

    fn write_file_content(&self, path: &str, content: &str) -> Result<(), SymdexError> {
        (**self).write_file_content(path, content)
    }
}
