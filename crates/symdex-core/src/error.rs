//! The error type shared by every symdex crate.

/// Unified error type for symdex.
#[derive(Debug, thiserror::Error)]
pub enum SymdexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Stale edit in {file_path} at line {line}: expected {expected:?}, found {found:?}")]
    StaleEdit {
        file_path: String,
        line: usize,
        expected: String,
        found: String,
    },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}
