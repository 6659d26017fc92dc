use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::SymdexError;

// ── Symbols ─────────────────────────────────────────────────────────────────

/// The kind of a named declaration found during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Class,
    Interface,
    Variable,
    Constant,
    Type,
    Method,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::Variable => write!(f, "variable"),
            Self::Constant => write!(f, "constant"),
            Self::Type => write!(f, "type"),
            Self::Method => write!(f, "method"),
        }
    }
}

/// A named declaration located during extraction.
///
/// Symbols are immutable once produced; re-indexing a file supersedes all of
/// its previous symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub file_path: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column of the name within the line.
    pub column: Option<usize>,
    /// Enclosing class, impl block or trait, if any.
    pub parent: Option<String>,
    /// Doc comment lines directly above the declaration.
    pub documentation: Option<String>,
    /// Declaration text, or the module an import came from.
    pub detail: Option<String>,
}

/// A textual occurrence of a symbol name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub file_path: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column of the match.
    pub column: usize,
    /// Source line text the match was found on.
    pub context: String,
    pub symbol_name: String,
    pub is_definition: bool,
}

// ── Search ──────────────────────────────────────────────────────────────────

/// Options for prefix search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Maximum number of results; falls back to the configured default.
    pub max_results: Option<usize>,
    /// Drop every symbol defined in this file.
    pub exclude_current_file: Option<String>,
}

impl SearchOptions {
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn excluding(mut self, file_path: impl Into<String>) -> Self {
        self.exclude_current_file = Some(file_path.into());
        self
    }
}

/// Snapshot of index statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    pub files_indexed: usize,
    pub total_symbols: usize,
    /// Most recently indexed paths, most recent first.
    pub recent_files: Vec<String>,
}

// ── Refactoring ─────────────────────────────────────────────────────────────

/// A text range. Lines and columns are 1-based; `end_col` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRange {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl EditRange {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// A range that covers `len` characters on a single line.
    pub fn on_line(line: usize, start_col: usize, len: usize) -> Self {
        Self::new(line, start_col, line, start_col + len)
    }

    /// True for a zero-width range (a pure insertion point).
    pub fn is_empty(&self) -> bool {
        self.start() == self.end()
    }

    pub fn start(&self) -> (usize, usize) {
        (self.start_line, self.start_col)
    }

    pub fn end(&self) -> (usize, usize) {
        (self.end_line, self.end_col)
    }
}

/// A single text replacement within one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefactoringEdit {
    pub file_path: String,
    pub range: EditRange,
    pub old_text: String,
    pub new_text: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSummary {
    pub files_changed: usize,
    pub total_edits: usize,
}

/// A dry-run edit plan. Producing one never touches the file system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefactoringPreview {
    pub name: String,
    pub description: String,
    pub edits: Vec<RefactoringEdit>,
    pub summary: PreviewSummary,
}

impl RefactoringPreview {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        edits: Vec<RefactoringEdit>,
    ) -> Self {
        let files: BTreeSet<&str> = edits.iter().map(|e| e.file_path.as_str()).collect();
        let summary = PreviewSummary {
            files_changed: files.len(),
            total_edits: edits.len(),
        };
        Self {
            name: name.into(),
            description: description.into(),
            edits,
            summary,
        }
    }

    /// The stub returned alongside a failure.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Distinct file paths touched by this preview, in first-seen order.
    pub fn changed_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        for edit in &self.edits {
            if !files.contains(&edit.file_path.as_str()) {
                files.push(&edit.file_path);
            }
        }
        files
    }
}

/// Outcome of a preview or execute call. Check `success` before trusting
/// `preview.edits`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefactoringResult {
    pub success: bool,
    pub preview: RefactoringPreview,
    pub error: Option<String>,
}

impl RefactoringResult {
    pub fn ok(preview: RefactoringPreview) -> Self {
        Self {
            success: true,
            preview,
            error: None,
        }
    }

    pub fn failed(name: &str, error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            preview: RefactoringPreview::empty(name),
            error: Some(error.to_string()),
        }
    }
}

/// What the renamed identifier is, selecting extra search patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameKind {
    Function,
    Variable,
    Class,
    Interface,
    Type,
    Import,
}

impl std::fmt::Display for RenameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Variable => write!(f, "variable"),
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::Type => write!(f, "type"),
            Self::Import => write!(f, "import"),
        }
    }
}

impl std::str::FromStr for RenameKind {
    type Err = SymdexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "function" => Ok(Self::Function),
            "variable" => Ok(Self::Variable),
            "class" => Ok(Self::Class),
            "interface" => Ok(Self::Interface),
            "type" => Ok(Self::Type),
            "import" => Ok(Self::Import),
            _ => Err(SymdexError::InvalidName(format!("unknown rename kind: {s}"))),
        }
    }
}

/// Returns true if `name` is a plain identifier (letters, digits, `_`, `$`,
/// not starting with a digit).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
