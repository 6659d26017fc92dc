//! SymbolExtractor trait and the line scanner shared by the pattern-based
//! language extractors.

use symdex_core::{Symbol, SymbolKind};

/// Trait for per-language symbol extraction from raw source text.
///
/// The built-in extractors are line-pattern matchers. A parser-backed
/// implementation can be registered on the
/// [`CodeParser`](crate::parser::CodeParser) without touching the index,
/// search or refactoring layers.
pub trait SymbolExtractor: Send + Sync {
    /// Returns the human-readable language name (e.g., "rust", "typescript").
    fn language_name(&self) -> &str;

    /// Returns the file extensions this extractor handles (e.g., &["rs"] for Rust).
    fn file_extensions(&self) -> &[&str];

    /// Extract symbol candidates from the full text of a file.
    ///
    /// Never fails: lines that match nothing are skipped. Overlapping matches
    /// from different patterns on one line are all returned.
    fn extract_symbols(&self, content: &str, file_path: &str) -> Vec<Symbol>;
}

/// Longest declaration text kept in `Symbol::detail`.
const MAX_DETAIL_CHARS: usize = 160;

/// How doc comments above a declaration are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocStyle {
    /// `/** ... */`, ` * ...` and `// ...` (TypeScript / JavaScript).
    CStyle,
    /// `/// ...` only; other comments reset the buffer (Rust).
    TripleSlash,
    /// `# ...` (Python).
    Hash,
}

/// A code line that survived comment filtering.
#[derive(Debug, Clone)]
pub struct SourceLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Raw line text without the line terminator.
    pub text: &'a str,
    /// Line text with surrounding whitespace removed.
    pub trimmed: &'a str,
    /// Count of leading whitespace characters.
    pub indent: usize,
    /// Doc comment collected from the lines directly above.
    pub documentation: Option<String>,
}

impl SourceLine<'_> {
    /// 1-based column of a byte offset into `trimmed`.
    pub fn column_of(&self, trimmed_offset: usize) -> usize {
        let lead = self.text.len() - self.text.trim_start().len();
        self.text[..lead + trimmed_offset].chars().count() + 1
    }

    /// Build a symbol declared on this line. `name_offset` is the byte offset
    /// of the name inside `trimmed`.
    pub fn symbol(
        &self,
        name: &str,
        kind: SymbolKind,
        file_path: &str,
        name_offset: usize,
    ) -> Symbol {
        Symbol {
            name: name.to_string(),
            kind,
            file_path: file_path.to_string(),
            line: self.number,
            column: Some(self.column_of(name_offset)),
            parent: None,
            documentation: self.documentation.clone(),
            detail: Some(declaration_detail(self.trimmed)),
        }
    }
}

/// True for lines the extractors never look at: `//`, `/*` and `*` starts.
///
/// Block comment interiors that do not begin with `*` are not detected.
pub fn is_comment_start(trimmed: &str) -> bool {
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

/// Split `content` into code lines, dropping blank and comment lines and
/// attaching preceding doc comments.
pub fn source_lines(content: &str, style: DocStyle) -> Vec<SourceLine<'_>> {
    let mut lines = Vec::new();
    let mut doc: Vec<String> = Vec::new();

    for (idx, text) in content.lines().enumerate() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            doc.clear();
            continue;
        }

        if is_comment_start(trimmed) || (style == DocStyle::Hash && trimmed.starts_with('#')) {
            match doc_text(trimmed, style) {
                Some(t) if !t.is_empty() => doc.push(t),
                Some(_) => {}
                None => doc.clear(),
            }
            continue;
        }

        // Attributes and decorators sit between a doc comment and its item.
        let is_attribute = trimmed.starts_with("#[") || trimmed.starts_with('@');
        let documentation = if is_attribute || doc.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut doc).join("\n"))
        };

        lines.push(SourceLine {
            number: idx + 1,
            text,
            trimmed,
            indent: text.chars().take_while(|c| c.is_whitespace()).count(),
            documentation,
        });
    }

    lines
}

/// Text of a comment line if it counts as documentation for `style`.
/// `None` means the comment breaks the doc block.
fn doc_text(trimmed: &str, style: DocStyle) -> Option<String> {
    match style {
        DocStyle::TripleSlash => trimmed
            .strip_prefix("///")
            .map(|rest| rest.trim().to_string()),
        DocStyle::Hash => trimmed.strip_prefix('#').map(|rest| rest.trim().to_string()),
        DocStyle::CStyle => {
            let stripped = trimmed
                .trim_end_matches("*/")
                .trim_start_matches('/')
                .trim_start_matches('*')
                .trim();
            Some(stripped.to_string())
        }
    }
}

/// Declaration text kept as the symbol detail: trailing `{` removed,
/// capped at a fixed length.
pub fn declaration_detail(trimmed: &str) -> String {
    let text = trimmed.trim_end_matches('{').trim_end();
    if text.chars().count() <= MAX_DETAIL_CHARS {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX_DETAIL_CHARS).collect();
        format!("{cut}...")
    }
}

/// Tracks enclosing containers (classes, impl blocks, traits) by indentation.
#[derive(Debug, Default)]
pub struct ContainerTracker {
    stack: Vec<(String, usize)>,
}

impl ContainerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave every container whose indentation is not below `indent`.
    pub fn enter_line(&mut self, indent: usize) {
        while self.stack.last().is_some_and(|(_, i)| indent <= *i) {
            self.stack.pop();
        }
    }

    pub fn push(&mut self, name: &str, indent: usize) {
        self.stack.push((name.to_string(), indent));
    }

    /// Innermost open container.
    pub fn current(&self) -> Option<&str> {
        self.stack.last().map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_and_comment_lines() {
        let src = "// note\n\n/* block */\n * star\nconst a = 1;\n";
        let lines = source_lines(src, DocStyle::CStyle);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].number, 5);
        assert_eq!(lines[0].trimmed, "const a = 1;");
    }

    #[test]
    fn block_comment_interior_without_star_is_not_filtered() {
        let src = "/*\nfunction hidden() {}\n*/\n";
        let lines = source_lines(src, DocStyle::CStyle);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].trimmed, "function hidden() {}");
    }

    #[test]
    fn collects_doc_comments_for_next_code_line() {
        let src = "/**\n * Adds numbers.\n */\nfunction add() {}\nfunction sub() {}\n";
        let lines = source_lines(src, DocStyle::CStyle);
        assert_eq!(lines[0].documentation.as_deref(), Some("Adds numbers."));
        assert!(lines[1].documentation.is_none());
    }

    #[test]
    fn rust_doc_survives_attributes() {
        let src = "/// A point.\n#[derive(Debug)]\npub struct Point;\n";
        let lines = source_lines(src, DocStyle::TripleSlash);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].documentation.is_none());
        assert_eq!(lines[1].documentation.as_deref(), Some("A point."));
    }

    #[test]
    fn rust_plain_comment_breaks_doc_block() {
        let src = "/// Doc.\n// plain\nfn f() {}\n";
        let lines = source_lines(src, DocStyle::TripleSlash);
        assert!(lines[0].documentation.is_none());
    }

    #[test]
    fn blank_line_breaks_doc_block() {
        let src = "# Helper.\n\ndef f():\n";
        let lines = source_lines(src, DocStyle::Hash);
        assert!(lines[0].documentation.is_none());
    }

    #[test]
    fn column_accounts_for_indentation() {
        let src = "    const value = 1;";
        let lines = source_lines(src, DocStyle::CStyle);
        assert_eq!(lines[0].indent, 4);
        assert_eq!(lines[0].column_of(6), 11);
    }

    #[test]
    fn detail_strips_brace_and_truncates() {
        assert_eq!(declaration_detail("fn main() {"), "fn main()");
        let long = "x".repeat(400);
        let detail = declaration_detail(&long);
        assert!(detail.ends_with("..."));
        assert_eq!(detail.chars().count(), MAX_DETAIL_CHARS + 3);
    }

    #[test]
    fn container_tracker_pops_on_dedent() {
        let mut tracker = ContainerTracker::new();
        tracker.enter_line(0);
        tracker.push("Widget", 0);
        tracker.enter_line(2);
        assert_eq!(tracker.current(), Some("Widget"));
        tracker.enter_line(0);
        assert_eq!(tracker.current(), None);
    }
}
