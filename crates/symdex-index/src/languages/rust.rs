//! Rust line-pattern extractor.

use crate::extractor::{ContainerTracker, DocStyle, SourceLine, SymbolExtractor, source_lines};
use regex::Regex;
use std::sync::LazyLock;
use symdex_core::{Symbol, SymbolKind};

const VISIBILITY: &str = r"(?:pub(?:\s*\([^)]*\))?\s+)?";

static FN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"^{VISIBILITY}(?:default\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+(?:"[^"]*"\s+)?)?fn\s+([A-Za-z_]\w*)"#
    ))
    .unwrap()
});
static STRUCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{VISIBILITY}struct\s+([A-Za-z_]\w*)")).unwrap());
static ENUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{VISIBILITY}enum\s+([A-Za-z_]\w*)")).unwrap());
static TRAIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{VISIBILITY}(?:unsafe\s+)?(?:auto\s+)?trait\s+([A-Za-z_]\w*)")).unwrap()
});
static IMPL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:unsafe\s+)?impl(?:\s*<[^>]*>)?\s+(?:!?(?:dyn\s+)?[A-Za-z_][\w:]*(?:<[^>]*>)?\s+for\s+)?([A-Za-z_]\w*)",
    )
    .unwrap()
});
static CONST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{VISIBILITY}const\s+([A-Za-z_]\w*)\s*:")).unwrap());

/// Rust extractor: `fn`, `struct`, `enum`, `trait`, `impl` and `const`.
///
/// For `impl Trait for Type` the symbol is named after the implementing
/// type; the full declaration stays in `detail`.
pub struct RustExtractor;

impl RustExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolExtractor for RustExtractor {
    fn language_name(&self) -> &str {
        "rust"
    }

    fn file_extensions(&self) -> &[&str] {
        &["rs"]
    }

    fn extract_symbols(&self, content: &str, file_path: &str) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        let mut containers = ContainerTracker::new();

        for line in source_lines(content, DocStyle::TripleSlash) {
            containers.enter_line(line.indent);
            let parent = containers.current().map(str::to_string);
            let start = symbols.len();

            push_capture(&FN_RE, &line, SymbolKind::Function, file_path, &mut symbols);
            push_capture(&STRUCT_RE, &line, SymbolKind::Class, file_path, &mut symbols);
            push_capture(&ENUM_RE, &line, SymbolKind::Type, file_path, &mut symbols);
            let trait_name =
                push_capture(&TRAIT_RE, &line, SymbolKind::Interface, file_path, &mut symbols);
            let impl_name = push_capture(&IMPL_RE, &line, SymbolKind::Class, file_path, &mut symbols);
            push_capture(&CONST_RE, &line, SymbolKind::Constant, file_path, &mut symbols);

            for symbol in &mut symbols[start..] {
                symbol.parent.clone_from(&parent);
            }
            if let Some(container) = impl_name.or(trait_name) {
                containers.push(&container, line.indent);
            }
        }

        symbols
    }
}

fn push_capture(
    re: &Regex,
    line: &SourceLine<'_>,
    kind: SymbolKind,
    file_path: &str,
    symbols: &mut Vec<Symbol>,
) -> Option<String> {
    let name = re.captures(line.trimmed)?.get(1)?;
    symbols.push(line.symbol(name.as_str(), kind, file_path, name.start()));
    Some(name.as_str().to_string())
}
