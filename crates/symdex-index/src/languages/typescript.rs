//! TypeScript / JavaScript line-pattern extractor.

use crate::extractor::{ContainerTracker, DocStyle, SourceLine, SymbolExtractor, source_lines};
use regex::Regex;
use std::sync::LazyLock;
use symdex_core::{Symbol, SymbolKind};

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^import\s+(?:type\s+)?(?:[A-Za-z_$][\w$]*\s*,\s*)?\{([^}]*)\}\s*from\s*['"]([^'"]+)['"]"#,
    )
    .unwrap()
});
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)\s*(?:<[^>]*>)?\s*\(",
    )
    .unwrap()
});
static ARROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::[^=]*)?=\s*(?:async\s+)?(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*(?::[^=]*)?=>",
    )
    .unwrap()
});
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:abstract\s+)?class\s+([A-Za-z_$][\w$]*)")
        .unwrap()
});
static INTERFACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:export\s+)?(?:declare\s+)?interface\s+([A-Za-z_$][\w$]*)").unwrap()
});
static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:export\s+)?(?:declare\s+)?type\s+([A-Za-z_$][\w$]*)\s*(?:<[^=]*>)?\s*=").unwrap()
});
static CONST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:export\s+)?(?:declare\s+)?(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::[^=]*)?=")
        .unwrap()
});
static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:public|private|protected|static|async|readonly|override|abstract|get|set)\s+)*\*?([A-Za-z_$][\w$]*)\s*(?:<[^>]*>)?\s*\([^)]*\)\s*(?::[^{]*)?(?:\{|:)",
    )
    .unwrap()
});

/// Words that look like calls in front of a parenthesis but never name a method.
const CONTROL_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "with", "do", "else", "new", "typeof",
    "await", "super", "function", "throw", "yield",
];

/// TypeScript / JavaScript extractor covering `.ts`, `.tsx`, `.js` and `.jsx`.
pub struct TypeScriptExtractor;

impl TypeScriptExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TypeScriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolExtractor for TypeScriptExtractor {
    fn language_name(&self) -> &str {
        "typescript"
    }

    fn file_extensions(&self) -> &[&str] {
        &["ts", "tsx", "js", "jsx"]
    }

    fn extract_symbols(&self, content: &str, file_path: &str) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        let mut containers = ContainerTracker::new();

        for line in source_lines(content, DocStyle::CStyle) {
            containers.enter_line(line.indent);
            let start = symbols.len();

            extract_imports(&line, file_path, &mut symbols);
            push_capture(&FUNCTION_RE, &line, SymbolKind::Function, file_path, &mut symbols);
            push_capture(&ARROW_RE, &line, SymbolKind::Function, file_path, &mut symbols);
            let class = push_capture(&CLASS_RE, &line, SymbolKind::Class, file_path, &mut symbols);
            push_capture(&INTERFACE_RE, &line, SymbolKind::Interface, file_path, &mut symbols);
            push_capture(&TYPE_RE, &line, SymbolKind::Type, file_path, &mut symbols);
            push_capture(&CONST_RE, &line, SymbolKind::Constant, file_path, &mut symbols);
            if !line.trimmed.contains("function") && !line.trimmed.contains("=>") {
                extract_method(&line, file_path, &mut symbols);
            }

            if let Some(parent) = containers.current() {
                for symbol in &mut symbols[start..] {
                    symbol.parent = Some(parent.to_string());
                }
            }
            if let Some(class) = class {
                containers.push(&class, line.indent);
            }
        }

        symbols
    }
}

/// Push a symbol for the first capture group of `re`, returning its name.
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

/// `import { a, b as c } from 'module'` indexes each local name.
fn extract_imports(line: &SourceLine<'_>, file_path: &str, symbols: &mut Vec<Symbol>) {
    let Some(caps) = IMPORT_RE.captures(line.trimmed) else {
        return;
    };
    let (Some(names), Some(module)) = (caps.get(1), caps.get(2)) else {
        return;
    };

    let mut offset = names.start();
    for part in names.as_str().split(',') {
        let part_start = offset;
        offset += part.len() + 1;

        let spec = part.trim().trim_start_matches("type ").trim();
        let local = match spec.rsplit_once(" as ") {
            Some((_, alias)) => alias.trim(),
            None => spec,
        };
        if local.is_empty() {
            continue;
        }

        let within = part.rfind(local).unwrap_or(0);
        let mut symbol = line.symbol(local, SymbolKind::Function, file_path, part_start + within);
        symbol.detail = Some(format!("imported from {}", module.as_str()));
        symbols.push(symbol);
    }
}

/// A loose `name(...) {` / `name(...):` line outside of function syntax.
fn extract_method(line: &SourceLine<'_>, file_path: &str, symbols: &mut Vec<Symbol>) {
    let Some(name) = METHOD_RE.captures(line.trimmed).and_then(|c| c.get(1)) else {
        return;
    };
    if CONTROL_KEYWORDS.contains(&name.as_str()) {
        return;
    }
    symbols.push(line.symbol(name.as_str(), SymbolKind::Method, file_path, name.start()));
}
