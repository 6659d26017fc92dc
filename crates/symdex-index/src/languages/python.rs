//! Python line-pattern extractor.

use crate::extractor::{ContainerTracker, DocStyle, SymbolExtractor, source_lines};
use regex::Regex;
use std::sync::LazyLock;
use symdex_core::{Symbol, SymbolKind};

static DEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:async\s+)?def\s+([A-Za-z_]\w*)\s*\(").unwrap());
static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^class\s+([A-Za-z_]\w*)").unwrap());
static CONST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][A-Z0-9_]*)\s*(?::[^=]+)?=[^=]").unwrap());

/// Python extractor: `def`, `class` and `ALL_CAPS = value`.
pub struct PythonExtractor;

impl PythonExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolExtractor for PythonExtractor {
    fn language_name(&self) -> &str {
        "python"
    }

    fn file_extensions(&self) -> &[&str] {
        &["py"]
    }

    fn extract_symbols(&self, content: &str, file_path: &str) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        let mut containers = ContainerTracker::new();

        for line in source_lines(content, DocStyle::Hash) {
            containers.enter_line(line.indent);
            let parent = containers.current().map(str::to_string);

            let found = if let Some(name) = DEF_RE.captures(line.trimmed).and_then(|c| c.get(1)) {
                Some((name, SymbolKind::Function))
            } else if let Some(name) = CLASS_RE.captures(line.trimmed).and_then(|c| c.get(1)) {
                containers.push(name.as_str(), line.indent);
                Some((name, SymbolKind::Class))
            } else {
                CONST_RE
                    .captures(line.trimmed)
                    .and_then(|c| c.get(1))
                    .map(|name| (name, SymbolKind::Constant))
            };

            if let Some((name, kind)) = found {
                let mut symbol = line.symbol(name.as_str(), kind, file_path, name.start());
                symbol.parent = parent;
                symbols.push(symbol);
            }
        }

        symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> Vec<Symbol> {
        PythonExtractor::new().extract_symbols(source, "app.py")
    }

    #[test]
    fn extract_functions_and_async_functions() {
        let source = "def load(path):\n    pass\n\nasync def fetch(url):\n    pass\n";
        let symbols = extract(source);
        assert_eq!(symbols.len(), 2, "{symbols:#?}");
        assert_eq!(symbols[0].name, "load");
        assert_eq!(symbols[0].kind, SymbolKind::Function);
        assert_eq!(symbols[1].name, "fetch");
        assert_eq!(symbols[1].line, 4);
        assert_eq!(symbols[1].column, Some(11));
    }

    #[test]
    fn methods_get_class_parent() {
        let source = r#"
# A repository of users.
class UserRepo(BaseRepo):
    TABLE = "users"

    def find(self, id):
        return None

def helper():
    pass
"#;
        let symbols = extract(source);
        let class = &symbols[0];
        assert_eq!(class.name, "UserRepo");
        assert_eq!(class.kind, SymbolKind::Class);
        assert_eq!(class.documentation.as_deref(), Some("A repository of users."));
        assert!(class.parent.is_none());

        let table = symbols.iter().find(|s| s.name == "TABLE").unwrap();
        assert_eq!(table.kind, SymbolKind::Constant);
        assert_eq!(table.parent.as_deref(), Some("UserRepo"));

        let find = symbols.iter().find(|s| s.name == "find").unwrap();
        assert_eq!(find.parent.as_deref(), Some("UserRepo"));

        let helper = symbols.iter().find(|s| s.name == "helper").unwrap();
        assert!(helper.parent.is_none());
    }

    #[test]
    fn only_all_caps_assignments_are_constants() {
        let source = "MAX_RETRIES = 3\nretries = 0\nIS_SET == True\nTIMEOUT: int = 5\n";
        let symbols = extract(source);
        let names: Vec<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["MAX_RETRIES", "TIMEOUT"]);
    }
}
