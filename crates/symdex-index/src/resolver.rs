//! Cross-file reference resolution.
//!
//! Combines the definition lookup with whole-word scans over the content
//! cache. Only files that were indexed are visible.

use crate::extractor::is_comment_start;
use crate::search::best_definition;
use crate::store::IndexState;
use regex::Regex;
use symdex_core::{Reference, Symbol, SymbolKind};

/// Whole-word regex for `name`, with regex metacharacters escaped.
pub fn word_pattern(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\b{}\b", regex::escape(name)))
}

/// 1-based line `line` of `content`, without its terminator.
pub fn line_text(content: &str, line: usize) -> Option<&str> {
    content.lines().nth(line.checked_sub(1)?)
}

/// Definition first (if any), then every whole-word occurrence of `name`
/// in the other indexed files.
///
/// An occurrence sitting exactly where that file declares a symbol of the
/// same name (same line, and same column when the symbol has one) is a
/// duplicate definition site and is skipped.
pub fn find_references(state: &IndexState, name: &str) -> Vec<Reference> {
    if name.is_empty() {
        return Vec::new();
    }
    let pattern = match word_pattern(name) {
        Ok(p) => p,
        Err(err) => {
            tracing::warn!("Cannot build reference pattern for {:?}: {}", name, err);
            return Vec::new();
        }
    };

    let mut references = Vec::new();
    let definition = best_definition(state, name);

    if let Some(def) = definition {
        let context = state
            .content(&def.file_path)
            .and_then(|c| line_text(c, def.line))
            .unwrap_or_default();
        references.push(Reference {
            file_path: def.file_path.clone(),
            line: def.line,
            column: def.column.unwrap_or(1),
            context: context.to_string(),
            symbol_name: name.to_string(),
            is_definition: true,
        });
    }

    for (path, content) in state.contents() {
        if definition.is_some_and(|d| d.file_path == path) {
            continue;
        }

        let declared_here: Vec<&Symbol> = state
            .file(path)
            .map(|f| f.symbols.iter().filter(|s| s.name == name).collect())
            .unwrap_or_default();

        for (idx, line) in content.lines().enumerate() {
            if is_comment_start(line.trim_start()) {
                continue;
            }
            let line_no = idx + 1;

            for m in pattern.find_iter(line) {
                let column = line[..m.start()].chars().count() + 1;
                let is_declaration = declared_here
                    .iter()
                    .any(|s| s.line == line_no && s.column.is_none_or(|c| c == column));
                if is_declaration {
                    continue;
                }

                references.push(Reference {
                    file_path: path.to_string(),
                    line: line_no,
                    column,
                    context: line.to_string(),
                    symbol_name: name.to_string(),
                    is_definition: false,
                });
            }
        }
    }

    references
}

/// Classes and interfaces whose declaration implements or extends `name`:
/// `impl Name for Type`, `class X implements Name`, `class X extends Name`,
/// `class X(Name):`.
pub fn find_implementations(state: &IndexState, name: &str) -> Vec<Symbol> {
    if name.is_empty() {
        return Vec::new();
    }
    let word = regex::escape(name);
    let pattern = match Regex::new(&format!(
        r"\b(?:implements|extends)\b[^{{]*\b{word}\b|\bimpl\b(?:\s*<[^>]*>)?\s+(?:[\w:]*::)?{word}\b(?:<[^>]*>)?\s+for\b|^class\s+\w+\s*\([^)]*\b{word}\b"
    )) {
        Ok(p) => p,
        Err(err) => {
            tracing::warn!("Cannot build implementation pattern for {:?}: {}", name, err);
            return Vec::new();
        }
    };

    state
        .files()
        .flat_map(|f| f.symbols.iter())
        .filter(|s| matches!(s.kind, SymbolKind::Class | SymbolKind::Interface))
        .filter(|s| s.detail.as_deref().is_some_and(|d| pattern.is_match(d)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CodeParser;

    fn index(files: &[(&str, &str)]) -> IndexState {
        let parser = CodeParser::new();
        let mut state = IndexState::new(100);
        for (path, content) in files {
            let symbols = parser
                .parse_file(path, content)
                .map(|r| r.symbols)
                .unwrap_or_default();
            state.insert_file(path, symbols, content);
        }
        state
    }

    #[test]
    fn definition_comes_first() {
        let state = index(&[
            ("/a.ts", "export const X = 1;"),
            ("/b.ts", "console.log(X);"),
        ]);
        let refs = find_references(&state, "X");
        assert_eq!(refs.len(), 2, "{refs:#?}");
        assert!(refs[0].is_definition);
        assert_eq!(refs[0].file_path, "/a.ts");
        assert_eq!(refs[0].column, 14);
        assert_eq!(refs[0].context, "export const X = 1;");
        assert!(!refs[1].is_definition);
        assert_eq!((refs[1].line, refs[1].column), (1, 13));
    }

    #[test]
    fn whole_word_only_and_comments_skipped() {
        let state = index(&[
            ("/a.ts", "export function add() {}"),
            (
                "/b.ts",
                "// add here\n/* add */\n * add\nadder();\nadd(1, 2); add(3, 4);\n",
            ),
        ]);
        let refs = find_references(&state, "add");
        let others: Vec<(usize, usize)> = refs
            .iter()
            .filter(|r| !r.is_definition)
            .map(|r| (r.line, r.column))
            .collect();
        assert_eq!(others, vec![(5, 1), (5, 12)]);
    }

    #[test]
    fn declarations_in_other_files_are_skipped_but_same_line_uses_are_kept() {
        // a.ts is indexed last so its function is the best-scoring definition.
        let state = index(&[
            ("/b.ts", "import { add } from './a';\nconst total = add(1, 2);\n"),
            ("/c.ts", "const add = 1; log(add);\n"),
            ("/a.ts", "export function add() {}\n"),
        ]);
        let refs = find_references(&state, "add");
        let others: Vec<(&str, usize, usize)> = refs
            .iter()
            .filter(|r| !r.is_definition)
            .map(|r| (r.file_path.as_str(), r.line, r.column))
            .collect();
        assert_eq!(refs[0].file_path, "/a.ts");
        // b.ts line 1 is the import declaration; c.ts col 7 is the local declaration.
        assert_eq!(others, vec![("/b.ts", 2, 15), ("/c.ts", 1, 20)]);
    }

    #[test]
    fn unknown_name_without_occurrences_is_empty() {
        let state = index(&[("/a.ts", "const a = 1;")]);
        assert!(find_references(&state, "missing").is_empty());
        assert!(find_references(&state, "").is_empty());
    }

    #[test]
    fn references_without_definition() {
        let state = index(&[("/a.ts", "print(value);"), ("/notes.txt", "value")]);
        let refs = find_references(&state, "value");
        assert_eq!(refs.len(), 2);
        assert!(refs.iter().all(|r| !r.is_definition));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let state = index(&[("/a.ts", "const axb = 1; a.b;")]);
        let refs = find_references(&state, "a.b");
        assert_eq!(refs.len(), 1, "{refs:#?}");
        assert_eq!(refs[0].column, 16);
        assert!(!refs[0].is_definition);
    }

    #[test]
    fn finds_implementations_across_languages() {
        let state = index(&[
            ("/shape.ts", "export class Circle implements Shape {\n}\nclass Plain {}\n"),
            ("/lib.rs", "impl std::fmt::Display for Point {}\nimpl Point {}\n"),
            ("/repo.py", "class Users(Repository):\n    pass\n"),
            ("/sub.ts", "export interface Solid extends Shape {}\n"),
        ]);

        let shapes: Vec<String> = find_implementations(&state, "Shape")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(shapes, vec!["Circle", "Solid"]);

        let display = find_implementations(&state, "Display");
        assert_eq!(display.len(), 1);
        assert_eq!(display[0].name, "Point");

        let repos = find_implementations(&state, "Repository");
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "Users");

        assert!(find_implementations(&state, "Point").is_empty());
    }
}
