//! Rename planning.
//!
//! Matches kind-specific patterns in the target file and rewrites every
//! cross-file reference found by the index. Planning only; nothing is written.

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use symdex_core::{
    EditRange, RefactoringEdit, RefactoringPreview, RenameKind, SymdexError, is_identifier,
};
use symdex_index::{SymbolIndexer, word_pattern};

/// What to rename and where it is declared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameOptions {
    /// File holding the declaration; scanned with the kind patterns.
    pub file_path: String,
    pub old_name: String,
    pub new_name: String,
    pub kind: RenameKind,
}

/// Search patterns for the target file. The first one is always the bare
/// whole-word match.
fn kind_patterns(old_name: &str, kind: RenameKind) -> Vec<String> {
    let name = regex::escape(old_name);
    let mut patterns = vec![format!(r"\b{name}\b")];
    match kind {
        RenameKind::Function => {
            patterns.push(format!(r"\b(?:function|fn|def)\s+{name}\b"));
            patterns.push(format!(r"\b{name}\s*\("));
        }
        RenameKind::Variable => {
            patterns.push(format!(r"\b(?:const|let|var)\s+{name}\b"));
            patterns.push(format!(r"\b{name}\s*="));
        }
        RenameKind::Class => patterns.push(format!(r"\b(?:class|struct)\s+{name}\b")),
        RenameKind::Interface => patterns.push(format!(r"\b(?:interface|trait)\s+{name}\b")),
        RenameKind::Type => patterns.push(format!(r"\b(?:type|enum)\s+{name}\b")),
        RenameKind::Import => patterns.push(format!(r"\bimport\b.*\b{name}\b")),
    }
    patterns
}

static IMPORT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:import|from|require)\b").unwrap());

fn validate(options: &RenameOptions) -> Result<(), SymdexError> {
    if options.old_name.is_empty() {
        return Err(SymdexError::InvalidName("old name is empty".to_string()));
    }
    if !is_identifier(&options.new_name) {
        return Err(SymdexError::InvalidName(format!(
            "'{}' is not a valid identifier",
            options.new_name
        )));
    }
    Ok(())
}

fn char_col(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count() + 1
}

/// Build the rename preview for `options`, given the current `content` of
/// the target file.
///
/// Every pattern match becomes its own edit, so a preview may contain
/// overlapping edits on one line. The applier resolves overlaps.
pub fn plan_rename(
    indexer: &SymbolIndexer,
    content: &str,
    options: &RenameOptions,
) -> Result<RefactoringPreview, SymdexError> {
    validate(options)?;
    let old_name = options.old_name.as_str();
    let new_name = options.new_name.as_str();

    let word = word_pattern(old_name)?;
    let patterns = kind_patterns(old_name, options.kind)
        .iter()
        .map(|p| Regex::new(p))
        .collect::<Result<Vec<_>, _>>()?;

    let mut edits = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        for pattern in &patterns {
            for m in pattern.find_iter(line) {
                edits.push(RefactoringEdit {
                    file_path: options.file_path.clone(),
                    range: EditRange::on_line(
                        idx + 1,
                        char_col(line, m.start()),
                        m.as_str().chars().count(),
                    ),
                    old_text: m.as_str().to_string(),
                    new_text: word.replace_all(m.as_str(), NoExpand(new_name)).into_owned(),
                });
            }
        }
    }

    for reference in indexer.find_references(old_name) {
        if reference.file_path == options.file_path {
            continue;
        }
        let Some(column) = reference_column(&reference.context, reference.column, old_name) else {
            tracing::debug!(
                "No '{}' on {}:{}, skipping",
                old_name,
                reference.file_path,
                reference.line
            );
            continue;
        };
        edits.push(RefactoringEdit {
            file_path: reference.file_path,
            range: EditRange::on_line(reference.line, column, old_name.chars().count()),
            old_text: old_name.to_string(),
            new_text: new_name.to_string(),
        });
    }

    if options.kind == RenameKind::Import {
        for (idx, line) in content.lines().enumerate() {
            if !IMPORT_LINE.is_match(line) || !word.is_match(line) {
                continue;
            }
            edits.push(RefactoringEdit {
                file_path: options.file_path.clone(),
                range: EditRange::on_line(idx + 1, 1, line.chars().count()),
                old_text: line.to_string(),
                new_text: word.replace_all(line, NoExpand(new_name)).into_owned(),
            });
        }
    }

    tracing::debug!(
        "Planned rename {} -> {}: {} edits",
        old_name,
        new_name,
        edits.len()
    );

    Ok(RefactoringPreview::new(
        "Rename",
        format!("Rename {} '{}' to '{}'", options.kind, old_name, new_name),
        edits,
    ))
}

/// Column of `name` on a reference line: the reported column when the name
/// is there, otherwise its first occurrence.
fn reference_column(context: &str, column: usize, name: &str) -> Option<usize> {
    let at_column = context
        .char_indices()
        .nth(column.saturating_sub(1))
        .is_some_and(|(byte, _)| context[byte..].starts_with(name));
    if at_column {
        return Some(column);
    }
    context.find(name).map(|byte| char_col(context, byte))
}
