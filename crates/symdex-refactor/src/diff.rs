//! Unified diff rendering for refactoring previews.
//!
//! Uses the `similar` crate on the before/after content of each file a
//! preview touches. Nothing is written.

use crate::apply::apply_edits_to_content;
use similar::{ChangeTag, TextDiff};
use symdex_core::{FileSystem, RefactoringEdit, RefactoringPreview, SymdexError};

/// Line counts for one file of a rendered preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub file_path: String,
    pub lines_added: usize,
    pub lines_removed: usize,
    /// Unified diff text with `a/` and `b/` headers.
    pub unified: String,
}

/// Diff `old_content` against `new_content` for one file.
pub fn diff_file(file_path: &str, old_content: &str, new_content: &str) -> FileDiff {
    let text_diff = TextDiff::from_lines(old_content, new_content);

    let mut lines_added = 0;
    let mut lines_removed = 0;
    for change in text_diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => lines_added += 1,
            ChangeTag::Delete => lines_removed += 1,
            ChangeTag::Equal => {}
        }
    }

    let display = file_path.trim_start_matches('/');
    let unified = text_diff
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{display}"), &format!("b/{display}"))
        .to_string();

    FileDiff {
        file_path: file_path.to_string(),
        lines_added,
        lines_removed,
        unified,
    }
}

/// Per-file diffs of what applying `preview` would do to the current files.
pub fn preview_diffs<F: FileSystem>(
    fs: &F,
    preview: &RefactoringPreview,
) -> Result<Vec<FileDiff>, SymdexError> {
    let mut diffs = Vec::new();
    for path in preview.changed_files() {
        let edits: Vec<&RefactoringEdit> = preview
            .edits
            .iter()
            .filter(|e| e.file_path == path)
            .collect();
        let before = fs.read_file_content(path)?;
        let after = apply_edits_to_content(&before, &edits)?;
        diffs.push(diff_file(path, &before, &after));
    }
    Ok(diffs)
}

/// All per-file unified diffs of `preview`, concatenated.
pub fn render_preview_diff<F: FileSystem>(
    fs: &F,
    preview: &RefactoringPreview,
) -> Result<String, SymdexError> {
    Ok(preview_diffs(fs, preview)?
        .into_iter()
        .map(|d| d.unified)
        .collect())
}
