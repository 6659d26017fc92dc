//! Edit Applier: splices `RefactoringEdit`s into file content.
//!
//! Ranges may span lines. Every edit is checked against the text currently
//! in its range before anything is written, so a file that changed since the
//! preview was computed is rejected instead of corrupted.

use std::collections::HashMap;
use symdex_core::{EditRange, FileSystem, RefactoringEdit, SymdexError};

/// Byte offsets of a `(line, column)` grid over one file's content.
struct LineIndex<'a> {
    content: &'a str,
    /// (byte offset of line start, line text without terminator)
    lines: Vec<(usize, &'a str)>,
}

impl<'a> LineIndex<'a> {
    fn new(content: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        for raw in content.split('\n') {
            lines.push((start, raw.strip_suffix('\r').unwrap_or(raw)));
            start += raw.len() + 1;
        }
        Self { content, lines }
    }

    /// Byte offset of 1-based `(line, col)`. `col` may point one past the
    /// last character of the line.
    fn offset(&self, line: usize, col: usize) -> Result<usize, SymdexError> {
        let (start, text) = line
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .ok_or_else(|| {
                SymdexError::InvalidRange(format!(
                    "line {line} is outside a {}-line file",
                    self.lines.len()
                ))
            })?;

        let char_idx = col
            .checked_sub(1)
            .ok_or_else(|| SymdexError::InvalidRange(format!("column {col} on line {line}")))?;
        if char_idx == text.chars().count() {
            return Ok(start + text.len());
        }
        text.char_indices()
            .nth(char_idx)
            .map(|(byte, _)| start + byte)
            .ok_or_else(|| {
                SymdexError::InvalidRange(format!(
                    "column {col} is past the end of line {line}"
                ))
            })
    }

    fn span(&self, range: &EditRange) -> Result<(usize, usize), SymdexError> {
        let start = self.offset(range.start_line, range.start_col)?;
        let end = self.offset(range.end_line, range.end_col)?;
        if end < start {
            return Err(SymdexError::InvalidRange(format!(
                "range {}:{}-{}:{} ends before it starts",
                range.start_line, range.start_col, range.end_line, range.end_col
            )));
        }
        Ok((start, end))
    }

    fn text(&self, start: usize, end: usize) -> &'a str {
        &self.content[start..end]
    }
}

/// Apply one edit to `content`, returning the new content.
pub fn apply_edit_to_content(content: &str, edit: &RefactoringEdit) -> Result<String, SymdexError> {
    apply_edits_to_content(content, &[edit])
}

/// Apply several edits that target the same file.
///
/// Edits are normalized first (see [`normalize_edits`]) and spliced from the
/// end of the file backwards, so every range refers to the original content.
/// Insertions at the same point appear in list order.
pub fn apply_edits_to_content(
    content: &str,
    edits: &[&RefactoringEdit],
) -> Result<String, SymdexError> {
    let index = LineIndex::new(content);

    let mut spans = Vec::with_capacity(edits.len());
    for edit in normalize_edits(edits) {
        let (start, end) = index.span(&edit.range)?;
        let found = index.text(start, end);
        if found.replace("\r\n", "\n") != edit.old_text.replace("\r\n", "\n") {
            return Err(SymdexError::StaleEdit {
                file_path: edit.file_path.clone(),
                line: edit.range.start_line,
                expected: edit.old_text.clone(),
                found: found.to_string(),
            });
        }
        spans.push((start, end, edit.new_text.as_str()));
    }

    let mut result = content.to_string();
    for (start, end, new_text) in spans.into_iter().rev() {
        result.replace_range(start..end, new_text);
    }
    Ok(result)
}

/// Order edits by position and drop those that overlap an earlier one.
///
/// Sorted by start ascending, then end descending, so the widest edit at a
/// given start is kept. An edit that starts before the previously kept edit
/// ends is dropped. Edits that only touch are both kept.
pub fn normalize_edits<'e>(edits: &[&'e RefactoringEdit]) -> Vec<&'e RefactoringEdit> {
    let mut sorted = edits.to_vec();
    sorted.sort_by(|a, b| {
        a.range
            .start()
            .cmp(&b.range.start())
            .then_with(|| b.range.end().cmp(&a.range.end()))
    });

    let mut kept: Vec<&RefactoringEdit> = Vec::with_capacity(sorted.len());
    for edit in sorted {
        if let Some(last) = kept.last() {
            if edit.range.start() < last.range.end() {
                tracing::debug!(
                    "Dropping overlapping edit at {}:{}:{}",
                    edit.file_path,
                    edit.range.start_line,
                    edit.range.start_col
                );
                continue;
            }
            if edit == *last {
                continue;
            }
        }
        kept.push(edit);
    }
    kept
}

/// Reads, patches and writes files through a [`FileSystem`].
pub struct EditApplier<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> EditApplier<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Apply a single edit to its file.
    pub fn apply_edit(&self, edit: &RefactoringEdit) -> Result<(), SymdexError> {
        let content = self.fs.read_file_content(&edit.file_path)?;
        let updated = apply_edit_to_content(&content, edit)?;
        self.fs.write_file_content(&edit.file_path, &updated)
    }

    /// New content of every file touched by `edits`, in first-seen order.
    /// Nothing is written.
    pub fn dry_run(&self, edits: &[RefactoringEdit]) -> Result<Vec<(String, String)>, SymdexError> {
        let mut order: Vec<&str> = Vec::new();
        let mut by_file: HashMap<&str, Vec<&RefactoringEdit>> = HashMap::new();
        for edit in edits {
            let path = edit.file_path.as_str();
            if !by_file.contains_key(path) {
                order.push(path);
            }
            by_file.entry(path).or_default().push(edit);
        }

        let mut updated = Vec::with_capacity(order.len());
        for path in order {
            let content = self.fs.read_file_content(path)?;
            let file_edits = by_file.get(path).map(Vec::as_slice).unwrap_or_default();
            let new_content = apply_edits_to_content(&content, file_edits)?;
            updated.push((path.to_string(), new_content));
        }
        Ok(updated)
    }

    /// Validate every edit against current content, then write each
    /// changed file. Returns the written paths.
    ///
    /// Validation failures write nothing. A write failure part way through
    /// leaves earlier files written; the error names the failing file.
    pub fn apply_all(&self, edits: &[RefactoringEdit]) -> Result<Vec<String>, SymdexError> {
        let updated = self.dry_run(edits)?;

        let mut written = Vec::with_capacity(updated.len());
        for (path, content) in updated {
            self.fs.write_file_content(&path, &content).map_err(|err| {
                tracing::warn!("Write failed for {} after {} files: {}", path, written.len(), err);
                err
            })?;
            written.push(path);
        }
        Ok(written)
    }
}
