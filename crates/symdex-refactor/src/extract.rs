//! Extract-function planning.
//!
//! Moves a line range into a new function declared right after it and
//! replaces the range with a call. Arguments are not inferred: every
//! parameter becomes a placeholder at the call site.

use serde::{Deserialize, Serialize};
use symdex_core::{
    EditRange, RefactorConfig, RefactoringEdit, RefactoringPreview, SymdexError, is_identifier,
};

/// Inclusive 1-based line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start_line: usize,
    pub end_line: usize,
}

impl LineRange {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractFunctionOptions {
    pub file_path: String,
    pub range: LineRange,
    pub function_name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub return_type: Option<String>,
}

fn validate(options: &ExtractFunctionOptions, line_count: usize) -> Result<(), SymdexError> {
    if !is_identifier(&options.function_name) {
        return Err(SymdexError::InvalidName(format!(
            "'{}' is not a valid function name",
            options.function_name
        )));
    }
    if let Some(param) = options.parameters.iter().find(|p| p.trim().is_empty()) {
        return Err(SymdexError::InvalidName(format!("empty parameter {param:?}")));
    }

    let LineRange {
        start_line,
        end_line,
    } = options.range;
    if start_line == 0 || end_line < start_line || end_line > line_count {
        return Err(SymdexError::InvalidRange(format!(
            "lines {start_line}-{end_line} in a {line_count}-line file"
        )));
    }
    Ok(())
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Build the function declaration from the selected lines.
///
/// The first line's indentation is stripped from every line (lines with
/// less indentation lose all of theirs), then each non-empty line is
/// indented by one `indent_unit`.
fn function_text(selected: &[&str], options: &ExtractFunctionOptions, indent_unit: &str) -> String {
    let base = leading_whitespace(selected[0]);

    let body: Vec<String> = selected
        .iter()
        .map(|line| {
            let stripped = line.strip_prefix(base).unwrap_or_else(|| line.trim_start());
            if stripped.trim().is_empty() {
                String::new()
            } else {
                format!("{indent_unit}{stripped}")
            }
        })
        .collect();

    let params = options
        .parameters
        .iter()
        .map(|p| p.trim())
        .collect::<Vec<_>>()
        .join(", ");
    let returns = options
        .return_type
        .as_deref()
        .map(|t| format!(": {t}"))
        .unwrap_or_default();

    format!(
        "function {}({params}){returns} {{\n{}\n}}",
        options.function_name,
        body.join("\n")
    )
}

/// Build the two-edit extract preview for `content`: the new function
/// inserted after the range, then the range replaced by a call. When the
/// range is a single blank line both edits sit at the same point and the
/// call comes first.
pub fn plan_extract_function(
    content: &str,
    options: &ExtractFunctionOptions,
    config: &RefactorConfig,
) -> Result<RefactoringPreview, SymdexError> {
    let lines: Vec<&str> = content.lines().collect();
    validate(options, lines.len())?;

    let LineRange {
        start_line,
        end_line,
    } = options.range;
    let selected = &lines[start_line - 1..end_line];
    let last_len = selected[selected.len() - 1].chars().count();

    let insertion = RefactoringEdit {
        file_path: options.file_path.clone(),
        range: EditRange::on_line(end_line, last_len + 1, 0),
        old_text: String::new(),
        new_text: format!(
            "\n{}",
            function_text(selected, options, &config.indent_unit)
        ),
    };

    let placeholders = vec![config.placeholder.as_str(); options.parameters.len()].join(", ");
    let call = RefactoringEdit {
        file_path: options.file_path.clone(),
        range: EditRange::new(start_line, 1, end_line, last_len + 1),
        old_text: selected.join("\n"),
        new_text: format!(
            "{}{}({placeholders});",
            leading_whitespace(selected[0]),
            options.function_name
        ),
    };

    tracing::debug!(
        "Planned extract of {}:{}-{} into {}",
        options.file_path,
        start_line,
        end_line,
        options.function_name
    );

    // Edits at the same point land in list order, so an empty selection
    // needs the call ahead of the function it calls.
    let edits = if call.range.is_empty() {
        vec![call, insertion]
    } else {
        vec![insertion, call]
    };

    Ok(RefactoringPreview::new(
        "Extract Function",
        format!(
            "Extract lines {start_line}-{end_line} into function '{}'",
            options.function_name
        ),
        edits,
    ))
}
