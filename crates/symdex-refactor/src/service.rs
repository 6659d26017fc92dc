//! The refactoring service: preview and execute entry points.
//!
//! Every entry point is a catch boundary. Failures come back as a
//! `RefactoringResult` with `success == false`, an empty preview and the
//! error text, never as a panic or `Err`.

use crate::apply::EditApplier;
use crate::extract::{ExtractFunctionOptions, plan_extract_function};
use crate::rename::{RenameOptions, plan_rename};
use std::sync::Arc;
use symdex_core::{FileSystem, RefactorConfig, RefactoringPreview, RefactoringResult, SymdexError};
use symdex_index::SymbolIndexer;

const RENAME: &str = "Rename";
const EXTRACT_FUNCTION: &str = "Extract Function";

/// Plans refactorings against a shared index and applies them through a
/// [`FileSystem`].
pub struct RefactoringService<F: FileSystem> {
    indexer: Arc<SymbolIndexer>,
    fs: F,
    config: RefactorConfig,
}

impl<F: FileSystem> RefactoringService<F> {
    pub fn new(indexer: Arc<SymbolIndexer>, fs: F) -> Self {
        Self {
            indexer,
            fs,
            config: RefactorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RefactorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn indexer(&self) -> &SymbolIndexer {
        &self.indexer
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    fn plan_rename(&self, options: &RenameOptions) -> Result<RefactoringPreview, SymdexError> {
        let content = self.fs.read_file_content(&options.file_path)?;
        plan_rename(&self.indexer, &content, options)
    }

    fn plan_extract(
        &self,
        options: &ExtractFunctionOptions,
    ) -> Result<RefactoringPreview, SymdexError> {
        let content = self.fs.read_file_content(&options.file_path)?;
        plan_extract_function(&content, options, &self.config)
    }

    /// Apply `preview`, then re-index every written file from its new content.
    fn commit(&self, preview: RefactoringPreview) -> Result<RefactoringPreview, SymdexError> {
        let written = EditApplier::new(&self.fs).apply_all(&preview.edits)?;
        for path in &written {
            let content = self.fs.read_file_content(path)?;
            self.indexer.index_file(path, &content);
        }
        tracing::info!(
            "{}: {} edits applied across {} files",
            preview.name,
            preview.summary.total_edits,
            written.len()
        );
        Ok(preview)
    }

    fn finish(name: &str, outcome: Result<RefactoringPreview, SymdexError>) -> RefactoringResult {
        match outcome {
            Ok(preview) => RefactoringResult::ok(preview),
            Err(err) => {
                tracing::warn!("{} failed: {}", name, err);
                RefactoringResult::failed(name, err)
            }
        }
    }

    /// Compute the rename edits without touching any file.
    pub fn preview_rename(&self, options: &RenameOptions) -> RefactoringResult {
        Self::finish(RENAME, self.plan_rename(options))
    }

    /// Re-plan the rename against current content and apply it.
    ///
    /// Every edit is validated before any file is written.
    pub fn execute_rename(&self, options: &RenameOptions) -> RefactoringResult {
        Self::finish(RENAME, self.plan_rename(options).and_then(|p| self.commit(p)))
    }

    /// Compute the extract edits without touching any file.
    pub fn preview_extract_function(&self, options: &ExtractFunctionOptions) -> RefactoringResult {
        Self::finish(EXTRACT_FUNCTION, self.plan_extract(options))
    }

    /// Re-plan the extraction against current content and apply it.
    pub fn execute_extract_function(&self, options: &ExtractFunctionOptions) -> RefactoringResult {
        Self::finish(
            EXTRACT_FUNCTION,
            self.plan_extract(options).and_then(|p| self.commit(p)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::LineRange;
    use symdex_core::{MemoryFileSystem, RenameKind};

    fn service(files: &[(&str, &str)]) -> RefactoringService<MemoryFileSystem> {
        let indexer = Arc::new(SymbolIndexer::new());
        for (path, content) in files {
            indexer.index_file(path, content);
        }
        RefactoringService::new(indexer, MemoryFileSystem::with_files(files.iter().copied()))
    }

    fn rename(file: &str, old: &str, new: &str) -> RenameOptions {
        RenameOptions {
            file_path: file.to_string(),
            old_name: old.to_string(),
            new_name: new.to_string(),
            kind: RenameKind::Function,
        }
    }

    #[test]
    fn preview_does_not_write() {
        let svc = service(&[("/a.ts", "export function add() {}\nadd();\n")]);
        let result = svc.preview_rename(&rename("/a.ts", "add", "sum"));
        assert!(result.success, "{:?}", result.error);
        assert!(!result.preview.edits.is_empty());
        assert_eq!(
            svc.file_system().get("/a.ts").as_deref(),
            Some("export function add() {}\nadd();\n")
        );
    }

    #[test]
    fn execute_rename_writes_and_reindexes() {
        let svc = service(&[("/a.ts", "export function add() {}\nadd();\n")]);
        let result = svc.execute_rename(&rename("/a.ts", "add", "sum"));
        assert!(result.success, "{:?}", result.error);
        assert_eq!(
            svc.file_system().get("/a.ts").as_deref(),
            Some("export function sum() {}\nsum();\n")
        );
        assert!(svc.indexer().get_symbol_definition("add").is_none());
        assert!(svc.indexer().get_symbol_definition("sum").is_some());
    }

    #[test]
    fn missing_target_file_is_a_failed_result() {
        let svc = service(&[]);
        let result = svc.preview_rename(&rename("/missing.ts", "add", "sum"));
        assert!(!result.success);
        assert!(result.preview.edits.is_empty());
        assert_eq!(result.preview.name, "Rename");
        assert!(result.error.unwrap().contains("missing.ts"));
    }

    #[test]
    fn execute_extract_function_applies_both_edits() {
        let svc = service(&[("/m.ts", "function main() {\n  step();\n  done();\n}\n")]);
        let options = ExtractFunctionOptions {
            file_path: "/m.ts".to_string(),
            range: LineRange::new(2, 3),
            function_name: "finish".to_string(),
            parameters: Vec::new(),
            return_type: None,
        };

        let result = svc.execute_extract_function(&options);
        assert!(result.success, "{:?}", result.error);
        assert_eq!(
            svc.file_system().get("/m.ts").as_deref(),
            Some("function main() {\n  finish();\nfunction finish() {\n  step();\n  done();\n}\n}\n")
        );
        assert!(svc.indexer().get_symbol_definition("finish").is_some());
    }

    #[test]
    fn execute_extract_of_a_blank_line_replaces_it_with_the_call() {
        let svc = service(&[("/m.ts", "a();\n\nb();\n")]);
        let options = ExtractFunctionOptions {
            file_path: "/m.ts".to_string(),
            range: LineRange::new(2, 2),
            function_name: "helper".to_string(),
            parameters: Vec::new(),
            return_type: None,
        };

        let result = svc.execute_extract_function(&options);
        assert!(result.success, "{:?}", result.error);
        assert_eq!(
            svc.file_system().get("/m.ts").as_deref(),
            Some("a();\nhelper();\nfunction helper() {\n\n}\nb();\n")
        );
    }

    #[test]
    fn invalid_extract_range_is_reported() {
        let svc = service(&[("/m.ts", "a();\n")]);
        let options = ExtractFunctionOptions {
            file_path: "/m.ts".to_string(),
            range: LineRange::new(3, 4),
            function_name: "f".to_string(),
            parameters: Vec::new(),
            return_type: None,
        };
        let result = svc.preview_extract_function(&options);
        assert!(!result.success);
        assert_eq!(result.preview.name, "Extract Function");
        assert!(result.error.unwrap().starts_with("Invalid range"));
    }
}
