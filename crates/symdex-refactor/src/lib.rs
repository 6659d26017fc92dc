//! symdex-refactor: Text-based refactoring on top of the symbol index.
//!
//! Plans renames and function extractions as previews (lists of text edits),
//! renders them as unified diffs, and applies them through the `FileSystem`
//! collaborator.
//!
//! # Architecture
//!
//! - **rename**: Kind-specific rename patterns plus cross-file references
//! - **extract**: Extract a line range into a new function
//! - **apply**: Multi-line edit splicing with stale-text checks
//! - **diff**: Unified diff rendering of previews
//! - **service**: `RefactoringService` preview/execute entry points

pub mod apply;
pub mod diff;
pub mod extract;
pub mod rename;
pub mod service;

pub use apply::{EditApplier, apply_edit_to_content, apply_edits_to_content, normalize_edits};
pub use diff::{FileDiff, diff_file, preview_diffs, render_preview_diff};
pub use extract::{ExtractFunctionOptions, LineRange, plan_extract_function};
pub use rename::{RenameOptions, plan_rename};
pub use service::RefactoringService;
