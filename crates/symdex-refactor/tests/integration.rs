//! Integration tests for symdex-refactor: planning and applying renames and
//! extractions over a shared index and an in-memory file system.

use std::sync::Arc;
use symdex_core::{MemoryFileSystem, RenameKind};
use symdex_index::SymbolIndexer;
use symdex_refactor::{
    ExtractFunctionOptions, LineRange, RefactoringService, RenameOptions, render_preview_diff,
};

fn service(files: &[(&str, &str)]) -> RefactoringService<MemoryFileSystem> {
    let indexer = Arc::new(SymbolIndexer::new());
    for (path, content) in files {
        indexer.index_file(path, content);
    }
    RefactoringService::new(indexer, MemoryFileSystem::with_files(files.iter().copied()))
}

fn rename_add() -> RenameOptions {
    RenameOptions {
        file_path: "/a.ts".to_string(),
        old_name: "add".to_string(),
        new_name: "sum".to_string(),
        kind: RenameKind::Function,
    }
}

// ── Rename ─────────────────────────────────────────────────────────────────

#[test]
fn rename_preview_includes_call_site_in_other_file() {
    let svc = service(&[
        ("/b.ts", "const total = add(1,2);\n"),
        ("/a.ts", "export function add(a, b) { return a + b; }\n"),
    ]);

    let result = svc.preview_rename(&rename_add());
    assert!(result.success, "{:?}", result.error);

    let in_b: Vec<_> = result
        .preview
        .edits
        .iter()
        .filter(|e| e.file_path == "/b.ts")
        .collect();
    assert_eq!(in_b.len(), 1);
    assert_eq!(in_b[0].old_text, "add");
    assert_eq!(in_b[0].new_text, "sum");
    assert_eq!(result.preview.summary.files_changed, 2);
}

#[test]
fn execute_rename_updates_every_file_and_the_index() {
    let svc = service(&[
        ("/b.ts", "const total = add(1,2);\nconst again = add(3,4);\n"),
        ("/a.ts", "export function add(a, b) { return a + b; }\n"),
    ]);

    let result = svc.execute_rename(&rename_add());
    assert!(result.success, "{:?}", result.error);

    let fs = svc.file_system();
    assert_eq!(
        fs.get("/a.ts").as_deref(),
        Some("export function sum(a, b) { return a + b; }\n")
    );
    assert_eq!(
        fs.get("/b.ts").as_deref(),
        Some("const total = sum(1,2);\nconst again = sum(3,4);\n")
    );

    let refs = svc.indexer().find_references("sum");
    assert_eq!(refs.len(), 3);
    assert!(refs[0].is_definition);
    assert!(svc.indexer().find_references("add").is_empty());
}

#[test]
fn execute_rename_rejects_files_changed_since_indexing() {
    let svc = service(&[
        ("/b.ts", "const total = add(1,2);\n"),
        ("/a.ts", "export function add(a, b) { return a + b; }\n"),
    ]);
    // b.ts changes on disk without being re-indexed.
    svc.file_system()
        .insert("/b.ts", "const total = mul(1,2);\n");

    let result = svc.execute_rename(&rename_add());
    assert!(!result.success);
    assert!(result.error.unwrap().contains("Stale edit"));
    // Nothing was written, not even the target file.
    assert_eq!(
        svc.file_system().get("/a.ts").as_deref(),
        Some("export function add(a, b) { return a + b; }\n")
    );
}

#[test]
fn preview_diff_shows_each_changed_file() {
    let svc = service(&[
        ("/b.ts", "const total = add(1,2);\n"),
        ("/a.ts", "export function add(a, b) { return a + b; }\n"),
    ]);
    let result = svc.preview_rename(&rename_add());
    let diff = render_preview_diff(svc.file_system(), &result.preview).unwrap();

    assert!(diff.contains("--- a/a.ts"));
    assert!(diff.contains("+export function sum(a, b) { return a + b; }"));
    assert!(diff.contains("--- a/b.ts"));
    assert!(diff.contains("+const total = sum(1,2);"));
}

// ── Extract function ───────────────────────────────────────────────────────

fn extract_options() -> ExtractFunctionOptions {
    ExtractFunctionOptions {
        file_path: "/main.ts".to_string(),
        range: LineRange::new(2, 4),
        function_name: "report".to_string(),
        parameters: vec!["items".to_string()],
        return_type: Some("void".to_string()),
    }
}

const MAIN: &str = "function main(items) {\n  const n = items.length;\n  console.log(n);\n  return n;\n}\n";

#[test]
fn extract_preview_has_insertion_and_call() {
    let svc = service(&[("/main.ts", MAIN)]);
    let result = svc.preview_extract_function(&extract_options());
    assert!(result.success, "{:?}", result.error);

    let preview = &result.preview;
    assert_eq!(preview.edits.len(), 2);
    assert_eq!(preview.summary.files_changed, 1);
    assert!(preview.edits[0].old_text.is_empty());
    assert!(preview.edits[0].new_text.starts_with("\nfunction report(items): void {"));
    assert_eq!(preview.edits[1].new_text, "  report(_);");
    assert_eq!(svc.file_system().get("/main.ts").as_deref(), Some(MAIN));
}

#[test]
fn execute_extract_rewrites_the_file() {
    let svc = service(&[("/main.ts", MAIN)]);
    let result = svc.execute_extract_function(&extract_options());
    assert!(result.success, "{:?}", result.error);

    let expected = "function main(items) {\n  report(_);\nfunction report(items): void {\n  const n = items.length;\n  console.log(n);\n  return n;\n}\n}\n";
    assert_eq!(svc.file_system().get("/main.ts").as_deref(), Some(expected));

    let report = svc.indexer().get_symbol_definition("report").unwrap();
    assert_eq!(report.line, 3);
}
