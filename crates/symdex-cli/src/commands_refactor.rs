//! `symdex rename` and `symdex extract`.

use colored::Colorize;
use std::sync::Arc;
use symdex_core::{LocalFileSystem, RefactorConfig, RefactoringResult};
use symdex_index::SymbolIndexer;
use symdex_refactor::{ExtractFunctionOptions, RefactoringService, RenameOptions, preview_diffs};

fn service(
    indexer: SymbolIndexer,
    config: RefactorConfig,
) -> RefactoringService<LocalFileSystem> {
    RefactoringService::new(Arc::new(indexer), LocalFileSystem).with_config(config)
}

/// Print a preview (as a diff) or an execute outcome.
fn report(
    service: &RefactoringService<LocalFileSystem>,
    result: &RefactoringResult,
    applied: bool,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else if let Some(error) = &result.error {
        eprintln!("{} {}", "error:".red().bold(), error);
    } else {
        let preview = &result.preview;
        println!("{}", preview.description.bold());
        println!(
            "  {} edit(s) in {} file(s)",
            preview.summary.total_edits, preview.summary.files_changed
        );

        if applied {
            for path in preview.changed_files() {
                println!("  {} {}", "updated".green(), path);
            }
        } else {
            for diff in preview_diffs(service.file_system(), preview)? {
                println!(
                    "\n{} {}",
                    diff.file_path.underline(),
                    format!("(+{} -{})", diff.lines_added, diff.lines_removed).dimmed()
                );
                for line in diff.unified.lines() {
                    if line.starts_with("+++") || line.starts_with("---") {
                        println!("{}", line.bold());
                    } else if line.starts_with('+') {
                        println!("{}", line.green());
                    } else if line.starts_with('-') {
                        println!("{}", line.red());
                    } else if line.starts_with("@@") {
                        println!("{}", line.cyan());
                    } else {
                        println!("{line}");
                    }
                }
            }
            println!("\nRun again with --apply to write these changes.");
        }
    }

    if !result.success {
        anyhow::bail!("{} failed", result.preview.name);
    }
    Ok(())
}

pub(crate) fn cmd_rename(
    indexer: SymbolIndexer,
    config: RefactorConfig,
    options: &RenameOptions,
    apply: bool,
    json: bool,
) -> anyhow::Result<()> {
    let service = service(indexer, config);
    let result = if apply {
        service.execute_rename(options)
    } else {
        service.preview_rename(options)
    };
    report(&service, &result, apply, json)
}

pub(crate) fn cmd_extract(
    indexer: SymbolIndexer,
    config: RefactorConfig,
    options: &ExtractFunctionOptions,
    apply: bool,
    json: bool,
) -> anyhow::Result<()> {
    let service = service(indexer, config);
    let result = if apply {
        service.execute_extract_function(options)
    } else {
        service.preview_extract_function(options)
    };
    report(&service, &result, apply, json)
}
