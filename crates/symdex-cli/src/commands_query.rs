//! `symdex index|search|definition|references|implementations|stats`.

use colored::Colorize;
use std::path::Path;
use symdex_core::{Reference, SearchOptions, Symbol};
use symdex_index::{DirectoryIndexResult, SymbolIndexer};

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_symbol(symbol: &Symbol) {
    let parent = symbol
        .parent
        .as_deref()
        .map(|p| format!(" in {p}"))
        .unwrap_or_default();
    println!(
        "  {} {}{}  {}:{}",
        format!("[{}]", symbol.kind).dimmed(),
        symbol.name.bold(),
        parent,
        symbol.file_path,
        symbol.line
    );
    if let Some(detail) = &symbol.detail {
        println!("      {}", crate::truncate_str(detail, 100).dimmed());
    }
}

fn print_reference(reference: &Reference) {
    let marker = if reference.is_definition {
        "def".green().bold()
    } else {
        "ref".cyan()
    };
    println!(
        "  {} {}:{}:{}  {}",
        marker,
        reference.file_path,
        reference.line,
        reference.column,
        crate::truncate_str(reference.context.trim(), 100)
    );
}

pub(crate) fn cmd_index(
    indexer: &SymbolIndexer,
    root: &Path,
    result: &DirectoryIndexResult,
    verbose: bool,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        return print_json(result);
    }

    println!("{} {}", "Indexed".bold(), root.display());
    println!("  Files scanned:  {}", result.files_scanned);
    println!("  Files indexed:  {}", result.files_indexed);
    println!("  Files skipped:  {}", result.files_skipped);
    println!("  Symbols found:  {}", result.total_symbols);

    if verbose {
        println!();
        for path in indexer.indexed_files() {
            println!("{}", path.underline());
            for symbol in indexer.get_file_symbols(&path) {
                print_symbol(&symbol);
            }
        }
    }
    Ok(())
}

pub(crate) fn cmd_search(
    indexer: &SymbolIndexer,
    prefix: &str,
    k: Option<usize>,
    exclude: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let options = SearchOptions {
        max_results: k,
        exclude_current_file: exclude.map(str::to_string),
    };
    let results = indexer.search(prefix, &options);

    if json {
        return print_json(&results);
    }
    if results.is_empty() {
        println!("No symbols starting with '{prefix}'.");
        return Ok(());
    }
    println!("{} result(s) for '{}':", results.len(), prefix.bold());
    for symbol in &results {
        print_symbol(symbol);
    }
    Ok(())
}

pub(crate) fn cmd_definition(indexer: &SymbolIndexer, name: &str, json: bool) -> anyhow::Result<()> {
    let definition = indexer.get_symbol_definition(name);
    if json {
        return print_json(&definition);
    }
    match definition {
        Some(symbol) => {
            print_symbol(&symbol);
            if let Some(doc) = &symbol.documentation {
                for line in doc.lines() {
                    println!("      {}", line.italic());
                }
            }
        }
        None => println!("No definition found for '{name}'."),
    }
    Ok(())
}

pub(crate) fn cmd_references(indexer: &SymbolIndexer, name: &str, json: bool) -> anyhow::Result<()> {
    let references = indexer.find_references(name);
    if json {
        return print_json(&references);
    }
    if references.is_empty() {
        println!("No references to '{name}'.");
        return Ok(());
    }
    println!("{} reference(s) to '{}':", references.len(), name.bold());
    for reference in &references {
        print_reference(reference);
    }
    Ok(())
}

pub(crate) fn cmd_implementations(
    indexer: &SymbolIndexer,
    name: &str,
    json: bool,
) -> anyhow::Result<()> {
    let implementations = indexer.find_implementations(name);
    if json {
        return print_json(&implementations);
    }
    if implementations.is_empty() {
        println!("No implementations of '{name}'.");
        return Ok(());
    }
    println!("{} implementation(s) of '{}':", implementations.len(), name.bold());
    for symbol in &implementations {
        print_symbol(symbol);
    }
    Ok(())
}

pub(crate) fn cmd_stats(indexer: &SymbolIndexer, json: bool) -> anyhow::Result<()> {
    let stats = indexer.get_stats();
    if json {
        return print_json(&stats);
    }
    println!("{}", "Index statistics".bold());
    println!("  Files indexed:  {}", stats.files_indexed);
    println!("  Total symbols:  {}", stats.total_symbols);
    println!("  Recent files:");
    for path in stats.recent_files.iter().take(10) {
        println!("    {path}");
    }
    if stats.recent_files.len() > 10 {
        println!("    ... and {} more", stats.recent_files.len() - 10);
    }
    Ok(())
}
