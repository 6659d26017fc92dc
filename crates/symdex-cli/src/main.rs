//! symdex-cli: command-line host for the symdex symbol index and
//! refactoring engine.
//!
//! Each run indexes the project directory first; nothing is persisted.

mod commands_query;
mod commands_refactor;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use symdex_core::{RenameKind, SymdexConfig};
use symdex_index::SymbolIndexer;

#[derive(Parser)]
#[command(
    name = "symdex",
    about = "Symbol index, search and text-based refactoring for source trees"
)]
#[command(version, propagate_version = true)]
struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Config file (defaults to ~/.symdex/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index the project and print a summary
    Index {
        /// List every symbol found
        #[arg(short, long)]
        verbose: bool,
    },

    /// Prefix search over symbol names
    Search {
        /// Name prefix (case-sensitive)
        prefix: String,

        /// Number of results
        #[arg(short, long)]
        k: Option<usize>,

        /// Leave out symbols defined in this file
        #[arg(long)]
        exclude: Option<PathBuf>,
    },

    /// Show the best definition of a symbol
    Definition {
        name: String,
    },

    /// List the definition and every reference of a symbol
    References {
        name: String,
    },

    /// List classes and interfaces implementing or extending a symbol
    Implementations {
        name: String,
    },

    /// Show index statistics
    Stats,

    /// Rename a symbol across the project
    Rename {
        /// File declaring the symbol
        #[arg(long)]
        file: PathBuf,

        /// Current name
        #[arg(long)]
        old: String,

        /// New name
        #[arg(long)]
        new: String,

        /// function, variable, class, interface, type or import
        #[arg(long, default_value = "function")]
        kind: RenameKind,

        /// Write the changes instead of printing a diff
        #[arg(long)]
        apply: bool,
    },

    /// Extract a line range into a new function
    Extract {
        #[arg(long)]
        file: PathBuf,

        /// First line of the range (1-based)
        #[arg(long)]
        start: usize,

        /// Last line of the range (inclusive)
        #[arg(long)]
        end: usize,

        /// Name of the new function
        #[arg(long)]
        name: String,

        /// Parameter of the new function (repeatable)
        #[arg(long = "param")]
        params: Vec<String>,

        /// Return type annotation
        #[arg(long)]
        returns: Option<String>,

        /// Write the changes instead of printing a diff
        #[arg(long)]
        apply: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symdex=info".parse().expect("valid tracing directive")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SymdexConfig::load(path)?,
        None => SymdexConfig::load_or_default(),
    };
    let root = match cli.path {
        Some(p) => p,
        None => std::env::current_dir()?,
    }
    .canonicalize()?;

    tracing::debug!("Indexing {} with {:?}", root.display(), config.index);
    let indexer = SymbolIndexer::with_config(&config);
    let indexed = indexer.index_directory(&root)?;
    let json = cli.json;

    match cli.command {
        Commands::Index { verbose } => {
            commands_query::cmd_index(&indexer, &root, &indexed, verbose, json)?;
        }
        Commands::Search { prefix, k, exclude } => {
            let exclude = exclude.map(|p| absolute_path(&p)).transpose()?;
            commands_query::cmd_search(&indexer, &prefix, k, exclude.as_deref(), json)?;
        }
        Commands::Definition { name } => {
            commands_query::cmd_definition(&indexer, &name, json)?;
        }
        Commands::References { name } => {
            commands_query::cmd_references(&indexer, &name, json)?;
        }
        Commands::Implementations { name } => {
            commands_query::cmd_implementations(&indexer, &name, json)?;
        }
        Commands::Stats => {
            commands_query::cmd_stats(&indexer, json)?;
        }
        Commands::Rename {
            file,
            old,
            new,
            kind,
            apply,
        } => {
            let options = symdex_refactor::RenameOptions {
                file_path: absolute_path(&file)?,
                old_name: old,
                new_name: new,
                kind,
            };
            commands_refactor::cmd_rename(indexer, config.refactor, &options, apply, json)?;
        }
        Commands::Extract {
            file,
            start,
            end,
            name,
            params,
            returns,
            apply,
        } => {
            let options = symdex_refactor::ExtractFunctionOptions {
                file_path: absolute_path(&file)?,
                range: symdex_refactor::LineRange::new(start, end),
                function_name: name,
                parameters: params,
                return_type: returns,
            };
            commands_refactor::cmd_extract(indexer, config.refactor, &options, apply, json)?;
        }
    }

    Ok(())
}

// ── Helpers (shared across modules) ────────────────────────────────────────

/// Canonical path string, matching the keys produced by directory indexing.
fn absolute_path(path: &Path) -> anyhow::Result<String> {
    Ok(path.canonicalize()?.to_string_lossy().to_string())
}

pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    }
}
