//! symdex-index: Line-pattern symbol indexing with ranked search and
//! reference resolution.
//!
//! Extracts declarations (functions, classes, interfaces, types, constants,
//! methods) from TypeScript/JavaScript, Python and Rust sources, keeps them
//! in an in-memory inverted index, and answers prefix searches ranked by
//! file recency and symbol kind.
//!
//! # Architecture
//!
//! - **extractor**: `SymbolExtractor` trait and the shared line scanner
//! - **languages**: Per-language extractors (TypeScript/JavaScript, Python, Rust)
//! - **parser**: Dispatches a file to the extractor for its extension
//! - **store**: File index, name index, content cache and recency list under one lock
//! - **recency**: Bounded most-recently-indexed file list
//! - **scoring** / **search**: Ranking and prefix search, definition lookup
//! - **resolver**: Whole-word reference scan and implementation lookup
//! - **incremental**: SHA-256 change detection for directory walks
//! - **indexer**: The `SymbolIndexer` service tying the above together

pub mod extractor;
pub mod incremental;
pub mod indexer;
pub mod languages;
pub mod parser;
pub mod recency;
pub mod resolver;
pub mod scoring;
pub mod search;
pub mod store;

pub use extractor::SymbolExtractor;
pub use incremental::ChangeDetector;
pub use indexer::{DirectoryIndexResult, SymbolIndexer};
pub use parser::{CodeParser, ParseResult};
pub use recency::{DEFAULT_MAX_RECENT_FILES, RecencyTracker};
pub use resolver::{line_text, word_pattern};
pub use store::{FileIndex, IndexState};
