//! Prefix search and definition lookup over the name index.

use crate::scoring::score;
use crate::store::IndexState;
use symdex_core::Symbol;

/// All symbols whose name starts with `prefix` (case-sensitive), best score
/// first, at most `max_results`.
///
/// Ties keep discovery order: name buckets in first-seen order, symbols within
/// a bucket in insertion order. The sort is stable.
pub fn search(
    state: &IndexState,
    prefix: &str,
    max_results: usize,
    exclude_file: Option<&str>,
) -> Vec<Symbol> {
    let recency = state.recency();

    let mut scored: Vec<(usize, &Symbol)> = state
        .names()
        .filter(|(name, _)| name.starts_with(prefix))
        .flat_map(|(_, symbols)| symbols.iter())
        .filter(|symbol| exclude_file.is_none_or(|f| symbol.file_path != f))
        .map(|symbol| (score(symbol, recency), symbol))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(max_results)
        .map(|(_, symbol)| symbol.clone())
        .collect()
}

/// The highest-scoring symbol registered under exactly `name`; the first one
/// wins ties.
pub fn best_definition<'a>(state: &'a IndexState, name: &str) -> Option<&'a Symbol> {
    let recency = state.recency();
    let mut best: Option<(usize, &Symbol)> = None;

    for symbol in state.symbols_named(name) {
        let s = score(symbol, recency);
        if best.is_none_or(|(top, _)| s > top) {
            best = Some((s, symbol));
        }
    }

    best.map(|(_, symbol)| symbol)
}
