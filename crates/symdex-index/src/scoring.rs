//! Ranking score for symbols: recency of the defining file plus a weight per kind.

use crate::recency::RecencyTracker;
use symdex_core::{Symbol, SymbolKind};

/// Points per recency rank.
const RECENCY_STEP: usize = 10;

/// Weight contributed by a symbol's kind.
pub fn kind_weight(kind: SymbolKind) -> usize {
    match kind {
        SymbolKind::Function | SymbolKind::Method => 5,
        SymbolKind::Class | SymbolKind::Interface => 3,
        SymbolKind::Constant => 2,
        SymbolKind::Variable | SymbolKind::Type => 0,
    }
}

/// `(len - position) * 10` for files on the recency list, 0 otherwise.
pub fn recency_weight(recency: &RecencyTracker, file_path: &str) -> usize {
    recency
        .position(file_path)
        .map(|pos| (recency.len() - pos) * RECENCY_STEP)
        .unwrap_or(0)
}

/// Combined ranking score.
pub fn score(symbol: &Symbol, recency: &RecencyTracker) -> usize {
    recency_weight(recency, &symbol.file_path) + kind_weight(symbol.kind)
}
