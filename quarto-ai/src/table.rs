//! Transposition table for the negamax search.

use std::collections::HashMap;

/// How a stored value relates to the true score of the position.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TtFlag {
    /// The value is the exact score.
    Exact,
    /// The value is an upper bound (search failed low).
    Upper,
    /// The value is a lower bound (search failed high).
    Lower,
}

#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub depth: i32,
    pub value: i32,
    pub flag: TtFlag,
}

/// Memoized search results keyed by the serialized board state.
///
/// The key includes the designated piece, so two identical boards with
/// different hand-offs never collide.
#[derive(Default)]
pub struct TranspositionTable {
    entries: HashMap<String, TtEntry>,
}

impl TranspositionTable {
    pub fn new() -> TranspositionTable {
        TranspositionTable::default()
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&TtEntry> {
        self.entries.get(key)
    }

    /// Store a search result, classifying it against the window the search
    /// was given: at or below the original alpha it is an upper bound, at or
    /// above beta a lower bound, strictly inside the window exact.
    pub fn insert(&mut self, key: String, depth: i32, alpha_prior: i32, beta: i32, value: i32) {
        let flag = if value <= alpha_prior {
            TtFlag::Upper
        } else if value >= beta {
            TtFlag::Lower
        } else {
            TtFlag::Exact
        };
        self.entries.insert(key, TtEntry { depth, value, flag });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of memoized positions, reported through the search stats.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
