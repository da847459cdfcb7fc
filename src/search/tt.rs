//! Transposition table for caching search results
//!
//! A bounded, power-of-two array indexed by the low bits of the Zobrist
//! key. Every slot stores the full 64-bit key and a probe only answers
//! when the stored key matches exactly: two states colliding on a slot
//! index simply evict each other, they never masquerade as one another.
//!
//! # Example
//!
//! ```
//! use hexorcist::board::Pos;
//! use hexorcist::search::{EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1024);
//! let key = 0x1234_5678_9ABC_DEF0;
//! tt.store(key, 5, 100, EntryType::Exact, Some(Pos::new(2, 2)));
//!
//! let (value, best_move) = tt.probe(key, 5, -1000, 1000);
//! assert_eq!(value, Some(100));
//! assert_eq!(best_move, Some(Pos::new(2, 2)));
//! ```

use crate::board::Pos;

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - the true score is at least the stored value
    LowerBound,
    /// Upper bound - the true score is at most the stored value
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    /// Full Zobrist key, verified on probe
    pub key: u64,
    /// Remaining search depth when the value was computed
    pub depth: u8,
    /// Stored value, bounded by the win scores
    pub value: i32,
    pub entry_type: EntryType,
    /// Best move found at this position, used for ordering even when the
    /// value itself is not usable
    pub best_move: Option<Pos>,
}

/// Direct-mapped transposition table.
pub struct TranspositionTable {
    entries: Vec<Option<TtEntry>>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a table with `capacity` slots. Capacity must be a power of
    /// two (validated with the rest of the configuration).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            entries: vec![None; capacity],
            mask: capacity - 1,
        }
    }

    /// Look up `key` for a node searching `depth` plies inside `[alpha,
    /// beta]`. Returns a usable value when the stored entry is deep
    /// enough and its bound type allows a cutoff, and the stored best
    /// move either way.
    #[must_use]
    pub fn probe(&self, key: u64, depth: u8, alpha: i32, beta: i32) -> (Option<i32>, Option<Pos>) {
        let Some(entry) = self.entries[key as usize & self.mask] else {
            return (None, None);
        };
        if entry.key != key {
            return (None, None);
        }

        if entry.depth >= depth {
            let usable = match entry.entry_type {
                EntryType::Exact => true,
                EntryType::LowerBound => entry.value >= beta,
                EntryType::UpperBound => entry.value <= alpha,
            };
            if usable {
                return (Some(entry.value), entry.best_move);
            }
        }
        (None, entry.best_move)
    }

    /// Best move recorded for `key`, for move ordering.
    #[must_use]
    pub fn best_move(&self, key: u64) -> Option<Pos> {
        self.entries[key as usize & self.mask]
            .filter(|entry| entry.key == key)
            .and_then(|entry| entry.best_move)
    }

    /// Store a result. An existing entry survives only when it belongs to
    /// the same key at strictly greater depth; anything else is replaced.
    pub fn store(
        &mut self,
        key: u64,
        depth: u8,
        value: i32,
        entry_type: EntryType,
        best_move: Option<Pos>,
    ) {
        let idx = key as usize & self.mask;
        let replace = match &self.entries[idx] {
            None => true,
            Some(existing) => existing.key != key || depth >= existing.depth,
        };
        if replace {
            self.entries[idx] = Some(TtEntry {
                key,
                depth,
                value,
                entry_type,
                best_move,
            });
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }
}
