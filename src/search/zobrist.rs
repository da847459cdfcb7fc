//! Zobrist hashing for position identification
//!
//! Each (cell, occupant) pair and each side to move gets a random 64-bit
//! constant; a position's key is the XOR of the constants it exhibits.
//! XOR being its own inverse makes the per-move update O(1).
//!
//! Tables are derived from a seeded generator, so keys are stable within
//! a process for a given (size, seed) pair and tests can pin them. The
//! tables for each pair are built once and shared afterwards.
//!
//! # Example
//!
//! ```
//! use hexorcist::board::{Board, Pos, Stone};
//! use hexorcist::config::DEFAULT_ZOBRIST_SEED;
//! use hexorcist::search::ZobristTable;
//!
//! let zobrist = ZobristTable::shared(5, DEFAULT_ZOBRIST_SEED);
//! let board = Board::new(5);
//!
//! let key = zobrist.hash(&board);
//! let after = board.place(Pos::new(2, 2)).unwrap();
//!
//! // Incremental update is equivalent to full recomputation.
//! assert_eq!(zobrist.play(key, Pos::new(2, 2), Stone::Black), zobrist.hash(&after));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{Board, Pos, Stone};

/// Occupancy plane order inside [`ZobristTable::cells`].
#[inline]
fn plane(stone: Stone) -> usize {
    match stone {
        Stone::Empty => 0,
        Stone::Black => 1,
        Stone::White => 2,
    }
}

#[inline]
fn turn(stone: Stone) -> usize {
    match stone {
        Stone::Black => 0,
        Stone::White => 1,
        Stone::Empty => unreachable!("empty is never on move"),
    }
}

/// Zobrist constants for one board size.
pub struct ZobristTable {
    size: usize,
    /// One constant per (cell, occupant) pair, empty plane included, so a
    /// full hash covers every cell rather than just the stones.
    cells: Vec<[u64; 3]>,
    /// One constant per side to move.
    turns: [u64; 2],
}

impl ZobristTable {
    /// Build tables for an N×N board from a deterministic stream seeded
    /// with `seed ^ N`.
    #[must_use]
    pub fn new(size: usize, seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed ^ size as u64);
        let cells = (0..size * size)
            .map(|_| [rng.next_u64(), rng.next_u64(), rng.next_u64()])
            .collect();
        let turns = [rng.next_u64(), rng.next_u64()];
        Self { size, cells, turns }
    }

    /// Fetch the process-wide table for `(size, seed)`, building it on
    /// first use. Subsequent calls share the same allocation.
    #[must_use]
    pub fn shared(size: usize, seed: u64) -> Arc<ZobristTable> {
        static TABLES: OnceLock<Mutex<HashMap<(usize, u64), Arc<ZobristTable>>>> = OnceLock::new();
        let registry = TABLES.get_or_init(|| Mutex::new(HashMap::new()));
        let mut registry = registry.lock().expect("zobrist registry poisoned");
        Arc::clone(
            registry
                .entry((size, seed))
                .or_insert_with(|| Arc::new(ZobristTable::new(size, seed))),
        )
    }

    /// Full hash of a position: every cell's occupancy constant XOR the
    /// side-to-move constant.
    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        debug_assert_eq!(board.size(), self.size);
        let mut key = self.turns[turn(board.to_move())];
        for idx in 0..self.size * self.size {
            let pos = Pos::from_index(idx, self.size);
            key ^= self.cells[idx][plane(board.get(pos))];
        }
        key
    }

    /// Key after `stone`'s owner places on `pos`: the cell flips from the
    /// empty plane to the stone's plane and the turn passes to the
    /// opponent. Applying the same update again undoes it.
    #[inline]
    #[must_use]
    pub fn play(&self, key: u64, pos: Pos, stone: Stone) -> u64 {
        debug_assert!(stone != Stone::Empty);
        let idx = pos.index(self.size);
        key ^ self.cells[idx][plane(Stone::Empty)]
            ^ self.cells[idx][plane(stone)]
            ^ self.turns[turn(stone)]
            ^ self.turns[turn(stone.opponent())]
    }
}
