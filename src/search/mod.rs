//! Search algorithms for the Hex engine

pub mod alphabeta;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchOutcome, Searcher};
pub use tt::{EntryType, TranspositionTable, TtEntry};
pub use zobrist::ZobristTable;

/// Score of a proven win. Heuristic values are bounded strictly below
/// this, so terminal results always dominate.
pub const WIN: i32 = 100_000;

/// Window bound strictly outside every reachable score.
pub const SCORE_INF: i32 = WIN + 1;

/// Sentinel returned by a cancelled kernel call. Callers detect
/// cancellation through the searcher state, never through this value.
pub(crate) const CANCELLED: i32 = 0;
