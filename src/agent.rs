//! Player surface for the match harness
//!
//! The harness sees three capabilities: a name, a synchronous move
//! computation, and a stop request that may arrive from any thread
//! (typically a timeout timer). The search machinery itself stays
//! behind [`IterativeDeepeningPlayer`].
//!
//! # Example
//!
//! ```
//! use hexorcist::{Board, IterativeDeepeningPlayer, Player, SearchConfig};
//!
//! let mut config = SearchConfig::default();
//! config.max_depth = 2;
//! let mut player = IterativeDeepeningPlayer::with_config(config).unwrap();
//!
//! let result = player.get_move(&Board::new(5)).unwrap();
//! assert!(result.depth >= 1);
//! assert_eq!(result.search_type, "alpha-beta-ids");
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::warn;

use crate::board::{Board, Pos};
use crate::config::SearchConfig;
use crate::error::EngineError;
use crate::search::Searcher;

/// Identifier of the search strategy reported in [`MoveResult`].
pub const SEARCH_TYPE_IDS: &str = "alpha-beta-ids";

/// A chosen move with search statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// The move to play. Always legal on the input board.
    pub pos: Pos,
    /// Value of the committed iteration, from the mover's point of view.
    pub score: i32,
    /// Deepest fully completed iteration.
    pub depth: u8,
    /// Nodes explored across all iterations.
    pub nodes: u64,
    /// Wall-clock time of the call.
    pub time_ms: u64,
    /// Which strategy produced the move.
    pub search_type: &'static str,
}

/// What a harness may ask of a player.
pub trait Player {
    /// Stable identifier shown in match logs and UIs.
    fn name(&self) -> &str;

    /// Compute a move for the side to move on `board`. Returns once the
    /// stop flag is observed, the configured depth is reached, or the
    /// game tree is exhausted.
    fn get_move(&mut self, board: &Board) -> Result<MoveResult, EngineError>;

    /// Ask a running [`get_move`](Player::get_move) to wrap up with the
    /// best committed result. Callable from any thread; the harness may
    /// reset the flag once the move call has returned.
    fn request_stop(&self);
}

/// Hex player driven by iterative-deepening alpha-beta search.
pub struct IterativeDeepeningPlayer {
    name: String,
    searcher: Searcher,
    stop: Arc<AtomicBool>,
}

impl IterativeDeepeningPlayer {
    /// Player with the default configuration.
    pub fn new() -> Result<Self, EngineError> {
        Self::with_config(SearchConfig::default())
    }

    /// Player with a custom configuration, rejected here if invalid.
    pub fn with_config(config: SearchConfig) -> Result<Self, EngineError> {
        Ok(Self {
            name: "hexorcist".to_string(),
            searcher: Searcher::new(config)?,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Shared handle to the stop flag, for timer threads.
    #[must_use]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Forget cached positions. Call between games; within one game the
    /// transposition table carries over from move to move.
    pub fn reset(&mut self) {
        self.searcher.clear_tt();
    }
}

impl Player for IterativeDeepeningPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, board: &Board) -> Result<MoveResult, EngineError> {
        let start = Instant::now();
        let outcome = self.searcher.search(board, Some(&*self.stop));

        let pos = match outcome.best_move {
            Some(pos) => pos,
            None => {
                // Nothing committed: the flag fired inside the first
                // iteration, or the harness asked on a finished game.
                // Answer with the first empty cell rather than stalling.
                let fallback = board
                    .legal_moves()
                    .into_iter()
                    .next()
                    .ok_or(EngineError::NoLegalMove)?;
                warn!(
                    "no completed iteration; falling back to ({}, {})",
                    fallback.row, fallback.col
                );
                fallback
            }
        };

        Ok(MoveResult {
            pos,
            score: outcome.value,
            depth: outcome.depth,
            nodes: outcome.nodes,
            time_ms: start.elapsed().as_millis() as u64,
            search_type: SEARCH_TYPE_IDS,
        })
    }

    fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }
}
