//! Hex AI decision core
//!
//! Given a Hex position and an asynchronous stop signal, this crate
//! returns a legal move together with search statistics. Three pieces do
//! the interesting work:
//!
//! - [`search`]: iterative-deepening alpha-beta with interruptible time
//!   control and a transposition table keyed by incremental Zobrist
//!   hashes
//! - [`eval`]: a connection-distance evaluator running Dijkstra over the
//!   hex topology augmented with bridge (two-cell virtual) links
//! - [`agent`]: the narrow player surface a match harness drives
//!
//! The crate owns no clock and spawns no threads: the harness decides
//! when time is up and raises the stop flag, after which the player
//! promptly returns the best move of the deepest completed iteration.
//!
//! # Quick Start
//!
//! ```
//! use hexorcist::{Board, IterativeDeepeningPlayer, Player, Pos, SearchConfig};
//!
//! let mut config = SearchConfig::default();
//! config.max_depth = 2;
//! let mut player = IterativeDeepeningPlayer::with_config(config).unwrap();
//!
//! let board = Board::new(5).place(Pos::new(2, 2)).unwrap();
//! let result = player.get_move(&board).unwrap();
//!
//! assert!(board.place(result.pos).is_ok());
//! println!(
//!     "{} plays ({}, {}) after {} nodes",
//!     player.name(),
//!     result.pos.row,
//!     result.pos.col,
//!     result.nodes
//! );
//! ```

pub mod agent;
pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod search;

// Re-export commonly used types for convenience
pub use agent::{IterativeDeepeningPlayer, MoveResult, Player};
pub use board::{Board, Pos, Stone};
pub use config::SearchConfig;
pub use error::EngineError;
