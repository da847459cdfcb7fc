//! Error types for the Hex engine

use thiserror::Error;

/// Errors surfaced to the harness.
///
/// Cancellation is deliberately absent: a fired stop signal is normal
/// control flow inside the search, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Attempted to place a stone on a non-empty cell or a finished game.
    #[error("illegal move at ({row}, {col})")]
    IllegalMove { row: u8, col: u8 },

    /// The position has no empty cell yet no winner. Cannot happen for a
    /// board reached through legal play; indicates harness misuse.
    #[error("no legal move in a non-terminal position")]
    NoLegalMove,

    /// A configuration option was rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
