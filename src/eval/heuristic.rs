//! Scalar evaluation from the two connection distances

use super::distance::connection_distance;
use crate::board::{Board, Stone};
use crate::config::SearchConfig;

/// Evaluate `board` from `side`'s point of view:
/// `a * d(opponent) - b * d(side)` with the configured weights.
///
/// Positive means `side` is closer to connecting than the opponent.
/// Weight bounds checked in [`SearchConfig::validate`] keep the result
/// strictly between the win scores for every supported board size, so
/// terminal scores always dominate.
#[must_use]
pub fn evaluate(board: &Board, side: Stone, config: &SearchConfig) -> i32 {
    let own = connection_distance(board, side, config.bridges) as i32;
    let opponent = connection_distance(board, side.opponent(), config.bridges) as i32;
    config.opponent_distance_weight * opponent - config.own_distance_weight * own
}
