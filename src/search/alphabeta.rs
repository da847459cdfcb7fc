//! Alpha-beta search with iterative deepening and transposition table
//!
//! Negamax with fail-soft alpha-beta pruning. The deepener runs the root
//! search at depth 1, 2, 3, … and commits a result only when its
//! iteration ran to completion; a stop signal arriving mid-iteration
//! leaves the previous commitment untouched. That commit-on-complete
//! rule is what lets the harness cancel at any instant and still get the
//! best fully-analyzed move.
//!
//! # Example
//!
//! ```
//! use hexorcist::board::Board;
//! use hexorcist::config::SearchConfig;
//! use hexorcist::search::Searcher;
//!
//! let mut config = SearchConfig::default();
//! config.max_depth = 2;
//! let mut searcher = Searcher::new(config).unwrap();
//!
//! let outcome = searcher.search(&Board::new(5), None);
//! assert!(outcome.best_move.is_some());
//! assert_eq!(outcome.depth, 2);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

use crate::board::{Board, Pos};
use crate::config::SearchConfig;
use crate::error::EngineError;
use crate::eval::evaluate;

use super::tt::{EntryType, TranspositionTable};
use super::zobrist::ZobristTable;
use super::{CANCELLED, SCORE_INF, WIN};

/// Result of one `search` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best move of the deepest completed iteration, `None` when no
    /// iteration completed (immediate stop or terminal root).
    pub best_move: Option<Pos>,
    /// Value of the committed move, from the mover's point of view.
    pub value: i32,
    /// Deepest completed iteration.
    pub depth: u8,
    /// Nodes visited across all iterations.
    pub nodes: u64,
}

/// Iterative-deepening alpha-beta searcher.
///
/// Owns its transposition table; the table carries over between calls
/// and is dropped whenever the board size changes. One searcher serves
/// one game at a time.
pub struct Searcher {
    config: SearchConfig,
    tt: TranspositionTable,
    nodes: u64,
    stopped: bool,
    board_size: usize,
}

impl Searcher {
    /// Build a searcher, rejecting an invalid configuration.
    pub fn new(config: SearchConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            tt: TranspositionTable::new(config.tt_capacity),
            config,
            nodes: 0,
            stopped: false,
            board_size: 0,
        })
    }

    /// Drop cached positions. Call between games.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Run iterative deepening from `board` until the stop flag fires,
    /// `max_depth` is reached, or the tree is exhausted.
    ///
    /// The flag is polled at every kernel entry and before every root
    /// child, so the call returns promptly once it is raised.
    #[must_use]
    pub fn search(&mut self, board: &Board, stop: Option<&AtomicBool>) -> SearchOutcome {
        self.nodes = 0;
        self.stopped = false;
        if board.size() != self.board_size {
            self.tt.clear();
            self.board_size = board.size();
        }

        let mut outcome = SearchOutcome {
            best_move: None,
            value: 0,
            depth: 0,
            nodes: 0,
        };

        if board.is_terminal() {
            return outcome;
        }

        let zobrist = ZobristTable::shared(board.size(), self.config.zobrist_seed);
        let mut work = board.clone();
        let root_key = zobrist.hash(&work);
        // Iterating past the number of empty cells would only repeat the
        // deepest possible search.
        let horizon = (self.config.max_depth as usize).min(board.empty_count()) as u8;

        for depth in 1..=horizon {
            if self.stop_requested(stop) {
                break;
            }
            let (best_move, value) = self.search_root(&mut work, &zobrist, root_key, depth, stop);
            if self.stopped {
                break;
            }
            let Some(best_move) = best_move else {
                break;
            };
            outcome.best_move = Some(best_move);
            outcome.value = value;
            outcome.depth = depth;
            debug!(
                "depth {depth} complete: move ({}, {}) value {value} nodes {}",
                best_move.row, best_move.col, self.nodes
            );
            if value.abs() >= WIN {
                // Proven result; deeper iterations cannot change it.
                break;
            }
        }

        outcome.nodes = self.nodes;
        outcome
    }

    /// One full-window maximization over the root moves.
    fn search_root(
        &mut self,
        board: &mut Board,
        zobrist: &ZobristTable,
        key: u64,
        depth: u8,
        stop: Option<&AtomicBool>,
    ) -> (Option<Pos>, i32) {
        let mut alpha = -SCORE_INF;
        let beta = SCORE_INF;
        let mut best_move = None;
        let mut best_value = -SCORE_INF;

        for mv in order_moves(board, self.tt.best_move(key)) {
            if self.stop_requested(stop) {
                break;
            }
            let stone = board.to_move();
            board.apply(mv);
            let child_key = zobrist.play(key, mv, stone);
            let value = -self.alpha_beta(board, zobrist, child_key, depth - 1, -beta, -alpha, stop);
            board.undo(mv);
            if self.stopped {
                break;
            }
            if value > best_value {
                best_value = value;
                best_move = Some(mv);
            }
            alpha = alpha.max(value);
        }

        if !self.stopped {
            if let Some(mv) = best_move {
                self.tt.store(key, depth, best_value, EntryType::Exact, Some(mv));
            }
        }
        (best_move, best_value)
    }

    /// Negamax kernel. Every returned value is from the perspective of
    /// the side to move at this node.
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        zobrist: &ZobristTable,
        key: u64,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        stop: Option<&AtomicBool>,
    ) -> i32 {
        if self.stop_requested(stop) {
            return CANCELLED;
        }
        self.nodes += 1;

        if let Some(winner) = board.winner() {
            return if winner == board.to_move() { WIN } else { -WIN };
        }
        if depth == 0 {
            return evaluate(board, board.to_move(), &self.config);
        }

        let alpha_origin = alpha;
        let (tt_value, tt_move) = self.tt.probe(key, depth, alpha, beta);
        if let Some(value) = tt_value {
            return value;
        }

        let mut best_value = -SCORE_INF;
        let mut best_move = None;
        for mv in order_moves(board, tt_move) {
            let stone = board.to_move();
            board.apply(mv);
            let child_key = zobrist.play(key, mv, stone);
            let value = -self.alpha_beta(board, zobrist, child_key, depth - 1, -beta, -alpha, stop);
            board.undo(mv);
            if self.stopped {
                // Partial results from an aborted child loop are neither
                // propagated nor stored.
                return CANCELLED;
            }
            if value > best_value {
                best_value = value;
                best_move = Some(mv);
            }
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }

        let Some(best_move) = best_move else {
            // A full board with no winner cannot arise in Hex.
            return evaluate(board, board.to_move(), &self.config);
        };

        let entry_type = if best_value <= alpha_origin {
            EntryType::UpperBound
        } else if best_value >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        self.tt.store(key, depth, best_value, entry_type, Some(best_move));
        best_value
    }

    /// Poll the harness flag. Once observed, the searcher stays stopped
    /// for the rest of the call.
    #[inline]
    fn stop_requested(&mut self, stop: Option<&AtomicBool>) -> bool {
        if self.stopped {
            return true;
        }
        if let Some(flag) = stop {
            if flag.load(Ordering::Acquire) {
                self.stopped = true;
                return true;
            }
        }
        false
    }
}

/// Legal moves with the table move first, the rest center-out and
/// row-major within each ring. Stable, so results are reproducible.
fn order_moves(board: &Board, first: Option<Pos>) -> Vec<Pos> {
    let mut moves = board.legal_moves();
    let center = (board.size() as i32 - 1) / 2;
    moves.sort_by_key(|m| (m.row as i32 - center).abs() + (m.col as i32 - center).abs());
    if let Some(first) = first {
        if let Some(idx) = moves.iter().position(|&m| m == first) {
            moves[..=idx].rotate_right(1);
        }
    }
    moves
}

/// Convenience handle for harnesses that cancel from a timer thread.
#[must_use]
pub fn stop_flag() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;
    use crate::eval::connection_distance;

    fn config_with_depth(depth: u8) -> SearchConfig {
        SearchConfig {
            max_depth: depth,
            tt_capacity: 1 << 12,
            ..SearchConfig::default()
        }
    }

    fn board_with(size: usize, stones: &[(u8, u8, Stone)], to_move: Stone) -> Board {
        let mut board = Board::new(size);
        for &(row, col, stone) in stones {
            board.set_stone(Pos::new(row, col), stone);
        }
        board.set_to_move(to_move);
        board
    }

    #[test]
    fn finds_immediate_win() {
        let board = board_with(
            5,
            &[
                (0, 2, Stone::Black),
                (1, 2, Stone::Black),
                (2, 2, Stone::Black),
                (3, 2, Stone::Black),
            ],
            Stone::Black,
        );
        let mut searcher = Searcher::new(config_with_depth(64)).unwrap();
        let outcome = searcher.search(&board, None);

        assert_eq!(outcome.best_move, Some(Pos::new(4, 2)));
        assert_eq!(outcome.value, WIN);
        assert_eq!(outcome.depth, 1, "a proven win stops the deepening");
        assert!(outcome.nodes > 0);
    }

    #[test]
    fn blocks_opponent_threat() {
        // Black is one bridge away from connecting; White to move must
        // step into the bridge region.
        let board = board_with(
            5,
            &[
                (0, 2, Stone::Black),
                (1, 2, Stone::Black),
                (2, 2, Stone::Black),
            ],
            Stone::White,
        );
        let mut searcher = Searcher::new(config_with_depth(1)).unwrap();
        let outcome = searcher.search(&board, None);

        let chosen = outcome.best_move.unwrap();
        let after = board.place(chosen).unwrap();
        assert!(
            connection_distance(&after, Stone::Black, true) > 0,
            "({}, {}) leaves Black with an immediate completion",
            chosen.row,
            chosen.col
        );

        // Any move that ignores the threat scores strictly worse.
        let ignoring = board.place(Pos::new(0, 0)).unwrap();
        let ignoring_value = -evaluate(&ignoring, Stone::Black, &config_with_depth(1));
        assert!(outcome.value > ignoring_value);
    }

    #[test]
    fn prefers_connective_cells_over_corners() {
        let board = Board::new(5);
        let mut searcher = Searcher::new(config_with_depth(2)).unwrap();
        let outcome = searcher.search(&board, None);

        let chosen = outcome.best_move.unwrap();
        let corners = [
            Pos::new(0, 0),
            Pos::new(0, 4),
            Pos::new(4, 0),
            Pos::new(4, 4),
        ];
        assert!(!corners.contains(&chosen), "corner chosen: {chosen:?}");

        let d_chosen =
            connection_distance(&board.place(chosen).unwrap(), Stone::Black, true);
        let d_corner =
            connection_distance(&board.place(Pos::new(0, 0)).unwrap(), Stone::Black, true);
        assert!(d_chosen <= d_corner);
    }

    #[test]
    fn deterministic_across_fresh_searchers() {
        let board = board_with(
            5,
            &[(2, 2, Stone::Black), (1, 3, Stone::White)],
            Stone::Black,
        );
        let run = || {
            let mut searcher = Searcher::new(config_with_depth(3)).unwrap();
            searcher.search(&board, None)
        };
        let a = run();
        let b = run();
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.value, b.value);
        assert_eq!(a.nodes, b.nodes);
    }

    #[test]
    fn table_capacity_does_not_change_root_value() {
        let board = board_with(
            4,
            &[(1, 1, Stone::Black), (2, 2, Stone::White)],
            Stone::Black,
        );
        let value_with = |capacity: usize| {
            let config = SearchConfig {
                max_depth: 3,
                tt_capacity: capacity,
                ..SearchConfig::default()
            };
            let mut searcher = Searcher::new(config).unwrap();
            searcher.search(&board, None).value
        };
        assert_eq!(value_with(1 << 10), value_with(1 << 14));
    }

    #[test]
    fn same_position_by_transposition_searches_identically() {
        let a = Board::new(5)
            .place(Pos::new(0, 0))
            .and_then(|b| b.place(Pos::new(1, 1)))
            .and_then(|b| b.place(Pos::new(2, 2)))
            .unwrap();
        let b = Board::new(5)
            .place(Pos::new(2, 2))
            .and_then(|b| b.place(Pos::new(1, 1)))
            .and_then(|b| b.place(Pos::new(0, 0)))
            .unwrap();

        let mut searcher = Searcher::new(config_with_depth(2)).unwrap();
        let outcome_a = searcher.search(&a, None);
        let mut searcher = Searcher::new(config_with_depth(2)).unwrap();
        let outcome_b = searcher.search(&b, None);

        assert_eq!(outcome_a.value, outcome_b.value);
        assert_eq!(outcome_a.best_move, outcome_b.best_move);
    }

    #[test]
    fn exhausts_tiny_board_and_proves_the_win() {
        // On 2x2 the first player forces a connection by move three.
        let mut searcher = Searcher::new(config_with_depth(64)).unwrap();
        let outcome = searcher.search(&Board::new(2), None);

        assert_eq!(outcome.value, WIN);
        assert_eq!(outcome.best_move, Some(Pos::new(0, 1)));
        assert_eq!(outcome.depth, 3);
    }

    #[test]
    fn preset_stop_flag_commits_nothing() {
        let flag = stop_flag();
        flag.store(true, Ordering::Release);

        let mut searcher = Searcher::new(config_with_depth(4)).unwrap();
        let outcome = searcher.search(&Board::new(5), Some(&flag));

        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.depth, 0);
        assert_eq!(outcome.nodes, 0);
    }

    #[test]
    fn terminal_root_returns_empty_outcome() {
        let board = board_with(
            3,
            &[
                (1, 0, Stone::White),
                (1, 1, Stone::White),
                (1, 2, Stone::White),
            ],
            Stone::Black,
        );
        let mut searcher = Searcher::new(config_with_depth(3)).unwrap();
        let outcome = searcher.search(&board, None);
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.depth, 0);
    }

    #[test]
    fn ordering_puts_table_move_first_and_keeps_the_rest_stable() {
        let board = Board::new(3);
        let hint = Pos::new(2, 0);
        let moves = order_moves(&board, Some(hint));
        assert_eq!(moves[0], hint);

        let no_hint = order_moves(&board, None);
        assert_eq!(no_hint[0], Pos::new(1, 1), "center leads without a hint");
        // Same multiset either way.
        let mut a = moves.clone();
        let mut b = no_hint.clone();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }
}
