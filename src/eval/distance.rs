//! Connection distance over the hex topology
//!
//! The central question the evaluator answers: how many empty cells does
//! a side still have to fill to join its two edges? Own stones are free
//! to traverse and opponent stones are walls. A *bridge*, two cells a
//! knight's-throw apart whose two common neighbors (the carriers) are
//! both empty, counts as a single step because the opponent cannot cut
//! it with one stone.
//!
//! Computed with Dijkstra from one target edge to the other, stopping at
//! the first goal cell popped from the queue.
//!
//! # Example
//!
//! ```
//! use hexorcist::board::{Board, Stone};
//! use hexorcist::eval::connection_distance;
//!
//! let board = Board::new(5);
//! // Bridges let an empty 5x5 board be crossed in three virtual steps.
//! assert_eq!(connection_distance(&board, Stone::Black, true), 3);
//! assert_eq!(connection_distance(&board, Stone::Black, false), 5);
//! ```

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::board::{Board, Pos, Stone, NEIGHBORS};

/// Bridge targets with their carrier pairs. Each target offset is the sum
/// of two cyclically adjacent entries of [`NEIGHBORS`], and those two
/// entries are exactly the carriers: the cells an opponent would have to
/// take to sever the link.
const BRIDGES: [((i8, i8), [(i8, i8); 2]); 6] = [
    ((1, 1), [(1, 0), (0, 1)]),
    ((-1, 2), [(0, 1), (-1, 1)]),
    ((-2, 1), [(-1, 1), (-1, 0)]),
    ((-1, -1), [(-1, 0), (0, -1)]),
    ((1, -2), [(0, -1), (1, -1)]),
    ((2, -1), [(1, -1), (1, 0)]),
];

/// Sentinel distance for a side whose edges can no longer be joined.
/// Larger than any real distance on a board of the given size.
#[inline]
#[must_use]
pub fn unreachable_distance(size: usize) -> u32 {
    (size * size + 1) as u32
}

/// Minimum number of empty cells `side` must fill to connect its two
/// edges, or [`unreachable_distance`] when the opponent has cut every
/// route. A result of 0 means the side has already won or can win with
/// its next placement.
#[must_use]
pub fn connection_distance(board: &Board, side: Stone, bridges: bool) -> u32 {
    debug_assert!(side != Stone::Empty);
    let size = board.size();
    let mut dist = vec![u32::MAX; size * size];
    let mut queue: BinaryHeap<Reverse<(u32, usize)>> = BinaryHeap::new();

    // Seed from the starting edge: own stones enter free, empty cells
    // cost their own placement.
    for i in 0..size {
        let pos = match side {
            Stone::Black => Pos::new(0, i as u8),
            _ => Pos::new(i as u8, 0),
        };
        let cost = match board.get(pos) {
            s if s == side => 0,
            Stone::Empty => 1,
            _ => continue,
        };
        let idx = pos.index(size);
        if cost < dist[idx] {
            dist[idx] = cost;
            queue.push(Reverse((cost, idx)));
        }
    }

    while let Some(Reverse((cost, idx))) = queue.pop() {
        if cost > dist[idx] {
            continue; // stale queue entry
        }
        let pos = Pos::from_index(idx, size);

        let at_goal = match side {
            Stone::Black => pos.row as usize == size - 1,
            _ => pos.col as usize == size - 1,
        };
        if at_goal {
            // First goal pop is the minimum. A raw distance of one means
            // the next placement finishes the chain, which the heuristic
            // treats as already decided.
            return if cost <= 1 { 0 } else { cost };
        }

        for delta in NEIGHBORS {
            let Some(next) = pos.offset(delta, size) else {
                continue;
            };
            let occupant = board.get(next);
            let step = match occupant {
                s if s == side => 0,
                Stone::Empty => 1,
                _ => continue,
            };
            let next_idx = next.index(size);
            let next_cost = cost + step;
            if next_cost < dist[next_idx] {
                dist[next_idx] = next_cost;
                queue.push(Reverse((next_cost, next_idx)));
            }
        }

        if bridges {
            for (offset, carriers) in BRIDGES {
                let Some(target) = pos.offset(offset, size) else {
                    continue;
                };
                if board.get(target) != Stone::Empty {
                    continue;
                }
                let carriers_open = carriers.iter().all(|&delta| {
                    pos.offset(delta, size)
                        .is_some_and(|carrier| board.get(carrier) == Stone::Empty)
                });
                if !carriers_open {
                    continue;
                }
                let target_idx = target.index(size);
                let next_cost = cost + 1;
                if next_cost < dist[target_idx] {
                    dist[target_idx] = next_cost;
                    queue.push(Reverse((next_cost, target_idx)));
                }
            }
        }
    }

    unreachable_distance(size)
}
