//! Deadlock analysis - exhaustive trial swaps over every adjacent pair
//!
//! Pairs are visited row-major, then in direction order up/down/left/right.
//! A pair is only tried the first time it shows up in that order: the up and
//! left neighbors of a cell were already paired with it when their own cell was
//! visited, so each cell contributes at most its down and right pairs.

use crate::board::Board;
use crate::swap::swap_would_match;
use crate::types::{Coord, Direction, Move, DEADLOCK_CHECK_CAP};

/// Every unique adjacent pair in enumeration order (180 on a 10x10 board).
pub fn candidate_moves() -> impl Iterator<Item = Move> {
    Coord::all().flat_map(|c| {
        Direction::ALL
            .into_iter()
            .filter(|d| matches!(d, Direction::Down | Direction::Right))
            .map(move |d| (c, c.neighbor(d)))
            .filter(|(_, n)| n.in_bounds())
            .map(|(a, b)| Move::new(a, b))
    })
}

fn is_live(board: &mut Board, m: Move) -> bool {
    // Candidates are always in bounds and adjacent.
    swap_would_match(board, m.a, m.b).unwrap_or(false)
}

/// Count moves that would form a match, stopping once `cap` is reached.
///
/// The board is borrowed mutably for the trial swaps but is always returned
/// in its exact prior state.
pub fn count_available_moves(board: &mut Board, cap: usize) -> usize {
    if cap == 0 {
        return 0;
    }

    let mut count = 0;
    for m in candidate_moves() {
        if is_live(board, m) {
            count += 1;
            if count >= cap {
                break;
            }
        }
    }
    count
}

/// First move in enumeration order that would form a match.
pub fn find_first_move(board: &mut Board) -> Option<Move> {
    candidate_moves().find(|&m| is_live(board, m))
}

/// True when no swap on the board would form a match.
pub fn is_deadlocked(board: &mut Board) -> bool {
    count_available_moves(board, DEADLOCK_CHECK_CAP) == 0
}
