//! Swap validation - adjacency check plus tentative swap-and-detect

use crate::board::Board;
use crate::matcher::{has_match, scan, MatchSet};
use crate::types::{Coord, EngineError};

/// Result of a swap attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap stays; these are the matches it produced.
    Accepted(MatchSet),
    /// No match formed; the board is back to its exact prior state.
    Rejected,
}

impl SwapOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SwapOutcome::Accepted(_))
    }
}

fn check_move(a: Coord, b: Coord) -> Result<(), EngineError> {
    if a.in_bounds() && b.in_bounds() && a.is_adjacent(b) {
        Ok(())
    } else {
        Err(EngineError::InvalidMove { a, b })
    }
}

/// Swap two adjacent cells and keep the swap only if it forms a match.
///
/// Invalid coordinates are a caller error and never touch the board.
pub fn try_swap(board: &mut Board, a: Coord, b: Coord) -> Result<SwapOutcome, EngineError> {
    check_move(a, b)?;

    board.swap(a, b);
    let matches = scan(board);
    if matches.is_empty() {
        board.swap(a, b);
        return Ok(SwapOutcome::Rejected);
    }

    Ok(SwapOutcome::Accepted(matches))
}

/// Trial swap that always reverts. True if the swap would form a match.
pub fn swap_would_match(board: &mut Board, a: Coord, b: Coord) -> Result<bool, EngineError> {
    check_move(a, b)?;

    board.swap(a, b);
    let hit = has_match(board);
    board.swap(a, b);
    Ok(hit)
}
