//! Board generation with a minimum-move gate
//!
//! Boards are filled row-major from the symbol source. A drawn symbol that
//! would complete a run with the cells already placed (left and above) is
//! bumped to the next free symbol, so every generated board starts stable.
//! A board offering fewer than the requested number of moves is thrown away
//! and drawn again, at most [`MAX_GENERATION_ATTEMPTS`] times; after that the
//! fixed [`fallback_board`] is used.

use crate::board::Board;
use crate::cascade::safe_symbol;
use crate::deadlock::count_available_moves;
use crate::rng::SymbolSource;
use crate::types::{Symbol, MAX_GENERATION_ATTEMPTS};

/// A freshly generated board and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub board: Board,
    /// Boards drawn, including the accepted one
    pub attempts: u32,
    /// True when every attempt fell short and the fallback layout was used
    pub fallback: bool,
}

/// Fill a full, stable board from `source`.
pub fn fill_stable<S: SymbolSource>(source: &mut S) -> Board {
    let mut board = Board::empty();
    for c in crate::types::Coord::all() {
        let preferred = source.next_symbol();
        let symbol = safe_symbol(&board, c, preferred);
        board.set(c, Some(symbol));
    }
    board
}

/// Two-symbol checkerboard.
///
/// Stable, and any horizontal swap away from the top and bottom rows lines up
/// three equal symbols in a column, so it always clears the move gate.
pub fn fallback_board() -> Board {
    let (even, odd) = (Symbol::wrapping(0), Symbol::wrapping(1));
    Board::from_fn(|c| if (c.row + c.col) % 2 == 0 { even } else { odd })
}

/// Generate a board offering at least `min_moves` legal moves.
pub fn generate<S: SymbolSource>(source: &mut S, min_moves: usize) -> Generated {
    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let mut board = fill_stable(source);
        if count_available_moves(&mut board, min_moves) >= min_moves {
            return Generated {
                board,
                attempts: attempt,
                fallback: false,
            };
        }
    }

    Generated {
        board: fallback_board(),
        attempts: MAX_GENERATION_ATTEMPTS,
        fallback: true,
    }
}
