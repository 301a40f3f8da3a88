//! Cascade resolution - clear, compact, refill until the board is stable
//!
//! [`Cascade`] is a lazy iterator: each `next()` performs one pass against the
//! board it borrows and yields what that pass cleared. It ends once a scan comes
//! back empty, so draining it always leaves a stable board.
//!
//! A pass normally applies gravity and refills the vacated top cells from the
//! symbol source. After [`MAX_GRAVITY_PASSES`] passes the iterator switches to
//! repair passes: matched cells are replaced in place with symbols that cannot
//! complete a run, which ends the chain on the spot even when the source keeps
//! producing matches.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::matcher::{completes_run, scan, MatchSet};
use crate::rng::SymbolSource;
use crate::types::{Coord, MatchCue, Symbol, GRID_SIZE, MAX_GRAVITY_PASSES};

const N: usize = GRID_SIZE as usize;

/// What one cascade pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePass {
    /// 1-based position in the chain
    pub index: usize,
    pub matches: MatchSet,
    /// Columns that were compacted and refilled, left to right
    pub refilled_columns: ArrayVec<u8, N>,
    /// True for an in-place repair pass (no gravity)
    pub repaired: bool,
}

impl CascadePass {
    /// Distinct cells cleared by this pass
    pub fn cleared(&self) -> usize {
        self.matches.len()
    }

    pub fn cue(&self) -> MatchCue {
        self.matches.cue()
    }
}

/// Lazy sequence of cascade passes over a borrowed board.
///
/// Not restartable: the board changes as the iterator is consumed.
pub struct Cascade<'a, S: SymbolSource> {
    board: &'a mut Board,
    source: &'a mut S,
    passes: usize,
    total_cleared: usize,
    done: bool,
}

impl<'a, S: SymbolSource> Cascade<'a, S> {
    pub fn new(board: &'a mut Board, source: &'a mut S) -> Self {
        Self {
            board,
            source,
            passes: 0,
            total_cleared: 0,
            done: false,
        }
    }

    /// Cells cleared by the passes consumed so far
    pub fn total_cleared(&self) -> usize {
        self.total_cleared
    }

    fn gravity_pass(&mut self, matches: &MatchSet) -> ArrayVec<u8, N> {
        self.board.clear_cells(matches.iter());

        let mut columns = ArrayVec::new();
        for col in 0..N {
            let missing = self.board.compact_column(col);
            if missing == 0 {
                continue;
            }
            for row in 0..missing {
                let symbol = self.source.next_symbol();
                self.board
                    .set(Coord::new(row as i8, col as i8), Some(symbol));
            }
            columns.push(col as u8);
        }
        columns
    }

    fn repair_pass(&mut self, matches: &MatchSet) -> ArrayVec<u8, N> {
        let mut columns: ArrayVec<u8, N> = ArrayVec::new();
        for c in matches.iter() {
            let symbol = safe_symbol(self.board, c, self.source.next_symbol());
            self.board.set(c, Some(symbol));
            if !columns.contains(&(c.col as u8)) {
                columns.push(c.col as u8);
            }
        }
        columns.sort_unstable();
        columns
    }
}

impl<S: SymbolSource> Iterator for Cascade<'_, S> {
    type Item = CascadePass;

    fn next(&mut self) -> Option<CascadePass> {
        if self.done {
            return None;
        }

        let matches = scan(self.board);
        if matches.is_empty() {
            self.done = true;
            return None;
        }

        self.passes += 1;
        self.total_cleared += matches.len();

        let repaired = self.passes > MAX_GRAVITY_PASSES;
        let refilled_columns = if repaired {
            self.repair_pass(&matches)
        } else {
            self.gravity_pass(&matches)
        };

        Some(CascadePass {
            index: self.passes,
            matches,
            refilled_columns,
            repaired,
        })
    }
}

/// Summary of a fully drained cascade.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CascadeSummary {
    pub total_cleared: usize,
    pub passes: Vec<CascadePass>,
}

/// Run passes until the board is stable and collect them
pub fn resolve<S: SymbolSource>(board: &mut Board, source: &mut S) -> CascadeSummary {
    let mut cascade = Cascade::new(board, source);
    let passes: Vec<CascadePass> = cascade.by_ref().collect();
    CascadeSummary {
        total_cleared: cascade.total_cleared(),
        passes,
    }
}

/// Starting from `preferred`, the first symbol (cycling the alphabet) that
/// does not complete a run at `c`.
///
/// A cell has at most six run-forming neighbor patterns, so one of the eight
/// symbols is always free; the loop bound only guards a smaller alphabet.
pub fn safe_symbol(board: &Board, c: Coord, preferred: Symbol) -> Symbol {
    let mut symbol = preferred;
    for _ in 0..crate::types::SYMBOL_COUNT {
        if !completes_run(board, c, symbol) {
            return symbol;
        }
        symbol = symbol.next();
    }
    preferred
}
