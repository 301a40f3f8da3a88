//! Match detection - pure scans for runs of three or more equal symbols
//!
//! Rows are walked left to right and columns top to bottom, grouping maximal
//! runs of equal, non-empty symbols. Every run of length >= 3 contributes all of
//! its coordinates; a coordinate that sits in both a row run and a column run is
//! counted once.

use std::ops::ControlFlow;

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Axis, Coord, Direction, MatchCue, Symbol, BOARD_CELLS, GRID_SIZE, MIN_RUN};

const N: usize = GRID_SIZE as usize;

/// Upper bound on runs in one scan: each line holds at most N / MIN_RUN runs.
const MAX_RUNS: usize = 2 * N * (N / MIN_RUN);

/// One maximal run found by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    /// Top-most / left-most cell of the run
    pub start: Coord,
    pub axis: Axis,
    pub len: u8,
    pub symbol: Symbol,
}

impl Run {
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let start = self.start;
        let axis = self.axis;
        (0..self.len as i8).map(move |i| match axis {
            Axis::Row => Coord::new(start.row, start.col + i),
            Axis::Column => Coord::new(start.row + i, start.col),
        })
    }
}

/// Deduplicated set of matched coordinates plus the runs that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    mask: [bool; BOARD_CELLS],
    len: usize,
    runs: ArrayVec<Run, MAX_RUNS>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self {
            mask: [false; BOARD_CELLS],
            len: 0,
            runs: ArrayVec::new(),
        }
    }

    fn add_run(&mut self, run: Run) {
        for c in run.coords() {
            if let Some(idx) = c.index() {
                if !self.mask[idx] {
                    self.mask[idx] = true;
                    self.len += 1;
                }
            }
        }
        // Capacity is the geometric maximum, so this never drops a run.
        let _ = self.runs.try_push(run);
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct matched cells
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.index().is_some_and(|idx| self.mask[idx])
    }

    /// Matched coordinates in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, &hit)| hit)
            .map(|(idx, _)| Coord::from_index(idx))
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Feedback class for this set (3 / 4 / 5+ cells)
    pub fn cue(&self) -> MatchCue {
        MatchCue::from_cleared(self.len)
    }
}

impl Default for MatchSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Visit every run >= MIN_RUN, rows first then columns. `f` may stop the walk.
fn for_each_run(board: &Board, mut f: impl FnMut(Run) -> ControlFlow<()>) -> ControlFlow<()> {
    for axis in [Axis::Row, Axis::Column] {
        for line in 0..N as i8 {
            let at = |i: i8| match axis {
                Axis::Row => Coord::new(line, i),
                Axis::Column => Coord::new(i, line),
            };

            let mut i = 0i8;
            while i < N as i8 {
                let Some(symbol) = board.symbol_at(at(i)) else {
                    i += 1;
                    continue;
                };

                let mut end = i + 1;
                while end < N as i8 && board.symbol_at(at(end)) == Some(symbol) {
                    end += 1;
                }

                let len = (end - i) as usize;
                if len >= MIN_RUN {
                    f(Run {
                        start: at(i),
                        axis,
                        len: len as u8,
                        symbol,
                    })?;
                }
                i = end;
            }
        }
    }
    ControlFlow::Continue(())
}

/// Scan the whole board and return every matched coordinate
pub fn scan(board: &Board) -> MatchSet {
    let mut set = MatchSet::new();
    let _ = for_each_run(board, |run| {
        set.add_run(run);
        ControlFlow::Continue(())
    });
    set
}

/// True if the board holds at least one run; stops at the first one
pub fn has_match(board: &Board) -> bool {
    for_each_run(board, |_| ControlFlow::Break(())).is_break()
}

/// Would `symbol` placed at `c` form a run of MIN_RUN or more through `c`?
///
/// The current content of `c` is ignored; empty neighbors never match.
pub fn completes_run(board: &Board, c: Coord, symbol: Symbol) -> bool {
    let extent = |dir: Direction| {
        let mut n = 0;
        let mut at = c.neighbor(dir);
        while board.symbol_at(at) == Some(symbol) {
            n += 1;
            at = at.neighbor(dir);
        }
        n
    };

    let horizontal = 1 + extent(Direction::Left) + extent(Direction::Right);
    let vertical = 1 + extent(Direction::Up) + extent(Direction::Down);
    horizontal >= MIN_RUN || vertical >= MIN_RUN
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Board whose symbols never line up three in a row: parity of row and
    /// column picks one of four symbols, so both axes alternate.
    fn quiet_board() -> Board {
        Board::from_fn(|c| Symbol::wrapping((2 * (c.row % 2) + c.col % 2) as u32))
    }

    #[test]
    fn quiet_board_has_no_match() {
        let board = quiet_board();
        assert!(scan(&board).is_empty(), "\n{}", board);
        assert!(!has_match(&board));
    }

    #[test]
    fn cross_shaped_match_counts_shared_cell_once() {
        let mut board = quiet_board();
        let s = Symbol::new(7).unwrap();
        // Horizontal run through (5, 3..=5) and vertical run through (3..=5, 4).
        for c in [
            Coord::new(5, 3),
            Coord::new(5, 4),
            Coord::new(5, 5),
            Coord::new(3, 4),
            Coord::new(4, 4),
        ] {
            board.set(c, Some(s));
        }

        let set = scan(&board);
        assert_eq!(set.len(), 5, "\n{}", board);
        assert_eq!(set.runs().len(), 2);
        assert!(set.contains(Coord::new(5, 4)));
        assert_eq!(set.cue(), MatchCue::FivePlus);
    }

    #[test]
    fn empty_cells_never_match() {
        let mut board = quiet_board();
        for col in 0..4 {
            board.set(Coord::new(0, col), None);
        }
        assert!(scan(&board).is_empty());
    }

    #[test]
    fn completes_run_looks_both_ways() {
        let mut board = quiet_board();
        let s = Symbol::new(7).unwrap();
        board.set(Coord::new(2, 2), Some(s));
        board.set(Coord::new(2, 4), Some(s));
        board.set(Coord::new(6, 8), Some(s));
        board.set(Coord::new(7, 8), Some(s));

        // Middle gap closes a horizontal run.
        assert!(completes_run(&board, Coord::new(2, 3), s));
        // A vertical pair is extended from either end.
        assert!(completes_run(&board, Coord::new(5, 8), s));
        assert!(completes_run(&board, Coord::new(8, 8), s));
        // A single neighbor is not enough.
        assert!(!completes_run(&board, Coord::new(2, 5), s));
        assert!(!completes_run(&board, Coord::new(3, 3), s));
    }
}
