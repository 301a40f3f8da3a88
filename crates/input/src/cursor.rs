//! Keyboard cursor over the board.

use crate::types::{Coord, Direction, GRID_SIZE};

/// Cursor position, always in bounds. Movement stops at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCursor {
    pos: Coord,
}

impl BoardCursor {
    /// Start in the middle of the board
    pub fn new() -> Self {
        let mid = (GRID_SIZE / 2) as i8;
        Self {
            pos: Coord::new(mid, mid),
        }
    }

    pub fn position(&self) -> Coord {
        self.pos
    }

    /// Move one cell; returns false at an edge
    pub fn step(&mut self, dir: Direction) -> bool {
        let next = self.pos.neighbor(dir);
        if !next.in_bounds() {
            return false;
        }
        self.pos = next;
        true
    }

    /// Jump to `c` (e.g. after a mouse click); out-of-bounds is ignored
    pub fn jump(&mut self, c: Coord) -> bool {
        if !c.in_bounds() {
            return false;
        }
        self.pos = c;
        true
    }
}

impl Default for BoardCursor {
    fn default() -> Self {
        Self::new()
    }
}
