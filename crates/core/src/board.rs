//! Board module - manages the game grid
//!
//! The board is a 10x10 grid where each cell holds a symbol, or is empty while a
//! cascade pass is clearing and compacting it. Uses a flat array for better cache
//! locality and zero-allocation.
//! Coordinates: (row, col) where row ranges 0..9 (top to bottom), col ranges 0..9
//! (left to right). Gravity pulls toward row 9.

use std::fmt;

use crate::types::{Cell, Coord, Symbol, BOARD_CELLS, GRID_SIZE};

const N: usize = GRID_SIZE as usize;

/// The game board - 10 x 10 cells using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create a board with every cell empty
    pub fn empty() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    /// Create a full board by asking `f` for every coordinate in row-major order
    pub fn from_fn(mut f: impl FnMut(Coord) -> Symbol) -> Self {
        let mut board = Self::empty();
        for (idx, cell) in board.cells.iter_mut().enumerate() {
            *cell = Some(f(Coord::from_index(idx)));
        }
        board
    }

    /// Create a full board from symbol indices.
    ///
    /// Returns `None` if any value is outside the symbol alphabet.
    pub fn from_rows(rows: &[[u8; N]; N]) -> Option<Self> {
        let mut board = Self::empty();
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                board.cells[r * N + c] = Some(Symbol::new(v)?);
            }
        }
        Some(board)
    }

    /// Inverse of [`Board::write_u8_grid`]: 0 is empty, `k` is symbol `k - 1`.
    pub fn from_u8_grid(grid: &[[u8; N]; N]) -> Self {
        let mut board = Self::empty();
        for (r, row) in grid.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                board.cells[r * N + c] = v.checked_sub(1).and_then(Symbol::new);
            }
        }
        board
    }

    /// Get the board edge length
    pub fn size(&self) -> u8 {
        GRID_SIZE
    }

    /// Get cell at a coordinate.
    /// Returns None if out of bounds
    pub fn get(&self, c: Coord) -> Option<Cell> {
        c.index().map(|idx| self.cells[idx])
    }

    /// Symbol at a coordinate; `None` for empty or out-of-bounds cells
    pub fn symbol_at(&self, c: Coord) -> Option<Symbol> {
        self.get(c).flatten()
    }

    /// Set cell at a coordinate.
    /// Returns false if out of bounds
    pub fn set(&mut self, c: Coord, cell: Cell) -> bool {
        match c.index() {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange the contents of two cells.
    /// Returns false (and leaves the board alone) if either is out of bounds
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match (a.index(), b.index()) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Empty every listed coordinate; returns how many cells were changed
    pub fn clear_cells(&mut self, coords: impl IntoIterator<Item = Coord>) -> usize {
        let mut cleared = 0;
        for c in coords {
            if let Some(idx) = c.index() {
                if self.cells[idx].take().is_some() {
                    cleared += 1;
                }
            }
        }
        cleared
    }

    /// Let the symbols of one column fall to the bottom, preserving their order.
    ///
    /// Uses a two-pointer scan from the bottom up (no allocation). Returns the
    /// number of empty cells left at the top of the column, which the caller
    /// refills.
    pub fn compact_column(&mut self, col: usize) -> usize {
        if col >= N {
            return 0;
        }

        let mut write_row = N;
        for read_row in (0..N).rev() {
            let cell = self.cells[read_row * N + col];
            if cell.is_some() {
                write_row -= 1;
                if write_row != read_row {
                    self.cells[write_row * N + col] = cell;
                    self.cells[read_row * N + col] = None;
                }
            }
        }

        write_row
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the board as a u8 grid: 0 = empty, `k + 1` = symbol `k`
    pub fn write_u8_grid(&self, out: &mut [[u8; N]; N]) {
        for (r, row) in out.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = self.cells[r * N + c].map_or(0, |s| s.index() + 1);
            }
        }
    }

    /// FNV-1a 64-bit hash of the u8 encoding, for cheap change detection
    pub fn fingerprint(&self) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for cell in &self.cells {
            h ^= cell.map_or(0, |s| s.index() + 1) as u64;
            h = h.wrapping_mul(0x00000100000001B3);
        }
        h
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// One line per row, symbols as digits and `.` for empty cells.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..N {
            for c in 0..N {
                match self.cells[r * N + c] {
                    Some(s) => write!(f, "{}", s.index())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(v: u8) -> Symbol {
        Symbol::new(v).unwrap()
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::empty();

        board.set(Coord::new(0, 0), Some(sym(1)));
        board.set(Coord::new(5, 7), Some(sym(6)));

        assert_eq!(board.get(Coord::new(0, 0)), Some(Some(sym(1))));
        assert_eq!(board.get(Coord::new(5, 7)), Some(Some(sym(6))));

        assert_eq!(board.cells[0], Some(sym(1)));
        assert_eq!(board.cells[5 * 10 + 7], Some(sym(6)));
    }

    #[test]
    fn test_compact_column_preserves_order() {
        let mut board = Board::from_fn(|c| Symbol::wrapping(c.row as u32));
        // Column 2 top to bottom: 0 1 2 3 4 5 6 7 0 1; clear rows 3, 4 and 8.
        board.clear_cells([Coord::new(3, 2), Coord::new(4, 2), Coord::new(8, 2)]);

        let empty = board.compact_column(2);
        assert_eq!(empty, 3);

        let column: Vec<Cell> = (0..10).map(|r| board.cells[r * 10 + 2]).collect();
        assert_eq!(
            column,
            vec![
                None,
                None,
                None,
                Some(sym(0)),
                Some(sym(1)),
                Some(sym(2)),
                Some(sym(5)),
                Some(sym(6)),
                Some(sym(7)),
                Some(sym(1)),
            ]
        );

        // Other columns untouched.
        assert_eq!(board.cells[3 * 10 + 1], Some(sym(3)));
    }

    #[test]
    fn test_u8_grid_roundtrip_keeps_empties() {
        let mut board = Board::from_fn(|c| Symbol::wrapping((c.row + c.col) as u32));
        board.set(Coord::new(9, 9), None);

        let mut grid = [[0u8; 10]; 10];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[9][9], 0);
        assert_eq!(grid[0][1], 2);

        assert_eq!(Board::from_u8_grid(&grid), board);
    }
}
