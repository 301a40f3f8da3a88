use crate::types::{Coord, GRID_SIZE};

const N: usize = GRID_SIZE as usize;

/// Plain-data view of an engine, written into a reusable buffer every frame.
///
/// Board cells use the `u8` grid encoding: 0 is empty, `k + 1` is symbol `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineSnapshot {
    pub board: [[u8; N]; N],
    /// FNV-1a fingerprint of `board`
    pub board_hash: u64,
    pub selected: Option<Coord>,
    pub deadlocked: bool,
    pub total_cleared: u32,
    pub moves_made: u32,
    pub round_id: u32,
    pub elapsed_ms: u64,
    /// The current board came from the fallback layout
    pub fallback: bool,
}

impl EngineSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; N]; N];
        self.board_hash = 0;
        self.selected = None;
        self.deadlocked = false;
        self.total_cleared = 0;
        self.moves_made = 0;
        self.round_id = 0;
        self.elapsed_ms = 0;
        self.fallback = false;
    }

    /// Symbol index at `c`, `None` for empty or out-of-bounds cells
    pub fn symbol_at(&self, c: Coord) -> Option<u8> {
        if !c.in_bounds() {
            return None;
        }
        self.board[c.row as usize][c.col as usize].checked_sub(1)
    }

    pub fn playable(&self) -> bool {
        !self.deadlocked
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; N]; N],
            board_hash: 0,
            selected: None,
            deadlocked: false,
            total_cleared: 0,
            moves_made: 0,
            round_id: 0,
            elapsed_ms: 0,
            fallback: false,
        };
        s.clear();
        s
    }
}
