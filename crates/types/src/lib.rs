//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! Apart from the error enum, everything here is plain data with no behavior
//! beyond small helpers, so the types can be shared between the engine, the
//! terminal front end and the leaderboard.
//!
//! # Board Dimensions
//!
//! The playfield is a square grid:
//!
//! - **Size**: 10 x 10 cells, coordinates `(row, col)` in `0..10`
//! - **Symbols**: 8 distinct tile identities (`0..8`)
//! - **Runs**: three or more equal symbols in a row or column match
//!
//! # Engine Limits
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_START_MOVES` | 5 | Legal moves a fresh board must offer |
//! | `DEADLOCK_CHECK_CAP` | 1 | Move count cap for the "any move left?" check |
//! | `MAX_GENERATION_ATTEMPTS` | 64 | Board regenerations before the fallback board |
//! | `MAX_GRAVITY_PASSES` | 64 | Gravity passes before cascades switch to in-place repair |
//! | `LEADERBOARD_SIZE` | 5 | Entries kept in the top list |
//!
//! # Examples
//!
//! ```
//! use tui_bloxx_types::{Coord, Direction, Move, Symbol, GRID_SIZE};
//!
//! let a = Coord::new(4, 4);
//! let b = a.neighbor(Direction::Right);
//! assert!(a.is_adjacent(b));
//!
//! // Moves are unordered pairs.
//! assert_eq!(Move::new(a, b), Move::new(b, a));
//!
//! assert_eq!(Symbol::new(7).map(Symbol::index), Some(7));
//! assert_eq!(Symbol::new(8), None);
//! assert_eq!(GRID_SIZE, 10);
//! ```

use std::fmt;

/// Board width and height in cells (10)
pub const GRID_SIZE: u8 = 10;

/// Total number of cells on the board
pub const BOARD_CELLS: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Size of the symbol alphabet (8)
pub const SYMBOL_COUNT: u8 = 8;

/// Shortest run that counts as a match
pub const MIN_RUN: usize = 3;

/// Legal moves a freshly generated board must offer
pub const MIN_START_MOVES: usize = 5;

/// Cap used when probing for deadlock after every turn
pub const DEADLOCK_CHECK_CAP: usize = 1;

/// Board regenerations before falling back to a fixed layout
pub const MAX_GENERATION_ATTEMPTS: u32 = 64;

/// Gravity passes before a cascade switches to in-place repair
pub const MAX_GRAVITY_PASSES: usize = 64;

/// Number of leaderboard entries kept
pub const LEADERBOARD_SIZE: usize = 5;

/// Fixed frame interval for the terminal loop (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long the cells cleared by the latest swap stay highlighted
pub const MATCH_FLASH_MS: u32 = 600;

/// One of the [`SYMBOL_COUNT`] tile identities.
///
/// Symbols carry no ordering semantics beyond equality; the index only
/// exists so renderers can pick a color and glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u8);

impl Symbol {
    /// Create a symbol, returning `None` outside `0..SYMBOL_COUNT`.
    pub fn new(index: u8) -> Option<Self> {
        (index < SYMBOL_COUNT).then_some(Self(index))
    }

    /// Wrap any integer into the alphabet (used by random sources).
    pub fn wrapping(value: u32) -> Self {
        Self((value % SYMBOL_COUNT as u32) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// The next symbol in the alphabet, wrapping around.
    pub fn next(self) -> Self {
        Self((self.0 + 1) % SYMBOL_COUNT)
    }
}

/// A cell on the game board
///
/// - `None`: Empty, only seen while a cascade pass is clearing/compacting
/// - `Some(Symbol)`: a tile
pub type Cell = Option<Symbol>;

/// Neighbor directions in the fixed enumeration order used by move search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order: up, down, left, right.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(d_row, d_col)` offset.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Scan axis of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

/// Board coordinate, `(row, col)`, 0-indexed from the top-left.
///
/// Stored signed so that callers can hand over out-of-bounds input (for
/// example a mouse click outside the board); the engine rejects it instead
/// of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE as i8).contains(&self.row) && (0..GRID_SIZE as i8).contains(&self.col)
    }

    /// Flat row-major index, `None` when out of bounds.
    #[inline(always)]
    pub fn index(self) -> Option<usize> {
        if !self.in_bounds() {
            return None;
        }
        Some((self.row as usize) * (GRID_SIZE as usize) + (self.col as usize))
    }

    /// Inverse of [`Coord::index`].
    pub fn from_index(index: usize) -> Self {
        let n = GRID_SIZE as usize;
        Self::new((index / n) as i8, (index % n) as i8)
    }

    /// The neighboring coordinate (may be out of bounds).
    pub fn neighbor(self, dir: Direction) -> Self {
        let (dr, dc) = dir.delta();
        Self::new(self.row.saturating_add(dr), self.col.saturating_add(dc))
    }

    /// Manhattan distance exactly 1.
    pub fn is_adjacent(self, other: Coord) -> bool {
        let dr = (self.row as i16 - other.row as i16).abs();
        let dc = (self.col as i16 - other.col as i16).abs();
        dr + dc == 1
    }

    /// All in-bounds coordinates in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_CELLS).map(Coord::from_index)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// An unordered pair of 4-adjacent coordinates.
///
/// The pair is stored in row-major order so `Move::new(a, b) == Move::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub a: Coord,
    pub b: Coord,
}

impl Move {
    pub fn new(a: Coord, b: Coord) -> Self {
        if b < a {
            Self { a: b, b: a }
        } else {
            Self { a, b }
        }
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.a == c || self.b == c
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.a, self.b)
    }
}

/// Feedback class of a cascade pass, keyed off its cleared cell count.
///
/// - **Triple**: 3 cells (or fewer, never produced by a real pass)
/// - **Quad**: exactly 4 cells
/// - **FivePlus**: 5 or more cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchCue {
    Triple,
    Quad,
    FivePlus,
}

impl MatchCue {
    pub fn from_cleared(cleared: usize) -> Self {
        match cleared {
            0..=3 => MatchCue::Triple,
            4 => MatchCue::Quad,
            _ => MatchCue::FivePlus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchCue::Triple => "match",
            MatchCue::Quad => "quad",
            MatchCue::FivePlus => "five+",
        }
    }
}

/// Errors raised by engine operations.
///
/// Rejected swaps and out-of-bounds selections are *outcomes*, not errors;
/// these variants are caller mistakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A swap was requested for cells that are out of bounds or not 4-adjacent.
    #[error("invalid move {a} <-> {b}: cells must be in bounds and adjacent")]
    InvalidMove { a: Coord, b: Coord },
    /// The round has no legal moves left; only `initialize` is accepted.
    #[error("round is deadlocked, initialize a new board first")]
    Deadlocked,
}

/// Player-facing actions produced by the input layer.
///
/// The terminal front end maps keys and mouse clicks into these and then
/// drives the engine; the engine itself never sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Move the board cursor one cell
    Cursor(Direction),
    /// Select the cell under the cursor
    Select,
    /// Select a specific cell (mouse)
    SelectAt(Coord),
    /// Drop the pending selection
    Deselect,
    /// Ask for a hint
    Hint,
    /// Toggle the graphics (color adjustment) panel
    ToggleGraphics,
    /// Toggle the help panel
    ToggleHelp,
    /// Toggle the top-5 panel
    ToggleScores,
    /// Start a new board
    Restart,
    /// Answer "yes" to a prompt
    Confirm,
    /// Answer "no" to a prompt
    Decline,
    /// Open the exit prompt
    Quit,
}

impl UiAction {
    /// Parse action from string (case-insensitive, cursor/select actions only)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_bloxx_types::{Direction, UiAction};
    ///
    /// assert_eq!(UiAction::from_str("up"), Some(UiAction::Cursor(Direction::Up)));
    /// assert_eq!(UiAction::from_str("HINT"), Some(UiAction::Hint));
    /// assert_eq!(UiAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(UiAction::Cursor(Direction::Up)),
            "down" => Some(UiAction::Cursor(Direction::Down)),
            "left" => Some(UiAction::Cursor(Direction::Left)),
            "right" => Some(UiAction::Cursor(Direction::Right)),
            "select" => Some(UiAction::Select),
            "deselect" => Some(UiAction::Deselect),
            "hint" => Some(UiAction::Hint),
            "graphics" => Some(UiAction::ToggleGraphics),
            "help" => Some(UiAction::ToggleHelp),
            "scores" => Some(UiAction::ToggleScores),
            "restart" => Some(UiAction::Restart),
            "yes" => Some(UiAction::Confirm),
            "no" => Some(UiAction::Decline),
            "quit" => Some(UiAction::Quit),
            _ => None,
        }
    }
}
