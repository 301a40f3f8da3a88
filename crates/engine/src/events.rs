use tui_bloxx_core::CascadePass;
use tui_bloxx_types::{Coord, MatchCue, Move};

/// Turn state of a [`GridEngine`](crate::GridEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    AwaitingSecondSelection(Coord),
    /// Only held while a swap's cascade is being drained
    CascadeResolving,
    Deadlocked,
}

impl EngineState {
    pub fn selected(self) -> Option<Coord> {
        match self {
            EngineState::AwaitingSecondSelection(c) => Some(c),
            _ => None,
        }
    }
}

/// End-of-round report, emitted once when the board runs out of moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundOver {
    pub round_id: u32,
    pub total_cleared: u32,
    pub moves: u32,
    /// Caller-supplied play time, see [`GridEngine::advance_clock`](crate::GridEngine::advance_clock)
    pub elapsed_secs: f64,
}

/// Result of [`GridEngine::select_cell`](crate::GridEngine::select_cell).
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    /// Selection set, moved (re-anchored) or cleared; no swap attempted
    SelectionChanged { selected: Option<Coord> },
    /// The swap matched; every cascade pass is reported in order
    SwapAccepted {
        mv: Move,
        passes: Vec<CascadePass>,
        cleared: usize,
        round_over: Option<RoundOver>,
    },
    /// The swap formed no match and was undone
    SwapRejected { mv: Move },
    /// The coordinate is off the board; nothing changed
    InvalidCoordinate,
}

impl SelectOutcome {
    pub fn round_over(&self) -> Option<RoundOver> {
        match self {
            SelectOutcome::SwapAccepted { round_over, .. } => *round_over,
            _ => None,
        }
    }
}

/// Last notable thing the engine did, kept until taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    BoardGenerated {
        round_id: u32,
        attempts: u32,
        fallback: bool,
    },
    SwapResolved {
        mv: Move,
        passes: usize,
        cleared: usize,
        /// Cue of the largest pass in the chain
        cue: MatchCue,
    },
    SwapRejected {
        mv: Move,
    },
    RoundOver(RoundOver),
}
