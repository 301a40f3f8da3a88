//! GridEngine - the turn state machine
//!
//! The engine owns the board and the symbol source. Every public operation
//! runs to completion before returning: a swap is either undone or fully
//! resolved, so callers only ever observe stable boards.

use tracing::{debug, info, instrument};

use tui_bloxx_core::{
    count_available_moves, find_first_move, generate, resolve, try_swap, Board, EngineSnapshot,
    SwapOutcome, SymbolSource,
};
use tui_bloxx_types::{
    Coord, EngineError, MatchCue, Move, DEADLOCK_CHECK_CAP, MIN_START_MOVES,
};

use crate::events::{EngineEvent, EngineState, RoundOver, SelectOutcome};

pub struct GridEngine<S: SymbolSource> {
    board: Board,
    source: S,
    state: EngineState,
    total_cleared: u32,
    moves_made: u32,
    round_id: u32,
    fallback: bool,
    elapsed_ms: u64,
    last_event: Option<EngineEvent>,
}

impl<S: SymbolSource> GridEngine<S> {
    /// Create an engine and generate its first board.
    pub fn new(source: S) -> Self {
        let mut engine = Self::blank(Board::empty(), source);
        engine.initialize();
        engine
    }

    /// Adopt a caller-built board.
    ///
    /// Runs already on the board are resolved first (not counted), then the
    /// deadlock check runs, so a dead board starts out `Deadlocked`.
    pub fn from_board(board: Board, source: S) -> Self {
        let mut engine = Self::blank(board, source);
        engine.round_id = 1;
        resolve(&mut engine.board, &mut engine.source);
        engine.settle();
        engine
    }

    fn blank(board: Board, source: S) -> Self {
        Self {
            board,
            source,
            state: EngineState::Idle,
            total_cleared: 0,
            moves_made: 0,
            round_id: 0,
            fallback: false,
            elapsed_ms: 0,
            last_event: None,
        }
    }

    /// Start a new round on a freshly generated board.
    ///
    /// Valid in every state, including `Deadlocked`.
    #[instrument(skip(self), fields(round = self.round_id + 1))]
    pub fn initialize(&mut self) -> &Board {
        let generated = generate(&mut self.source, MIN_START_MOVES);

        self.board = generated.board;
        self.state = EngineState::Idle;
        self.total_cleared = 0;
        self.moves_made = 0;
        self.elapsed_ms = 0;
        self.round_id = self.round_id.wrapping_add(1);
        self.fallback = generated.fallback;

        info!(
            attempts = generated.attempts,
            fallback = generated.fallback,
            "board generated"
        );
        self.last_event = Some(EngineEvent::BoardGenerated {
            round_id: self.round_id,
            attempts: generated.attempts,
            fallback: generated.fallback,
        });

        &self.board
    }

    /// Handle a click/selection on `c`.
    ///
    /// - first selection: remember `c`
    /// - adjacent cell: attempt the swap
    /// - any other cell, including the selected one: re-anchor on `c`
    pub fn select_cell(&mut self, c: Coord) -> Result<SelectOutcome, EngineError> {
        if self.state == EngineState::Deadlocked {
            return Err(EngineError::Deadlocked);
        }
        if !c.in_bounds() {
            return Ok(SelectOutcome::InvalidCoordinate);
        }

        match self.state {
            EngineState::AwaitingSecondSelection(first) if first.is_adjacent(c) => {
                self.swap(first, c)
            }
            _ => {
                self.state = EngineState::AwaitingSecondSelection(c);
                Ok(SelectOutcome::SelectionChanged { selected: Some(c) })
            }
        }
    }

    /// Drop the pending selection. Returns false when nothing was selected.
    pub fn deselect(&mut self) -> bool {
        if let EngineState::AwaitingSecondSelection(c) = self.state {
            debug!(%c, "selection dropped");
            self.state = EngineState::Idle;
            return true;
        }
        false
    }

    fn swap(&mut self, a: Coord, b: Coord) -> Result<SelectOutcome, EngineError> {
        let mv = Move::new(a, b);

        if let SwapOutcome::Rejected = try_swap(&mut self.board, a, b)? {
            debug!(%mv, "swap rejected");
            self.state = EngineState::Idle;
            self.last_event = Some(EngineEvent::SwapRejected { mv });
            self.settle();
            return Ok(SelectOutcome::SwapRejected { mv });
        }

        self.state = EngineState::CascadeResolving;
        let summary = resolve(&mut self.board, &mut self.source);
        let cleared = summary.total_cleared;
        let biggest = summary.passes.iter().map(|p| p.cleared()).max().unwrap_or(0);

        self.total_cleared = self.total_cleared.saturating_add(cleared as u32);
        self.moves_made = self.moves_made.saturating_add(1);
        self.state = EngineState::Idle;

        debug!(
            %mv,
            passes = summary.passes.len(),
            cleared,
            total = self.total_cleared,
            "swap resolved"
        );
        self.last_event = Some(EngineEvent::SwapResolved {
            mv,
            passes: summary.passes.len(),
            cleared,
            cue: MatchCue::from_cleared(biggest),
        });

        let round_over = self.settle();
        Ok(SelectOutcome::SwapAccepted {
            mv,
            passes: summary.passes,
            cleared,
            round_over,
        })
    }

    /// Deadlock check run after every return to Idle.
    ///
    /// On deadlock the `RoundOver` event replaces any event from the same turn.
    fn settle(&mut self) -> Option<RoundOver> {
        if count_available_moves(&mut self.board, DEADLOCK_CHECK_CAP) > 0 {
            return None;
        }

        let over = RoundOver {
            round_id: self.round_id,
            total_cleared: self.total_cleared,
            moves: self.moves_made,
            elapsed_secs: self.elapsed_ms as f64 / 1000.0,
        };
        self.state = EngineState::Deadlocked;
        info!(
            round = over.round_id,
            cleared = over.total_cleared,
            moves = over.moves,
            elapsed_secs = over.elapsed_secs,
            "no moves left"
        );
        self.last_event = Some(EngineEvent::RoundOver(over));
        Some(over)
    }

    /// First legal move in scan order; `None` when deadlocked.
    pub fn request_hint(&mut self) -> Option<Move> {
        if self.state == EngineState::Deadlocked {
            return None;
        }
        find_first_move(&mut self.board)
    }

    /// Add caller-measured play time. Ignored once the round is over.
    pub fn advance_clock(&mut self, elapsed_ms: u32) {
        if self.state != EngineState::Deadlocked {
            self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms as u64);
        }
    }

    pub fn take_last_event(&mut self) -> Option<EngineEvent> {
        self.last_event.take()
    }

    pub fn is_deadlocked(&self) -> bool {
        self.state == EngineState::Deadlocked
    }

    pub fn current_board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn selected(&self) -> Option<Coord> {
        self.state.selected()
    }

    pub fn total_cleared(&self) -> u32 {
        self.total_cleared
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn fallback(&self) -> bool {
        self.fallback
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn snapshot_into(&self, out: &mut EngineSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.board_hash = self.board.fingerprint();
        out.selected = self.selected();
        out.deadlocked = self.is_deadlocked();
        out.total_cleared = self.total_cleared;
        out.moves_made = self.moves_made;
        out.round_id = self.round_id;
        out.elapsed_ms = self.elapsed_ms;
        out.fallback = self.fallback;
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let mut s = EngineSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_bloxx_core::{has_match, ScriptedSource, SimpleRng};
    use tui_bloxx_types::Symbol;

    /// No swap on this board can line up three equal symbols.
    fn dead_board() -> Board {
        Board::from_fn(|c| {
            let band = (c.row / 2 % 2) as u32;
            Symbol::wrapping(band * 4 + (c.row % 2) as u32 * 2 + (c.col % 2) as u32)
        })
    }

    /// Dead board with row 0 reading `7 7 0 7 ...`: swapping (0,2) and (0,3)
    /// is a legal move.
    fn live_board() -> Board {
        let s = Symbol::new(7).unwrap();
        let mut board = dead_board();
        board.set(Coord::new(0, 0), Some(s));
        board.set(Coord::new(0, 1), Some(s));
        board.set(Coord::new(0, 3), Some(s));
        board
    }

    fn live_engine() -> GridEngine<ScriptedSource> {
        GridEngine::from_board(live_board(), ScriptedSource::from_indices(&[2, 3, 2]))
    }

    #[test]
    fn new_engine_starts_idle_with_playable_board() {
        let mut engine = GridEngine::new(SimpleRng::new(7));
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.round_id(), 1);
        assert!(!engine.is_deadlocked());
        assert!(!has_match(engine.current_board()));
        assert!(matches!(
            engine.take_last_event(),
            Some(EngineEvent::BoardGenerated { round_id: 1, .. })
        ));
        assert_eq!(engine.take_last_event(), None);
    }

    #[test]
    fn accepted_swap_resolves_and_counts() {
        let mut engine = live_engine();
        assert_eq!(engine.state(), EngineState::Idle);

        let first = engine.select_cell(Coord::new(0, 2)).unwrap();
        assert_eq!(
            first,
            SelectOutcome::SelectionChanged {
                selected: Some(Coord::new(0, 2))
            }
        );

        let outcome = engine.select_cell(Coord::new(0, 3)).unwrap();
        let SelectOutcome::SwapAccepted {
            mv, passes, cleared, ..
        } = outcome
        else {
            panic!("expected accepted swap, got {:?}", outcome);
        };
        assert_eq!(mv, Move::new(Coord::new(0, 2), Coord::new(0, 3)));
        assert_eq!(cleared, 3);
        assert_eq!(passes.len(), 1);
        assert_eq!(engine.total_cleared(), 3);
        assert_eq!(engine.moves_made(), 1);
        assert!(!has_match(engine.current_board()));
        assert!(engine.current_board().is_full());
        assert_eq!(engine.selected(), None);

        // Refilled from the script: row 0 now starts 2 3 2.
        let board = engine.current_board();
        assert_eq!(board.symbol_at(Coord::new(0, 0)), Symbol::new(2));
        assert_eq!(board.symbol_at(Coord::new(0, 1)), Symbol::new(3));
        assert_eq!(board.symbol_at(Coord::new(0, 2)), Symbol::new(2));
    }

    #[test]
    fn rejected_swap_restores_board() {
        let mut engine = live_engine();
        let before = engine.current_board().clone();

        engine.select_cell(Coord::new(4, 4)).unwrap();
        let outcome = engine.select_cell(Coord::new(4, 5)).unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::SwapRejected {
                mv: Move::new(Coord::new(4, 4), Coord::new(4, 5))
            }
        );
        assert_eq!(engine.current_board(), &before);
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.moves_made(), 0);
        assert!(matches!(
            engine.take_last_event(),
            Some(EngineEvent::SwapRejected { .. })
        ));
    }

    #[test]
    fn non_adjacent_second_selection_re_anchors() {
        let mut engine = live_engine();
        let before = engine.current_board().clone();

        engine.select_cell(Coord::new(0, 0)).unwrap();
        let outcome = engine.select_cell(Coord::new(5, 5)).unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::SelectionChanged {
                selected: Some(Coord::new(5, 5))
            }
        );
        assert_eq!(
            engine.state(),
            EngineState::AwaitingSecondSelection(Coord::new(5, 5))
        );
        assert_eq!(engine.current_board(), &before);
    }

    #[test]
    fn same_cell_twice_stays_selected() {
        let mut engine = GridEngine::new(SimpleRng::new(7));
        let before = engine.current_board().clone();

        engine.select_cell(Coord::new(3, 3)).unwrap();
        let outcome = engine.select_cell(Coord::new(3, 3)).unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::SelectionChanged {
                selected: Some(Coord::new(3, 3))
            }
        );
        assert_eq!(
            engine.state(),
            EngineState::AwaitingSecondSelection(Coord::new(3, 3))
        );
        assert_eq!(engine.current_board(), &before);
        assert_eq!(engine.moves_made(), 0);
    }

    #[test]
    fn deselect_drops_only_a_pending_selection() {
        let mut engine = live_engine();
        assert!(!engine.deselect());

        engine.select_cell(Coord::new(3, 3)).unwrap();
        assert!(engine.deselect());
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.selected(), None);
    }

    #[test]
    fn out_of_bounds_selection_changes_nothing() {
        let mut engine = live_engine();
        engine.select_cell(Coord::new(2, 2)).unwrap();

        for c in [Coord::new(-1, 0), Coord::new(0, 10), Coord::new(10, 10)] {
            assert_eq!(
                engine.select_cell(c).unwrap(),
                SelectOutcome::InvalidCoordinate
            );
        }
        assert_eq!(
            engine.state(),
            EngineState::AwaitingSecondSelection(Coord::new(2, 2))
        );
    }

    #[test]
    fn dead_board_is_deadlocked_without_hint() {
        let mut engine = GridEngine::from_board(dead_board(), SimpleRng::new(1));
        assert!(engine.is_deadlocked());
        assert_eq!(engine.request_hint(), None);
        assert_eq!(
            engine.select_cell(Coord::new(0, 0)),
            Err(EngineError::Deadlocked)
        );
        let Some(EngineEvent::RoundOver(over)) = engine.take_last_event() else {
            panic!("expected round over event");
        };
        assert_eq!(over.total_cleared, 0);
        assert_eq!(over.moves, 0);
    }

    #[test]
    fn initialize_recovers_from_deadlock() {
        let mut engine = GridEngine::from_board(dead_board(), SimpleRng::new(1));
        assert!(engine.is_deadlocked());

        engine.initialize();
        assert!(!engine.is_deadlocked());
        assert_eq!(engine.round_id(), 2);
        assert!(engine.request_hint().is_some());
    }

    #[test]
    fn hint_is_first_move_and_does_not_mutate() {
        let mut engine = live_engine();
        engine.select_cell(Coord::new(7, 7)).unwrap();
        let before = engine.current_board().clone();

        assert_eq!(
            engine.request_hint(),
            Some(Move::new(Coord::new(0, 2), Coord::new(0, 3)))
        );
        assert_eq!(engine.current_board(), &before);
        assert_eq!(
            engine.state(),
            EngineState::AwaitingSecondSelection(Coord::new(7, 7))
        );
    }

    #[test]
    fn clock_accumulates_until_round_over() {
        let mut engine = live_engine();
        engine.advance_clock(1200);
        engine.advance_clock(300);
        assert_eq!(engine.elapsed_ms(), 1500);

        let mut dead = GridEngine::from_board(dead_board(), SimpleRng::new(1));
        dead.advance_clock(1000);
        assert_eq!(dead.elapsed_ms(), 0);
    }

    #[test]
    fn snapshot_mirrors_engine() {
        let mut engine = live_engine();
        engine.select_cell(Coord::new(1, 1)).unwrap();
        engine.advance_clock(250);

        let snap = engine.snapshot();
        assert_eq!(snap.selected, Some(Coord::new(1, 1)));
        assert_eq!(snap.board_hash, engine.current_board().fingerprint());
        assert_eq!(snap.symbol_at(Coord::new(0, 0)), Some(7));
        assert_eq!(snap.elapsed_ms, 250);
        assert!(snap.playable());
    }
}
