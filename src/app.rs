//! Front-end state machine.
//!
//! [`App`] sits between the terminal loop and the [`GridEngine`]: it turns
//! [`UiAction`]s into engine calls and keeps everything the engine does not
//! know about (keyboard cursor, hint, match flash, side panels, prompts and the
//! cosmetic color settings). It does no terminal I/O, so the whole flow can be
//! driven from tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::core::{EngineSnapshot, SymbolSource};
use crate::engine::{EngineEvent, GridEngine, RoundOver, SelectOutcome};
use crate::input::BoardCursor;
use crate::scores::entry::{DATE_FORMAT, TIME_FORMAT};
use crate::scores::{record_round, Leaderboard};
use crate::term::{AdjustKnob, ColorAdjust, HudView, Overlay, Panel};
use crate::types::{Coord, Direction, EngineError, MatchCue, Move, UiAction, MATCH_FLASH_MS};

/// Step applied to a color knob per key press.
pub const KNOB_STEP: f32 = 0.05;

pub const DEFAULT_HELP: &[&str] = &[
    "Swap two neighboring tiles so",
    "that three or more equal symbols",
    "line up in a row or column.",
    "Matches vanish, the tiles above",
    "fall down and new ones drop in.",
    "",
    "The round ends when no swap can",
    "make a match. Fewer cleared",
    "blocks rank higher in the top 5.",
    "",
    "arrows/hjkl/wasd  move",
    "space/enter/click select",
    "backspace         drop selection",
];

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub struct App<S: SymbolSource> {
    engine: GridEngine<S>,
    snapshot: EngineSnapshot,
    cursor: BoardCursor,
    hint: Option<Move>,
    /// Positions cleared by every pass of the last accepted swap
    flash: Vec<Coord>,
    flash_ms_left: u32,
    last_chain: Option<(usize, MatchCue)>,
    status: String,
    panel: Panel,
    overlay: Overlay,
    adjust: ColorAdjust,
    knob: AdjustKnob,
    help_lines: Vec<String>,
    score_lines: Vec<String>,
    scores_path: PathBuf,
    player: String,
    last_rank: Option<usize>,
    clock: fn() -> NaiveDateTime,
    quit: bool,
}

impl<S: SymbolSource> App<S> {
    pub fn new(engine: GridEngine<S>, scores_path: impl Into<PathBuf>, player: impl Into<String>) -> Self {
        let mut app = Self {
            engine,
            snapshot: EngineSnapshot::default(),
            cursor: BoardCursor::new(),
            hint: None,
            flash: Vec::new(),
            flash_ms_left: 0,
            last_chain: None,
            status: String::new(),
            panel: Panel::None,
            overlay: Overlay::None,
            adjust: ColorAdjust::default(),
            knob: AdjustKnob::Saturation,
            help_lines: DEFAULT_HELP.iter().map(|s| s.to_string()).collect(),
            score_lines: Vec::new(),
            scores_path: scores_path.into(),
            player: player.into(),
            last_rank: None,
            clock: local_now,
            quit: false,
        };
        if app.engine.is_deadlocked() {
            app.overlay = Overlay::RoundOver;
        }
        app.drain_events();
        app.refresh_snapshot();
        app
    }

    /// Replace the built-in help text.
    pub fn with_help_text(mut self, text: &str) -> Self {
        self.help_lines = text.lines().map(|l| l.trim_end().to_string()).collect();
        self
    }

    /// Timestamp source for leaderboard entries.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_adjust(mut self, adjust: ColorAdjust) -> Self {
        self.adjust = adjust;
        self
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// True while a y/n prompt is up; keys go through the prompt mapping then.
    pub fn prompt_active(&self) -> bool {
        self.overlay != Overlay::None
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn engine(&self) -> &GridEngine<S> {
        &self.engine
    }

    pub fn snapshot(&self) -> &EngineSnapshot {
        &self.snapshot
    }

    pub fn cursor(&self) -> Coord {
        self.cursor.position()
    }

    pub fn hint(&self) -> Option<Move> {
        self.hint
    }

    pub fn flash(&self) -> &[Coord] {
        &self.flash
    }

    pub fn last_chain(&self) -> Option<(usize, MatchCue)> {
        self.last_chain
    }

    /// Note about the last engine event, shown in the side panel
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn adjust(&self) -> ColorAdjust {
        self.adjust
    }

    pub fn knob(&self) -> AdjustKnob {
        self.knob
    }

    /// Rank of the last recorded round, if it made the list
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn is_animating(&self) -> bool {
        !self.flash.is_empty()
    }

    pub fn handle(&mut self, action: UiAction) {
        match self.overlay {
            Overlay::ExitPrompt => self.handle_exit_prompt(action),
            Overlay::RoundOver => self.handle_round_over_prompt(action),
            Overlay::None => self.handle_play(action),
        }
        self.drain_events();
        self.refresh_snapshot();
    }

    fn drain_events(&mut self) {
        let Some(event) = self.engine.take_last_event() else {
            return;
        };
        self.status = match event {
            EngineEvent::BoardGenerated {
                round_id, fallback, ..
            } if fallback => format!("round {round_id}, fallback"),
            EngineEvent::BoardGenerated { round_id, .. } => format!("round {round_id} ready"),
            EngineEvent::SwapResolved { passes, .. } if passes > 1 => format!("chain x{passes}"),
            EngineEvent::SwapResolved { cue, .. } => cue.as_str().to_string(),
            EngineEvent::SwapRejected { .. } => "no match".to_string(),
            EngineEvent::RoundOver(_) => "no moves left".to_string(),
        };
    }

    fn handle_exit_prompt(&mut self, action: UiAction) {
        match action {
            UiAction::Confirm | UiAction::Quit => self.quit = true,
            UiAction::Decline => self.overlay = Overlay::None,
            _ => {}
        }
    }

    fn handle_round_over_prompt(&mut self, action: UiAction) {
        match action {
            UiAction::Confirm => self.restart(),
            UiAction::Decline | UiAction::Quit => self.quit = true,
            _ => {}
        }
    }

    fn handle_play(&mut self, action: UiAction) {
        match action {
            UiAction::Cursor(dir) if self.panel == Panel::Graphics => self.adjust_knob(dir),
            UiAction::Cursor(dir) => {
                self.cursor.step(dir);
            }
            UiAction::Select => self.select(self.cursor.position()),
            UiAction::Deselect => {
                self.engine.deselect();
            }
            UiAction::SelectAt(c) => {
                if self.cursor.jump(c) {
                    self.select(c);
                }
            }
            UiAction::Hint => {
                self.hint = self.engine.request_hint();
                debug!(hint = ?self.hint, "hint requested");
            }
            UiAction::ToggleGraphics => self.toggle_panel(Panel::Graphics),
            UiAction::ToggleHelp => self.toggle_panel(Panel::Help),
            UiAction::ToggleScores => {
                self.toggle_panel(Panel::Scores);
                if self.panel == Panel::Scores {
                    self.reload_scores();
                }
            }
            UiAction::Restart => self.restart(),
            UiAction::Quit => self.overlay = Overlay::ExitPrompt,
            UiAction::Confirm | UiAction::Decline => {}
        }
    }

    fn toggle_panel(&mut self, panel: Panel) {
        self.panel = if self.panel == panel { Panel::None } else { panel };
    }

    fn adjust_knob(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.knob = self.knob.cycle(false),
            Direction::Down => self.knob = self.knob.cycle(true),
            Direction::Left => self.adjust.nudge(self.knob, -KNOB_STEP),
            Direction::Right => self.adjust.nudge(self.knob, KNOB_STEP),
        }
    }

    fn select(&mut self, c: Coord) {
        match self.engine.select_cell(c) {
            Ok(SelectOutcome::SwapAccepted {
                passes,
                cleared,
                round_over,
                ..
            }) => {
                let biggest = passes.iter().map(|p| p.cleared()).max().unwrap_or(0);
                self.last_chain = Some((cleared, MatchCue::from_cleared(biggest)));

                self.flash = passes.iter().flat_map(|p| p.matches.iter()).collect();
                self.flash.sort_unstable();
                self.flash.dedup();
                self.flash_ms_left = MATCH_FLASH_MS;
                self.hint = None;

                if let Some(over) = round_over {
                    self.finish_round(over);
                }
            }
            Ok(SelectOutcome::SwapRejected { mv }) => {
                debug!(%mv, "swap formed no match");
            }
            Ok(SelectOutcome::SelectionChanged { .. }) | Ok(SelectOutcome::InvalidCoordinate) => {}
            Err(EngineError::Deadlocked) => self.overlay = Overlay::RoundOver,
            Err(err) => warn!(%err, "selection failed"),
        }
    }

    fn finish_round(&mut self, over: RoundOver) {
        let at = (self.clock)();
        match record_round(
            self.scores_path.clone(),
            over.total_cleared,
            over.elapsed_secs,
            at,
            &self.player,
        ) {
            Ok(rank) => {
                self.last_rank = rank;
                info!(round = over.round_id, ?rank, "round recorded");
            }
            Err(err) => {
                self.last_rank = None;
                warn!(error = %format!("{err:#}"), "could not save leaderboard");
            }
        }
        self.reload_scores();
        self.overlay = Overlay::RoundOver;
    }

    fn restart(&mut self) {
        self.engine.initialize();
        self.hint = None;
        self.flash.clear();
        self.flash_ms_left = 0;
        self.last_chain = None;
        self.overlay = Overlay::None;
        info!(round = self.engine.round_id(), "new round");
    }

    fn reload_scores(&mut self) {
        let board = Leaderboard::load(self.scores_path.clone());
        self.score_lines.clear();
        if board.is_empty() {
            self.score_lines.push("No entries yet.".to_string());
            return;
        }
        for (i, e) in board.entries().iter().enumerate() {
            self.score_lines.push(format!(
                "{}. {} blocks  {:.2}s",
                i + 1,
                e.cleared,
                e.elapsed_secs
            ));
            self.score_lines.push(format!(
                "   {} {} {}",
                e.date.format(DATE_FORMAT),
                e.time.format(TIME_FORMAT),
                e.player
            ));
        }
    }

    /// Advance play time and the match flash by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.engine.advance_clock(elapsed_ms);
        if self.flash_ms_left > 0 {
            self.flash_ms_left = self.flash_ms_left.saturating_sub(elapsed_ms);
            if self.flash_ms_left == 0 {
                self.flash.clear();
            }
        }
        self.refresh_snapshot();
    }

    fn refresh_snapshot(&mut self) {
        self.engine.snapshot_into(&mut self.snapshot);
    }

    pub fn panel_lines(&self) -> &[String] {
        match self.panel {
            Panel::Help => &self.help_lines,
            Panel::Scores => &self.score_lines,
            Panel::None | Panel::Graphics => &[],
        }
    }

    pub fn hud(&self) -> HudView<'_> {
        HudView {
            cursor: self.cursor.position(),
            hint: self.hint,
            flash: &self.flash,
            last_chain: self.last_chain,
            status: &self.status,
            panel: self.panel,
            panel_lines: self.panel_lines(),
            overlay: self.overlay,
            adjust: self.adjust,
            knob: self.knob,
            player: &self.player,
        }
    }

    /// Hash of everything a frame shows, for the render throttle.
    ///
    /// The clock is folded in at one-second resolution.
    pub fn view_fingerprint(&self) -> u64 {
        let mut h = DefaultHasher::new();
        self.snapshot.board_hash.hash(&mut h);
        self.snapshot.selected.hash(&mut h);
        self.snapshot.total_cleared.hash(&mut h);
        self.snapshot.round_id.hash(&mut h);
        (self.snapshot.elapsed_ms / 1000).hash(&mut h);
        self.cursor.position().hash(&mut h);
        self.hint.hash(&mut h);
        self.flash.hash(&mut h);
        self.last_chain.hash(&mut h);
        self.status.hash(&mut h);
        (self.panel as u8).hash(&mut h);
        (self.overlay as u8).hash(&mut h);
        (self.knob as u8).hash(&mut h);
        for knob in AdjustKnob::ALL {
            self.adjust.get(knob).to_bits().hash(&mut h);
        }
        self.panel_lines().hash(&mut h);
        h.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, ScriptedSource, SimpleRng};
    use crate::types::Symbol;
    use chrono::NaiveDate;

    fn dead_board() -> Board {
        Board::from_fn(|c| {
            let band = (c.row / 2 % 2) as u32;
            Symbol::wrapping(band * 4 + (c.row % 2) as u32 * 2 + (c.col % 2) as u32)
        })
    }

    /// Column 0 reads `7 7 6 7 0 2 ...`: swapping (2,0) and (3,0) clears
    /// rows 0..=2 of column 0. Refilled with 0 2 4 the board is `dead_board()`.
    fn last_move_board() -> Board {
        let mut board = dead_board();
        board.set(Coord::new(0, 0), Symbol::new(7));
        board.set(Coord::new(1, 0), Symbol::new(7));
        board.set(Coord::new(2, 0), Symbol::new(6));
        board.set(Coord::new(3, 0), Symbol::new(7));
        board
    }

    fn fixed_clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 5, 9))
            .unwrap()
    }

    fn app_with(board: Board, script: &[u8], dir: &tempfile::TempDir) -> App<ScriptedSource> {
        let engine = GridEngine::from_board(board, ScriptedSource::from_indices(script));
        App::new(engine, dir.path().join("top5.txt"), "mia").with_clock(fixed_clock)
    }

    #[test]
    fn cursor_moves_and_selects() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            GridEngine::new(SimpleRng::new(5)),
            dir.path().join("top5.txt"),
            "mia",
        );
        assert_eq!(app.cursor(), Coord::new(5, 5));

        app.handle(UiAction::Cursor(Direction::Up));
        app.handle(UiAction::Cursor(Direction::Left));
        assert_eq!(app.cursor(), Coord::new(4, 4));

        app.handle(UiAction::Select);
        assert_eq!(app.snapshot().selected, Some(Coord::new(4, 4)));
        app.handle(UiAction::Select);
        assert_eq!(app.snapshot().selected, Some(Coord::new(4, 4)));

        app.handle(UiAction::Deselect);
        assert_eq!(app.snapshot().selected, None);
    }

    #[test]
    fn last_move_records_round_and_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(last_move_board(), &[0, 2, 4], &dir);
        assert!(!app.prompt_active());

        app.tick(1500);
        app.handle(UiAction::SelectAt(Coord::new(2, 0)));
        app.handle(UiAction::SelectAt(Coord::new(3, 0)));

        assert!(app.engine().is_deadlocked());
        assert_eq!(app.overlay(), Overlay::RoundOver);
        assert_eq!(app.last_chain(), Some((3, MatchCue::Triple)));
        assert_eq!(app.flash().len(), 3);
        assert_eq!(app.last_rank(), Some(0));

        let text = std::fs::read_to_string(dir.path().join("top5.txt")).unwrap();
        assert_eq!(text.trim_end(), "3;2024-03-09;14:05:09;1.50;mia");
    }

    #[test]
    fn round_over_prompt_restarts_or_quits() {
        let dir = tempfile::tempdir().unwrap();
        let engine = GridEngine::from_board(dead_board(), SimpleRng::new(11));
        let mut app = App::new(engine, dir.path().join("top5.txt"), "mia");
        assert_eq!(app.overlay(), Overlay::RoundOver);

        // Board keys are ignored while the prompt is up.
        app.handle(UiAction::Hint);
        assert_eq!(app.hint(), None);

        app.handle(UiAction::Confirm);
        assert_eq!(app.overlay(), Overlay::None);
        assert!(!app.engine().is_deadlocked());
        assert_eq!(app.snapshot().round_id, 2);
        assert!(app.status().starts_with("round 2"), "{}", app.status());

        let engine = GridEngine::from_board(dead_board(), SimpleRng::new(11));
        let mut app = App::new(engine, dir.path().join("top5.txt"), "mia");
        app.handle(UiAction::Decline);
        assert!(app.should_quit());
    }

    #[test]
    fn exit_prompt_can_be_declined() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            GridEngine::new(SimpleRng::new(5)),
            dir.path().join("top5.txt"),
            "mia",
        );

        app.handle(UiAction::Quit);
        assert_eq!(app.overlay(), Overlay::ExitPrompt);
        app.handle(UiAction::Decline);
        assert_eq!(app.overlay(), Overlay::None);
        assert!(!app.should_quit());

        app.handle(UiAction::Quit);
        app.handle(UiAction::Confirm);
        assert!(app.should_quit());
    }

    #[test]
    fn hint_is_cleared_by_a_successful_swap() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(last_move_board(), &[0, 2, 4], &dir);

        app.handle(UiAction::Hint);
        let hint = app.hint().expect("board has a move");
        app.handle(UiAction::SelectAt(hint.a));
        app.handle(UiAction::SelectAt(hint.b));
        assert_eq!(app.hint(), None);
        assert!(app.engine().total_cleared() >= 3);
    }

    #[test]
    fn flash_fades_after_timer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(last_move_board(), &[0, 2, 4], &dir);
        app.handle(UiAction::SelectAt(Coord::new(2, 0)));
        app.handle(UiAction::SelectAt(Coord::new(3, 0)));
        assert!(app.is_animating());

        app.tick(MATCH_FLASH_MS - 1);
        assert!(app.is_animating());
        app.tick(1);
        assert!(!app.is_animating());
    }

    #[test]
    fn flash_covers_every_pass_of_the_swap() {
        let dir = tempfile::tempdir().unwrap();
        for seed in 1..30 {
            let mut app = App::new(
                GridEngine::new(SimpleRng::new(seed)),
                dir.path().join("top5.txt"),
                "mia",
            );
            let mut twin = GridEngine::new(SimpleRng::new(seed));

            let hint = twin.request_hint().expect("fresh board has a move");
            twin.select_cell(hint.a).unwrap();
            let SelectOutcome::SwapAccepted { passes, .. } = twin.select_cell(hint.b).unwrap()
            else {
                panic!("hinted swap must be accepted");
            };
            let mut expected: Vec<Coord> =
                passes.iter().flat_map(|p| p.matches.iter()).collect();
            expected.sort_unstable();
            expected.dedup();

            app.handle(UiAction::SelectAt(hint.a));
            app.handle(UiAction::SelectAt(hint.b));
            assert_eq!(app.flash(), expected.as_slice(), "seed {seed}");
        }
    }

    #[test]
    fn status_follows_engine_events() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(last_move_board(), &[0, 2, 4], &dir);
        assert_eq!(app.status(), "");

        // (5,5) and (5,6) swap two symbols of the same row pair: no match.
        app.handle(UiAction::SelectAt(Coord::new(5, 5)));
        app.handle(UiAction::SelectAt(Coord::new(5, 6)));
        assert_eq!(app.status(), "no match");

        app.handle(UiAction::SelectAt(Coord::new(2, 0)));
        app.handle(UiAction::SelectAt(Coord::new(3, 0)));
        assert_eq!(app.status(), "no moves left");
    }

    #[test]
    fn graphics_panel_takes_the_arrows() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            GridEngine::new(SimpleRng::new(5)),
            dir.path().join("top5.txt"),
            "mia",
        );
        app.handle(UiAction::ToggleGraphics);
        assert_eq!(app.panel(), Panel::Graphics);

        let cursor = app.cursor();
        app.handle(UiAction::Cursor(Direction::Down));
        assert_eq!(app.knob(), AdjustKnob::Brightness);
        app.handle(UiAction::Cursor(Direction::Right));
        assert!((app.adjust().get(AdjustKnob::Brightness) - 0.55).abs() < 1e-6);
        assert_eq!(app.cursor(), cursor);

        app.handle(UiAction::ToggleGraphics);
        assert_eq!(app.panel(), Panel::None);
        app.handle(UiAction::Cursor(Direction::Down));
        assert_ne!(app.cursor(), cursor);
    }

    #[test]
    fn panels_show_help_and_scores() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            GridEngine::new(SimpleRng::new(5)),
            dir.path().join("top5.txt"),
            "mia",
        )
        .with_help_text("line one\nline two\n");

        app.handle(UiAction::ToggleHelp);
        assert_eq!(app.panel_lines(), ["line one", "line two"]);

        app.handle(UiAction::ToggleScores);
        assert_eq!(app.panel(), Panel::Scores);
        assert_eq!(app.panel_lines(), ["No entries yet."]);
    }

    #[test]
    fn fingerprint_tracks_visible_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(
            GridEngine::new(SimpleRng::new(5)),
            dir.path().join("top5.txt"),
            "mia",
        );
        let a = app.view_fingerprint();
        assert_eq!(a, app.view_fingerprint());

        app.tick(400);
        assert_eq!(a, app.view_fingerprint());

        app.handle(UiAction::Cursor(Direction::Right));
        assert_ne!(a, app.view_fingerprint());
    }
}
