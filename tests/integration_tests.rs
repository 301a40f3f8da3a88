//! Integration tests for the front-end loop: key events in, app state out.

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use tui_bloxx::app::App;
use tui_bloxx::core::{has_match, SimpleRng};
use tui_bloxx::engine::GridEngine;
use tui_bloxx::input::{handle_key_event, handle_mouse_event, handle_prompt_key};
use tui_bloxx::scores::Leaderboard;
use tui_bloxx::term::{GameView, Overlay, Viewport};
use tui_bloxx::types::Coord;

fn new_app(seed: u32, dir: &tempfile::TempDir) -> App<SimpleRng> {
    App::new(
        GridEngine::new(SimpleRng::new(seed)),
        dir.path().join("top5.txt"),
        "tester",
    )
}

fn press(app: &mut App<SimpleRng>, code: KeyCode) {
    let key = KeyEvent::new(code, KeyModifiers::NONE);
    let action = if app.prompt_active() {
        handle_prompt_key(key)
    } else {
        handle_key_event(key)
    };
    if let Some(action) = action {
        app.handle(action);
    }
}

fn walk_to(app: &mut App<SimpleRng>, target: Coord) {
    while app.cursor().row < target.row {
        press(app, KeyCode::Down);
    }
    while app.cursor().row > target.row {
        press(app, KeyCode::Up);
    }
    while app.cursor().col < target.col {
        press(app, KeyCode::Char('l'));
    }
    while app.cursor().col > target.col {
        press(app, KeyCode::Char('h'));
    }
}

#[test]
fn test_play_a_hinted_move_with_the_keyboard() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = new_app(12345, &dir);

    press(&mut app, KeyCode::Char('t'));
    let hint = app.hint().expect("fresh board has moves");

    walk_to(&mut app, hint.a);
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.snapshot().selected, Some(hint.a));

    walk_to(&mut app, hint.b);
    press(&mut app, KeyCode::Enter);

    let snap = app.snapshot();
    assert_eq!(snap.moves_made, 1);
    assert!(snap.total_cleared >= 3);
    assert_eq!(snap.selected, None);
    assert!(app.last_chain().is_some());
    assert!(!has_match(app.engine().current_board()));
}

#[test]
fn test_mouse_click_selects_cell_under_pointer() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = new_app(7, &dir);
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let layout = view.layout(vp);

    // Middle column of cell (2, 6).
    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: layout.x + 1 + 6 * 3 + 1,
        row: layout.y + 1 + 2,
        modifiers: KeyModifiers::NONE,
    };
    let target = handle_mouse_event(click)
        .and_then(|(x, y)| view.hit_test(vp, x, y))
        .expect("click lands on the board");
    assert_eq!(target, Coord::new(2, 6));

    app.handle(tui_bloxx::types::UiAction::SelectAt(target));
    assert_eq!(app.cursor(), target);
    assert_eq!(app.snapshot().selected, Some(target));

    let release = MouseEvent {
        kind: MouseEventKind::Up(MouseButton::Left),
        ..click
    };
    assert_eq!(handle_mouse_event(release), None);
}

#[test]
fn test_exit_prompt_flow() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = new_app(1, &dir);

    press(&mut app, KeyCode::Char('q'));
    assert_eq!(app.overlay(), Overlay::ExitPrompt);

    // Cursor keys do nothing behind the prompt.
    let cursor = app.cursor();
    press(&mut app, KeyCode::Left);
    assert_eq!(app.cursor(), cursor);

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.overlay(), Overlay::None);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.overlay(), Overlay::ExitPrompt);
    press(&mut app, KeyCode::Char('j'));
    assert!(app.should_quit());
}

#[test]
fn test_restart_starts_a_fresh_round() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = new_app(99, &dir);
    app.tick(2000);

    press(&mut app, KeyCode::Char('t'));
    let hint = app.hint().unwrap();
    app.handle(tui_bloxx::types::UiAction::SelectAt(hint.a));
    app.handle(tui_bloxx::types::UiAction::SelectAt(hint.b));
    assert_eq!(app.snapshot().moves_made, 1);

    press(&mut app, KeyCode::Char('r'));
    let snap = app.snapshot();
    assert_eq!(snap.round_id, 2);
    assert_eq!(snap.moves_made, 0);
    assert_eq!(snap.total_cleared, 0);
    assert_eq!(snap.elapsed_ms, 0);
    assert_eq!(app.last_chain(), None);
}

#[test]
fn test_following_hints_until_the_board_runs_dry() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = new_app(4242, &dir);

    for _ in 0..500 {
        if app.prompt_active() {
            break;
        }
        press(&mut app, KeyCode::Char('t'));
        let Some(hint) = app.hint() else {
            break;
        };
        app.tick(100);
        app.handle(tui_bloxx::types::UiAction::SelectAt(hint.a));
        app.handle(tui_bloxx::types::UiAction::SelectAt(hint.b));
        assert!(!has_match(app.engine().current_board()));
    }

    if app.overlay() == Overlay::RoundOver {
        let board = Leaderboard::load(dir.path().join("top5.txt"));
        assert_eq!(board.entries().len(), 1);
        assert_eq!(board.entries()[0].cleared, app.snapshot().total_cleared);
        assert_eq!(board.entries()[0].player, "tester");

        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.overlay(), Overlay::None);
        assert!(!app.engine().is_deadlocked());
    } else {
        assert!(app.snapshot().moves_made >= 1);
    }
}
