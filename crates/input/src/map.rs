//! Key mapping from terminal events to UI actions.

use crate::types::{Direction, UiAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input during play to UI actions.
pub fn handle_key_event(key: KeyEvent) -> Option<UiAction> {
    if should_quit(key) {
        return Some(UiAction::Quit);
    }

    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(UiAction::Cursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(UiAction::Cursor(Direction::Right))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(UiAction::Cursor(Direction::Down))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(UiAction::Cursor(Direction::Up))
        }

        // Actions
        KeyCode::Char(' ') | KeyCode::Enter => Some(UiAction::Select),
        KeyCode::Backspace | KeyCode::Delete => Some(UiAction::Deselect),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(UiAction::Hint),

        // Panels
        KeyCode::Char('g') | KeyCode::Char('G') => Some(UiAction::ToggleGraphics),
        KeyCode::Char('?') => Some(UiAction::ToggleHelp),
        KeyCode::Char('o') | KeyCode::Char('O') => Some(UiAction::ToggleScores),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UiAction::Restart),

        _ => None,
    }
}

/// Map keyboard input while a yes/no prompt is open.
///
/// `y` and `j` answer yes, `n` and Esc answer no. Everything else is ignored
/// so cursor keys cannot leak into the board behind the prompt.
pub fn handle_prompt_key(key: KeyEvent) -> Option<UiAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(UiAction::Quit);
    }

    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(UiAction::Confirm)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(UiAction::Decline),
        _ => None,
    }
}

/// Screen cell of a left click, for hit-testing against the board view.
pub fn handle_mouse_event(ev: MouseEvent) -> Option<(u16, u16)> {
    match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((ev.column, ev.row)),
        _ => None,
    }
}

/// Check if key should open the exit prompt.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
