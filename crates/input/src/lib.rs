//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key and
//! mouse events into [`crate::types::UiAction`] and keeps the keyboard cursor
//! on the board.

pub mod cursor;
pub mod map;

pub use tui_bloxx_types as types;

pub use cursor::BoardCursor;
pub use map::{handle_key_event, handle_mouse_event, handle_prompt_key, should_quit};
