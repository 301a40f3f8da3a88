//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws into a plain
//! framebuffer, and the renderer flushes only the cells that changed since the
//! last frame. No widget toolkit is involved.
//!
//! - [`fb`]: framebuffer, cell styles and colors
//! - [`game_view`]: board, side panel, panels and prompts; mouse hit-testing
//! - [`palette`]: symbol colors and the cosmetic color adjustment
//! - [`render_throttle`]: skip redraws while nothing changes
//! - [`renderer`]: crossterm output with diffing

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod render_throttle;
pub mod renderer;

pub use tui_bloxx_core as core;
pub use tui_bloxx_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardLayout, GameView, HudView, Overlay, Panel, Viewport};
pub use palette::{AdjustKnob, ColorAdjust};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
