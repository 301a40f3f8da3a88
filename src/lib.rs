//! tui-bloxx (workspace facade crate).
//!
//! The game rules live in dedicated crates under `crates/`; this package
//! re-exports them as `tui_bloxx::{core,engine,input,scores,term,types}` and
//! adds the pieces the binary needs on top: command-line configuration, file
//! logging and the [`app::App`] front-end state machine.

pub mod app;
pub mod config;
pub mod logging;

pub use tui_bloxx_core as core;
pub use tui_bloxx_engine as engine;
pub use tui_bloxx_input as input;
pub use tui_bloxx_scores as scores;
pub use tui_bloxx_term as term;
pub use tui_bloxx_types as types;
