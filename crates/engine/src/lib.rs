//! Grid engine - the single entry point front ends drive
//!
//! [`GridEngine`] owns the board and composes the core rules into a turn state
//! machine:
//!
//! ```text
//! Idle --select--> AwaitingSecondSelection(first)
//!   AwaitingSecondSelection --same cell--> Idle
//!   AwaitingSecondSelection --other, not adjacent--> AwaitingSecondSelection(other)
//!   AwaitingSecondSelection --adjacent--> swap
//!       rejected  -> Idle
//!       accepted  -> CascadeResolving -> Idle
//! Idle --no moves left--> Deadlocked --initialize--> Idle
//! ```
//!
//! All operations are synchronous. Play time is fed in by the caller through
//! [`GridEngine::advance_clock`]; the engine never reads a clock itself.
//!
//! # Example
//!
//! ```
//! use tui_bloxx_core::SimpleRng;
//! use tui_bloxx_engine::{GridEngine, SelectOutcome};
//!
//! let mut engine = GridEngine::new(SimpleRng::new(2024));
//! let hint = engine.request_hint().expect("fresh boards always have moves");
//!
//! engine.select_cell(hint.a).unwrap();
//! let outcome = engine.select_cell(hint.b).unwrap();
//! assert!(matches!(outcome, SelectOutcome::SwapAccepted { .. }));
//! assert!(engine.total_cleared() >= 3);
//! ```

pub mod events;
pub mod grid;

pub use tui_bloxx_core as core;
pub use tui_bloxx_types as types;

pub use events::{EngineEvent, EngineState, RoundOver, SelectOutcome};
pub use grid::GridEngine;
