//! Core grid logic - pure, deterministic, and testable
//!
//! This crate contains the board and every rule that reads or changes it.
//! It has **zero dependencies** on UI, terminal or I/O, making it:
//!
//! - **Deterministic**: symbols come from an injected [`SymbolSource`]; same seed, same boards
//! - **Testable**: every rule is a free function over a [`Board`]
//! - **Fast**: fixed-size storage, no allocation on the scan and trial-swap paths
//!
//! # Module Structure
//!
//! - [`board`]: 10x10 grid with flat storage, column compaction and fingerprinting
//! - [`matcher`]: run detection (`scan`, `has_match`, `completes_run`)
//! - [`swap`]: swap validation with exact revert on rejection
//! - [`cascade`]: lazy clear/compact/refill passes, bounded by in-place repair
//! - [`deadlock`]: move counting and the first-move hint
//! - [`generate`]: stable board generation behind a minimum-move gate
//! - [`rng`]: symbol sources (seeded LCG and scripted)
//! - [`snapshot`]: plain-data engine snapshot for front ends
//!
//! # Example
//!
//! ```
//! use tui_bloxx_core::{count_available_moves, generate, resolve, scan, SimpleRng};
//! use tui_bloxx_core::types::MIN_START_MOVES;
//!
//! let mut rng = SimpleRng::new(12345);
//! let mut generated = generate(&mut rng, MIN_START_MOVES);
//!
//! // Fresh boards are stable and offer enough moves.
//! assert!(scan(&generated.board).is_empty());
//! assert_eq!(count_available_moves(&mut generated.board, MIN_START_MOVES), MIN_START_MOVES);
//!
//! // Resolving a stable board is a no-op.
//! let summary = resolve(&mut generated.board, &mut rng);
//! assert_eq!(summary.total_cleared, 0);
//! ```

pub mod board;
pub mod cascade;
pub mod deadlock;
pub mod generate;
pub mod matcher;
pub mod rng;
pub mod snapshot;
pub mod swap;

pub use tui_bloxx_types as types;

// Re-export commonly used items for convenience
pub use board::Board;
pub use cascade::{resolve, safe_symbol, Cascade, CascadePass, CascadeSummary};
pub use deadlock::{candidate_moves, count_available_moves, find_first_move, is_deadlocked};
pub use generate::{fallback_board, fill_stable, generate, Generated};
pub use matcher::{completes_run, has_match, scan, MatchSet, Run};
pub use rng::{ScriptedSource, SimpleRng, SymbolSource};
pub use snapshot::EngineSnapshot;
pub use swap::{swap_would_match, try_swap, SwapOutcome};
