//! Leaderboard persistence
//!
//! Finished rounds are kept in a small text file (`data/top5.txt` by default),
//! one `cleared;date;time;elapsed;player` line per entry, sorted ascending by
//! cleared blocks: finishing a board with fewer blocks cleared ranks higher.
//! Only the best [`LEADERBOARD_SIZE`](tui_bloxx_types::LEADERBOARD_SIZE)
//! entries are kept and the file is rewritten in full on every update.
//!
//! Reading never fails: a missing file is an empty list and bad lines are
//! skipped with a warning. Writing returns an [`anyhow::Result`] the caller can
//! log.

pub mod entry;
pub mod leaderboard;

pub use entry::{sanitize_player, LineError, ScoreEntry};
pub use leaderboard::{record_round, Leaderboard};
