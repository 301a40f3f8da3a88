use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::{debug, warn};

use tui_bloxx_types::LEADERBOARD_SIZE;

use crate::entry::ScoreEntry;

/// The top list backed by a text file, best (fewest cleared) first.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// An empty board that will be saved to `path`
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Load the list; a missing or unreadable file gives an empty list.
    ///
    /// Blank lines are ignored and malformed lines skipped. The result is
    /// re-sorted and cut to [`LEADERBOARD_SIZE`].
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let mut board = Self::empty(path);

        let text = match fs::read_to_string(&board.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %board.path.display(), "no leaderboard yet");
                return board;
            }
            Err(e) => {
                warn!(path = %board.path.display(), error = %e, "leaderboard unreadable");
                return board;
            }
        };

        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match ScoreEntry::parse_line(line) {
                Ok(entry) => board.entries.push(entry),
                Err(e) => warn!(line = lineno + 1, error = %e, "skipping leaderboard line"),
            }
        }

        board.entries.sort_by_key(|e| e.cleared);
        board.entries.truncate(LEADERBOARD_SIZE);
        board
    }

    /// Insert keeping ascending order; ties go after existing entries.
    ///
    /// Returns the 0-based rank, or `None` if the entry did not make the list.
    pub fn insert(&mut self, entry: ScoreEntry) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|e| e.cleared > entry.cleared)
            .unwrap_or(self.entries.len());
        if rank >= LEADERBOARD_SIZE {
            return None;
        }

        self.entries.insert(rank, entry);
        self.entries.truncate(LEADERBOARD_SIZE);
        Some(rank)
    }

    /// Rewrite the whole file, creating its directory if needed.
    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }

        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(&entry.format_line());
            text.push('\n');
        }
        fs::write(&self.path, text)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reload, insert and save one finished round.
pub fn record_round(
    path: impl Into<PathBuf>,
    cleared: u32,
    elapsed_secs: f64,
    at: NaiveDateTime,
    player: &str,
) -> Result<Option<usize>> {
    let mut board = Leaderboard::load(path);
    let rank = board.insert(ScoreEntry::new(cleared, elapsed_secs, at, player));
    board.save()?;
    debug!(cleared, ?rank, "round recorded");
    Ok(rank)
}
