//! One leaderboard line
//!
//! Format: `cleared;YYYY-MM-DD;HH:MM:SS;elapsed_secs;player`, with the elapsed
//! time written to two decimals. Fields are trimmed on read.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

const FIELDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("expected 5 fields, found {0}")]
    FieldCount(usize),
    #[error("bad cleared count {0:?}")]
    Cleared(String),
    #[error("bad date {0:?}")]
    Date(String),
    #[error("bad time {0:?}")]
    Time(String),
    #[error("bad elapsed seconds {0:?}")]
    Elapsed(String),
}

/// A finished round on the leaderboard. Fewer cleared blocks rank higher.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub cleared: u32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub elapsed_secs: f64,
    pub player: String,
}

impl ScoreEntry {
    pub fn new(cleared: u32, elapsed_secs: f64, at: NaiveDateTime, player: &str) -> Self {
        Self {
            cleared,
            date: at.date(),
            // Stored with whole-second precision
            time: at.time().with_nanosecond(0).unwrap_or(at.time()),
            elapsed_secs,
            player: sanitize_player(player),
        }
    }

    pub fn parse_line(line: &str) -> Result<Self, LineError> {
        let parts: Vec<&str> = line.split(';').map(str::trim).collect();
        if parts.len() != FIELDS {
            return Err(LineError::FieldCount(parts.len()));
        }

        let cleared = parts[0]
            .parse::<u32>()
            .map_err(|_| LineError::Cleared(parts[0].to_string()))?;
        let date = NaiveDate::parse_from_str(parts[1], DATE_FORMAT)
            .map_err(|_| LineError::Date(parts[1].to_string()))?;
        let time = NaiveTime::parse_from_str(parts[2], TIME_FORMAT)
            .map_err(|_| LineError::Time(parts[2].to_string()))?;
        let elapsed_secs = parts[3]
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| LineError::Elapsed(parts[3].to_string()))?;

        Ok(Self {
            cleared,
            date,
            time,
            elapsed_secs,
            player: parts[4].to_string(),
        })
    }

    pub fn format_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{:.2};{}",
            self.cleared,
            self.date.format(DATE_FORMAT),
            self.time.format(TIME_FORMAT),
            self.elapsed_secs,
            self.player
        )
    }
}

/// Replace characters that would break the line format.
pub fn sanitize_player(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|ch| if ch == ';' || ch.is_control() { '_' } else { ch })
        .collect();
    if cleaned.is_empty() {
        "player".to_string()
    } else {
        cleaned
    }
}
