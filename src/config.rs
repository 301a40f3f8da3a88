//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

pub const ABOUT: &str = "tui-bloxx: swap neighboring tiles, line up three or more, clear the board.";

#[derive(Parser, Debug, Clone)]
#[command(name = "tui-bloxx", version, about = "Swap-three tile matching puzzle for the terminal")]
pub struct Args {
    /// Seed for board generation and refills. Random when omitted.
    #[arg(long, env = "BLOXX_SEED")]
    pub seed: Option<u32>,

    /// Leaderboard file (five best rounds).
    #[arg(long, env = "BLOXX_SCORES", default_value = "data/top5.txt")]
    pub scores: PathBuf,

    /// Name recorded on the leaderboard. Defaults to the login name.
    #[arg(long, env = "BLOXX_PLAYER")]
    pub player: Option<String>,

    /// Draw grid lines between board cells.
    #[arg(long)]
    pub show_border: bool,

    /// Write a debug log to bloxx.log.
    #[arg(long)]
    pub log: bool,

    /// Print credits and exit.
    #[arg(long)]
    pub about: bool,
}

impl Args {
    pub fn seed_or_random(&self) -> u32 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// `--player`, then `USER` / `USERNAME`, then "player"
    pub fn player_name(&self) -> String {
        self.player
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "player".to_string())
    }

    /// Optional help text shipped next to the leaderboard file
    pub fn help_path(&self) -> PathBuf {
        self.scores
            .parent()
            .map(|dir| dir.join("help.txt"))
            .unwrap_or_else(|| PathBuf::from("help.txt"))
    }
}
