//! File logging.
//!
//! The terminal is in raw mode on the alternate screen while playing, so log
//! output never goes to stdout. Without `--log` no subscriber is installed and
//! `tracing` macros are no-ops.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing::Level;

pub const LOG_FILE: &str = "bloxx.log";

pub fn init_file(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(Level::DEBUG)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))?;
    tracing::debug!("logging enabled");
    Ok(())
}
