//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::Context;
use pokersheet_core::{PokerLog, WalkOptions, walk_str};

/// Reads and walks a session log.
///
/// A walk error means nothing downstream should be written.
pub fn load_log(path: &Path, options: WalkOptions) -> anyhow::Result<PokerLog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read session log {}", path.display()))?;

    let log = walk_str(&text, options)
        .with_context(|| format!("invalid session log {}", path.display()))?;

    tracing::info!(
        sessions = log.sessions.len(),
        years = log.years.len(),
        anomalies = log.anomalies.len(),
        skipped = log.skipped.len(),
        "walked session log"
    );
    Ok(log)
}
