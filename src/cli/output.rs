//! Shared output helpers: quiet/JSON modes, notices, spinners, file writes.
//!
//! The global `--json`/`--quiet` flags are exported as environment variables
//! by `main` so every module can check them without plumbing.

use crate::events::Notice;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

/// True when `--json` was passed.
pub fn is_json() -> bool {
    std::env::var("REEFGUARD_JSON").is_ok()
}

/// True when `--quiet` was passed.
pub fn is_quiet() -> bool {
    std::env::var("REEFGUARD_QUIET").is_ok()
}

/// Print a machine-readable JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    println!("{value}");
}

/// Print a session notice the way a UI would toast it.
pub fn print_notice(notice: &Notice) {
    if is_quiet() || is_json() {
        return;
    }
    match &notice.detail {
        Some(detail) => eprintln!("  {}: {}", notice.message, detail),
        None => eprintln!("  {}", notice.message),
    }
}

/// Spinner shown while a request is outstanding; hidden in quiet/JSON modes.
pub fn spinner(message: &'static str) -> indicatif::ProgressBar {
    if is_quiet() || is_json() {
        return indicatif::ProgressBar::hidden();
    }
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Write an export to disk.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
