//! Utilities (source file loading, tracing setup, unicode helpers).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

pub mod unicode;

/// Read a source file for the editor. Only UTF-8 text is accepted.
pub fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("Source file '{}' does not exist", path.display());
    }
    if !path.is_file() {
        bail!("'{}' is not a file", path.display());
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file '{}'", path.display()))
}

/// Where tracing output goes.
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// Tracing disabled (the TUI owns the terminal and no file was given).
    Off,
}

pub fn init_tracing(level: &str, target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_env("POKE_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogTarget::File(path) => {
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        LogTarget::Off => {}
    }
    Ok(())
}
