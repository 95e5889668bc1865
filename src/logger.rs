//! File logging setup.
//!
//! The TUI owns the terminal, so log records never go to stdout/stderr.
//! When logging is enabled, records are written to a file in the local data
//! directory through a `fern` dispatch installed as the global `log` logger.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the path of the log file
pub fn get_log_file_path() -> Result<PathBuf> {
    dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
        .map(|dir| dir.join("fleetdash").join("fleetdash.log"))
}

/// Build a dispatch writing to `path` at the configured level.
///
/// Kept separate from [`init`] so callers can inspect or test the dispatch
/// without installing it globally.
pub fn build_dispatch(config: &LoggingConfig, path: &Path) -> Result<fern::Dispatch> {
    let level = config.level_filter()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

    Ok(fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // reqwest/hyper internals are too chatty below warn
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .chain(file))
}

/// Install the global logger according to config.
///
/// Returns the log file path when logging was enabled, `None` otherwise.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let path = get_log_file_path()?;
    build_dispatch(config, &path)?
        .apply()
        .context("Failed to install logger")?;

    log::info!("Logging initialised at level {}", config.level);
    Ok(Some(path))
}
