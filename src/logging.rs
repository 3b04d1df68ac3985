//! Log output for the `datadoc` binary.
//!
//! Stdout carries command results (tables, JSON plot data), so log events go
//! to stderr and to one daily-rotated file. Level and directory come from
//! [`AppSettings`]; `RUST_LOG` overrides the level. The library itself only
//! emits `tracing` events.

use crate::config::AppSettings;
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Prefix of the rotating log files: `datadoc.<YYYY-MM-DD>.log`.
const LOG_FILE_PREFIX: &str = "datadoc";

/// Log files kept before the oldest is removed.
const MAX_LOG_FILES: usize = 7;

/// Resolve and create the log directory: `settings.log_dir`, or
/// `<data_dir>/datadoc/logs`.
pub fn get_log_dir(settings: &AppSettings) -> Result<PathBuf> {
    let log_dir = match &settings.log_dir {
        Some(dir) => dir.clone(),
        None => dirs::data_dir()
            .context("Failed to determine data directory")?
            .join("datadoc")
            .join("logs"),
    };

    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    Ok(log_dir)
}

/// Filter from `RUST_LOG` when set, otherwise from the configured level.
fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level: {level}"))
}

/// Install the global subscriber. Returns the log directory in use.
///
/// # Errors
///
/// Returns error if the log directory cannot be created, the level does not
/// parse, or the file appender fails.
pub fn init(settings: &AppSettings) -> Result<PathBuf> {
    let log_dir = get_log_dir(settings)?;
    let filter = build_filter(&settings.log_level)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create log file appender")?;

    let stderr_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::debug!("Logging to {}", log_dir.display());

    Ok(log_dir)
}

/// Path of today's log file in `log_dir`.
pub fn current_log_path(log_dir: &Path) -> PathBuf {
    let today = chrono::Local::now().format("%Y-%m-%d");
    log_dir.join(format!("{LOG_FILE_PREFIX}.{today}.log"))
}
