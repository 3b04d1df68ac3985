//! Persistence layer for generated reports.
//!
//! Markdown and JSON reports are written under a `reports/` subdirectory of
//! the configured output directory unless an explicit path is given.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default directory name for storing reports.
pub const REPORTS_DIR: &str = "reports";

/// Default location for a report named `stem` with extension `ext`.
pub fn report_path(base_path: &Path, stem: &str, ext: &str) -> PathBuf {
    base_path.join(REPORTS_DIR).join(format!("{stem}.{ext}"))
}

/// Write a text report, creating parent directories as needed.
///
/// # Returns
///
/// The path that was written.
pub fn save_report(content: &str, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    Ok(path.to_path_buf())
}

/// Serialize `value` as pretty JSON and write it to `path`.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    save_report(&json, path)
}
