//! Persisted settings for the `datadoc` binary.
//!
//! Settings live in `<data_dir>/datadoc/config.json` unless `--config` points
//! elsewhere. Absent keys take their defaults; a file that exists but does not
//! parse is an error, never a silent fallback.

use crate::dictionary::renderer::{DEFAULT_FIELDS_TITLE, DEFAULT_TABLES_TITLE};
use crate::pipeline::ZeroDivisionPolicy;
use crate::plot::DEFAULT_BINS;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Policy used by `divide` when `--on-zero` is not given
    pub zero_division: ZeroDivisionPolicy,
    /// Run input/output contract checks around the division
    pub validate: bool,
    pub fields_report_title: String,
    pub tables_report_title: String,
    /// Bin count for histogram plot data (default: 20)
    pub histogram_bins: usize,
    /// Where reports go when no explicit output path is given.
    /// Defaults to the working directory.
    pub output_dir: Option<PathBuf>,
    /// Filter directive for log output, e.g. `info` or `datadoc=debug`.
    /// `RUST_LOG` takes precedence.
    pub log_level: String,
    /// Directory for the rotating log file. Defaults to `<data_dir>/datadoc/logs`.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            zero_division: ZeroDivisionPolicy::default(),
            validate: true,
            fields_report_title: DEFAULT_FIELDS_TITLE.to_owned(),
            tables_report_title: DEFAULT_TABLES_TITLE.to_owned(),
            histogram_bins: DEFAULT_BINS,
            output_dir: None,
            log_level: "info".to_owned(),
            log_dir: None,
        }
    }
}

impl AppSettings {
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn get_config_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("datadoc")
        .join("config.json")
}

/// Load settings from `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read or contains an
/// unknown value, such as a misspelled zero-division policy.
pub fn load_app_config(path: &Path) -> Result<AppSettings> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Write `settings` to `path` as pretty JSON, creating parent directories.
pub fn save_app_config(settings: &AppSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}
