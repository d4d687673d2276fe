//! Config directory discovery.
//!
//! The directory holds `client.yaml` and the CLI's `logs/` folder.

use std::path::PathBuf;

/// Application name for XDG directory resolution.
const APP_NAME: &str = "ragflow";

/// Environment variable to override the config directory.
///
/// When set, this takes precedence over the platform default (XDG/Application Support).
const CONFIG_DIR_ENV: &str = "RAGFLOW_CONFIG_DIR";

/// Get the config directory for ragflow.
///
/// Checks `RAGFLOW_CONFIG_DIR` first, then falls back to the platform default
/// (`~/.config/ragflow` on Linux, `~/Library/Application Support/ragflow` on macOS).
pub fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Directory for the CLI's rolling log files.
pub fn log_dir() -> Option<PathBuf> {
    xdg_config_dir().map(|d| d.join("logs"))
}
