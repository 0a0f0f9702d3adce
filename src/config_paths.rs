//! Where clockface keeps its files
//!
//! ```text
//! <config>/config.yaml
//! <config>/themes/<id>.yaml
//! <config>/logs/clockface.log.<date>
//! ```
//!
//! `<config>` is `$CLOCKFACE_CONFIG_DIR` when set. Otherwise it is
//! `$XDG_CONFIG_HOME/clockface` or `~/.config/clockface` on Unix and macOS,
//! and `%APPDATA%\clockface` on Windows.

use std::{
    env,
    ffi::OsString,
    fs,
    path::PathBuf,
};

/// Overrides the whole config directory
pub const CONFIG_DIR_ENV: &str = "CLOCKFACE_CONFIG_DIR";

const APP_DIR: &str = "clockface";

pub fn config_dir() -> Option<PathBuf> {
    resolve_config_dir(env::var_os(CONFIG_DIR_ENV), platform_config_base())
}

/// An explicit directory wins; otherwise the app folder under the base
fn resolve_config_dir(explicit: Option<OsString>, base: Option<PathBuf>) -> Option<PathBuf> {
    match explicit.filter(|dir| !dir.is_empty()) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => base.map(|base| base.join(APP_DIR)),
    }
}

#[cfg(target_os = "windows")]
fn platform_config_base() -> Option<PathBuf> {
    // %APPDATA% (roaming)
    dirs::config_dir()
}

#[cfg(not(target_os = "windows"))]
fn platform_config_base() -> Option<PathBuf> {
    // dirs::config_dir() would give ~/Library/Application Support on macOS
    env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn themes_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("themes"))
}

/// User theme file for `id`, whether or not it exists
pub fn theme_file(id: &str) -> Option<PathBuf> {
    themes_dir().map(|dir| dir.join(format!("{}.yaml", id)))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory (and its parents) if needed
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    fs::create_dir_all(&logs)
        .map_err(|e| format!("Failed to create directory {}: {}", logs.display(), e))?;
    Ok(logs)
}
