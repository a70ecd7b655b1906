//! Where more-pane keeps its files
//!
//! `$XDG_CONFIG_HOME/more-pane` or `~/.config/more-pane` on Unix and macOS,
//! `%APPDATA%\more-pane` on Windows. Inside: `config.yaml`, `themes/`, `logs/`.

use std::path::PathBuf;

const APP_DIR: &str = "more-pane";

/// File name prefix of the rolling log
pub const LOG_FILE_PREFIX: &str = "more-pane.log";

/// Base directory, if the platform has one
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = std::env::var_os("APPDATA").map(PathBuf::from);

    #[cfg(not(target_os = "windows"))]
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

    base.map(|dir| dir.join(APP_DIR))
}

/// User theme overrides, one `{id}.yaml` per theme
pub fn themes_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("themes"))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// Log directory, created on demand; also receives debug state dumps
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = config_dir()
        .ok_or_else(|| "No config directory available".to_string())?
        .join("logs");
    std::fs::create_dir_all(&logs)
        .map_err(|e| format!("Failed to create directory {}: {}", logs.display(), e))?;
    Ok(logs)
}
