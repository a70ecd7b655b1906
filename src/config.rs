//! Pager configuration persistence
//!
//! Stores user preferences in `~/.config/more-pane/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::keymap::BindingConfig;
use crate::model::layout::DEFAULT_BORDER_INSET;

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Start new pagers at the top of the text instead of the last page
    #[serde(default)]
    pub more: bool,

    /// Selected theme id (e.g., "default-dark", "default-light")
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Font size in points, before display scaling
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Monospace font to render with; system fonts are searched when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    /// Pixels between the overlay border and its contents
    #[serde(default = "default_border_inset")]
    pub border_inset: usize,

    /// Extra pager key bindings layered over the defaults
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<BindingConfig>,
}

fn default_theme() -> String {
    "default-dark".to_string()
}

fn default_font_size() -> f32 {
    14.0
}

fn default_border_inset() -> usize {
    DEFAULT_BORDER_INSET
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            more: false,
            theme: default_theme(),
            font_size: default_font_size(),
            font_path: None,
            border_inset: default_border_inset(),
            keys: Vec::new(),
        }
    }
}

impl PagerConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config: PagerConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, PagerConfig::default());
        assert!(!config.more);
        assert_eq!(config.border_inset, 2);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config: PagerConfig = serde_yaml::from_str("more: true\nfont_size: 18\n").unwrap();
        assert!(config.more);
        assert_eq!(config.font_size, 18.0);
        assert_eq!(config.theme, "default-dark");
    }

    #[test]
    fn test_keys_section() {
        let yaml = "keys:\n  - key: j\n    command: AdvanceLine\n";
        let config: PagerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.keys.len(), 1);
        assert_eq!(config.keys[0].command, "AdvanceLine");
    }
}
