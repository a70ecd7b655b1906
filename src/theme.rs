//! Colors for the target view and the pager overlay
//!
//! Theme loading priority:
//! 1. User config: `~/.config/more-pane/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_DARK_YAML: &str = include_str!("../themes/dark.yaml");
pub const DEFAULT_LIGHT_YAML: &str = include_str!("../themes/light.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "default-dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "default-dark",
        yaml: DEFAULT_DARK_YAML,
    },
    BuiltinTheme {
        id: "default-light",
        yaml: DEFAULT_LIGHT_YAML,
    },
];

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        match hex.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    pub ui: UiThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub target: TargetThemeData,
    pub pager: PagerThemeData,
    pub status_bar: StatusBarThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetThemeData {
    pub background: String,
    pub foreground: String,
    pub muted: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagerThemeData {
    pub background: String,
    pub foreground: String,
    pub prompt: String,
    #[serde(default)]
    pub border_shadow: Option<String>,
    #[serde(default)]
    pub border_highlight: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusBarThemeData {
    pub background: String,
    pub foreground: String,
}

/// Resolved theme
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub target: TargetTheme,
    pub pager: PagerTheme,
    pub status_bar: StatusBarTheme,
}

/// The text target behind the pager
#[derive(Debug, Clone, PartialEq)]
pub struct TargetTheme {
    pub background: Color,
    pub foreground: Color,
    /// Hints and the replay log
    pub muted: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagerTheme {
    pub background: Color,
    pub foreground: Color,
    pub prompt: Color,
    pub border_shadow: Color,
    pub border_highlight: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBarTheme {
    pub background: Color,
    pub foreground: Color,
}

impl Theme {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let pager = &data.ui.pager;
        let background = Color::from_hex(&pager.background)?;

        Ok(Theme {
            name: data.name,
            target: TargetTheme {
                background: Color::from_hex(&data.ui.target.background)?,
                foreground: Color::from_hex(&data.ui.target.foreground)?,
                muted: Color::from_hex(&data.ui.target.muted)?,
            },
            pager: PagerTheme {
                background,
                foreground: Color::from_hex(&pager.foreground)?,
                prompt: Color::from_hex(&pager.prompt)?,
                border_shadow: optional_color(&pager.border_shadow)?
                    .unwrap_or(Color::rgb(0x10, 0x10, 0x10)),
                border_highlight: optional_color(&pager.border_highlight)?
                    .unwrap_or(Color::rgb(0x50, 0x50, 0x50)),
            },
            status_bar: StatusBarTheme {
                background: Color::from_hex(&data.ui.status_bar.background)?,
                foreground: Color::from_hex(&data.ui.status_bar.foreground)?,
            },
        })
    }

    /// Default dark theme (YAML-backed with Rust fallback)
    pub fn default_dark() -> Self {
        match Theme::from_yaml(DEFAULT_DARK_YAML) {
            Ok(theme) => theme,
            Err(_) => Theme {
                name: "Default Dark".to_string(),
                target: TargetTheme {
                    background: Color::rgb(0x1E, 0x1E, 0x1E),
                    foreground: Color::rgb(0xD4, 0xD4, 0xD4),
                    muted: Color::rgb(0x85, 0x85, 0x85),
                },
                pager: PagerTheme {
                    background: Color::rgb(0x25, 0x25, 0x26),
                    foreground: Color::rgb(0xD4, 0xD4, 0xD4),
                    prompt: Color::rgb(0x4E, 0xC9, 0xB0),
                    border_shadow: Color::rgb(0x10, 0x10, 0x10),
                    border_highlight: Color::rgb(0x50, 0x50, 0x50),
                },
                status_bar: StatusBarTheme {
                    background: Color::rgb(0x00, 0x7A, 0xCC),
                    foreground: Color::rgb(0xFF, 0xFF, 0xFF),
                },
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}

fn optional_color(value: &Option<String>) -> Result<Option<Color>, String> {
    value.as_deref().map(Color::from_hex).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes_parse() {
        for builtin in BUILTIN_THEMES {
            assert!(
                Theme::from_yaml(builtin.yaml).is_ok(),
                "builtin theme {} failed to parse",
                builtin.id
            );
        }
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#FF8000").unwrap(), Color::rgb(255, 128, 0));
        assert_eq!(
            Color::from_hex("#00000080").unwrap(),
            Color::rgba(0, 0, 0, 0x80)
        );
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("#ÿÿÿ").is_err());
    }

    #[test]
    fn test_to_argb_u32() {
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).to_argb_u32(), 0xFF123456);
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(Theme::from_builtin("nope").is_err());
    }

    #[test]
    fn test_missing_border_colors_use_defaults() {
        let yaml = r##"
version: 1
name: Test
ui:
  target: { background: "#000000", foreground: "#FFFFFF", muted: "#808080" }
  pager: { background: "#111111", foreground: "#EEEEEE", prompt: "#00FF00" }
  status_bar: { background: "#222222", foreground: "#DDDDDD" }
"##;
        let theme = Theme::from_yaml(yaml).unwrap();
        assert_eq!(theme.pager.border_shadow, Color::rgb(0x10, 0x10, 0x10));
        assert_eq!(theme.pager.prompt, Color::rgb(0, 0xFF, 0));
    }
}
