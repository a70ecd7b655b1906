//! Command-line argument parsing
//!
//! Every path becomes its own target. With no paths, or `-`, text is read
//! from stdin.

use clap::Parser;
use std::path::PathBuf;

use more_pane::PagerConfig;

/// Page text in a window, `more` style
#[derive(Parser, Debug)]
#[command(name = "more-pane", version, about = "Page text in a window, more style")]
pub struct CliArgs {
    /// Files to page; `-` reads stdin
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Start at the top of the text instead of the last page
    #[arg(long, visible_alias = "start-at-top")]
    pub more: bool,

    /// Monospace font file (TTF/OTF)
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Font size in points
    #[arg(long, value_name = "N")]
    pub font_size: Option<f32>,

    /// Theme id, e.g. default-dark or default-light
    #[arg(long, value_name = "ID")]
    pub theme: Option<String>,
}

/// Where a target's text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    Stdin,
    File(PathBuf),
}

impl TargetSource {
    pub fn title(&self) -> String {
        match self {
            TargetSource::Stdin => "(stdin)".to_string(),
            TargetSource::File(path) => path.display().to_string(),
        }
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    pub sources: Vec<TargetSource>,
    /// Only set when the flag was given, so the config file still applies otherwise
    pub start_at_top: Option<bool>,
    pub font_path: Option<PathBuf>,
    pub font_size: Option<f32>,
    pub theme: Option<String>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let sources: Vec<TargetSource> = if self.paths.is_empty() {
            vec![TargetSource::Stdin]
        } else {
            self.paths
                .into_iter()
                .map(|p| {
                    if p.as_os_str() == "-" {
                        TargetSource::Stdin
                    } else {
                        TargetSource::File(p)
                    }
                })
                .collect()
        };

        if sources.iter().filter(|s| **s == TargetSource::Stdin).count() > 1 {
            return Err("stdin can only be paged once".to_string());
        }

        if let Some(size) = self.font_size {
            if !(size.is_finite() && size > 0.0) {
                return Err(format!("Invalid font size: {}", size));
            }
        }

        Ok(StartupConfig {
            sources,
            start_at_top: self.more.then_some(true),
            font_path: self.font,
            font_size: self.font_size,
            theme: self.theme,
        })
    }
}

impl StartupConfig {
    /// Layer command-line overrides onto the loaded config
    pub fn apply_to(&self, config: &mut PagerConfig) {
        if let Some(more) = self.start_at_top {
            config.more = more;
        }
        if let Some(ref path) = self.font_path {
            config.font_path = Some(path.clone());
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
        if let Some(ref theme) = self.theme {
            config.theme = theme.clone();
        }
    }
}
