//! Pager commands and the keystroke → command table

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{KeyCode, Keystroke, Modifiers};

/// Commands a key can trigger while the pager is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagerCommand {
    AdvanceLine,
    AdvancePage,
    AdvanceHalfPage,
    /// Enter: next line, or close once at the end
    Confirm,
    Quit,
}

impl PagerCommand {
    pub fn name(self) -> &'static str {
        match self {
            PagerCommand::AdvanceLine => "AdvanceLine",
            PagerCommand::AdvancePage => "AdvancePage",
            PagerCommand::AdvanceHalfPage => "AdvanceHalfPage",
            PagerCommand::Confirm => "Confirm",
            PagerCommand::Quit => "Quit",
        }
    }
}

impl fmt::Display for PagerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PagerCommand {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AdvanceLine" => Ok(PagerCommand::AdvanceLine),
            "AdvancePage" => Ok(PagerCommand::AdvancePage),
            "AdvanceHalfPage" => Ok(PagerCommand::AdvanceHalfPage),
            "Confirm" => Ok(PagerCommand::Confirm),
            "Quit" => Ok(PagerCommand::Quit),
            _ => Err(KeymapError::InvalidCommand(s.to_string())),
        }
    }
}

/// A binding entry as written in `config.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
}

/// Errors from parsing user key bindings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

/// Built-in bindings
pub fn default_bindings() -> Vec<(Keystroke, PagerCommand)> {
    vec![
        (Keystroke::key(KeyCode::Space), PagerCommand::AdvancePage),
        (Keystroke::char('d'), PagerCommand::AdvanceHalfPage),
        (Keystroke::key(KeyCode::Enter), PagerCommand::Confirm),
        (Keystroke::key(KeyCode::NumpadEnter), PagerCommand::Confirm),
        (Keystroke::char('q'), PagerCommand::Quit),
        (Keystroke::key(KeyCode::Escape), PagerCommand::Quit),
    ]
}

/// Lookup table from keystroke to pager command
#[derive(Debug, Clone)]
pub struct PagerKeymap {
    bindings: HashMap<Keystroke, PagerCommand>,
}

impl Default for PagerKeymap {
    fn default() -> Self {
        Self::with_bindings(default_bindings())
    }
}

impl PagerKeymap {
    pub fn with_bindings(bindings: impl IntoIterator<Item = (Keystroke, PagerCommand)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Defaults with user entries layered on top
    pub fn with_overrides(entries: &[BindingConfig]) -> Result<Self, KeymapError> {
        let mut keymap = Self::default();
        for entry in entries {
            let keystroke = parse_key_string(&entry.key)?;
            let command = entry.command.parse()?;
            keymap.bind(keystroke, command);
        }
        Ok(keymap)
    }

    pub fn bind(&mut self, keystroke: Keystroke, command: PagerCommand) {
        self.bindings.insert(keystroke.normalized(), command);
    }

    pub fn lookup(&self, keystroke: &Keystroke) -> Option<PagerCommand> {
        self.bindings.get(&keystroke.normalized()).copied()
    }

    /// Whether `keystroke` ends the pager without being replayed
    pub fn is_quit_key(&self, keystroke: &Keystroke) -> bool {
        self.lookup(keystroke) == Some(PagerCommand::Quit)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Parse a key string like "ctrl+d" or "space"
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in key_str.split('+') {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            "meta" | "super" | "win" | "cmd" => mods = mods | Modifiers::META,
            _ => {
                if key_part.is_some() {
                    return Err(KeymapError::InvalidKey(key_str.to_string()));
                }
                key_part = Some(parse_key_code(part)?);
            }
        }
    }

    let key = key_part.ok_or_else(|| KeymapError::InvalidKey(key_str.to_string()))?;
    Ok(Keystroke::new(key, mods))
}

fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    match key.to_lowercase().as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" => Ok(KeyCode::Space),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "numpad_enter" | "numenter" => Ok(KeyCode::NumpadEnter),
        other => other
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=24).contains(n))
            .map(KeyCode::F)
            .ok_or_else(|| KeymapError::InvalidKey(key.to_string())),
    }
}
