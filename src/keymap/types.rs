//! Core key types: Keystroke, Modifiers, KeyCode

use std::fmt;

/// Modifier keys as a bitfield
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Modifiers other than shift; shift is already folded into typed characters
    #[inline]
    pub const fn without_shift(self) -> Modifiers {
        Modifiers(self.0 & !0b0010)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push(if cfg!(target_os = "macos") {
                "Option"
            } else {
                "Alt"
            });
        }
        if self.meta() {
            parts.push(if cfg!(target_os = "macos") {
                "Cmd"
            } else {
                "Win"
            });
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A logical key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key, case preserved
    Char(char),

    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    Up,
    Down,
    Left,
    Right,

    Home,
    End,
    PageUp,
    PageDown,

    F(u8),

    NumpadEnter,
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Space => write!(f, "Space"),
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::Left => write!(f, "←"),
            KeyCode::Right => write!(f, "→"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PageUp"),
            KeyCode::PageDown => write!(f, "PageDown"),
            KeyCode::F(n) => write!(f, "F{}", n),
            KeyCode::NumpadEnter => write!(f, "NumEnter"),
        }
    }
}

/// A single keystroke: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// A keystroke with no modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    /// A plain character keystroke
    pub const fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// Character this keystroke types, if any
    ///
    /// Keys held with Ctrl, Alt or Meta do not type text.
    pub fn typed_char(&self) -> Option<char> {
        if !self.mods.without_shift().is_empty() {
            return None;
        }
        match self.key {
            KeyCode::Char(c) => Some(c),
            KeyCode::Space => Some(' '),
            KeyCode::Tab => Some('\t'),
            _ => None,
        }
    }

    /// Same keystroke with shift dropped, used for binding lookup
    pub fn normalized(&self) -> Keystroke {
        match self.key {
            KeyCode::Char(_) => Keystroke::new(self.key, self.mods.without_shift()),
            _ => *self,
        }
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.mods.is_empty() {
            write!(f, "{}+{}", self.mods, self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(mods.ctrl());
        assert!(mods.shift());
        assert!(!mods.alt());
        assert!(!mods.meta());
        assert_eq!(mods.without_shift(), Modifiers::CTRL);
    }

    #[test]
    fn test_keystroke_display() {
        let stroke = Keystroke::new(KeyCode::Char('s'), Modifiers::CTRL);
        assert_eq!(stroke.to_string(), "Ctrl+s");
        assert_eq!(Keystroke::key(KeyCode::Enter).to_string(), "Enter");
    }

    #[test]
    fn test_typed_char() {
        assert_eq!(Keystroke::char('x').typed_char(), Some('x'));
        assert_eq!(Keystroke::key(KeyCode::Space).typed_char(), Some(' '));
        assert_eq!(
            Keystroke::new(KeyCode::Char('X'), Modifiers::SHIFT).typed_char(),
            Some('X')
        );
        assert_eq!(
            Keystroke::new(KeyCode::Char('x'), Modifiers::CTRL).typed_char(),
            None
        );
        assert_eq!(Keystroke::key(KeyCode::Escape).typed_char(), None);
    }

    #[test]
    fn test_normalized_drops_shift_on_chars_only() {
        let upper = Keystroke::new(KeyCode::Char('Q'), Modifiers::SHIFT);
        assert_eq!(upper.normalized(), Keystroke::char('Q'));

        let shift_enter = Keystroke::new(KeyCode::Enter, Modifiers::SHIFT);
        assert_eq!(shift_enter.normalized(), shift_enter);
    }
}
