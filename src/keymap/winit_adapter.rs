//! Adapter to convert winit key events to our Keystroke type

use winit::keyboard::{Key, KeyCode as WinitKeyCode, ModifiersState, NamedKey, PhysicalKey};

use super::types::{KeyCode, Keystroke, Modifiers};

/// Convert winit key event data to a Keystroke
///
/// Returns None for keys the pager has no use for (bare modifiers, media keys).
pub fn keystroke_from_winit(
    logical_key: &Key,
    physical_key: PhysicalKey,
    modifiers: ModifiersState,
) -> Option<Keystroke> {
    let mods = Modifiers::new(
        modifiers.control_key(),
        modifiers.shift_key(),
        modifiers.alt_key(),
        modifiers.super_key(),
    );

    // Numpad enter shares the logical Enter key
    if physical_key == PhysicalKey::Code(WinitKeyCode::NumpadEnter) {
        return Some(Keystroke::new(KeyCode::NumpadEnter, mods));
    }

    let key_code = match logical_key {
        Key::Named(named) => match named {
            NamedKey::Enter => KeyCode::Enter,
            NamedKey::Escape => KeyCode::Escape,
            NamedKey::Tab => KeyCode::Tab,
            NamedKey::Backspace => KeyCode::Backspace,
            NamedKey::Delete => KeyCode::Delete,
            NamedKey::Space => KeyCode::Space,

            NamedKey::ArrowUp => KeyCode::Up,
            NamedKey::ArrowDown => KeyCode::Down,
            NamedKey::ArrowLeft => KeyCode::Left,
            NamedKey::ArrowRight => KeyCode::Right,

            NamedKey::Home => KeyCode::Home,
            NamedKey::End => KeyCode::End,
            NamedKey::PageUp => KeyCode::PageUp,
            NamedKey::PageDown => KeyCode::PageDown,

            NamedKey::F1 => KeyCode::F(1),
            NamedKey::F2 => KeyCode::F(2),
            NamedKey::F3 => KeyCode::F(3),
            NamedKey::F4 => KeyCode::F(4),
            NamedKey::F5 => KeyCode::F(5),
            NamedKey::F6 => KeyCode::F(6),
            NamedKey::F7 => KeyCode::F(7),
            NamedKey::F8 => KeyCode::F(8),
            NamedKey::F9 => KeyCode::F(9),
            NamedKey::F10 => KeyCode::F(10),
            NamedKey::F11 => KeyCode::F(11),
            NamedKey::F12 => KeyCode::F(12),

            _ => return None,
        },

        // Some platforms report space as a character
        Key::Character(s) if s.as_str() == " " => KeyCode::Space,
        Key::Character(s) => KeyCode::Char(s.chars().next()?),

        _ => return None,
    };

    Some(Keystroke::new(key_code, mods))
}
