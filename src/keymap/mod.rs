//! Keyboard handling for the pager
//!
//! ```text
//! winit::KeyEvent → Keystroke → PagerKeymap::lookup() → PagerCommand → PagerMsg
//! ```
//!
//! The built-in bindings can be extended from the `keys:` section of the
//! config file.

mod bindings;
mod types;
mod winit_adapter;

pub use bindings::{
    default_bindings, parse_key_string, BindingConfig, KeymapError, PagerCommand, PagerKeymap,
};
pub use types::{KeyCode, Keystroke, Modifiers};
pub use winit_adapter::keystroke_from_winit;
