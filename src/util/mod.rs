//! Utility modules

pub mod text;

pub use text::{count_lines, count_rope_lines, expand_tabs_for_display, strip_trailing_newline};
