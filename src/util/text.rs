//! Text helpers for pager content

use ropey::Rope;

/// Tab width in spaces for visual rendering
pub const TAB_WIDTH: usize = 4;

/// Count logical lines the way a line-oriented pager does
///
/// Empty text has zero lines. Otherwise every `\n` ends a line, and a final
/// unterminated line counts as one more.
pub fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }

    let terminators = text.bytes().filter(|&b| b == b'\n').count();
    if text.ends_with('\n') {
        terminators
    } else {
        terminators + 1
    }
}

/// Same as [`count_lines`] but over a rope, without flattening it
///
/// Ropey's own line count treats CR, VT, FF and unicode separators as breaks,
/// so only `\n` bytes are counted here.
pub fn count_rope_lines(rope: &Rope) -> usize {
    let len = rope.len_chars();
    if len == 0 {
        return 0;
    }

    let terminators: usize = rope
        .chunks()
        .map(|chunk| chunk.bytes().filter(|&b| b == b'\n').count())
        .sum();

    if rope.char(len - 1) == '\n' {
        terminators
    } else {
        terminators + 1
    }
}

/// Strip exactly one trailing `\n`, if present
pub fn strip_trailing_newline(text: &str) -> &str {
    text.strip_suffix('\n').unwrap_or(text)
}

/// Expand tabs to spaces for display rendering
pub fn expand_tabs_for_display(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);
    let mut visual_col = 0;

    for ch in text.chars() {
        if ch == '\t' {
            let spaces = TAB_WIDTH - (visual_col % TAB_WIDTH);
            for _ in 0..spaces {
                result.push(' ');
            }
            visual_col += spaces;
        } else {
            result.push(ch);
            visual_col += 1;
        }
    }

    result
}
