//! Keyboard input for the target view
//!
//! While a pager has focus every key goes to `PagerMsg::Key`. Otherwise keys
//! land here, whether typed or replayed by a pager that just closed.

use more_pane::keymap::{KeyCode, Keystroke};

/// What a key does in the target view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetAction {
    /// Show the pager for the current target again
    ShowPager,
    NextTarget,
    PrevTarget,
    ToggleStartAtTop,
    ReloadConfiguration,
    Quit,
    /// Nothing bound; the key is only logged
    None,
}

pub fn target_action(keystroke: &Keystroke) -> TargetAction {
    if !keystroke.mods.without_shift().is_empty() {
        return TargetAction::None;
    }

    match keystroke.key {
        KeyCode::Char('m') => TargetAction::ShowPager,
        KeyCode::Char('n') => TargetAction::NextTarget,
        KeyCode::Char('p') => TargetAction::PrevTarget,
        KeyCode::Char('t') => TargetAction::ToggleStartAtTop,
        KeyCode::Char('r') => TargetAction::ReloadConfiguration,
        KeyCode::Char('q') | KeyCode::Escape => TargetAction::Quit,
        _ => TargetAction::None,
    }
}

/// Hint line shown in the target view
pub const TARGET_HINT: &str =
    "m: show pager   n/p: next/prev target   t: toggle start-at-top   r: reload config   q: quit";

#[cfg(test)]
mod tests {
    use super::*;
    use more_pane::keymap::Modifiers;

    #[test]
    fn test_target_keys() {
        assert_eq!(target_action(&Keystroke::char('m')), TargetAction::ShowPager);
        assert_eq!(target_action(&Keystroke::char('n')), TargetAction::NextTarget);
        assert_eq!(
            target_action(&Keystroke::key(KeyCode::Escape)),
            TargetAction::Quit
        );
        assert_eq!(target_action(&Keystroke::char('x')), TargetAction::None);
    }

    #[test]
    fn test_modified_keys_are_not_commands() {
        let ctrl_q = Keystroke::new(KeyCode::Char('q'), Modifiers::CTRL);
        assert_eq!(target_action(&ctrl_q), TargetAction::None);
    }
}
