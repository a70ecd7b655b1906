//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::keymap::Keystroke;
use crate::model::{Rect, TargetId};

/// Side effects requested by `update`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    /// No command
    #[default]
    None,
    /// Request a redraw
    Redraw,
    /// Show (or move) the overlay for `target` at `bounds`
    AttachOverlay { target: TargetId, bounds: Rect },
    /// Tear the pager down on the next idle cycle
    ///
    /// Never executed inline: the keystroke that produced it is still being
    /// dispatched.
    ClosePager {
        target: TargetId,
        replay: Option<Keystroke>,
    },
    /// Multiple commands
    Batch(Vec<Cmd>),
    /// Request application exit
    Quit,
}

impl Cmd {
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Overlay attach followed by a redraw
    pub fn attach(target: TargetId, bounds: Rect) -> Self {
        Cmd::Batch(vec![Cmd::AttachOverlay { target, bounds }, Cmd::Redraw])
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::AttachOverlay { .. } => true,
            // The idle flush redraws after tearing down
            Cmd::ClosePager { .. } => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            Cmd::Quit => false,
        }
    }

    /// Pending closes carried by this command, in order
    pub fn closes(&self) -> Vec<(TargetId, Option<Keystroke>)> {
        match self {
            Cmd::ClosePager { target, replay } => vec![(*target, *replay)],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.closes()).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}
