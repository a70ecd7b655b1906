//! Interfaces to the environment embedding the pager
//!
//! The model never touches windows or focus directly. `execute` turns the
//! commands returned by `update` into calls on these traits; closes are routed
//! through the [`IdleQueue`](crate::idle::IdleQueue).

use crate::commands::Cmd;
use crate::idle::IdleQueue;
use crate::keymap::Keystroke;
use crate::model::{Rect, TargetId};

/// Places the pager overlay and moves keyboard focus
pub trait OverlayHost {
    /// Show the overlay for `target` at `bounds`, replacing any earlier placement
    fn attach_overlay(&mut self, target: TargetId, bounds: Rect);

    /// Remove the overlay for `target`
    fn detach_overlay(&mut self, target: TargetId);

    /// Give keyboard focus back to `target`
    fn focus_target(&mut self, target: TargetId);
}

/// Accepts a keystroke to be handled by the target as if freshly typed
pub trait CommandReplaySink {
    fn replay_key(&mut self, target: TargetId, keystroke: Keystroke);
}

/// Everything the pager needs from its host
pub trait PagerHost: OverlayHost + CommandReplaySink {}

impl<T: OverlayHost + CommandReplaySink> PagerHost for T {}

/// What the runtime still has to do after executing a command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects {
    pub needs_redraw: bool,
    pub quit: bool,
}

impl Effects {
    fn merge(&mut self, other: Effects) {
        self.needs_redraw |= other.needs_redraw;
        self.quit |= other.quit;
    }
}

/// Execute `cmd` against `host`; closes are deferred onto `idle`
pub fn execute(cmd: Cmd, host: &mut impl PagerHost, idle: &mut IdleQueue) -> Effects {
    match cmd {
        Cmd::None => Effects::default(),
        Cmd::Redraw => Effects {
            needs_redraw: true,
            quit: false,
        },
        Cmd::AttachOverlay { target, bounds } => {
            host.attach_overlay(target, bounds);
            Effects {
                needs_redraw: true,
                quit: false,
            }
        }
        Cmd::ClosePager { target, replay } => {
            idle.defer(target, replay);
            Effects::default()
        }
        Cmd::Batch(cmds) => {
            let mut effects = Effects::default();
            for cmd in cmds {
                effects.merge(execute(cmd, host, idle));
            }
            effects
        }
        Cmd::Quit => Effects {
            needs_redraw: false,
            quit: true,
        },
    }
}
