//! Window-side host state: where overlays sit, who has focus, what was typed

use std::collections::{HashMap, VecDeque};

use more_pane::keymap::Keystroke;
use more_pane::model::{Rect, TargetId};
use more_pane::{CommandReplaySink, OverlayHost};

/// Lines of key history kept per target
const LOG_LIMIT: usize = 200;

/// Which surface receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Target(TargetId),
    Pager(TargetId),
}

/// How a key reached the target view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrigin {
    Typed,
    Replayed,
}

impl KeyOrigin {
    pub fn label(self) -> &'static str {
        match self {
            KeyOrigin::Typed => "typed",
            KeyOrigin::Replayed => "replayed",
        }
    }
}

#[derive(Debug)]
pub struct Shell {
    pub focus: Focus,
    /// Attached overlays and their bounds
    pub overlays: HashMap<TargetId, Rect>,
    /// Keys handed back by closed pagers, handled after the idle flush
    pub replayed: VecDeque<(TargetId, Keystroke)>,
    logs: HashMap<TargetId, VecDeque<String>>,
}

impl Shell {
    pub fn new(initial: TargetId) -> Self {
        Self {
            focus: Focus::Target(initial),
            overlays: HashMap::new(),
            replayed: VecDeque::new(),
            logs: HashMap::new(),
        }
    }

    pub fn overlay(&self, target: TargetId) -> Option<Rect> {
        self.overlays.get(&target).copied()
    }

    pub fn log(&mut self, target: TargetId, line: String) {
        let log = self.logs.entry(target).or_default();
        if log.len() == LOG_LIMIT {
            log.pop_front();
        }
        log.push_back(line);
    }

    pub fn log_lines(&self, target: TargetId) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.logs
            .get(&target)
            .into_iter()
            .flat_map(|log| log.iter().map(String::as_str))
    }
}

impl OverlayHost for Shell {
    fn attach_overlay(&mut self, target: TargetId, bounds: Rect) {
        tracing::debug!(%target, ?bounds, "attach overlay");
        self.overlays.insert(target, bounds);
        self.focus = Focus::Pager(target);
    }

    fn detach_overlay(&mut self, target: TargetId) {
        tracing::debug!(%target, "detach overlay");
        self.overlays.remove(&target);
    }

    fn focus_target(&mut self, target: TargetId) {
        self.focus = Focus::Target(target);
    }
}

impl CommandReplaySink for Shell {
    fn replay_key(&mut self, target: TargetId, keystroke: Keystroke) {
        self.replayed.push_back((target, keystroke));
    }
}
