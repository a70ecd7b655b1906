//! Per-target pager sessions

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::pager::PagerSession;

/// Identifies a text-display target (one pane, one buffer view)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// Lazily created sessions, at most one per target
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: HashMap<TargetId, PagerSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session for `target`, created on first access
    pub fn get_or_create(&mut self, target: TargetId) -> &mut PagerSession {
        self.sessions.entry(target).or_insert_with(|| {
            tracing::debug!(%target, "creating pager session");
            PagerSession::new(target)
        })
    }

    pub fn get(&self, target: TargetId) -> Option<&PagerSession> {
        self.sessions.get(&target)
    }

    pub fn get_mut(&mut self, target: TargetId) -> Option<&mut PagerSession> {
        self.sessions.get_mut(&target)
    }

    pub fn contains(&self, target: TargetId) -> bool {
        self.sessions.contains_key(&target)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Targets whose pager is currently shown, in id order
    pub fn active_targets(&self) -> Vec<TargetId> {
        let mut targets: Vec<TargetId> = self
            .sessions
            .values()
            .filter(|s| s.is_active())
            .map(|s| s.target())
            .collect();
        targets.sort();
        targets
    }

    pub fn iter(&self) -> impl Iterator<Item = &PagerSession> {
        self.sessions.values()
    }
}
