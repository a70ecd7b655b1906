//! Deferred pager teardown
//!
//! A close requested while a keystroke is being dispatched is queued here and
//! carried out when the event loop next goes idle.

use std::collections::VecDeque;

use crate::host::PagerHost;
use crate::keymap::Keystroke;
use crate::messages::{Msg, PagerMsg};
use crate::model::{AppModel, TargetId};
use crate::update::update;

/// One queued close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredClose {
    pub target: TargetId,
    /// Key to hand back to the target once the pager is gone
    pub replay: Option<Keystroke>,
}

/// FIFO of pending closes
#[derive(Debug, Default)]
pub struct IdleQueue {
    pending: VecDeque<DeferredClose>,
}

impl IdleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defer(&mut self, target: TargetId, replay: Option<Keystroke>) {
        self.pending.push_back(DeferredClose { target, replay });
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Run every close queued before this call
    ///
    /// For each entry: reset the session, detach its overlay, refocus the
    /// target, then replay the pending key. An entry whose session was shown
    /// again after the close was requested is dropped. Closes queued by the
    /// host while flushing wait for the next idle cycle. Returns how many ran.
    pub fn flush(&mut self, model: &mut AppModel, host: &mut impl PagerHost) -> usize {
        let batch: Vec<DeferredClose> = self.pending.drain(..).collect();
        let mut closed = 0;

        for close in &batch {
            let pending = model
                .session(close.target)
                .is_some_and(|s| s.is_close_pending());
            if !pending {
                tracing::debug!(target_id = %close.target, "stale close dropped");
                continue;
            }

            tracing::debug!(target_id = %close.target, replay = ?close.replay, "closing pager");
            update(model, Msg::Pager(close.target, PagerMsg::Deactivate));
            host.detach_overlay(close.target);
            host.focus_target(close.target);
            if let Some(keystroke) = close.replay {
                host.replay_key(close.target, keystroke);
            }
            closed += 1;
        }

        closed
    }
}
