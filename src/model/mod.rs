//! Application model - the complete state of the pager host
//!
//! Follows the Elm Architecture: everything here is mutated only through
//! `update::update`.

pub mod layout;
pub mod pager;
pub mod registry;

pub use layout::{PagerLayout, PagerMetrics, Rect, DEFAULT_BORDER_INSET};
pub use pager::{
    PagerPrompt, PagerSession, PagerState, PagerStep, CONTINUE_PROMPT, HELP_PROMPT, MORE_PROMPT,
};
pub use registry::{SessionRegistry, TargetId};

use std::collections::BTreeMap;

use crate::config::PagerConfig;
use crate::keymap::PagerKeymap;

/// A text-display target the pager can be shown over
#[derive(Debug, Clone, PartialEq)]
pub struct TargetView {
    pub id: TargetId,
    /// Shown in the host's title row
    pub title: String,
    /// Text handed to the pager whenever it is shown for this target
    pub text: String,
    /// Hosting viewport; `None` until the host has laid the target out
    pub viewport: Option<Rect>,
}

/// The complete application model
#[derive(Debug, Clone)]
pub struct AppModel {
    /// One pager session per target, created on first use
    pub sessions: SessionRegistry,
    /// Registered targets in id order
    pub targets: BTreeMap<TargetId, TargetView>,
    /// Keys understood by the pager
    pub keymap: PagerKeymap,
    /// Persisted configuration
    pub config: PagerConfig,
    /// Current font and chrome measurements
    pub metrics: PagerMetrics,
    /// Window dimensions
    pub window_size: (u32, u32),
}

impl AppModel {
    /// Build a model from configuration
    ///
    /// Invalid key overrides are logged and the default bindings used instead.
    pub fn new(config: PagerConfig) -> Self {
        let keymap = keymap_from_config(&config);
        let metrics = PagerMetrics::default().with_border_inset(config.border_inset);

        Self {
            sessions: SessionRegistry::new(),
            targets: BTreeMap::new(),
            keymap,
            config,
            metrics,
            window_size: (0, 0),
        }
    }

    /// Next free target id
    pub fn next_target_id(&self) -> TargetId {
        self.targets
            .keys()
            .next_back()
            .map(|id| TargetId(id.0 + 1))
            .unwrap_or(TargetId(1))
    }

    pub fn target(&self, target: TargetId) -> Option<&TargetView> {
        self.targets.get(&target)
    }

    /// Viewport hosting `target`, if it has been laid out
    pub fn viewport(&self, target: TargetId) -> Option<Rect> {
        self.targets.get(&target).and_then(|view| view.viewport)
    }

    /// Whether new pagers open at the top of their text
    pub fn start_at_top(&self) -> bool {
        self.config.more
    }

    pub fn session(&self, target: TargetId) -> Option<&PagerSession> {
        self.sessions.get(target)
    }

    /// Target after `current`, wrapping around
    pub fn next_target(&self, current: TargetId) -> Option<TargetId> {
        self.targets
            .range(TargetId(current.0 + 1)..)
            .next()
            .or_else(|| self.targets.iter().next())
            .map(|(id, _)| *id)
    }

    /// Target before `current`, wrapping around
    pub fn prev_target(&self, current: TargetId) -> Option<TargetId> {
        self.targets
            .range(..current)
            .next_back()
            .or_else(|| self.targets.iter().next_back())
            .map(|(id, _)| *id)
    }
}

/// Default bindings plus the config's `keys:` entries
pub fn keymap_from_config(config: &PagerConfig) -> PagerKeymap {
    match PagerKeymap::with_overrides(&config.keys) {
        Ok(keymap) => keymap,
        Err(e) => {
            tracing::warn!("Ignoring key bindings from config: {}", e);
            PagerKeymap::default()
        }
    }
}
