//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use more_pane::keymap::{KeyCode, Keystroke};
use more_pane::messages::{AppMsg, Msg};
use more_pane::model::{AppModel, PagerMetrics, PagerSession, Rect, TargetId};
use more_pane::update::update;
use more_pane::{Cmd, CommandReplaySink, OverlayHost, PagerConfig};

/// Line height used by every test model
pub const LINE_HEIGHT: usize = 10;

/// Window size giving `viewport_lines == 10` at `LINE_HEIGHT`
pub const WINDOW: (u32, u32) = (400, 110);

/// `count` lines reading "line 1" .. "line N", newline terminated
pub fn numbered_text(count: usize) -> String {
    (1..=count).map(|i| format!("line {}\n", i)).collect()
}

/// Model with one registered target covering the whole window
pub fn test_model(config: PagerConfig) -> (AppModel, TargetId) {
    let mut model = AppModel::new(config);
    model.metrics = PagerMetrics::new(LINE_HEIGHT).with_border_inset(model.metrics.border_inset);
    model.window_size = WINDOW;

    let target = model.next_target_id();
    update(
        &mut model,
        Msg::App(AppMsg::RegisterTarget {
            target,
            title: "test".to_string(),
            text: String::new(),
        }),
    );
    (model, target)
}

/// Model that opens pagers on the last page (the default)
pub fn end_model() -> (AppModel, TargetId) {
    test_model(PagerConfig::default())
}

/// Model that opens pagers on the first page
pub fn top_model() -> (AppModel, TargetId) {
    test_model(PagerConfig {
        more: true,
        ..PagerConfig::default()
    })
}

pub fn show(model: &mut AppModel, target: TargetId, text: &str) -> Option<Cmd> {
    update(model, Msg::show(target, text))
}

pub fn press(model: &mut AppModel, target: TargetId, keystroke: Keystroke) -> Option<Cmd> {
    update(model, Msg::key(target, keystroke))
}

pub fn space() -> Keystroke {
    Keystroke::key(KeyCode::Space)
}

pub fn enter() -> Keystroke {
    Keystroke::key(KeyCode::Enter)
}

pub fn session(model: &AppModel, target: TargetId) -> &PagerSession {
    model.session(target).expect("session exists")
}

/// Everything a host was asked to do, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Attach(TargetId, Rect),
    Detach(TargetId),
    Focus(TargetId),
    Replay(TargetId, Keystroke),
}

/// Host that records calls instead of touching a window
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replayed(&self) -> Vec<Keystroke> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Replay(_, k) => Some(*k),
                _ => None,
            })
            .collect()
    }
}

impl OverlayHost for RecordingHost {
    fn attach_overlay(&mut self, target: TargetId, bounds: Rect) {
        self.events.push(HostEvent::Attach(target, bounds));
    }

    fn detach_overlay(&mut self, target: TargetId) {
        self.events.push(HostEvent::Detach(target));
    }

    fn focus_target(&mut self, target: TargetId) {
        self.events.push(HostEvent::Focus(target));
    }
}

impl CommandReplaySink for RecordingHost {
    fn replay_key(&mut self, target: TargetId, keystroke: Keystroke) {
        self.events.push(HostEvent::Replay(target, keystroke));
    }
}
