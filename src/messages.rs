//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::config::PagerConfig;
use crate::keymap::Keystroke;
use crate::model::{Rect, TargetId};

/// Messages addressed to one target's pager session
#[derive(Debug, Clone, PartialEq)]
pub enum PagerMsg {
    /// Set the text and activate in one step
    Show(String),
    /// Replace the text (one trailing newline is dropped)
    SetText(String),
    /// Size and position the overlay, then attach it
    Activate,
    /// A raw keystroke typed while the pager has focus
    Key(Keystroke),
    /// Scroll one line
    AdvanceLine,
    /// Scroll one visible page
    AdvancePage,
    /// Scroll half a page, rounded up to a whole line
    AdvanceHalfPage,
    /// Enter: next line, or close once at the end
    Confirm,
    /// Close without replaying anything
    Quit,
    /// A key with no binding
    UnrecognizedKey,
    /// Close from the end of the text and replay this key into the target
    Continue(Keystroke),
    /// Re-run the sizing policy against the current viewport and metrics
    Relayout,
    /// Hide and reset the session (sent by the idle queue)
    Deactivate,
}

/// Host and application level messages
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// Make a text target known to the model
    RegisterTarget {
        target: TargetId,
        title: String,
        text: String,
    },
    /// Set or clear the viewport hosting a target
    SetViewport {
        target: TargetId,
        viewport: Option<Rect>,
    },
    /// Window resized (physical pixels); every target fills the window
    Resize(u32, u32),
    /// Font metrics changed (font size or display scale)
    FontChanged {
        line_height: usize,
        status_bar_height: usize,
    },
    /// Toggle the start-at-top option
    SetStartAtTop(bool),
    /// Apply an already loaded configuration
    ApplyConfig(PagerConfig),
    /// Reload `config.yaml` from disk
    ReloadConfiguration,
    /// Exit the application
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Pager messages for one target
    Pager(TargetId, PagerMsg),
    /// App messages (window, config)
    App(AppMsg),
}

impl Msg {
    /// Show `text` in the pager for `target`
    pub fn show(target: TargetId, text: impl Into<String>) -> Self {
        Msg::Pager(target, PagerMsg::Show(text.into()))
    }

    /// Deliver a keystroke to the pager for `target`
    pub fn key(target: TargetId, keystroke: Keystroke) -> Self {
        Msg::Pager(target, PagerMsg::Key(keystroke))
    }

    pub fn resize(width: u32, height: u32) -> Self {
        Msg::App(AppMsg::Resize(width, height))
    }
}
