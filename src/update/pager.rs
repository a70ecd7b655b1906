//! Pager session message handlers

use crate::commands::Cmd;
use crate::keymap::{Keystroke, PagerCommand};
use crate::messages::PagerMsg;
use crate::model::{AppModel, PagerSession, PagerState, PagerStep, TargetId};

/// Handle a message addressed to one target's pager
pub fn update_pager(model: &mut AppModel, target: TargetId, msg: PagerMsg) -> Option<Cmd> {
    match msg {
        PagerMsg::Show(text) => {
            model.sessions.get_or_create(target).set_text(&text);
            activate(model, target)
        }

        PagerMsg::SetText(text) => {
            let session = model.sessions.get_or_create(target);
            session.set_text(&text);
            if session.is_active() {
                relayout(model, target)
            } else {
                None
            }
        }

        PagerMsg::Activate => activate(model, target),

        PagerMsg::Key(keystroke) => dispatch_key(model, target, keystroke),

        PagerMsg::AdvanceLine => {
            live_session(model, target)?.advance_line();
            Some(Cmd::Redraw)
        }

        PagerMsg::AdvancePage => {
            live_session(model, target)?.advance_page();
            Some(Cmd::Redraw)
        }

        PagerMsg::AdvanceHalfPage => {
            live_session(model, target)?.advance_half_page();
            Some(Cmd::Redraw)
        }

        PagerMsg::Confirm => match live_session(model, target)?.confirm() {
            PagerStep::Stay(_) => Some(Cmd::Redraw),
            PagerStep::Close => request_close(model, target, None),
        },

        // Closes from any state; the keystroke is never replayed
        PagerMsg::Quit => {
            live_session(model, target)?;
            request_close(model, target, None)
        }

        PagerMsg::UnrecognizedKey => {
            live_session(model, target)?.unrecognized_key();
            Some(Cmd::Redraw)
        }

        PagerMsg::Continue(keystroke) => {
            live_session(model, target)?;
            request_close(model, target, Some(keystroke))
        }

        PagerMsg::Relayout => relayout(model, target),

        PagerMsg::Deactivate => {
            if model.sessions.get_mut(target)?.deactivate() {
                Some(Cmd::Redraw)
            } else {
                None
            }
        }
    }
}

/// Session that is shown and not already waiting to close
fn live_session(model: &mut AppModel, target: TargetId) -> Option<&mut PagerSession> {
    model
        .sessions
        .get_mut(target)
        .filter(|s| s.is_active() && !s.is_close_pending())
}

fn activate(model: &mut AppModel, target: TargetId) -> Option<Cmd> {
    let viewport = model.viewport(target);
    let metrics = model.metrics;
    let start_at_top = model.start_at_top();

    let session = model.sessions.get_or_create(target);
    match session.activate(viewport, &metrics, start_at_top) {
        Ok(layout) => Some(Cmd::attach(target, layout.bounds)),
        Err(e) => {
            tracing::error!(%target, "pager activation aborted: {}", e);
            None
        }
    }
}

/// Re-run the sizing policy; a pager that can no longer be hosted is closed
fn relayout(model: &mut AppModel, target: TargetId) -> Option<Cmd> {
    let viewport = model.viewport(target);
    let metrics = model.metrics;
    let start_at_top = model.start_at_top();

    let session = live_session(model, target)?;
    match session.relayout(viewport, &metrics, start_at_top) {
        Ok(layout) => Some(Cmd::attach(target, layout.bounds)),
        Err(e) => {
            tracing::error!(%target, "pager relayout failed, closing: {}", e);
            request_close(model, target, None)
        }
    }
}

fn request_close(model: &mut AppModel, target: TargetId, replay: Option<Keystroke>) -> Option<Cmd> {
    let session = model.sessions.get_mut(target)?;
    if session.is_close_pending() {
        return None;
    }
    session.mark_close_pending();
    tracing::debug!(%target, replay = ?replay, "close requested");
    Some(Cmd::ClosePager { target, replay })
}

/// Translate a keystroke according to the session's state
fn dispatch_key(model: &mut AppModel, target: TargetId, keystroke: Keystroke) -> Option<Cmd> {
    let Some(session) = model.sessions.get(target) else {
        tracing::debug!(%target, %keystroke, "key for unknown pager ignored");
        return None;
    };
    if !session.is_active() || session.is_close_pending() {
        tracing::trace!(%target, %keystroke, "key ignored");
        return None;
    }

    let command = model.keymap.lookup(&keystroke);
    let msg = match (session.state(), command) {
        (PagerState::AtEnd, Some(PagerCommand::Confirm)) => PagerMsg::Confirm,
        (PagerState::AtEnd, Some(PagerCommand::Quit)) => PagerMsg::Quit,
        (PagerState::AtEnd, _) => PagerMsg::Continue(keystroke),
        (_, Some(command)) => command_msg(command),
        (_, None) => {
            tracing::debug!(%target, %keystroke, "unrecognized key");
            PagerMsg::UnrecognizedKey
        }
    };

    update_pager(model, target, msg)
}

fn command_msg(command: PagerCommand) -> PagerMsg {
    match command {
        PagerCommand::AdvanceLine => PagerMsg::AdvanceLine,
        PagerCommand::AdvancePage => PagerMsg::AdvancePage,
        PagerCommand::AdvanceHalfPage => PagerMsg::AdvanceHalfPage,
        PagerCommand::Confirm => PagerMsg::Confirm,
        PagerCommand::Quit => PagerMsg::Quit,
    }
}
