//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod pager;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::SessionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use pager::update_pager;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Pager(target, m) => pager::update_pager(model, target, m),
        Msg::App(m) => app::update_app(model, m),
    }
}

#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();
    debug!(target: "message", msg = %msg_name, "processing");

    let target = match &msg {
        Msg::Pager(target, _) => Some(*target),
        Msg::App(_) => None,
    };
    let before = target
        .and_then(|t| model.sessions.get(t))
        .map(SessionSnapshot::from_session);

    let result = update_inner(model, msg);

    if let Some(session) = target.and_then(|t| model.sessions.get(t)) {
        let after = SessionSnapshot::from_session(session);
        let diff = match before {
            Some(ref before) => before.diff(&after),
            None => Some(format!("created in state {:?}", after.state)),
        };
        if let Some(diff) = diff {
            debug!(target: "pager", target_id = %session.target(), %diff, "state changed");
        }
    }

    for session in model.sessions.iter() {
        session.assert_invariants_with_context(&msg_name);
    }

    result
}

#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{AppMsg, PagerMsg};

    match msg {
        Msg::App(AppMsg::RegisterTarget { target, title, .. }) => {
            format!("App::RegisterTarget({}, {:?})", target, title)
        }
        // Text payloads can be large
        Msg::Pager(target, PagerMsg::Show(text)) => {
            format!("Pager({})::Show({} bytes)", target, text.len())
        }
        Msg::Pager(target, PagerMsg::SetText(text)) => {
            format!("Pager({})::SetText({} bytes)", target, text.len())
        }
        Msg::Pager(target, m) => format!("Pager({})::{:?}", target, m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
