//! App-level message handlers (targets, window, fonts, configuration)

use crate::commands::Cmd;
use crate::config::PagerConfig;
use crate::messages::{AppMsg, PagerMsg};
use crate::model::{keymap_from_config, AppModel, Rect, TargetView};

use super::pager::update_pager;

pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::RegisterTarget {
            target,
            title,
            text,
        } => {
            let viewport = window_rect(model);
            tracing::debug!(%target, %title, "registering target");
            model.targets.insert(
                target,
                TargetView {
                    id: target,
                    title,
                    text,
                    viewport,
                },
            );
            Some(Cmd::Redraw)
        }

        AppMsg::SetViewport { target, viewport } => {
            let Some(view) = model.targets.get_mut(&target) else {
                tracing::warn!(%target, "viewport for unregistered target ignored");
                return None;
            };
            view.viewport = viewport;
            update_pager(model, target, PagerMsg::Relayout).or(Some(Cmd::Redraw))
        }

        AppMsg::Resize(width, height) => {
            model.window_size = (width, height);
            let viewport = window_rect(model);
            for view in model.targets.values_mut() {
                view.viewport = viewport;
            }
            relayout_active(model)
        }

        AppMsg::FontChanged {
            line_height,
            status_bar_height,
        } => {
            model.metrics.line_height = line_height;
            model.metrics.status_bar_height = status_bar_height;
            relayout_active(model)
        }

        AppMsg::SetStartAtTop(more) => {
            // Takes effect on the next activation
            model.config.more = more;
            None
        }

        AppMsg::ApplyConfig(config) => {
            model.keymap = keymap_from_config(&config);
            model.metrics.border_inset = config.border_inset;
            model.config = config;
            relayout_active(model)
        }

        AppMsg::ReloadConfiguration => {
            update_app(model, AppMsg::ApplyConfig(PagerConfig::load()))
        }

        AppMsg::Quit => Some(Cmd::Quit),
    }
}

/// Whole-window viewport, or `None` before the first resize
fn window_rect(model: &AppModel) -> Option<Rect> {
    let (width, height) = model.window_size;
    if width == 0 || height == 0 {
        return None;
    }
    Some(Rect::new(0, 0, width as usize, height as usize))
}

fn relayout_active(model: &mut AppModel) -> Option<Cmd> {
    let cmds: Vec<Cmd> = model
        .sessions
        .active_targets()
        .into_iter()
        .filter_map(|target| update_pager(model, target, PagerMsg::Relayout))
        .collect();

    if cmds.is_empty() {
        Some(Cmd::Redraw)
    } else {
        Some(Cmd::batch(cmds))
    }
}
