//! Keystroke dispatch tests - bindings, state-dependent meaning, replay

mod common;

use common::{end_model, enter, numbered_text, press, session, show, space, top_model};
use more_pane::keymap::{BindingConfig, KeyCode, Keystroke, Modifiers};
use more_pane::messages::{AppMsg, Msg};
use more_pane::model::{PagerState, HELP_PROMPT};
use more_pane::update::update;
use more_pane::{Cmd, PagerConfig};

#[test]
fn test_space_pages_and_d_half_pages() {
    let (mut model, target) = top_model();
    show(&mut model, target, &numbered_text(50));

    assert_eq!(press(&mut model, target, space()), Some(Cmd::Redraw));
    assert_eq!(session(&model, target).scroll_offset(), 100);

    press(&mut model, target, Keystroke::char('d'));
    assert_eq!(session(&model, target).scroll_offset(), 150);
}

#[test]
fn test_enter_advances_one_line_while_paging() {
    let (mut model, target) = top_model();
    show(&mut model, target, &numbered_text(50));

    press(&mut model, target, enter());
    press(&mut model, target, Keystroke::key(KeyCode::NumpadEnter));
    assert_eq!(session(&model, target).scroll_offset(), 20);
    assert_eq!(session(&model, target).state(), PagerState::Paging);
}

#[test]
fn test_enter_at_end_closes_without_replay() {
    let (mut model, target) = end_model();
    show(&mut model, target, &numbered_text(50));
    assert_eq!(session(&model, target).state(), PagerState::AtEnd);

    let cmd = press(&mut model, target, enter());
    assert_eq!(
        cmd,
        Some(Cmd::ClosePager {
            target,
            replay: None
        })
    );
}

#[test]
fn test_quit_keys_close_without_replay() {
    for key in [Keystroke::char('q'), Keystroke::key(KeyCode::Escape)] {
        let (mut model, target) = top_model();
        show(&mut model, target, &numbered_text(50));

        let cmd = press(&mut model, target, key);
        assert_eq!(
            cmd,
            Some(Cmd::ClosePager {
                target,
                replay: None
            }),
            "{} should quit",
            key
        );
    }
}

#[test]
fn test_other_key_at_end_closes_and_replays() {
    let (mut model, target) = end_model();
    show(&mut model, target, &numbered_text(50));

    let colon = Keystroke::char(':');
    let cmd = press(&mut model, target, colon);
    assert_eq!(
        cmd,
        Some(Cmd::ClosePager {
            target,
            replay: Some(colon)
        })
    );
    assert!(session(&model, target).is_close_pending());
}

#[test]
fn test_space_at_end_is_replayed_too() {
    let (mut model, target) = end_model();
    show(&mut model, target, &numbered_text(50));

    let cmd = press(&mut model, target, space());
    assert_eq!(cmd.unwrap_or_default().closes(), vec![(target, Some(space()))]);
}

#[test]
fn test_unbound_key_while_paging_shows_help() {
    let (mut model, target) = top_model();
    show(&mut model, target, &numbered_text(50));

    let ctrl_f = Keystroke::new(KeyCode::Char('f'), Modifiers::CTRL);
    assert_eq!(press(&mut model, target, ctrl_f), Some(Cmd::Redraw));
    assert_eq!(session(&model, target).status_message(), HELP_PROMPT);
    assert_eq!(session(&model, target).scroll_offset(), 0);
}

#[test]
fn test_keys_after_close_request_are_ignored() {
    let (mut model, target) = end_model();
    show(&mut model, target, &numbered_text(50));
    press(&mut model, target, Keystroke::char('x'));

    assert_eq!(press(&mut model, target, Keystroke::char('y')), None);
    assert_eq!(press(&mut model, target, enter()), None);
}

#[test]
fn test_keys_for_inactive_or_unknown_pager_are_ignored() {
    let (mut model, target) = top_model();
    assert_eq!(press(&mut model, target, space()), None);

    let other = more_pane::model::TargetId(99);
    assert_eq!(press(&mut model, other, space()), None);
    assert!(model.session(other).is_none());
}

#[test]
fn test_configured_binding_extends_defaults() {
    let (mut model, target) = top_model();
    let config = PagerConfig {
        more: true,
        keys: vec![BindingConfig {
            key: "j".to_string(),
            command: "AdvanceLine".to_string(),
        }],
        ..PagerConfig::default()
    };
    update(&mut model, Msg::App(AppMsg::ApplyConfig(config)));
    show(&mut model, target, &numbered_text(50));

    press(&mut model, target, Keystroke::char('j'));
    assert_eq!(session(&model, target).scroll_offset(), 10);
    press(&mut model, target, space());
    assert_eq!(session(&model, target).scroll_offset(), 110);
}

#[test]
fn test_invalid_binding_falls_back_to_defaults() {
    let (mut model, target) = top_model();
    let config = PagerConfig {
        more: true,
        keys: vec![BindingConfig {
            key: "j".to_string(),
            command: "Teleport".to_string(),
        }],
        ..PagerConfig::default()
    };
    update(&mut model, Msg::App(AppMsg::ApplyConfig(config)));
    show(&mut model, target, &numbered_text(50));

    press(&mut model, target, Keystroke::char('j'));
    assert_eq!(session(&model, target).status_message(), HELP_PROMPT);
    press(&mut model, target, space());
    assert_eq!(session(&model, target).scroll_offset(), 100);
}
