//! Monkey tests - sweeps over metrics and long mixed operation sequences
//!
//! Every advance must keep the offset clamped to `[0, max_scroll]`, whatever
//! the line height, viewport size or order of operations.

mod common;

use common::{end_model, numbered_text, press, session, show, space, top_model};
use more_pane::keymap::{KeyCode, Keystroke};
use more_pane::messages::{AppMsg, Msg, PagerMsg};
use more_pane::model::{PagerMetrics, PagerPrompt, PagerSession, PagerState, Rect, TargetId};
use more_pane::update::update;

/// Active session over `total` lines with exactly `vis_lines` content lines
fn activated(total: usize, vis_lines: usize, line_height: usize, start_at_top: bool) -> PagerSession {
    let mut session = PagerSession::new(TargetId(1));
    session.set_text(&numbered_text(total));
    let viewport = Rect::new(0, 0, 320, (vis_lines + 1) * line_height);
    session
        .activate(Some(viewport), &PagerMetrics::new(line_height), start_at_top)
        .unwrap();
    assert_eq!(session.viewport_lines(), vis_lines);
    session
}

fn assert_clamped(session: &PagerSession, context: &str) {
    assert!(
        session.scroll_offset() <= session.max_scroll(),
        "{}: offset {} beyond max {}",
        context,
        session.scroll_offset(),
        session.max_scroll()
    );
}

// ========================================================================
// Metric sweeps
// ========================================================================

#[test]
fn test_half_page_matches_real_valued_rounding() {
    for line_height in 1..=40 {
        for vis_lines in 0..=60 {
            let session = activated(1, vis_lines, line_height, true);
            let visible = session.visible_amount();
            let half = session.half_page_amount();

            let expected = ((visible as f64 / 2.0) / line_height as f64).ceil() as usize * line_height;
            assert_eq!(half, expected, "lh={} vl={}", line_height, vis_lines);
            assert!(2 * half >= visible, "lh={} vl={}", line_height, vis_lines);
            assert_eq!(half % line_height, 0);
        }
    }
}

#[test]
fn test_two_half_pages_cover_a_page() {
    for line_height in [1, 7, 10, 13, 24] {
        for vis_lines in 0..=30 {
            let mut halves = activated(200, vis_lines, line_height, true);
            halves.advance_half_page();
            halves.advance_half_page();

            let mut page = activated(200, vis_lines, line_height, true);
            page.advance_page();

            assert!(
                halves.scroll_offset() >= page.scroll_offset(),
                "lh={} vl={}",
                line_height,
                vis_lines
            );
            // Half pages never move backwards
            assert!(halves.scroll_offset() >= halves.half_page_amount().min(halves.max_scroll()));
        }
    }
}

#[test]
fn test_at_end_after_activation_iff_content_overflows() {
    for total in 0..=40 {
        for vis_lines in 0..=25 {
            for start_at_top in [false, true] {
                let session = activated(total, vis_lines, 10, start_at_top);
                let overflows = total * 10 > vis_lines * 10;
                assert_eq!(
                    session.at_end(),
                    !start_at_top && overflows,
                    "total={} vl={} top={}",
                    total,
                    vis_lines,
                    start_at_top
                );
                assert_clamped(&session, "activation");
                let expected_offset = if start_at_top { 0 } else { session.max_scroll() };
                assert_eq!(session.scroll_offset(), expected_offset);
            }
        }
    }
}

// ========================================================================
// Mixed operation sequences
// ========================================================================

#[test]
fn test_mixed_operations_stay_clamped() {
    for (total, vis_lines, line_height) in [(0, 5, 10), (1, 0, 3), (7, 10, 10), (50, 10, 10), (333, 17, 13)] {
        let mut session = activated(total, vis_lines, line_height, true);
        for i in 0..500usize {
            let before = session.scroll_offset();
            match (i * 7 + total) % 5 {
                0 => {
                    session.advance_line();
                }
                1 => {
                    session.advance_page();
                }
                2 => {
                    session.advance_half_page();
                }
                3 => {
                    session.confirm();
                }
                _ => {
                    session.unrecognized_key();
                    assert_eq!(session.scroll_offset(), before);
                    assert_eq!(session.prompt(), PagerPrompt::Help);
                }
            }
            assert_clamped(&session, &format!("total={} step={}", total, i));
            assert!(session.scroll_offset() >= before, "offset moved backwards");
            if session.prompt() != PagerPrompt::Help {
                assert_eq!(session.prompt(), PagerPrompt::for_at_end(session.at_end()));
            }
        }
    }
}

#[test]
fn test_repeated_unrecognized_keys_only_change_prompt() {
    let (mut model, target) = top_model();
    show(&mut model, target, &numbered_text(50));
    press(&mut model, target, space());
    let offset = session(&model, target).scroll_offset();

    for c in ['x', 'y', 'z', '1', '!', 'w'] {
        press(&mut model, target, Keystroke::char(c));
        let s = session(&model, target);
        assert_eq!(s.scroll_offset(), offset);
        assert!(!s.at_end());
        assert_eq!(s.prompt(), PagerPrompt::Help);
        assert_eq!(s.state(), PagerState::Paging);
    }
}

#[test]
fn test_key_storm_through_update() {
    let keys = [
        space(),
        Keystroke::char('d'),
        Keystroke::key(KeyCode::Enter),
        Keystroke::char('x'),
        Keystroke::key(KeyCode::Down),
    ];
    let (mut model, target) = top_model();
    show(&mut model, target, &numbered_text(120));

    for i in 0..200usize {
        press(&mut model, target, keys[(i * 13) % keys.len()]);
        let s = session(&model, target);
        assert_clamped(s, &format!("step {}", i));
        if s.is_close_pending() {
            break;
        }
    }
}

// ========================================================================
// Window resize edge cases
// ========================================================================

#[test]
fn test_rapid_resize_sequence_keeps_pager_consistent() {
    let (mut model, target) = end_model();
    show(&mut model, target, &numbered_text(80));

    for i in 0..100u32 {
        let w = 1 + (i * 13) % 2000;
        let h = 1 + (i * 17) % 1500;
        update(&mut model, Msg::resize(w, h));
        let s = session(&model, target);
        assert_clamped(s, &format!("resize {}x{}", w, h));
        assert!(s.is_active());
    }
}

#[test]
fn test_resize_to_zero_closes_instead_of_panicking() {
    let (mut model, target) = end_model();
    show(&mut model, target, &numbered_text(80));

    let cmd = update(&mut model, Msg::resize(800, 0)).unwrap_or_default();
    assert_eq!(cmd.closes(), vec![(target, None)]);
    assert!(session(&model, target).is_close_pending());

    // Further input is ignored until the close runs
    assert_eq!(update(&mut model, Msg::Pager(target, PagerMsg::AdvancePage)), None);
}

#[test]
fn test_resize_to_maximum_u32() {
    let (mut model, target) = top_model();
    show(&mut model, target, &numbered_text(80));

    update(&mut model, Msg::resize(u32::MAX, u32::MAX));
    let s = session(&model, target);
    assert_eq!(s.max_scroll(), 0);
    assert_eq!(s.scroll_offset(), 0);
}

#[test]
fn test_font_size_sweep() {
    let (mut model, target) = end_model();
    show(&mut model, target, &numbered_text(64));

    for line_height in 1..=60 {
        update(
            &mut model,
            Msg::App(AppMsg::FontChanged {
                line_height,
                status_bar_height: line_height,
            }),
        );
        let s = session(&model, target);
        assert_eq!(s.line_height(), line_height);
        assert_clamped(s, &format!("lh={}", line_height));
        assert_eq!(s.scroll_offset(), s.max_scroll());
    }
}
