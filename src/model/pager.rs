//! Pager session - the `more`-style paging state machine
//!
//! A session owns the displayed text, the vertical scroll offset and the
//! end-of-content flag. Scroll arithmetic is done in pixels (multiples of the
//! line height), matching how the host viewport scrolls.

use std::fmt;

use ropey::{Rope, RopeSlice};
use serde::Serialize;
use tracing::debug;

use super::layout::{PagerLayout, PagerMetrics, Rect};
use super::registry::TargetId;
use crate::error::PagerError;
use crate::util::text::{count_rope_lines, strip_trailing_newline};

/// Prompt shown while more content follows
pub const MORE_PROMPT: &str = "-- MORE --";
/// Prompt shown once the last page is visible
pub const CONTINUE_PROMPT: &str = "Hit ENTER or type command to continue";
/// Prompt shown after a key the pager does not understand
pub const HELP_PROMPT: &str = "-- MORE -- (RET: line, SPACE: page, d: half page, q: quit)";

/// Coarse lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PagerState {
    Inactive,
    Paging,
    AtEnd,
}

/// The three fixed status prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PagerPrompt {
    #[default]
    More,
    Continue,
    Help,
}

impl PagerPrompt {
    /// Prompt implied by the end-of-content flag
    pub fn for_at_end(at_end: bool) -> Self {
        if at_end {
            PagerPrompt::Continue
        } else {
            PagerPrompt::More
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            PagerPrompt::More => MORE_PROMPT,
            PagerPrompt::Continue => CONTINUE_PROMPT,
            PagerPrompt::Help => HELP_PROMPT,
        }
    }
}

impl fmt::Display for PagerPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Outcome of commands that may end the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStep {
    /// Session keeps running with this prompt
    Stay(PagerPrompt),
    /// Session should be torn down
    Close,
}

/// One pager per target, reused across activations
#[derive(Debug, Clone)]
pub struct PagerSession {
    target: TargetId,
    content: Rope,
    /// Char index where each line starts (split on `\n` only)
    line_starts: Vec<usize>,
    total_lines: usize,
    scroll_offset: usize,
    line_height: usize,
    viewport_lines: usize,
    at_end: bool,
    prompt: PagerPrompt,
    active: bool,
    close_pending: bool,
    layout: Option<PagerLayout>,
}

impl PagerSession {
    pub fn new(target: TargetId) -> Self {
        Self {
            target,
            content: Rope::new(),
            line_starts: Vec::new(),
            total_lines: 0,
            scroll_offset: 0,
            line_height: 0,
            viewport_lines: 0,
            at_end: false,
            prompt: PagerPrompt::More,
            active: false,
            close_pending: false,
            layout: None,
        }
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Replace the displayed text, stripping a single trailing newline
    pub fn set_text(&mut self, text: &str) {
        let text = strip_trailing_newline(text);
        self.content = Rope::from_str(text);
        self.total_lines = count_rope_lines(&self.content);
        self.line_starts = line_starts(&self.content);
        self.scroll_offset = 0;
    }

    pub fn has_text(&self) -> bool {
        self.content.len_chars() > 0
    }

    pub fn text(&self) -> String {
        self.content.to_string()
    }

    pub fn content(&self) -> &Rope {
        &self.content
    }

    /// Text of logical line `index`, without its terminator
    pub fn line(&self, index: usize) -> Option<RopeSlice<'_>> {
        let start = *self.line_starts.get(index)?;
        let end = match self.line_starts.get(index + 1) {
            Some(&next) => next - 1,
            None => self.content.len_chars(),
        };
        Some(self.content.slice(start..end))
    }

    /// Lines currently scrolled into view, top to bottom
    pub fn visible_lines(&self) -> impl Iterator<Item = RopeSlice<'_>> + '_ {
        let first = self.first_visible_line();
        let count = self.layout.map(|l| l.shown_lines).unwrap_or(0);
        (first..first + count).filter_map(move |i| self.line(i))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn line_height(&self) -> usize {
        self.line_height
    }

    pub fn viewport_lines(&self) -> usize {
        self.viewport_lines
    }

    pub fn at_end(&self) -> bool {
        self.at_end
    }

    pub fn prompt(&self) -> PagerPrompt {
        self.prompt
    }

    pub fn status_message(&self) -> &'static str {
        self.prompt.text()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// A close was requested and is waiting for the idle cycle
    pub fn is_close_pending(&self) -> bool {
        self.close_pending
    }

    pub fn layout(&self) -> Option<&PagerLayout> {
        self.layout.as_ref()
    }

    pub fn state(&self) -> PagerState {
        match (self.active, self.at_end) {
            (false, _) => PagerState::Inactive,
            (true, false) => PagerState::Paging,
            (true, true) => PagerState::AtEnd,
        }
    }

    /// Pixels visible at once
    pub fn visible_amount(&self) -> usize {
        self.viewport_lines * self.line_height
    }

    /// Largest valid scroll offset
    pub fn max_scroll(&self) -> usize {
        (self.total_lines * self.line_height).saturating_sub(self.visible_amount())
    }

    /// Index of the topmost visible line
    pub fn first_visible_line(&self) -> usize {
        if self.line_height == 0 {
            0
        } else {
            self.scroll_offset / self.line_height
        }
    }

    /// Half the visible amount, rounded up to a whole line
    pub fn half_page_amount(&self) -> usize {
        if self.line_height == 0 {
            return 0;
        }
        self.visible_amount().div_ceil(2 * self.line_height) * self.line_height
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Show the pager over `viewport` and position it per `start_at_top`
    ///
    /// A missing viewport aborts the activation and leaves the session inactive.
    pub fn activate(
        &mut self,
        viewport: Option<Rect>,
        metrics: &PagerMetrics,
        start_at_top: bool,
    ) -> Result<PagerLayout, PagerError> {
        let layout = self.compute_layout(viewport, metrics)?;
        self.active = true;
        self.close_pending = false;
        self.apply_layout(layout, start_at_top);
        tracing::info!(
            target = %self.target,
            lines = self.total_lines,
            state = ?self.state(),
            "pager activated"
        );
        Ok(layout)
    }

    /// Re-run the sizing policy after a viewport or font change
    pub fn relayout(
        &mut self,
        viewport: Option<Rect>,
        metrics: &PagerMetrics,
        start_at_top: bool,
    ) -> Result<PagerLayout, PagerError> {
        let layout = self.compute_layout(viewport, metrics)?;
        self.apply_layout(layout, start_at_top);
        Ok(layout)
    }

    /// Hide the pager and clear it for the next activation
    ///
    /// Returns false if the session was not active.
    pub fn deactivate(&mut self) -> bool {
        if !self.active {
            return false;
        }
        tracing::info!(target = %self.target, "pager deactivated");
        self.active = false;
        self.close_pending = false;
        self.content = Rope::new();
        self.line_starts.clear();
        self.total_lines = 0;
        self.scroll_offset = 0;
        self.at_end = false;
        self.prompt = PagerPrompt::More;
        self.layout = None;
        true
    }

    /// Record that a close is waiting for the idle cycle
    pub fn mark_close_pending(&mut self) {
        self.close_pending = true;
    }

    fn compute_layout(
        &self,
        viewport: Option<Rect>,
        metrics: &PagerMetrics,
    ) -> Result<PagerLayout, PagerError> {
        let viewport = viewport.ok_or(PagerError::MissingViewport {
            target: self.target,
        })?;
        PagerLayout::compute(viewport, metrics, self.total_lines)
    }

    fn apply_layout(&mut self, layout: PagerLayout, start_at_top: bool) {
        debug!(
            viewport_height = layout.bounds.height,
            line_height = layout.line_height,
            count = self.total_lines,
            vis_lines = layout.viewport_lines,
            "positioning pager"
        );

        self.line_height = layout.line_height;
        self.viewport_lines = layout.viewport_lines;
        self.layout = Some(layout);

        self.scroll_offset = 0;
        self.at_end = false;
        self.prompt = PagerPrompt::More;

        // Content that fits needs no scroll request; otherwise the default
        // shows the last page first.
        if !start_at_top && self.max_scroll() > 0 {
            self.scroll_by(usize::MAX);
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Scroll forward by one line
    pub fn advance_line(&mut self) -> PagerPrompt {
        self.scroll_by(self.line_height)
    }

    /// Scroll forward by the visible amount
    pub fn advance_page(&mut self) -> PagerPrompt {
        self.scroll_by(self.visible_amount())
    }

    /// Scroll forward by half the visible amount, rounded up to a whole line
    pub fn advance_half_page(&mut self) -> PagerPrompt {
        self.scroll_by(self.half_page_amount())
    }

    /// Enter: close once at the end, otherwise advance one line
    pub fn confirm(&mut self) -> PagerStep {
        if self.at_end {
            PagerStep::Close
        } else {
            PagerStep::Stay(self.advance_line())
        }
    }

    /// Show the key help; scroll position and end flag are untouched
    pub fn unrecognized_key(&mut self) -> PagerPrompt {
        self.prompt = PagerPrompt::Help;
        self.prompt
    }

    /// Scroll forward by `more` pixels and recompute the end flag
    ///
    /// The end flag compares the unclamped target against the maximum, so an
    /// oversized request always lands at the end.
    fn scroll_by(&mut self, more: usize) -> PagerPrompt {
        if !self.active {
            return self.prompt;
        }

        let val = self.scroll_offset;
        let max = self.max_scroll();
        let wanted = val.saturating_add(more);

        debug!(
            val,
            more,
            max_scroll = max,
            visible_amount = self.visible_amount(),
            "scroll"
        );

        self.at_end = wanted >= max;
        self.scroll_offset = wanted.min(max);
        self.prompt = PagerPrompt::for_at_end(self.at_end);
        self.prompt
    }

    // =========================================================================
    // Debug invariants
    // =========================================================================

    #[cfg(debug_assertions)]
    pub fn assert_invariants_with_context(&self, context: &str) {
        assert!(
            self.scroll_offset <= self.max_scroll(),
            "[{}] scroll_offset {} exceeds max_scroll {} for {}",
            context,
            self.scroll_offset,
            self.max_scroll(),
            self.target
        );
        assert_eq!(
            self.total_lines,
            self.line_starts.len(),
            "[{}] line index out of sync for {}",
            context,
            self.target
        );
        if !self.active {
            assert!(
                !self.at_end && self.scroll_offset == 0,
                "[{}] inactive session {} carries scroll state",
                context,
                self.target
            );
        }
        if self.prompt != PagerPrompt::Help {
            assert_eq!(
                self.prompt,
                PagerPrompt::for_at_end(self.at_end),
                "[{}] prompt out of sync with at_end for {}",
                context,
                self.target
            );
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants_with_context(&self, _context: &str) {}
}

/// Char offsets where each `\n`-separated line begins
fn line_starts(rope: &Rope) -> Vec<usize> {
    if rope.len_chars() == 0 {
        return Vec::new();
    }

    let mut starts = vec![0];
    for (idx, ch) in rope.chars().enumerate() {
        if ch == '\n' {
            starts.push(idx + 1);
        }
    }
    // A trailing terminator does not open a new line
    if starts.last() == Some(&rope.len_chars()) {
        starts.pop();
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(lines: usize) -> String {
        (1..=lines)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Viewport that yields `vis_lines` content lines at the given line height
    fn viewport_for(vis_lines: usize, line_height: usize) -> Rect {
        Rect::new(0, 0, 640, (vis_lines + 1) * line_height)
    }

    fn session_with(lines: usize, start_at_top: bool) -> PagerSession {
        let mut session = PagerSession::new(TargetId(1));
        session.set_text(&numbered(lines));
        session
            .activate(
                Some(viewport_for(10, 10)),
                &PagerMetrics::new(10),
                start_at_top,
            )
            .unwrap();
        session
    }

    #[test]
    fn test_set_text_strips_one_trailing_newline() {
        let mut session = PagerSession::new(TargetId(1));
        session.set_text("a\nb\n");
        assert_eq!(session.text(), "a\nb");
        assert_eq!(session.total_lines(), 2);

        session.set_text("a\n\n");
        assert_eq!(session.text(), "a\n");
        assert_eq!(session.total_lines(), 1);
    }

    #[test]
    fn test_line_access() {
        let mut session = PagerSession::new(TargetId(1));
        session.set_text("one\ntwo\nthree");
        assert_eq!(session.line(0).unwrap().to_string(), "one");
        assert_eq!(session.line(1).unwrap().to_string(), "two");
        assert_eq!(session.line(2).unwrap().to_string(), "three");
        assert!(session.line(3).is_none());
    }

    #[test]
    fn test_line_access_keeps_empty_lines() {
        let mut session = PagerSession::new(TargetId(1));
        session.set_text("a\n\nb");
        assert_eq!(session.total_lines(), 3);
        assert_eq!(session.line(1).unwrap().to_string(), "");
    }

    #[test]
    fn test_default_activation_shows_last_page() {
        let session = session_with(50, false);
        assert_eq!(session.scroll_offset(), 400);
        assert!(session.at_end());
        assert_eq!(session.state(), PagerState::AtEnd);
        assert_eq!(session.status_message(), CONTINUE_PROMPT);
    }

    #[test]
    fn test_start_at_top_shows_first_page() {
        let session = session_with(50, true);
        assert_eq!(session.scroll_offset(), 0);
        assert!(!session.at_end());
        assert_eq!(session.status_message(), MORE_PROMPT);
    }

    #[test]
    fn test_fitting_content_starts_paging() {
        let session = session_with(5, false);
        assert_eq!(session.scroll_offset(), 0);
        assert_eq!(session.state(), PagerState::Paging);
    }

    #[test]
    fn test_half_page_rounds_up() {
        let mut session = PagerSession::new(TargetId(1));
        session.set_text(&numbered(100));
        session
            .activate(Some(viewport_for(7, 10)), &PagerMetrics::new(10), true)
            .unwrap();

        assert_eq!(session.viewport_lines(), 7);
        assert_eq!(session.half_page_amount(), 40);
        session.advance_half_page();
        assert_eq!(session.scroll_offset(), 40);
    }

    #[test]
    fn test_confirm_advances_then_closes() {
        let mut session = session_with(12, true);
        assert_eq!(session.max_scroll(), 20);

        assert_eq!(session.confirm(), PagerStep::Stay(PagerPrompt::More));
        assert_eq!(session.scroll_offset(), 10);
        assert_eq!(session.confirm(), PagerStep::Stay(PagerPrompt::Continue));
        assert_eq!(session.scroll_offset(), 20);
        assert_eq!(session.confirm(), PagerStep::Close);
    }

    #[test]
    fn test_unrecognized_key_only_changes_prompt() {
        let mut session = session_with(50, true);
        session.advance_page();
        let offset = session.scroll_offset();

        for _ in 0..3 {
            assert_eq!(session.unrecognized_key(), PagerPrompt::Help);
        }
        assert_eq!(session.scroll_offset(), offset);
        assert!(!session.at_end());
        assert_eq!(session.status_message(), HELP_PROMPT);
    }

    #[test]
    fn test_deactivate_resets_session() {
        let mut session = session_with(50, false);
        assert!(session.deactivate());

        assert_eq!(session.state(), PagerState::Inactive);
        assert!(!session.has_text());
        assert_eq!(session.scroll_offset(), 0);
        assert!(!session.at_end());
        assert!(session.layout().is_none());
        assert!(!session.deactivate());
    }

    #[test]
    fn test_missing_viewport_aborts_activation() {
        let mut session = PagerSession::new(TargetId(9));
        session.set_text("text");
        let err = session
            .activate(None, &PagerMetrics::new(10), false)
            .unwrap_err();

        assert_eq!(
            err,
            PagerError::MissingViewport {
                target: TargetId(9)
            }
        );
        assert!(!session.is_active());
    }

    #[test]
    fn test_scroll_ignored_while_inactive() {
        let mut session = PagerSession::new(TargetId(1));
        session.set_text(&numbered(50));
        session.advance_page();
        assert_eq!(session.scroll_offset(), 0);
        assert!(!session.at_end());
    }

    #[test]
    fn test_visible_lines_follow_scroll_offset() {
        let mut session = session_with(30, true);
        session.advance_page();

        let lines: Vec<String> = session.visible_lines().map(|l| l.to_string()).collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "line 11");
        assert_eq!(lines[9], "line 20");
    }

    #[test]
    fn test_relayout_resets_to_initial_position() {
        let mut session = session_with(50, true);
        session.advance_page();
        assert_eq!(session.scroll_offset(), 100);

        session
            .relayout(Some(viewport_for(20, 10)), &PagerMetrics::new(10), true)
            .unwrap();
        assert_eq!(session.scroll_offset(), 0);
        assert_eq!(session.viewport_lines(), 20);
    }
}
