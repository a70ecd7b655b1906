//! Pager geometry - viewport rectangles, font metrics and the sizing policy

use serde::Serialize;

use crate::error::PagerError;

/// Default inset between the overlay border and its contents (pixels)
pub const DEFAULT_BORDER_INSET: usize = 2;

/// Pixel rectangle in window coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge X coordinate (exclusive)
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// Bottom edge Y coordinate (exclusive)
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub fn contains(&self, px: usize, py: usize) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: usize) -> Rect {
        Rect {
            x: self.x + amount,
            y: self.y + amount,
            width: self.width.saturating_sub(amount * 2),
            height: self.height.saturating_sub(amount * 2),
        }
    }

    /// A full-width strip of `height` pixels sitting on this rectangle's bottom edge
    ///
    /// The strip never starts above this rectangle's top edge.
    pub fn bottom_strip(&self, height: usize) -> Rect {
        let height = height.min(self.height);
        Rect {
            x: self.x,
            y: self.bottom() - height,
            width: self.width,
            height,
        }
    }
}

/// Font and chrome measurements supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PagerMetrics {
    /// Height of one text line in pixels
    pub line_height: usize,
    /// Height of the prompt row in pixels
    pub status_bar_height: usize,
    /// Border inset applied on each side of the overlay
    pub border_inset: usize,
}

impl PagerMetrics {
    /// Metrics where the prompt row is one text line tall
    pub fn new(line_height: usize) -> Self {
        Self {
            line_height,
            status_bar_height: line_height,
            border_inset: DEFAULT_BORDER_INSET,
        }
    }

    pub fn with_status_bar_height(mut self, height: usize) -> Self {
        self.status_bar_height = height;
        self
    }

    pub fn with_border_inset(mut self, inset: usize) -> Self {
        self.border_inset = inset;
        self
    }
}

impl Default for PagerMetrics {
    fn default() -> Self {
        Self::new(20)
    }
}

/// Result of running the sizing policy against a viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PagerLayout {
    /// Lines that fit in the viewport, one line reserved for the prompt
    pub viewport_lines: usize,
    /// Lines of content actually shown (content may be shorter than the viewport)
    pub shown_lines: usize,
    /// Overlay rectangle, anchored to the viewport's bottom edge
    pub bounds: Rect,
    pub line_height: usize,
    pub status_bar_height: usize,
    pub border_inset: usize,
}

impl PagerLayout {
    /// Apply the sizing policy
    ///
    /// `viewport_lines = floor(height / line_height) - 1`, and the overlay is
    /// `min(total, viewport_lines)` lines plus the prompt row and both insets.
    pub fn compute(
        viewport: Rect,
        metrics: &PagerMetrics,
        total_lines: usize,
    ) -> Result<Self, PagerError> {
        if metrics.line_height == 0 {
            return Err(PagerError::InvalidLineHeight);
        }

        let viewport_lines = (viewport.height / metrics.line_height).saturating_sub(1);
        let shown_lines = total_lines.min(viewport_lines);
        let height = shown_lines * metrics.line_height
            + metrics.status_bar_height
            + metrics.border_inset * 2;

        Ok(Self {
            viewport_lines,
            shown_lines,
            bounds: viewport.bottom_strip(height),
            line_height: metrics.line_height,
            status_bar_height: metrics.status_bar_height,
            border_inset: metrics.border_inset,
        })
    }

    /// Area where content lines are drawn
    pub fn text_area(&self) -> Rect {
        let inner = self.bounds.inset(self.border_inset);
        Rect {
            height: inner.height.saturating_sub(self.status_bar_height),
            ..inner
        }
    }

    /// Area where the prompt is drawn
    pub fn prompt_area(&self) -> Rect {
        self.bounds
            .inset(self.border_inset)
            .bottom_strip(self.status_bar_height)
    }
}
