//! Scroll state for dropdown lists and the form page.

use crate::style::{SURFACE_1, TEXT_MUTED};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget};

/// State for scrollable content.
#[derive(Debug, Clone)]
pub struct ScrollState {
    total: usize,
    visible: usize,
    offset: usize,
}

impl ScrollState {
    /// Create a new scroll state for `total` items with `visible` rows.
    pub fn new(total: usize, visible: usize) -> Self {
        Self {
            total,
            visible,
            offset: 0,
        }
    }

    /// Current scroll offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Update the total item count.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.clamp_offset();
    }

    /// Update the visible row count.
    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible;
        self.clamp_offset();
    }

    /// Reset to the top.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Adjust the offset so the item at `index` is on screen.
    pub fn ensure_visible(&mut self, index: usize) {
        if self.visible == 0 {
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.visible {
            self.offset = index.saturating_sub(self.visible.saturating_sub(1));
        }
        self.clamp_offset();
    }

    /// Whether a scrollbar is needed.
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.visible
    }

    /// Range of item indices currently on screen.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let start = self.offset;
        let end = (self.offset + self.visible).min(self.total);
        start..end
    }

    fn clamp_offset(&mut self) {
        if self.total <= self.visible {
            self.offset = 0;
        } else {
            self.offset = self.offset.min(self.total - self.visible);
        }
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(0, 8)
    }
}

/// Render a vertical scrollbar for the given scroll state.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, scroll: &ScrollState) {
    if !scroll.needs_scrollbar() || area.width == 0 || area.height == 0 {
        return;
    }

    let scrollable_range = scroll.total.saturating_sub(scroll.visible);
    let mut scrollbar_state = ScrollbarState::new(scrollable_range).position(scroll.offset);

    Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .track_symbol(Some("│"))
        .track_style(Style::default().fg(SURFACE_1))
        .thumb_symbol("█")
        .thumb_style(Style::default().fg(TEXT_MUTED))
        .render(area, buf, &mut scrollbar_state);
}
