//! Centered modal capturing a URL.
//!
//! Used by the rich-text editor's two-step link and image insertion:
//! the modal collects the target, then the editor applies it through
//! the engine's command interface.

use crate::borders::FieldBorder;
use crate::line_edit::LineEdit;
use crate::style::{SURFACE_0, TEXT_DIM};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Clear, Widget};

/// Result of handling a key in the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlModalResult {
    /// Keep the modal open
    Pending,
    /// Apply the captured URL
    Submit(String),
    /// Dismiss without applying
    Cancel,
}

/// A small centered dialog with a single URL input.
pub struct UrlModal {
    title: &'static str,
    edit: LineEdit,
}

impl UrlModal {
    /// Create a modal with the given title.
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            edit: LineEdit::new().with_placeholder("https://example.com"),
        }
    }

    /// The current input text.
    pub fn value(&self) -> &str {
        self.edit.value()
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> UrlModalResult {
        match key.code {
            KeyCode::Enter => {
                let url = self.edit.value().trim().to_string();
                if url.is_empty() {
                    // Nothing to apply yet; inserting needs a target.
                    UrlModalResult::Pending
                } else {
                    UrlModalResult::Submit(url)
                }
            }
            KeyCode::Esc => UrlModalResult::Cancel,
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.edit.insert(c);
                UrlModalResult::Pending
            }
            KeyCode::Backspace => {
                self.edit.backspace();
                UrlModalResult::Pending
            }
            KeyCode::Delete => {
                self.edit.delete();
                UrlModalResult::Pending
            }
            KeyCode::Left => {
                self.edit.move_left();
                UrlModalResult::Pending
            }
            KeyCode::Right => {
                self.edit.move_right();
                UrlModalResult::Pending
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit.clear();
                UrlModalResult::Pending
            }
            _ => UrlModalResult::Pending,
        }
    }

    /// Handle pasted text.
    pub fn handle_paste(&mut self, text: &str) {
        self.edit.insert_str(text.trim());
    }

    /// Render the modal centered in `area`.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let width = 40.min(area.width.saturating_sub(2)).max(20);
        let height = 5u16.min(area.height);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let modal_area = Rect::new(x, y, width, height);

        Clear.render(modal_area, buf);
        for yy in modal_area.y..modal_area.bottom() {
            for xx in modal_area.x..modal_area.right() {
                if let Some(cell) = buf.cell_mut((xx, yy)) {
                    cell.set_bg(SURFACE_0);
                }
            }
        }

        let block = FieldBorder::new().title(self.title).focused(true).to_block();
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        if inner.height > 0 {
            self.edit
                .render(Rect::new(inner.x, inner.y, inner.width, 1), buf, true);
        }
        if inner.height > 2 {
            buf.set_string(
                inner.x,
                inner.y + 2,
                "Enter Insert · Esc Cancel",
                Style::default().fg(TEXT_DIM),
            );
        }
    }
}
