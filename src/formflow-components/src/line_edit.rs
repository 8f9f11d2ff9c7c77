//! Single-line text editing state.
//!
//! Grapheme-aware cursor handling shared by every widget that embeds a
//! one-line input (text fields, search boxes, path prompts, the time
//! entry).

use crate::style::{ACCENT, SURFACE_1, TEXT, TEXT_MUTED, VOID};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// State for a single-line input.
#[derive(Debug, Clone, Default)]
pub struct LineEdit {
    /// Current text value
    value: String,
    /// Cursor position (in graphemes)
    cursor: usize,
    /// Placeholder text
    placeholder: Option<String>,
}

impl LineEdit {
    /// Create empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial value, cursor at the end.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Set placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// The current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the text, moving the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let v = value.into();
        self.cursor = v.graphemes(true).count();
        self.value = v;
    }

    /// Cursor position in graphemes.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Number of graphemes in the value.
    pub fn len(&self) -> usize {
        self.value.graphemes(true).count()
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        let byte_offset = self.grapheme_to_byte_offset(self.cursor);
        self.value.insert(byte_offset, c);
        self.cursor += 1;
    }

    /// Insert text at the cursor (for paste).
    pub fn insert_str(&mut self, text: &str) {
        let byte_offset = self.grapheme_to_byte_offset(self.cursor);
        self.value.insert_str(byte_offset, text);
        self.cursor += text.graphemes(true).count();
    }

    /// Delete the grapheme before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let new_cursor = self.cursor - 1;
            let start = self.grapheme_to_byte_offset(new_cursor);
            let end = self.grapheme_to_byte_offset(self.cursor);
            self.value.replace_range(start..end, "");
            self.cursor = new_cursor;
        }
    }

    /// Delete the grapheme at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let start = self.grapheme_to_byte_offset(self.cursor);
            let end = self.grapheme_to_byte_offset(self.cursor + 1);
            self.value.replace_range(start..end, "");
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Render the input as a one-row control.
    ///
    /// Draws the value (or placeholder), fills the background, and
    /// marks the cursor cell when focused.
    pub fn render(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let bg = SURFACE_1;
        for x in area.x..area.right() {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_bg(bg);
            }
        }

        let (text, style) = if self.value.is_empty() {
            let placeholder = self.placeholder.as_deref().unwrap_or("");
            (placeholder, Style::default().fg(TEXT_MUTED).bg(bg))
        } else {
            (self.value.as_str(), Style::default().fg(TEXT).bg(bg))
        };

        let max = area.width.saturating_sub(1) as usize;
        let visible: String = text.graphemes(true).take(max).collect();
        buf.set_string(area.x, area.y, &visible, style);

        if focused {
            // Cursor column in display cells, not graphemes: wide
            // characters occupy two cells.
            let prefix: String = self.value.graphemes(true).take(self.cursor).collect();
            let cursor_x = area.x + (prefix.width().min(max)) as u16;
            if cursor_x < area.right()
                && let Some(cell) = buf.cell_mut((cursor_x, area.y))
            {
                cell.set_bg(ACCENT).set_fg(VOID);
            }
        }
    }

    fn grapheme_to_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.value.len())
    }
}
