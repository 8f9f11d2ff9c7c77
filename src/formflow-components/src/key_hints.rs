//! Bottom-of-screen key hint bar.

use crate::style::{SURFACE_1, TEXT_DIM, TEXT_MUTED};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

/// A single-line bar listing the focused widget's key bindings.
pub struct KeyHintsBar<'a> {
    hints: &'a [(&'static str, &'static str)],
}

impl<'a> KeyHintsBar<'a> {
    /// Create a hint bar from (key, description) pairs.
    pub fn new(hints: &'a [(&'static str, &'static str)]) -> Self {
        Self { hints }
    }
}

impl Widget for KeyHintsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        for x in area.x..area.right() {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_bg(SURFACE_1);
            }
        }

        let mut x = area.x + 1;
        for (i, (key, description)) in self.hints.iter().enumerate() {
            if i > 0 {
                buf.set_string(
                    x,
                    area.y,
                    " · ",
                    Style::default().fg(TEXT_MUTED).bg(SURFACE_1),
                );
                x += 3;
            }
            let segment = format!("{key} {description}");
            if x + segment.len() as u16 >= area.right() {
                break;
            }
            buf.set_string(
                x,
                area.y,
                key,
                Style::default().fg(TEXT_DIM).bg(SURFACE_1),
            );
            x += key.len() as u16 + 1;
            buf.set_string(
                x,
                area.y,
                description,
                Style::default().fg(TEXT_MUTED).bg(SURFACE_1),
            );
            x += description.len() as u16;
        }
    }
}
