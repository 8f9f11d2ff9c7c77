//! Border styles and utilities.

use crate::style::{ACCENT, BORDER, BORDER_FOCUS};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::border::Set as BorderSet;
use ratatui::widgets::{Block, Borders};

/// Rounded border character set used throughout Formflow.
pub const ROUNDED_BORDER: BorderSet = BorderSet {
    top_left: "╭",
    top_right: "╮",
    bottom_left: "╰",
    bottom_right: "╯",
    horizontal_top: "─",
    horizontal_bottom: "─",
    vertical_left: "│",
    vertical_right: "│",
};

/// A pre-configured rounded border for field controls and popups.
#[derive(Clone, Default)]
pub struct FieldBorder<'a> {
    title: Option<&'a str>,
    focused: bool,
}

impl<'a> FieldBorder<'a> {
    /// Create a new border.
    pub fn new() -> Self {
        Self {
            title: None,
            focused: false,
        }
    }

    /// Set the border title.
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the focused state.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Create a ratatui Block from this configuration.
    pub fn to_block(&self) -> Block<'a> {
        let border_color = if self.focused { BORDER_FOCUS } else { BORDER };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_set(ROUNDED_BORDER)
            .border_style(Style::default().fg(border_color));

        if let Some(title) = self.title {
            let title_color = if self.focused { ACCENT } else { BORDER };
            block = block
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(title_color));
        }

        block
    }

    /// Calculate the inner area after accounting for borders.
    pub fn inner(&self, area: Rect) -> Rect {
        self.to_block().inner(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_shrinks_by_border() {
        let border = FieldBorder::new();
        let inner = border.inner(Rect::new(0, 0, 10, 5));
        assert_eq!(inner, Rect::new(1, 1, 8, 3));
    }
}
