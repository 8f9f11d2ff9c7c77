//! Field chrome: the shared wrapper around every control surface.
//!
//! Renders label (with required marker), optional description, and an
//! error line consistently, and hands the widget back the area left
//! for its control. The error line shows the externally supplied error
//! when present, otherwise the widget's local one.

use crate::style::{ACCENT, ERROR, TEXT, TEXT_DIM};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

/// Label, description and error chrome for one field.
#[derive(Debug, Clone, Default)]
pub struct FieldChrome {
    label: String,
    required: bool,
    description: Option<String>,
    /// Externally supplied error, rendered verbatim and taking
    /// precedence over the widget's local error.
    external_error: Option<String>,
    /// Widget-local error (file intake rejections).
    local_error: Option<String>,
}

impl FieldChrome {
    /// Create chrome with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the description line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The field's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the field is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Set or clear the externally supplied error.
    pub fn set_external_error(&mut self, error: Option<String>) {
        self.external_error = error;
    }

    /// Set or clear the widget-local error.
    pub fn set_local_error(&mut self, error: Option<String>) {
        self.local_error = error;
    }

    /// The error line to display, if any.
    pub fn effective_error(&self) -> Option<&str> {
        self.external_error
            .as_deref()
            .or(self.local_error.as_deref())
    }

    /// Total rows needed for a control of `control_height` rows.
    pub fn height(&self, control_height: u16) -> u16 {
        self.header_rows() + control_height + self.footer_rows()
    }

    /// Render the chrome and return the control area.
    pub fn render(&self, area: Rect, buf: &mut Buffer, focused: bool) -> Rect {
        let header = self.header_rows();
        let footer = self.footer_rows();
        if area.height < header + footer {
            return Rect::new(area.x, area.y, area.width, 0);
        }

        let label_style = if focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT)
        };
        buf.set_string(area.x, area.y, &self.label, label_style);
        if self.required {
            let x = area.x + self.label.chars().count() as u16 + 1;
            buf.set_string(x, area.y, "*", Style::default().fg(ERROR));
        }

        if let Some(description) = &self.description {
            buf.set_string(
                area.x,
                area.y + 1,
                description,
                Style::default().fg(TEXT_DIM),
            );
        }

        if let Some(error) = self.effective_error() {
            let y = area.bottom().saturating_sub(1);
            buf.set_string(area.x, y, error, Style::default().fg(ERROR));
        }

        Rect::new(
            area.x,
            area.y + header,
            area.width,
            area.height - header - footer,
        )
    }

    fn header_rows(&self) -> u16 {
        1 + u16::from(self.description.is_some())
    }

    fn footer_rows(&self) -> u16 {
        u16::from(self.effective_error().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_accounts_for_description_and_error() {
        let mut chrome = FieldChrome::new("Name");
        assert_eq!(chrome.height(1), 2);

        chrome = chrome.with_description("desc");
        assert_eq!(chrome.height(1), 3);

        chrome.set_local_error(Some("bad".into()));
        assert_eq!(chrome.height(1), 4);
    }

    #[test]
    fn external_error_wins_over_local() {
        let mut chrome = FieldChrome::new("Name");
        chrome.set_local_error(Some("local".into()));
        assert_eq!(chrome.effective_error(), Some("local"));

        chrome.set_external_error(Some("external".into()));
        assert_eq!(chrome.effective_error(), Some("external"));

        chrome.set_external_error(None);
        assert_eq!(chrome.effective_error(), Some("local"));
    }

    #[test]
    fn render_returns_control_area() {
        let chrome = FieldChrome::new("Name").with_description("desc");
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 4));
        let control = chrome.render(Rect::new(0, 0, 40, 3), &mut buf, false);
        assert_eq!(control, Rect::new(0, 2, 40, 1));
    }
}
