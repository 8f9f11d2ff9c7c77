//! Boolean field, rendered as a switch or a checkbox.

use crate::chrome::FieldChrome;
use crate::component::{Component, ComponentResult, FocusState};
use crate::style::{ACCENT, SURFACE_2, TEXT, TEXT_DIM, VOID};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// Visual variant of a boolean field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BooleanVariant {
    /// Sliding switch track
    #[default]
    Switch,
    /// Bracketed checkbox
    Checkbox,
}

/// A single on/off value.
pub struct BooleanField {
    chrome: FieldChrome,
    variant: BooleanVariant,
    value: bool,
    focused: bool,
}

impl BooleanField {
    /// Create a boolean field, off by default.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            chrome: FieldChrome::new(label),
            variant: BooleanVariant::Switch,
            value: false,
            focused: false,
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.chrome = self.chrome.required();
        self
    }

    /// Set the description line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.chrome = self.chrome.with_description(description);
        self
    }

    /// Pick the visual variant.
    pub fn with_variant(mut self, variant: BooleanVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: bool) -> Self {
        self.value = value;
        self
    }

    /// Set or clear the externally supplied error.
    pub fn set_external_error(&mut self, error: Option<String>) {
        self.chrome.set_external_error(error);
    }

    /// The current value.
    pub fn value(&self) -> bool {
        self.value
    }

    /// The field's label.
    pub fn label(&self) -> &str {
        self.chrome.label()
    }

    /// Flip the value.
    pub fn toggle(&mut self) {
        self.value = !self.value;
    }
}

impl Component for BooleanField {
    type Output = ();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let control = self.chrome.render(area, buf, self.focused);
        if control.height == 0 {
            return;
        }

        let mut x = control.x;
        match self.variant {
            BooleanVariant::Switch => {
                // A three-cell track with the knob at either end.
                let (track, knob_on) = if self.value {
                    ("  ●", true)
                } else {
                    ("●  ", false)
                };
                let track_style = if knob_on {
                    Style::default().fg(VOID).bg(ACCENT)
                } else {
                    Style::default().fg(TEXT_DIM).bg(SURFACE_2)
                };
                buf.set_string(x, control.y, track, track_style);
                x += 4;
            }
            BooleanVariant::Checkbox => {
                let glyph = if self.value { "[✓]" } else { "[ ]" };
                let style = if self.value {
                    Style::default().fg(ACCENT)
                } else {
                    Style::default().fg(TEXT)
                };
                buf.set_string(x, control.y, glyph, style);
                x += 4;
            }
        }

        let caption = if self.value { "Enabled" } else { "Disabled" };
        buf.set_string(x, control.y, caption, Style::default().fg(TEXT_DIM));
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<()> {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                self.toggle();
                ComponentResult::Handled
            }
            _ => ComponentResult::NotHandled,
        }
    }

    fn focus_state(&self) -> FocusState {
        if self.focused {
            FocusState::Focused
        } else {
            FocusState::Unfocused
        }
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        vec![("Space", "Toggle")]
    }

    fn desired_height(&self, _width: u16) -> u16 {
        self.chrome.height(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn space_toggles() {
        let mut field = BooleanField::new("Notifications");
        assert!(!field.value());

        field.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        assert!(field.value());

        field.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        assert!(!field.value());
    }

    #[test]
    fn other_keys_are_not_handled() {
        let mut field = BooleanField::new("Notifications");
        let result = field.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(result, ComponentResult::NotHandled);
        assert!(!field.value());
    }
}
