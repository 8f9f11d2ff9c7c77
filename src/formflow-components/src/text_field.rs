//! Text, email and URL fields.
//!
//! One widget covers all three kinds; the kind picks the default
//! validation pattern (none for plain text) and a `pattern` override
//! replaces it. Validity is recomputed on every change and rendered as
//! an inline indicator; it never blocks the value from propagating.

use crate::chrome::FieldChrome;
use crate::component::{Component, ComponentResult, FocusState};
use crate::line_edit::LineEdit;
use crate::style::{ERROR, SUCCESS, TEXT_MUTED, VOID};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formflow_common::{TextKind, TextRule, Validity};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// A single-line text input with tri-state validation.
pub struct TextField {
    chrome: FieldChrome,
    rule: TextRule,
    edit: LineEdit,
    validity: Validity,
    max_length: Option<usize>,
    focused: bool,
}

impl TextField {
    /// Create a plain text field.
    pub fn text(label: impl Into<String>) -> Self {
        Self::with_kind(label, TextKind::Plain)
    }

    /// Create an email field with the default email pattern.
    pub fn email(label: impl Into<String>) -> Self {
        Self::with_kind(label, TextKind::Email)
    }

    /// Create a URL field with the default URL pattern.
    pub fn url(label: impl Into<String>) -> Self {
        Self::with_kind(label, TextKind::Url)
    }

    fn with_kind(label: impl Into<String>, kind: TextKind) -> Self {
        Self {
            chrome: FieldChrome::new(label),
            rule: TextRule::new(kind),
            edit: LineEdit::new(),
            validity: Validity::Unknown,
            max_length: None,
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

    /// Set placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.edit = std::mem::take(&mut self.edit).with_placeholder(placeholder);
        self
    }

    /// Override the validation pattern.
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.rule = self.rule.with_pattern(pattern);
        self.revalidate();
        self
    }

    /// Limit the value length in graphemes (plain text fields).
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.edit.set_value(value);
        self.revalidate();
        self
    }

    /// Set or clear the externally supplied error.
    pub fn set_external_error(&mut self, error: Option<String>) {
        self.chrome.set_external_error(error);
    }

    /// The current value.
    pub fn value(&self) -> &str {
        self.edit.value()
    }

    /// The current validity.
    pub fn validity(&self) -> Validity {
        self.validity
    }

    /// The field's label.
    pub fn label(&self) -> &str {
        self.chrome.label()
    }

    /// Whether the field is required.
    pub fn is_required(&self) -> bool {
        self.chrome.is_required()
    }

    fn revalidate(&mut self) {
        self.validity = self.rule.check(self.edit.value());
    }

    fn room_for(&self, incoming: usize) -> usize {
        match self.max_length {
            Some(max) => max.saturating_sub(self.edit.len()).min(incoming),
            None => incoming,
        }
    }
}

impl Component for TextField {
    type Output = ();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let control = self.chrome.render(area, buf, self.focused);
        if control.height == 0 {
            return;
        }
        self.edit.render(control, buf, self.focused);

        // Inline validity indicator at the right edge of the control.
        if self.validity.is_known() && control.width > 2 {
            let (glyph, color) = match self.validity {
                Validity::Valid => ("✓", SUCCESS),
                Validity::Invalid => ("✗", ERROR),
                Validity::Unknown => unreachable!(),
            };
            let x = control.right().saturating_sub(2);
            buf.set_string(x, control.y, glyph, Style::default().fg(color).bg(VOID));
        }

        // Grapheme counter for bounded fields.
        if let Some(max) = self.max_length
            && control.width > 10
        {
            let counter = format!("{}/{}", self.edit.len(), max);
            let x = control.right().saturating_sub(counter.len() as u16 + 3);
            buf.set_string(x, control.y, &counter, Style::default().fg(TEXT_MUTED));
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<()> {
        let handled = match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit.clear();
                true
            }
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                if self.room_for(1) > 0 {
                    self.edit.insert(c);
                }
                true
            }
            KeyCode::Backspace => {
                self.edit.backspace();
                true
            }
            KeyCode::Delete => {
                self.edit.delete();
                true
            }
            KeyCode::Left => {
                self.edit.move_left();
                true
            }
            KeyCode::Right => {
                self.edit.move_right();
                true
            }
            KeyCode::Home => {
                self.edit.move_home();
                true
            }
            KeyCode::End => {
                self.edit.move_end();
                true
            }
            _ => false,
        };

        if handled {
            self.revalidate();
            ComponentResult::Handled
        } else {
            ComponentResult::NotHandled
        }
    }

    fn focus_state(&self) -> FocusState {
        if self.focused {
            FocusState::Editing
        } else {
            FocusState::Unfocused
        }
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        vec![("Type", "Edit"), ("Ctrl+U", "Clear")]
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        let room = self.room_for(text.chars().count());
        if room > 0 {
            let clipped: String = text.chars().take(room).collect();
            self.edit.insert_str(&clipped);
            self.revalidate();
        }
        true
    }

    fn desired_height(&self, _width: u16) -> u16 {
        self.chrome.height(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            field.handle_key(key(c));
        }
    }

    #[test]
    fn email_validity_tracks_input() {
        let mut field = TextField::email("Email");
        assert_eq!(field.validity(), Validity::Unknown);

        type_str(&mut field, "user@");
        assert_eq!(field.validity(), Validity::Invalid);

        type_str(&mut field, "example.com");
        assert_eq!(field.validity(), Validity::Valid);
        assert_eq!(field.value(), "user@example.com");

        // Emptying the field returns to Unknown, not Invalid.
        for _ in 0.."user@example.com".len() {
            field.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        }
        assert_eq!(field.validity(), Validity::Unknown);
    }

    #[test]
    fn plain_text_with_override_pattern() {
        let mut field = TextField::text("Full Name").with_pattern("^[a-zA-Z]+(?: [a-zA-Z]+)+$");
        type_str(&mut field, "Ada");
        assert_eq!(field.validity(), Validity::Invalid);
        type_str(&mut field, " Lovelace");
        assert_eq!(field.validity(), Validity::Valid);
    }

    #[test]
    fn max_length_refuses_further_input() {
        let mut field = TextField::text("Short").with_max_length(3);
        type_str(&mut field, "abcdef");
        assert_eq!(field.value(), "abc");

        assert!(field.handle_paste("xyz"));
        assert_eq!(field.value(), "abc");
    }

    #[test]
    fn paste_is_clipped_to_room() {
        let mut field = TextField::text("Short").with_max_length(5);
        type_str(&mut field, "ab");
        field.handle_paste("cdefgh");
        assert_eq!(field.value(), "abcde");
    }

    #[test]
    fn value_propagates_even_when_invalid() {
        let mut field = TextField::url("Website");
        type_str(&mut field, "not a url");
        assert_eq!(field.validity(), Validity::Invalid);
        assert_eq!(field.value(), "not a url");
    }
}
