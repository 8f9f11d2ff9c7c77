//! Number field with stepper.
//!
//! Typed input is filtered to numeric characters; the parsed value is
//! always propagated upward, even when it falls outside the configured
//! bounds (the bounds only flip the validity indicator). Up/Down step
//! the value, clamped at the bounds and rounded to the configured
//! precision.

use crate::chrome::FieldChrome;
use crate::component::{Component, ComponentResult, FocusState};
use crate::line_edit::LineEdit;
use crate::style::{ERROR, SUCCESS, TEXT_DIM, VOID};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formflow_common::{NumberRule, Validity};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// A numeric input with increment/decrement stepping.
pub struct NumberField {
    chrome: FieldChrome,
    rule: NumberRule,
    edit: LineEdit,
    /// Last successfully parsed value; survives a momentarily
    /// unparseable buffer so consumers always see a number once one
    /// was entered.
    value: Option<f64>,
    validity: Validity,
    focused: bool,
}

impl NumberField {
    /// Create a number field.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            chrome: FieldChrome::new(label),
            rule: NumberRule::new(),
            edit: LineEdit::new(),
            value: None,
            validity: Validity::Unknown,
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

    /// Set the inclusive minimum.
    pub fn with_min(mut self, min: f64) -> Self {
        self.rule = self.rule.with_min(min);
        self
    }

    /// Set the inclusive maximum.
    pub fn with_max(mut self, max: f64) -> Self {
        self.rule = self.rule.with_max(max);
        self
    }

    /// Set the stepper increment.
    pub fn with_step(mut self, step: f64) -> Self {
        self.rule = self.rule.with_step(step);
        self
    }

    /// Set the decimal precision (0 = integer).
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.rule = self.rule.with_precision(precision);
        self
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.set_value(Some(value));
        self
    }

    /// Set or clear the externally supplied error.
    pub fn set_external_error(&mut self, error: Option<String>) {
        self.chrome.set_external_error(error);
    }

    /// The current parsed value.
    pub fn value(&self) -> Option<f64> {
        self.value
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

    /// Step the value upward; no-op at the maximum.
    pub fn increment(&mut self) {
        self.set_value(Some(self.rule.increment(self.value)));
    }

    /// Step the value downward; no-op at the minimum.
    pub fn decrement(&mut self) {
        self.set_value(Some(self.rule.decrement(self.value)));
    }

    fn set_value(&mut self, value: Option<f64>) {
        self.value = value;
        match value {
            Some(v) => {
                self.edit.set_value(self.rule.format(v));
                self.validity = self.rule.check(v);
            }
            None => {
                self.edit.clear();
                self.validity = Validity::Unknown;
            }
        }
    }

    /// Re-read the edit buffer after a keystroke.
    fn reparse(&mut self) {
        let raw = self.edit.value();
        if raw.is_empty() {
            self.value = None;
            self.validity = Validity::Unknown;
            return;
        }
        match self.rule.parse(raw) {
            Some(parsed) => {
                // Out-of-range still propagates; the rule only flips
                // the indicator.
                self.value = Some(parsed);
                self.validity = self.rule.check(parsed);
            }
            None => {
                self.validity = Validity::Invalid;
            }
        }
    }

    fn accepts_char(&self, c: char) -> bool {
        c.is_ascii_digit()
            || (c == '-' && self.edit.cursor() == 0)
            || (c == '.' && self.rule.precision > 0)
    }
}

impl Component for NumberField {
    type Output = ();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let control = self.chrome.render(area, buf, self.focused);
        if control.height == 0 {
            return;
        }

        // Leave room for the stepper arrows on the right.
        let input_area = Rect::new(
            control.x,
            control.y,
            control.width.saturating_sub(3),
            control.height,
        );
        self.edit.render(input_area, buf, self.focused);

        let arrows_x = control.right().saturating_sub(2);
        buf.set_string(arrows_x, control.y, "↕", Style::default().fg(TEXT_DIM));

        if self.validity.is_known() && input_area.width > 2 {
            let (glyph, color) = match self.validity {
                Validity::Valid => ("✓", SUCCESS),
                Validity::Invalid => ("✗", ERROR),
                Validity::Unknown => unreachable!(),
            };
            let x = input_area.right().saturating_sub(2);
            buf.set_string(x, control.y, glyph, Style::default().fg(color).bg(VOID));
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<()> {
        match key.code {
            KeyCode::Up => {
                self.increment();
                ComponentResult::Handled
            }
            KeyCode::Down => {
                self.decrement();
                ComponentResult::Handled
            }
            KeyCode::Char(c)
                if self.accepts_char(c)
                    && (key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT) =>
            {
                self.edit.insert(c);
                self.reparse();
                ComponentResult::Handled
            }
            KeyCode::Backspace => {
                self.edit.backspace();
                self.reparse();
                ComponentResult::Handled
            }
            KeyCode::Delete => {
                self.edit.delete();
                self.reparse();
                ComponentResult::Handled
            }
            KeyCode::Left => {
                self.edit.move_left();
                ComponentResult::Handled
            }
            KeyCode::Right => {
                self.edit.move_right();
                ComponentResult::Handled
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit.clear();
                self.reparse();
                ComponentResult::Handled
            }
            _ => ComponentResult::NotHandled,
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
        vec![("↑/↓", "Step"), ("Type", "Edit")]
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        // Only numeric characters survive a paste.
        let filtered: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
            .collect();
        if !filtered.is_empty() {
            self.edit.insert_str(&filtered);
            self.reparse();
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

    fn age_field() -> NumberField {
        NumberField::new("Age").with_min(18.0).with_max(120.0)
    }

    fn press(field: &mut NumberField, code: KeyCode) {
        field.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn increment_at_max_is_noop() {
        let mut field = age_field().with_value(120.0);
        press(&mut field, KeyCode::Up);
        assert_eq!(field.value(), Some(120.0));
    }

    #[test]
    fn decrement_at_min_is_noop() {
        let mut field = age_field().with_value(18.0);
        press(&mut field, KeyCode::Down);
        assert_eq!(field.value(), Some(18.0));
    }

    #[test]
    fn increment_from_absent_seeds_min() {
        let mut field = age_field();
        assert_eq!(field.value(), None);
        press(&mut field, KeyCode::Up);
        assert_eq!(field.value(), Some(18.0));
    }

    #[test]
    fn out_of_range_value_still_propagates() {
        let mut field = age_field();
        press(&mut field, KeyCode::Char('9'));
        assert_eq!(field.value(), Some(9.0));
        assert_eq!(field.validity(), Validity::Invalid);

        press(&mut field, KeyCode::Char('9'));
        assert_eq!(field.value(), Some(99.0));
        assert_eq!(field.validity(), Validity::Valid);
    }

    #[test]
    fn integer_field_refuses_decimal_point() {
        let mut field = age_field();
        press(&mut field, KeyCode::Char('4'));
        press(&mut field, KeyCode::Char('.'));
        press(&mut field, KeyCode::Char('2'));
        assert_eq!(field.value(), Some(42.0));
    }

    #[test]
    fn letters_are_ignored() {
        let mut field = age_field();
        press(&mut field, KeyCode::Char('1'));
        press(&mut field, KeyCode::Char('a'));
        press(&mut field, KeyCode::Char('9'));
        assert_eq!(field.value(), Some(19.0));
    }

    #[test]
    fn clearing_returns_to_unknown() {
        let mut field = age_field().with_value(20.0);
        field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(field.value(), None);
        assert_eq!(field.validity(), Validity::Unknown);
    }

    #[test]
    fn fractional_stepping_rounds_to_precision() {
        let mut field = NumberField::new("Rate")
            .with_step(0.1)
            .with_precision(1)
            .with_value(0.2);
        press(&mut field, KeyCode::Up);
        assert_eq!(field.value(), Some(0.3));
    }

    #[test]
    fn paste_filters_non_numeric() {
        let mut field = age_field();
        field.handle_paste("abc123def");
        assert_eq!(field.value(), Some(123.0));
    }
}
