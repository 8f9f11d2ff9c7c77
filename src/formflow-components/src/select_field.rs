//! Single-value select field.
//!
//! State machine: closed → open (Enter/Space) → closed (pick or Esc).
//! While open an optional search narrows the visible options by a
//! case-insensitive substring match on the label; filtering never
//! touches the underlying option list. A clear action (Backspace while
//! closed, when enabled) sets the value to absent without opening.

use crate::borders::FieldBorder;
use crate::chrome::FieldChrome;
use crate::component::{Component, ComponentResult, FocusState};
use crate::scroll::{ScrollState, render_scrollbar};
use crate::style::{ACCENT, SURFACE_1, SURFACE_2, TEXT, TEXT_DIM, TEXT_MUTED};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formflow_common::{SelectOption, filter_options};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

/// Rows of options shown before the dropdown scrolls.
const MAX_VISIBLE: usize = 6;

/// A single-value selector over a fixed option list.
pub struct SelectField {
    chrome: FieldChrome,
    options: Vec<SelectOption>,
    value: Option<String>,
    placeholder: String,
    searchable: bool,
    clearable: bool,
    open: bool,
    search: String,
    filtered: Vec<usize>,
    highlight: usize,
    scroll: ScrollState,
    focused: bool,
}

impl SelectField {
    /// Create a select field over the given options.
    pub fn new(label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let filtered = (0..options.len()).collect();
        let len = options.len();
        Self {
            chrome: FieldChrome::new(label),
            options,
            value: None,
            placeholder: "Select an option".to_string(),
            searchable: true,
            clearable: true,
            open: false,
            search: String::new(),
            filtered,
            highlight: 0,
            scroll: ScrollState::new(len, MAX_VISIBLE),
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

    /// Set the closed-state placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Enable or disable search filtering (default enabled).
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Enable or disable the clear action (default enabled).
    pub fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set or clear the externally supplied error.
    pub fn set_external_error(&mut self, error: Option<String>) {
        self.chrome.set_external_error(error);
    }

    /// The selected option's value key.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The selected option's label.
    pub fn selected_label(&self) -> Option<&str> {
        let value = self.value.as_deref()?;
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    /// The field's label.
    pub fn label(&self) -> &str {
        self.chrome.label()
    }

    /// Whether the field is required.
    pub fn is_required(&self) -> bool {
        self.chrome.is_required()
    }

    /// Whether the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The current search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Option indices currently visible through the filter.
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// Clear the selection without opening the list.
    pub fn clear_value(&mut self) {
        self.value = None;
    }

    fn open_list(&mut self) {
        self.open = true;
        self.search.clear();
        self.refilter();
        // Start on the currently selected option when it is visible.
        if let Some(value) = self.value.as_deref()
            && let Some(pos) = self
                .filtered
                .iter()
                .position(|&i| self.options[i].value == value)
        {
            self.highlight = pos;
        }
        self.scroll.ensure_visible(self.highlight);
    }

    fn close_list(&mut self) {
        self.open = false;
        self.search.clear();
    }

    fn refilter(&mut self) {
        self.filtered = filter_options(&self.options, &self.search);
        self.highlight = 0;
        self.scroll.set_total(self.filtered.len());
        self.scroll.reset();
    }

    fn highlight_next(&mut self) {
        if !self.filtered.is_empty() {
            self.highlight = (self.highlight + 1) % self.filtered.len();
            self.scroll.ensure_visible(self.highlight);
        }
    }

    fn highlight_prev(&mut self) {
        if !self.filtered.is_empty() {
            self.highlight = self
                .highlight
                .checked_sub(1)
                .unwrap_or(self.filtered.len() - 1);
            self.scroll.ensure_visible(self.highlight);
        }
    }

    fn pick_highlighted(&mut self) {
        if let Some(&idx) = self.filtered.get(self.highlight) {
            self.value = Some(self.options[idx].value.clone());
            self.close_list();
        }
    }

    fn dropdown_height(&self) -> u16 {
        // Bordered list plus the search row.
        let rows = self.filtered.len().clamp(1, MAX_VISIBLE) as u16;
        rows + 2 + u16::from(self.searchable)
    }

    fn render_closed(&self, control: Rect, buf: &mut Buffer) {
        for x in control.x..control.right() {
            if let Some(cell) = buf.cell_mut((x, control.y)) {
                cell.set_bg(SURFACE_1);
            }
        }

        let (text, style) = match self.selected_label() {
            Some(label) => (label, Style::default().fg(TEXT).bg(SURFACE_1)),
            None => (
                self.placeholder.as_str(),
                Style::default().fg(TEXT_MUTED).bg(SURFACE_1),
            ),
        };
        buf.set_string(control.x + 1, control.y, text, style);

        let mut x = control.right().saturating_sub(2);
        buf.set_string(
            x,
            control.y,
            "▾",
            Style::default().fg(TEXT_DIM).bg(SURFACE_1),
        );
        if self.value.is_some() && self.clearable {
            x = x.saturating_sub(2);
            buf.set_string(
                x,
                control.y,
                "✕",
                Style::default().fg(TEXT_MUTED).bg(SURFACE_1),
            );
        }
    }

    fn render_open(&self, control: Rect, buf: &mut Buffer) {
        // Search row replaces the closed control.
        if self.searchable {
            for x in control.x..control.right() {
                if let Some(cell) = buf.cell_mut((x, control.y)) {
                    cell.set_bg(SURFACE_2);
                }
            }
            buf.set_string(
                control.x + 1,
                control.y,
                "/",
                Style::default().fg(ACCENT).bg(SURFACE_2),
            );
            let (text, style) = if self.search.is_empty() {
                ("type to filter...", Style::default().fg(TEXT_MUTED).bg(SURFACE_2))
            } else {
                (self.search.as_str(), Style::default().fg(TEXT).bg(SURFACE_2))
            };
            buf.set_string(control.x + 3, control.y, text, style);

            let count = format!("{}/{}", self.filtered.len(), self.options.len());
            let count_x = control.right().saturating_sub(count.len() as u16 + 1);
            buf.set_string(
                count_x,
                control.y,
                &count,
                Style::default().fg(TEXT_DIM).bg(SURFACE_2),
            );
        } else {
            self.render_closed(control, buf);
        }

        let list_y = control.y + 1;
        let rows = self.filtered.len().clamp(1, MAX_VISIBLE) as u16;
        let list_area = Rect::new(control.x, list_y, control.width, rows + 2);

        let block = FieldBorder::new().focused(true).to_block();
        let inner = block.inner(list_area);
        block.render(list_area, buf);

        if self.filtered.is_empty() {
            buf.set_string(
                inner.x + 1,
                inner.y,
                "No options found",
                Style::default().fg(TEXT_MUTED),
            );
            return;
        }

        for (row, visible_idx) in self.scroll.visible_range().enumerate() {
            let y = inner.y + row as u16;
            if y >= inner.bottom() {
                break;
            }
            let Some(&option_idx) = self.filtered.get(visible_idx) else {
                continue;
            };
            let option = &self.options[option_idx];
            let is_highlighted = visible_idx == self.highlight;
            let is_selected = self.value.as_deref() == Some(option.value.as_str());

            let bg = if is_highlighted { SURFACE_2 } else { SURFACE_1 };
            for x in inner.x..inner.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_bg(bg);
                }
            }

            if is_highlighted {
                buf.set_string(inner.x, y, ">", Style::default().fg(ACCENT).bg(bg));
            }

            let label_style = if is_selected {
                Style::default()
                    .fg(ACCENT)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT).bg(bg)
            };
            buf.set_string(inner.x + 2, y, &option.label, label_style);

            if is_selected {
                let x = inner.right().saturating_sub(2);
                buf.set_string(x, y, "✓", Style::default().fg(ACCENT).bg(bg));
            }
        }

        if self.scroll.needs_scrollbar() {
            let scrollbar_area =
                Rect::new(inner.right().saturating_sub(1), inner.y, 1, inner.height);
            render_scrollbar(scrollbar_area, buf, &self.scroll);
        }
    }
}

impl Component for SelectField {
    type Output = ();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let control = self.chrome.render(area, buf, self.focused);
        if control.height == 0 {
            return;
        }
        let top_row = Rect::new(control.x, control.y, control.width, 1);
        if self.open {
            self.render_open(Rect::new(control.x, control.y, control.width, control.height), buf);
        } else {
            self.render_closed(top_row, buf);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<()> {
        if !self.open {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open_list();
                    ComponentResult::Handled
                }
                KeyCode::Backspace | KeyCode::Delete
                    if self.clearable && self.value.is_some() =>
                {
                    self.clear_value();
                    ComponentResult::Handled
                }
                _ => ComponentResult::NotHandled,
            };
        }

        match key.code {
            KeyCode::Up => {
                self.highlight_prev();
                ComponentResult::Handled
            }
            KeyCode::Down => {
                self.highlight_next();
                ComponentResult::Handled
            }
            KeyCode::Enter => {
                self.pick_highlighted();
                ComponentResult::Handled
            }
            KeyCode::Esc => {
                self.close_list();
                ComponentResult::Handled
            }
            KeyCode::Backspace if self.searchable => {
                self.search.pop();
                self.refilter();
                ComponentResult::Handled
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.clear();
                self.refilter();
                ComponentResult::Handled
            }
            KeyCode::Char(c)
                if self.searchable
                    && (key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT) =>
            {
                self.search.push(c);
                self.refilter();
                ComponentResult::Handled
            }
            _ => ComponentResult::NotHandled,
        }
    }

    fn focus_state(&self) -> FocusState {
        if !self.focused {
            FocusState::Unfocused
        } else if self.open {
            FocusState::Editing
        } else {
            FocusState::Focused
        }
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            // Losing focus dismisses the list, like clicking outside.
            self.close_list();
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.open {
            vec![
                ("↑/↓", "Navigate"),
                ("Enter", "Pick"),
                ("Esc", "Dismiss"),
            ]
        } else {
            vec![("Enter", "Open"), ("Backspace", "Clear")]
        }
    }

    fn desired_height(&self, _width: u16) -> u16 {
        if self.open {
            self.chrome.height(1 + self.dropdown_height())
        } else {
            self.chrome.height(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> Vec<SelectOption> {
        vec![
            SelectOption::new("us", "United States"),
            SelectOption::new("ca", "Canada"),
            SelectOption::new("uk", "United Kingdom"),
        ]
    }

    fn press(field: &mut SelectField, code: KeyCode) {
        field.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(field: &mut SelectField, s: &str) {
        for c in s.chars() {
            press(field, KeyCode::Char(c));
        }
    }

    #[test]
    fn open_pick_closes_and_sets_value() {
        let mut field = SelectField::new("Country", countries());
        assert!(!field.is_open());

        press(&mut field, KeyCode::Enter);
        assert!(field.is_open());

        press(&mut field, KeyCode::Down);
        press(&mut field, KeyCode::Enter);
        assert!(!field.is_open());
        assert_eq!(field.value(), Some("ca"));
        assert_eq!(field.selected_label(), Some("Canada"));
    }

    #[test]
    fn search_narrows_without_mutating_options() {
        let mut field = SelectField::new("Country", countries());
        press(&mut field, KeyCode::Enter);
        type_str(&mut field, "king");
        assert_eq!(field.filtered(), &[2]);

        press(&mut field, KeyCode::Enter);
        assert_eq!(field.value(), Some("uk"));

        // Reopening shows the full list again, order preserved.
        press(&mut field, KeyCode::Enter);
        assert_eq!(field.filtered(), &[0, 1, 2]);
    }

    #[test]
    fn esc_dismisses_without_changing_value() {
        let mut field = SelectField::new("Country", countries()).with_value("us");
        press(&mut field, KeyCode::Enter);
        press(&mut field, KeyCode::Down);
        press(&mut field, KeyCode::Esc);
        assert!(!field.is_open());
        assert_eq!(field.value(), Some("us"));
    }

    #[test]
    fn clear_without_opening() {
        let mut field = SelectField::new("Country", countries()).with_value("us");
        press(&mut field, KeyCode::Backspace);
        assert_eq!(field.value(), None);
        assert!(!field.is_open());
    }

    #[test]
    fn clear_disabled_when_not_clearable() {
        let mut field = SelectField::new("Country", countries())
            .clearable(false)
            .with_value("us");
        let result = field.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(result, ComponentResult::NotHandled);
        assert_eq!(field.value(), Some("us"));
    }

    #[test]
    fn losing_focus_dismisses_the_list() {
        let mut field = SelectField::new("Country", countries());
        field.set_focus(true);
        press(&mut field, KeyCode::Enter);
        assert!(field.is_open());

        field.set_focus(false);
        assert!(!field.is_open());
    }

    #[test]
    fn highlight_wraps() {
        let mut field = SelectField::new("Country", countries());
        press(&mut field, KeyCode::Enter);
        press(&mut field, KeyCode::Up);
        press(&mut field, KeyCode::Enter);
        assert_eq!(field.value(), Some("uk"));
    }
}
