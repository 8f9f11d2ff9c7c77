//! Multi-value select field.
//!
//! Selection order is preserved: toggling an unselected option appends
//! it, and when the selection is already at its configured maximum the
//! oldest entry is evicted to make room (FIFO replacement). Toggling a
//! selected option removes it. Closed, the field shows the selection as
//! a tag row with an inline remove control per tag and a clear-all
//! action.

use crate::borders::FieldBorder;
use crate::chrome::FieldChrome;
use crate::component::{Component, ComponentResult, FocusState};
use crate::scroll::{ScrollState, render_scrollbar};
use crate::style::{
    ACCENT, ACCENT_SOFT, SURFACE_1, SURFACE_2, TEXT, TEXT_DIM, TEXT_MUTED, WARNING,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formflow_common::{SelectOption, filter_options};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

/// Rows of options shown before the dropdown scrolls.
const MAX_VISIBLE: usize = 6;

/// A multi-value selector with a configurable selection maximum.
pub struct MultiSelectField {
    chrome: FieldChrome,
    options: Vec<SelectOption>,
    /// Selected value keys, in selection order (oldest first).
    values: Vec<String>,
    placeholder: String,
    searchable: bool,
    max: Option<usize>,
    open: bool,
    search: String,
    filtered: Vec<usize>,
    highlight: usize,
    /// Tag the closed-state cursor points at, for inline removal.
    tag_cursor: usize,
    scroll: ScrollState,
    focused: bool,
}

impl MultiSelectField {
    /// Create a multi-select field over the given options.
    pub fn new(label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let filtered = (0..options.len()).collect();
        let len = options.len();
        Self {
            chrome: FieldChrome::new(label),
            options,
            values: Vec::new(),
            placeholder: "Select options".to_string(),
            searchable: true,
            max: None,
            open: false,
            search: String::new(),
            filtered,
            highlight: 0,
            tag_cursor: 0,
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

    /// Cap the number of simultaneous selections.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the initial selection.
    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        if let Some(max) = self.max {
            while self.values.len() > max {
                self.values.remove(0);
            }
        }
        self
    }

    /// Set or clear the externally supplied error.
    pub fn set_external_error(&mut self, error: Option<String>) {
        self.chrome.set_external_error(error);
    }

    /// Selected value keys in selection order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Labels of the selected options, in selection order.
    pub fn selected_labels(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter_map(|v| {
                self.options
                    .iter()
                    .find(|o| &o.value == v)
                    .map(|o| o.label.as_str())
            })
            .collect()
    }

    /// The field's label.
    pub fn label(&self) -> &str {
        self.chrome.label()
    }

    /// Whether the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the selection is at its maximum.
    pub fn at_max(&self) -> bool {
        self.max.is_some_and(|m| self.values.len() >= m)
    }

    /// Option indices currently visible through the filter.
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// Toggle an option by value key.
    ///
    /// Removing is always possible; adding at the maximum evicts the
    /// oldest selection first so the newest pick always lands.
    pub fn toggle_value(&mut self, value: &str) {
        if let Some(pos) = self.values.iter().position(|v| v == value) {
            self.values.remove(pos);
        } else {
            if self.at_max() {
                self.values.remove(0);
            }
            self.values.push(value.to_string());
        }
        self.clamp_tag_cursor();
    }

    /// Remove one selected entry by position in the tag row.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.values.len() {
            self.values.remove(index);
            self.clamp_tag_cursor();
        }
    }

    /// Clear the whole selection.
    pub fn clear_all(&mut self) {
        self.values.clear();
        self.search.clear();
        self.tag_cursor = 0;
    }

    fn clamp_tag_cursor(&mut self) {
        if !self.values.is_empty() {
            self.tag_cursor = self.tag_cursor.min(self.values.len() - 1);
        } else {
            self.tag_cursor = 0;
        }
    }

    fn open_list(&mut self) {
        self.open = true;
        self.search.clear();
        self.refilter();
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

    fn toggle_highlighted(&mut self) {
        if let Some(&idx) = self.filtered.get(self.highlight) {
            let value = self.options[idx].value.clone();
            self.toggle_value(&value);
        }
    }

    fn dropdown_height(&self) -> u16 {
        let rows = self.filtered.len().clamp(1, MAX_VISIBLE) as u16;
        rows + 2 + u16::from(self.searchable) + u16::from(self.at_max())
    }

    fn render_tags(&self, area: Rect, buf: &mut Buffer) {
        for x in area.x..area.right() {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_bg(SURFACE_1);
            }
        }

        if self.values.is_empty() {
            buf.set_string(
                area.x + 1,
                area.y,
                &self.placeholder,
                Style::default().fg(TEXT_MUTED).bg(SURFACE_1),
            );
        } else {
            let mut x = area.x + 1;
            for (i, label) in self.selected_labels().iter().enumerate() {
                let tag = format!(" {label} ✕ ");
                if x + tag.chars().count() as u16 + 2 >= area.right() {
                    buf.set_string(
                        x,
                        area.y,
                        "…",
                        Style::default().fg(TEXT_DIM).bg(SURFACE_1),
                    );
                    break;
                }
                let on_cursor = self.focused && !self.open && i == self.tag_cursor;
                let tag_style = if on_cursor {
                    Style::default()
                        .fg(TEXT)
                        .bg(ACCENT_SOFT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(TEXT).bg(SURFACE_2)
                };
                buf.set_string(x, area.y, &tag, tag_style);
                x += tag.chars().count() as u16 + 1;
            }
        }

        buf.set_string(
            area.right().saturating_sub(2),
            area.y,
            "▾",
            Style::default().fg(TEXT_DIM).bg(SURFACE_1),
        );
    }

    fn render_open(&self, control: Rect, buf: &mut Buffer) {
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
        } else {
            self.render_tags(Rect::new(control.x, control.y, control.width, 1), buf);
        }

        let rows = self.filtered.len().clamp(1, MAX_VISIBLE) as u16;
        let notice = self.at_max();
        let list_area = Rect::new(
            control.x,
            control.y + 1,
            control.width,
            rows + 2 + u16::from(notice),
        );

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
            let is_selected = self.values.iter().any(|v| v == &option.value);

            let bg = if is_highlighted { SURFACE_2 } else { SURFACE_1 };
            for x in inner.x..inner.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_bg(bg);
                }
            }

            if is_highlighted {
                buf.set_string(inner.x, y, ">", Style::default().fg(ACCENT).bg(bg));
            }

            let mark = if is_selected { "[✓]" } else { "[ ]" };
            let mark_style = if is_selected {
                Style::default().fg(ACCENT).bg(bg)
            } else {
                Style::default().fg(TEXT_DIM).bg(bg)
            };
            buf.set_string(inner.x + 2, y, mark, mark_style);
            buf.set_string(
                inner.x + 6,
                y,
                &option.label,
                Style::default().fg(TEXT).bg(bg),
            );
        }

        if notice
            && let Some(max) = self.max
        {
            let y = inner.bottom().saturating_sub(1);
            let text = format!("Maximum of {max} items can be selected");
            buf.set_string(inner.x + 1, y, &text, Style::default().fg(WARNING));
        }

        if self.scroll.needs_scrollbar() {
            let scrollbar_area =
                Rect::new(inner.right().saturating_sub(1), inner.y, 1, inner.height);
            render_scrollbar(scrollbar_area, buf, &self.scroll);
        }
    }
}

impl Component for MultiSelectField {
    type Output = ();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let control = self.chrome.render(area, buf, self.focused);
        if control.height == 0 {
            return;
        }
        if self.open {
            self.render_open(control, buf);
        } else {
            self.render_tags(Rect::new(control.x, control.y, control.width, 1), buf);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<()> {
        if !self.open {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open_list();
                    ComponentResult::Handled
                }
                KeyCode::Left if !self.values.is_empty() => {
                    self.tag_cursor = self.tag_cursor.saturating_sub(1);
                    ComponentResult::Handled
                }
                KeyCode::Right if !self.values.is_empty() => {
                    self.tag_cursor = (self.tag_cursor + 1).min(self.values.len() - 1);
                    ComponentResult::Handled
                }
                KeyCode::Backspace | KeyCode::Delete if !self.values.is_empty() => {
                    self.remove_at(self.tag_cursor);
                    ComponentResult::Handled
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.clear_all();
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
                self.toggle_highlighted();
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
            self.close_list();
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.open {
            vec![
                ("↑/↓", "Navigate"),
                ("Enter", "Toggle"),
                ("Esc", "Dismiss"),
            ]
        } else {
            vec![
                ("Enter", "Open"),
                ("←/→", "Tags"),
                ("Backspace", "Remove"),
                ("Ctrl+U", "Clear all"),
            ]
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

    fn interests() -> Vec<SelectOption> {
        vec![
            SelectOption::new("tech", "Technology"),
            SelectOption::new("science", "Science"),
            SelectOption::new("art", "Art"),
        ]
    }

    fn press(field: &mut MultiSelectField, code: KeyCode) {
        field.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn toggle_appends_and_removes() {
        let mut field = MultiSelectField::new("Interests", interests());
        field.toggle_value("tech");
        field.toggle_value("science");
        assert_eq!(field.values(), &["tech", "science"]);

        field.toggle_value("tech");
        assert_eq!(field.values(), &["science"]);
    }

    #[test]
    fn overflow_evicts_oldest_selection() {
        let mut field = MultiSelectField::new("Interests", interests()).with_max(2);
        field.toggle_value("tech");
        field.toggle_value("science");
        field.toggle_value("art");
        // FIFO replacement: the first-selected entry is evicted.
        assert_eq!(field.values(), &["science", "art"]);
    }

    #[test]
    fn selection_never_exceeds_max() {
        let mut field = MultiSelectField::new("Interests", interests()).with_max(2);
        for v in ["tech", "science", "art", "tech", "science"] {
            field.toggle_value(v);
        }
        assert!(field.values().len() <= 2);
    }

    #[test]
    fn keyboard_toggle_keeps_list_open() {
        let mut field = MultiSelectField::new("Interests", interests());
        press(&mut field, KeyCode::Enter);
        assert!(field.is_open());

        press(&mut field, KeyCode::Enter);
        assert!(field.is_open());
        assert_eq!(field.values(), &["tech"]);

        press(&mut field, KeyCode::Esc);
        assert!(!field.is_open());
    }

    #[test]
    fn tag_removal_and_clear_all() {
        let mut field = MultiSelectField::new("Interests", interests());
        field.toggle_value("tech");
        field.toggle_value("science");
        field.toggle_value("art");

        press(&mut field, KeyCode::Right);
        press(&mut field, KeyCode::Backspace);
        assert_eq!(field.values(), &["tech", "art"]);

        field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(field.values().is_empty());
    }

    #[test]
    fn search_filters_and_toggle_targets_filtered_row() {
        let mut field = MultiSelectField::new("Interests", interests());
        press(&mut field, KeyCode::Enter);
        for c in "sci".chars() {
            press(&mut field, KeyCode::Char(c));
        }
        assert_eq!(field.filtered(), &[1]);

        press(&mut field, KeyCode::Enter);
        assert_eq!(field.values(), &["science"]);
    }

    #[test]
    fn with_values_clamps_to_max() {
        let field = MultiSelectField::new("Interests", interests())
            .with_max(2)
            .with_values(vec!["tech".into(), "science".into(), "art".into()]);
        assert_eq!(field.values(), &["science", "art"]);
    }
}
