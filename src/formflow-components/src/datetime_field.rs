//! Date/time field with a calendar popover.
//!
//! The popover's open state is independent of the value. Picking a
//! calendar date preserves the hour/minute of an existing value (and
//! zeroes them otherwise), and always closes the popover. A separate
//! `HH:MM` entry, shown only when time display is enabled and a value
//! exists, rewrites the time of day while leaving the date untouched.
//!
//! The field never seeds a value on its own: the caller decides the
//! default and passes it explicitly, so an absent value stays absent
//! until the user picks one.

use crate::borders::FieldBorder;
use crate::chrome::FieldChrome;
use crate::component::{Component, ComponentResult, FocusState};
use crate::line_edit::LineEdit;
use crate::style::{ACCENT, SURFACE_1, SURFACE_2, TEXT, TEXT_DIM, TEXT_MUTED, VOID};
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formflow_common::{apply_time, parse_hhmm, with_time_of};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

/// Calendar popover height: borders + month header + weekday row + 6 weeks.
const CALENDAR_HEIGHT: u16 = 10;

/// Which row of the closed control has sub-focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Date,
    Time,
}

/// A date (and optional time-of-day) selector.
pub struct DateTimeField {
    chrome: FieldChrome,
    value: Option<NaiveDateTime>,
    show_time: bool,
    open: bool,
    /// Calendar cursor while the popover is open.
    cursor: NaiveDate,
    /// Month the calendar opens on when there is no value yet.
    anchor: NaiveDate,
    part: Part,
    time_edit: LineEdit,
    focused: bool,
}

impl DateTimeField {
    /// Create a date/time field.
    ///
    /// `anchor` is the month the calendar opens on while no value is
    /// set; it never becomes the value by itself.
    pub fn new(label: impl Into<String>, anchor: NaiveDate) -> Self {
        Self {
            chrome: FieldChrome::new(label),
            value: None,
            show_time: true,
            open: false,
            cursor: anchor,
            anchor,
            part: Part::Date,
            time_edit: LineEdit::new().with_placeholder("HH:MM"),
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

    /// Show or hide the time entry (default shown).
    pub fn show_time(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: NaiveDateTime) -> Self {
        self.set_value(Some(value));
        self
    }

    /// Set or clear the externally supplied error.
    pub fn set_external_error(&mut self, error: Option<String>) {
        self.chrome.set_external_error(error);
    }

    /// The current value.
    pub fn value(&self) -> Option<NaiveDateTime> {
        self.value
    }

    /// The field's label.
    pub fn label(&self) -> &str {
        self.chrome.label()
    }

    /// Whether the calendar popover is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    fn set_value(&mut self, value: Option<NaiveDateTime>) {
        self.value = value;
        match value {
            Some(v) => self
                .time_edit
                .set_value(format!("{:02}:{:02}", v.hour(), v.minute())),
            None => self.time_edit.clear(),
        }
    }

    fn time_row_shown(&self) -> bool {
        self.show_time && self.value.is_some()
    }

    fn open_calendar(&mut self) {
        self.cursor = self.value.map(|v| v.date()).unwrap_or(self.anchor);
        self.open = true;
    }

    /// Pick the cursor date: keep the time of day of an existing value,
    /// zero it otherwise. Always closes the popover.
    fn pick_cursor(&mut self) {
        let picked = with_time_of(self.cursor, self.value);
        self.set_value(Some(picked));
        self.open = false;
    }

    fn move_cursor_days(&mut self, days: i64) {
        if let Some(next) = self
            .cursor
            .checked_add_signed(chrono::Duration::days(days))
        {
            self.cursor = next;
        }
    }

    fn move_cursor_months(&mut self, forward: bool) {
        let next = if forward {
            self.cursor.checked_add_months(Months::new(1))
        } else {
            self.cursor.checked_sub_months(Months::new(1))
        };
        if let Some(next) = next {
            self.cursor = next;
        }
    }

    /// Re-apply the edited time to the value, leaving the date intact.
    fn apply_time_edit(&mut self) {
        if let Some(value) = self.value {
            let (hours, minutes) = parse_hhmm(self.time_edit.value());
            self.value = Some(apply_time(value, hours, minutes));
        }
    }

    fn handle_time_key(&mut self, key: KeyEvent) -> ComponentResult<()> {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == ':' => {
                self.time_edit.insert(c);
                self.apply_time_edit();
                ComponentResult::Handled
            }
            KeyCode::Backspace => {
                self.time_edit.backspace();
                self.apply_time_edit();
                ComponentResult::Handled
            }
            KeyCode::Delete => {
                self.time_edit.delete();
                self.apply_time_edit();
                ComponentResult::Handled
            }
            KeyCode::Left => {
                self.time_edit.move_left();
                ComponentResult::Handled
            }
            KeyCode::Right => {
                self.time_edit.move_right();
                ComponentResult::Handled
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.time_edit.clear();
                self.apply_time_edit();
                ComponentResult::Handled
            }
            _ => ComponentResult::NotHandled,
        }
    }

    fn render_date_row(&self, area: Rect, buf: &mut Buffer) {
        for x in area.x..area.right() {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_bg(SURFACE_1);
            }
        }

        let on_date = self.focused && self.part == Part::Date;
        let glyph_style = if on_date {
            Style::default().fg(ACCENT).bg(SURFACE_1)
        } else {
            Style::default().fg(TEXT_DIM).bg(SURFACE_1)
        };
        buf.set_string(area.x + 1, area.y, "📅", glyph_style);

        let (text, style) = match self.value {
            Some(v) => (
                v.format("%b %-d, %Y").to_string(),
                Style::default().fg(TEXT).bg(SURFACE_1),
            ),
            None => (
                "Select date".to_string(),
                Style::default().fg(TEXT_MUTED).bg(SURFACE_1),
            ),
        };
        buf.set_string(area.x + 4, area.y, &text, style);
    }

    fn render_time_row(&self, area: Rect, buf: &mut Buffer) {
        buf.set_string(area.x + 1, area.y, "⏱", Style::default().fg(TEXT_DIM));
        let edit_area = Rect::new(area.x + 4, area.y, 6, 1);
        self.time_edit
            .render(edit_area, buf, self.focused && self.part == Part::Time);
    }

    fn render_calendar(&self, area: Rect, buf: &mut Buffer) {
        let block = FieldBorder::new().focused(true).to_block();
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 8 {
            return;
        }

        let title = self.cursor.format("%B %Y").to_string();
        let title_x = inner.x + (inner.width.saturating_sub(title.len() as u16)) / 2;
        buf.set_string(
            title_x,
            inner.y,
            &title,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        );

        let weekdays = "Mo Tu We Th Fr Sa Su";
        buf.set_string(
            inner.x + 1,
            inner.y + 1,
            weekdays,
            Style::default().fg(TEXT_DIM),
        );

        let first = self
            .cursor
            .with_day(1)
            .expect("day 1 exists in every month");
        let offset = first.weekday().num_days_from_monday() as u16;
        let days = days_in_month(self.cursor.year(), self.cursor.month());

        for day in 1..=days {
            let slot = offset + day as u16 - 1;
            let row = slot / 7;
            let col = slot % 7;
            let x = inner.x + 1 + col * 3;
            let y = inner.y + 2 + row;
            if y >= inner.bottom() {
                break;
            }

            let is_cursor = day == self.cursor.day();
            let is_selected = self
                .value
                .is_some_and(|v| v.date() == date_of(self.cursor, day));

            let style = if is_cursor {
                Style::default()
                    .fg(VOID)
                    .bg(ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else if is_selected {
                Style::default().fg(ACCENT).bg(SURFACE_2)
            } else {
                Style::default().fg(TEXT)
            };
            buf.set_string(x, y, format!("{day:2}"), style);
        }
    }
}

/// Number of days in a month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// The date in `month_of`'s month with the given day.
fn date_of(month_of: NaiveDate, day: u32) -> NaiveDate {
    month_of.with_day(day).unwrap_or(month_of)
}

impl Component for DateTimeField {
    type Output = ();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let control = self.chrome.render(area, buf, self.focused);
        if control.height == 0 {
            return;
        }

        let date_row = Rect::new(control.x, control.y, control.width, 1);
        self.render_date_row(date_row, buf);

        if self.open {
            let cal_area = Rect::new(
                control.x,
                control.y + 1,
                control.width.min(24),
                CALENDAR_HEIGHT.min(control.height.saturating_sub(1)),
            );
            self.render_calendar(cal_area, buf);
        } else if self.time_row_shown() && control.height > 1 {
            let time_row = Rect::new(control.x, control.y + 1, control.width, 1);
            self.render_time_row(time_row, buf);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<()> {
        if self.open {
            return match key.code {
                KeyCode::Left => {
                    self.move_cursor_days(-1);
                    ComponentResult::Handled
                }
                KeyCode::Right => {
                    self.move_cursor_days(1);
                    ComponentResult::Handled
                }
                KeyCode::Up => {
                    self.move_cursor_days(-7);
                    ComponentResult::Handled
                }
                KeyCode::Down => {
                    self.move_cursor_days(7);
                    ComponentResult::Handled
                }
                KeyCode::PageUp => {
                    self.move_cursor_months(false);
                    ComponentResult::Handled
                }
                KeyCode::PageDown => {
                    self.move_cursor_months(true);
                    ComponentResult::Handled
                }
                KeyCode::Enter => {
                    self.pick_cursor();
                    ComponentResult::Handled
                }
                KeyCode::Esc => {
                    self.open = false;
                    ComponentResult::Handled
                }
                _ => ComponentResult::NotHandled,
            };
        }

        match self.part {
            Part::Date => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open_calendar();
                    ComponentResult::Handled
                }
                KeyCode::Down if self.time_row_shown() => {
                    self.part = Part::Time;
                    ComponentResult::Handled
                }
                _ => ComponentResult::NotHandled,
            },
            Part::Time => match key.code {
                KeyCode::Up => {
                    self.part = Part::Date;
                    ComponentResult::Handled
                }
                _ => self.handle_time_key(key),
            },
        }
    }

    fn focus_state(&self) -> FocusState {
        if !self.focused {
            FocusState::Unfocused
        } else if self.open || self.part == Part::Time {
            FocusState::Editing
        } else {
            FocusState::Focused
        }
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.open = false;
            self.part = Part::Date;
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.open {
            vec![
                ("←↑↓→", "Move"),
                ("PgUp/PgDn", "Month"),
                ("Enter", "Pick"),
                ("Esc", "Dismiss"),
            ]
        } else if self.part == Part::Time {
            vec![("Type", "Edit time"), ("↑", "To date")]
        } else {
            vec![("Enter", "Open calendar"), ("↓", "To time")]
        }
    }

    fn desired_height(&self, _width: u16) -> u16 {
        if self.open {
            self.chrome.height(1 + CALENDAR_HEIGHT)
        } else {
            self.chrome.height(1 + u16::from(self.time_row_shown()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").expect("valid datetime")
    }

    fn press(field: &mut DateTimeField, code: KeyCode) {
        field.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn value_stays_absent_until_picked() {
        let field = DateTimeField::new("Appointment", date(2024, 1, 1));
        assert_eq!(field.value(), None);
    }

    #[test]
    fn picking_zeroes_time_when_no_prior_value() {
        let mut field = DateTimeField::new("Appointment", date(2024, 1, 1));
        press(&mut field, KeyCode::Enter); // open
        press(&mut field, KeyCode::Enter); // pick the anchor day
        assert_eq!(field.value(), Some(dt("2024-01-01T00:00")));
        assert!(!field.is_open());
    }

    #[test]
    fn picking_preserves_existing_time_and_always_closes() {
        let mut field =
            DateTimeField::new("Appointment", date(2024, 1, 1)).with_value(dt("2024-01-01T10:30"));
        press(&mut field, KeyCode::Enter); // open on Jan 1
        press(&mut field, KeyCode::PageDown); // Feb 1
        press(&mut field, KeyCode::Right); // Feb 2
        press(&mut field, KeyCode::Enter); // pick
        assert_eq!(field.value(), Some(dt("2024-02-02T10:30")));
        assert!(!field.is_open());
    }

    #[test]
    fn time_entry_rewrites_time_but_never_the_date() {
        let mut field =
            DateTimeField::new("Appointment", date(2024, 1, 1)).with_value(dt("2024-01-01T10:30"));

        // Pick a new date first.
        press(&mut field, KeyCode::Enter);
        press(&mut field, KeyCode::PageDown);
        press(&mut field, KeyCode::Right);
        press(&mut field, KeyCode::Enter);

        // Switch to the time row and retype the time.
        press(&mut field, KeyCode::Down);
        field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        for c in "14:05".chars() {
            press(&mut field, KeyCode::Char(c));
        }
        assert_eq!(field.value(), Some(dt("2024-02-02T14:05")));
    }

    #[test]
    fn malformed_time_defaults_components_to_zero() {
        let mut field =
            DateTimeField::new("Appointment", date(2024, 1, 1)).with_value(dt("2024-01-01T10:30"));
        press(&mut field, KeyCode::Down);
        field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(field.value(), Some(dt("2024-01-01T00:00")));

        for c in "14".chars() {
            press(&mut field, KeyCode::Char(c));
        }
        assert_eq!(field.value(), Some(dt("2024-01-01T14:00")));
    }

    #[test]
    fn escape_dismisses_without_picking() {
        let mut field = DateTimeField::new("Appointment", date(2024, 1, 1));
        press(&mut field, KeyCode::Enter);
        press(&mut field, KeyCode::Right);
        press(&mut field, KeyCode::Esc);
        assert_eq!(field.value(), None);
        assert!(!field.is_open());
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn time_row_hidden_without_value_or_show_time() {
        let field = DateTimeField::new("Appointment", date(2024, 1, 1));
        assert!(!field.time_row_shown());

        let field = DateTimeField::new("Appointment", date(2024, 1, 1))
            .show_time(false)
            .with_value(dt("2024-01-01T10:30"));
        assert!(!field.time_row_shown());
    }
}
