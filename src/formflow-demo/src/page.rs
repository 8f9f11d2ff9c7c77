//! The demo form page.
//!
//! The page owns every field widget and the authoritative value of
//! every field. Keys are routed to the focused widget first; whatever
//! the widget reports is then pulled back into [`FormValues`], so the
//! page always holds the latest state. Submission assembles a JSON
//! payload from those values on demand.

use chrono::{NaiveDate, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formflow_common::{FileDescriptor, SelectOption};
use formflow_components::prelude::*;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use serde_json::{Value, json};

use crate::config::DemoConfig;
use formflow_components::style::{ACCENT, ERROR, SUCCESS, TEXT_DIM, VOID};

/// Number of field widgets on the page (the submit button is one more
/// focus slot).
const FIELD_COUNT: usize = 11;

/// Blank rows between stacked fields.
const FIELD_GAP: u16 = 1;

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// Keep running
    Continue,
    /// The form was submitted
    Submitted,
    /// The user asked to leave
    Quit,
}

/// The authoritative value of every field, re-read from the widgets
/// after each dispatched event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub website: String,
    pub age: Option<i64>,
    pub appointment: Option<NaiveDateTime>,
    pub country: Option<String>,
    pub notifications: bool,
    pub interests: Vec<String>,
    pub document: Option<FileDescriptor>,
    pub gallery: Vec<FileDescriptor>,
    pub description: String,
}

/// Submission status shown under the submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Ok(String),
    Blocked(String),
}

/// The whole demo form.
pub struct FormPage {
    name: TextField,
    email: TextField,
    website: TextField,
    age: NumberField,
    appointment: DateTimeField,
    country: SelectField,
    notifications: BooleanField,
    interests: MultiSelectField,
    document: FileField,
    gallery: MultiFileField,
    description: EditorField,
    focus: FocusRing,
    values: FormValues,
    status: Option<Status>,
    last_payload: Option<Value>,
    scroll: u16,
}

fn country_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("us", "United States"),
        SelectOption::new("ca", "Canada"),
        SelectOption::new("uk", "United Kingdom"),
        SelectOption::new("au", "Australia"),
        SelectOption::new("de", "Germany"),
        SelectOption::new("fr", "France"),
        SelectOption::new("jp", "Japan"),
        SelectOption::new("cn", "China"),
        SelectOption::new("in", "India"),
        SelectOption::new("br", "Brazil"),
    ]
}

fn interest_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("tech", "Technology"),
        SelectOption::new("science", "Science"),
        SelectOption::new("art", "Art"),
        SelectOption::new("sports", "Sports"),
        SelectOption::new("music", "Music"),
        SelectOption::new("travel", "Travel"),
        SelectOption::new("food", "Food & Cooking"),
        SelectOption::new("health", "Health & Fitness"),
        SelectOption::new("finance", "Finance"),
        SelectOption::new("education", "Education"),
    ]
}

impl FormPage {
    /// Build the page. `today` anchors the appointment calendar; the
    /// appointment value itself stays absent until the user picks one.
    pub fn new(config: &DemoConfig, today: NaiveDate) -> Self {
        let mut page = Self {
            name: TextField::text("Full Name")
                .required()
                .with_placeholder("Enter your full name")
                .with_description("Please enter your first and last name.")
                .with_pattern("^[a-zA-Z]+(?: [a-zA-Z]+)+$"),
            email: TextField::email("Email Address")
                .required()
                .with_placeholder("your.email@example.com")
                .with_description("We'll never share your email with anyone else."),
            website: TextField::url("Website")
                .with_placeholder("https://yourwebsite.com")
                .with_description("Your company or personal website URL."),
            age: NumberField::new("Age")
                .with_placeholder("Enter your age")
                .with_min(18.0)
                .with_max(120.0)
                .with_description("You must be at least 18 years old."),
            appointment: DateTimeField::new("Appointment Date & Time", today)
                .show_time(config.show_time)
                .with_description("When would you like to schedule your appointment?"),
            country: SelectField::new("Country", country_options())
                .required()
                .with_placeholder("Select your country")
                .with_description("Please select the country where you currently reside."),
            notifications: BooleanField::new("Enable Notifications")
                .with_variant(BooleanVariant::Switch)
                .with_description("Receive updates about your account and new features."),
            interests: MultiSelectField::new("Interests", interest_options())
                .with_placeholder("Select your interests")
                .with_description("Choose up to 5 topics you're interested in.")
                .with_max(config.interests_max),
            document: FileField::new("Profile Document")
                .with_accept(&config.document_accept)
                .with_max_size_mb(config.upload_max_mb)
                .with_description("Please upload your CV or resume (PDF or Word document only)."),
            gallery: MultiFileField::new("Image Gallery")
                .with_accept(&config.gallery_accept)
                .with_max_size_mb(config.upload_max_mb)
                .with_max_files(config.gallery_max_files)
                .with_description("Upload up to 5 images (JPG, PNG, or GIF)."),
            description: EditorField::new("Description")
                .with_placeholder("Describe yourself...")
                .with_description("Use the toolbar to format your text."),
            focus: FocusRing::new(FIELD_COUNT + 1),
            values: FormValues::default(),
            status: None,
            last_payload: None,
            scroll: 0,
        };
        page.set_field_focus(0, true);
        page
    }

    /// The authoritative values.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// The payload of the most recent successful submission.
    pub fn last_payload(&self) -> Option<&Value> {
        self.last_payload.as_ref()
    }

    /// Whether every required field has a value.
    pub fn can_submit(&self) -> bool {
        !self.values.name.trim().is_empty()
            && !self.values.email.trim().is_empty()
            && self.values.country.is_some()
    }

    /// Key hints for the focused slot.
    pub fn hints(&self) -> Vec<(&'static str, &'static str)> {
        let mut hints = if self.focus.current() < FIELD_COUNT {
            self.field_hints(self.focus.current())
        } else {
            vec![("Enter", "Submit")]
        };
        hints.push(("Tab", "Next field"));
        hints.push(("Ctrl+C", "Quit"));
        hints
    }

    /// Route one key event through the page.
    pub fn handle_key(&mut self, key: KeyEvent) -> PageEvent {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return PageEvent::Quit;
        }

        let idx = self.focus.current();

        // The focused widget gets the key first.
        if idx < FIELD_COUNT {
            let result = self.route_key(idx, key);
            if result.is_handled() {
                self.sync();
                return PageEvent::Continue;
            }
        } else if key.code == KeyCode::Enter {
            return self.try_submit();
        }

        // The widget passed: page-level navigation.
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_to(next_slot(idx));
                PageEvent::Continue
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_to(prev_slot(idx));
                PageEvent::Continue
            }
            // Enter on a field that does not use it advances, like a
            // browser form.
            KeyCode::Enter => {
                self.focus_to(next_slot(idx));
                PageEvent::Continue
            }
            KeyCode::Esc => PageEvent::Quit,
            _ => PageEvent::Continue,
        }
    }

    /// Route pasted text to the focused widget.
    pub fn handle_paste(&mut self, text: &str) {
        let idx = self.focus.current();
        if idx < FIELD_COUNT {
            self.route_paste(idx, text);
            self.sync();
        }
    }

    fn try_submit(&mut self) -> PageEvent {
        self.sync();
        if !self.can_submit() {
            self.status = Some(Status::Blocked(
                "Please fill in the required fields first.".to_string(),
            ));
            return PageEvent::Continue;
        }

        let payload = self.payload();
        tracing::info!(%payload, "form submitted");
        self.last_payload = Some(payload);
        self.status = Some(Status::Ok(
            "Form submitted successfully! Your data has been received.".to_string(),
        ));
        PageEvent::Submitted
    }

    /// Assemble the submission payload from the authoritative values.
    pub fn payload(&self) -> Value {
        json!({
            "name": self.values.name,
            "email": self.values.email,
            "website": self.values.website,
            "age": self.values.age,
            "appointment": self.values.appointment.map(|v| v.format("%Y-%m-%dT%H:%M").to_string()),
            "country": self.values.country,
            "notifications": self.values.notifications,
            "interests": self.values.interests,
            "document": self.values.document,
            "gallery": self.values.gallery,
            "description": self.values.description,
        })
    }

    /// Pull the widgets' current values into the page's copy.
    fn sync(&mut self) {
        self.values = FormValues {
            name: self.name.value().to_string(),
            email: self.email.value().to_string(),
            website: self.website.value().to_string(),
            age: self.age.value().map(|v| v as i64),
            appointment: self.appointment.value(),
            country: self.country.value().map(str::to_string),
            notifications: self.notifications.value(),
            interests: self.interests.values().to_vec(),
            document: self.document.value().cloned(),
            gallery: self
                .gallery
                .accepted()
                .into_iter()
                .cloned()
                .collect(),
            description: self.description.serialized(),
        };
    }

    fn focus_to(&mut self, idx: usize) {
        let old = self.focus.current();
        if old < FIELD_COUNT {
            self.set_field_focus(old, false);
        }
        self.focus.set(idx);
        if idx < FIELD_COUNT {
            self.set_field_focus(idx, true);
        }
    }

    fn route_key(&mut self, idx: usize, key: KeyEvent) -> ComponentResult<()> {
        match idx {
            0 => self.name.handle_key(key),
            1 => self.email.handle_key(key),
            2 => self.website.handle_key(key),
            3 => self.age.handle_key(key),
            4 => self.appointment.handle_key(key),
            5 => self.country.handle_key(key),
            6 => self.notifications.handle_key(key),
            7 => self.interests.handle_key(key),
            8 => self.document.handle_key(key),
            9 => self.gallery.handle_key(key),
            10 => self.description.handle_key(key),
            _ => ComponentResult::NotHandled,
        }
    }

    fn route_paste(&mut self, idx: usize, text: &str) {
        match idx {
            0 => {
                self.name.handle_paste(text);
            }
            1 => {
                self.email.handle_paste(text);
            }
            2 => {
                self.website.handle_paste(text);
            }
            3 => {
                self.age.handle_paste(text);
            }
            8 => {
                self.document.handle_paste(text);
            }
            9 => {
                self.gallery.handle_paste(text);
            }
            10 => {
                self.description.handle_paste(text);
            }
            _ => {}
        }
    }

    fn set_field_focus(&mut self, idx: usize, focused: bool) {
        match idx {
            0 => self.name.set_focus(focused),
            1 => self.email.set_focus(focused),
            2 => self.website.set_focus(focused),
            3 => self.age.set_focus(focused),
            4 => self.appointment.set_focus(focused),
            5 => self.country.set_focus(focused),
            6 => self.notifications.set_focus(focused),
            7 => self.interests.set_focus(focused),
            8 => self.document.set_focus(focused),
            9 => self.gallery.set_focus(focused),
            10 => self.description.set_focus(focused),
            _ => {}
        }
    }

    fn field_height(&self, idx: usize, width: u16) -> u16 {
        match idx {
            0 => self.name.desired_height(width),
            1 => self.email.desired_height(width),
            2 => self.website.desired_height(width),
            3 => self.age.desired_height(width),
            4 => self.appointment.desired_height(width),
            5 => self.country.desired_height(width),
            6 => self.notifications.desired_height(width),
            7 => self.interests.desired_height(width),
            8 => self.document.desired_height(width),
            9 => self.gallery.desired_height(width),
            10 => self.description.desired_height(width),
            _ => 0,
        }
    }

    fn render_field(&self, idx: usize, area: Rect, buf: &mut Buffer) {
        match idx {
            0 => self.name.render(area, buf),
            1 => self.email.render(area, buf),
            2 => self.website.render(area, buf),
            3 => self.age.render(area, buf),
            4 => self.appointment.render(area, buf),
            5 => self.country.render(area, buf),
            6 => self.notifications.render(area, buf),
            7 => self.interests.render(area, buf),
            8 => self.document.render(area, buf),
            9 => self.gallery.render(area, buf),
            10 => self.description.render(area, buf),
            _ => {}
        }
    }

    fn field_hints(&self, idx: usize) -> Vec<(&'static str, &'static str)> {
        match idx {
            0 => self.name.key_hints(),
            1 => self.email.key_hints(),
            2 => self.website.key_hints(),
            3 => self.age.key_hints(),
            4 => self.appointment.key_hints(),
            5 => self.country.key_hints(),
            6 => self.notifications.key_hints(),
            7 => self.interests.key_hints(),
            8 => self.document.key_hints(),
            9 => self.gallery.key_hints(),
            10 => self.description.key_hints(),
            _ => Vec::new(),
        }
    }

    /// Render the scrollable field stack plus the submit button.
    pub fn render_body(&mut self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let heights: Vec<u16> = (0..FIELD_COUNT)
            .map(|i| self.field_height(i, area.width))
            .collect();
        let submit_rows: u16 = 3;
        let total: u16 = heights.iter().map(|h| h + FIELD_GAP).sum::<u16>() + submit_rows;

        // Keep the focused slot on screen.
        let mut y_cursor = 0u16;
        let mut focus_range = (total.saturating_sub(submit_rows), total);
        for (i, h) in heights.iter().enumerate() {
            if i == self.focus.current() {
                focus_range = (y_cursor, y_cursor + h);
            }
            y_cursor += h + FIELD_GAP;
        }
        let viewport = area.height;
        if focus_range.0 < self.scroll {
            self.scroll = focus_range.0;
        } else if focus_range.1 > self.scroll + viewport {
            self.scroll = focus_range.1.saturating_sub(viewport);
        }
        self.scroll = self.scroll.min(total.saturating_sub(viewport.min(total)));

        // Render everything into a tall buffer, then blit the viewport.
        let mut tall = Buffer::empty(Rect::new(0, 0, area.width, total));
        let mut y = 0u16;
        for (i, h) in heights.iter().enumerate() {
            self.render_field(i, Rect::new(0, y, area.width, *h), &mut tall);
            y += h + FIELD_GAP;
        }
        self.render_submit(Rect::new(0, y, area.width, submit_rows), &mut tall);

        for row in 0..viewport.min(total.saturating_sub(self.scroll)) {
            for col in 0..area.width {
                buf[(area.x + col, area.y + row)] = tall[(col, self.scroll + row)].clone();
            }
        }
    }

    fn render_submit(&self, area: Rect, buf: &mut Buffer) {
        let label = "[ Submit Form ]";
        let x = area.x + (area.width.saturating_sub(label.len() as u16)) / 2;
        let focused = self.focus.current() == FIELD_COUNT;
        let style = if focused && self.can_submit() {
            Style::default()
                .fg(VOID)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else if focused {
            Style::default().fg(VOID).bg(TEXT_DIM)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        buf.set_string(x, area.y, label, style);

        if let Some(status) = &self.status
            && area.height > 2
        {
            let (text, color) = match status {
                Status::Ok(text) => (text.as_str(), SUCCESS),
                Status::Blocked(text) => (text.as_str(), ERROR),
            };
            let x = area.x + (area.width.saturating_sub(text.len() as u16)) / 2;
            buf.set_string(x, area.y + 2, text, Style::default().fg(color));
        }
    }
}

/// Next focus slot, wrapping past the submit button.
fn next_slot(idx: usize) -> usize {
    (idx + 1) % (FIELD_COUNT + 1)
}

/// Previous focus slot, wrapping.
fn prev_slot(idx: usize) -> usize {
    idx.checked_sub(1).unwrap_or(FIELD_COUNT)
}
