//! Single-file intake field.
//!
//! The user enters a path and offers it with Enter. Every candidate
//! runs through the intake pipeline (size check, then type check); a
//! rejection becomes the field-local error and the value is untouched.
//! Acceptance replaces any previously held file - single-file
//! semantics: at most one file at a time - and derives a transient
//! preview for images. Removing the file clears the value, the error
//! and the preview, and resets the path input so the same file can be
//! offered again.

use std::path::Path;

use crate::chrome::FieldChrome;
use crate::component::{Component, ComponentResult, FocusState};
use crate::line_edit::LineEdit;
use crate::style::{SURFACE_1, TEXT, TEXT_DIM, TEXT_MUTED};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formflow_common::{FileDescriptor, IntakePolicy, PreviewHandle, format_size};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// A single-file upload control.
pub struct FileField {
    chrome: FieldChrome,
    policy: IntakePolicy,
    edit: LineEdit,
    value: Option<FileDescriptor>,
    preview: Option<PreviewHandle>,
    focused: bool,
}

impl FileField {
    /// Create a file field with the default policy (any type, 5 MB).
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            chrome: FieldChrome::new(label),
            policy: IntakePolicy::default(),
            edit: LineEdit::new().with_placeholder("Enter a file path and press Enter"),
            value: None,
            preview: None,
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

    /// Set the accepted-type specifier list (comma separated).
    pub fn with_accept(mut self, accept: &str) -> Self {
        self.policy = IntakePolicy::new(accept, self.policy.max_size_mb());
        self
    }

    /// Set the maximum size in megabytes.
    pub fn with_max_size_mb(mut self, max_size_mb: u32) -> Self {
        self.policy = IntakePolicy::from_parts(self.policy.accept().to_vec(), max_size_mb);
        self
    }

    /// Set or clear the externally supplied error.
    pub fn set_external_error(&mut self, error: Option<String>) {
        self.chrome.set_external_error(error);
    }

    /// The accepted file, if any.
    pub fn value(&self) -> Option<&FileDescriptor> {
        self.value.as_ref()
    }

    /// The preview handle for an accepted image, if any.
    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    /// The field's label.
    pub fn label(&self) -> &str {
        self.chrome.label()
    }

    /// Offer a candidate file descriptor to the field.
    ///
    /// Returns true when the file was accepted.
    pub fn offer(&mut self, file: FileDescriptor) -> bool {
        match self.policy.evaluate(&file) {
            Err(err) => {
                self.chrome.set_local_error(Some(err.to_string()));
                false
            }
            Ok(()) => {
                // Superseding releases the previous preview exactly once.
                self.preview = None;
                if file.is_image()
                    && let Some(path) = &file.path
                {
                    match PreviewHandle::load(path) {
                        Ok(preview) => self.preview = Some(preview),
                        Err(err) => {
                            tracing::warn!(path = %path.display(), %err, "preview load failed");
                        }
                    }
                }
                self.value = Some(file);
                self.chrome.set_local_error(None);
                self.edit.clear();
                true
            }
        }
    }

    /// Offer the file at a path, reading its metadata from disk.
    pub fn offer_path(&mut self, path: &Path) -> bool {
        match FileDescriptor::from_path(path) {
            Ok(file) => self.offer(file),
            Err(err) => {
                self.chrome
                    .set_local_error(Some(format!("Could not read file: {err}")));
                false
            }
        }
    }

    /// Remove the current file, clearing value, error and preview, and
    /// resetting the path input.
    pub fn remove(&mut self) {
        self.value = None;
        self.preview = None;
        self.chrome.set_local_error(None);
        self.edit.clear();
    }
}

impl Component for FileField {
    type Output = ();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let control = self.chrome.render(area, buf, self.focused);
        if control.height == 0 {
            return;
        }

        match &self.value {
            None => {
                self.edit.render(
                    Rect::new(control.x, control.y, control.width, 1),
                    buf,
                    self.focused,
                );
                if control.height > 1 {
                    let caption = format!(
                        "Any file up to {}MB",
                        self.policy.max_size_mb()
                    );
                    buf.set_string(
                        control.x,
                        control.y + 1,
                        &caption,
                        Style::default().fg(TEXT_MUTED),
                    );
                }
            }
            Some(file) => {
                for x in control.x..control.right() {
                    if let Some(cell) = buf.cell_mut((x, control.y)) {
                        cell.set_bg(SURFACE_1);
                    }
                }
                let glyph = if file.is_image() { "▣" } else { "▢" };
                buf.set_string(
                    control.x + 1,
                    control.y,
                    glyph,
                    Style::default().fg(TEXT_DIM).bg(SURFACE_1),
                );
                buf.set_string(
                    control.x + 3,
                    control.y,
                    &file.name,
                    Style::default().fg(TEXT).bg(SURFACE_1),
                );
                let size = format_size(file.size_bytes);
                let x = control
                    .right()
                    .saturating_sub(size.len() as u16 + 5);
                buf.set_string(
                    x,
                    control.y,
                    &size,
                    Style::default().fg(TEXT_DIM).bg(SURFACE_1),
                );
                buf.set_string(
                    control.right().saturating_sub(3),
                    control.y,
                    "✕",
                    Style::default().fg(TEXT_MUTED).bg(SURFACE_1),
                );
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<()> {
        if self.value.is_some() {
            return match key.code {
                KeyCode::Backspace | KeyCode::Delete => {
                    self.remove();
                    ComponentResult::Handled
                }
                _ => ComponentResult::NotHandled,
            };
        }

        match key.code {
            KeyCode::Enter if !self.edit.is_empty() => {
                let path = self.edit.value().trim().to_string();
                self.offer_path(Path::new(&path));
                ComponentResult::Handled
            }
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.edit.insert(c);
                ComponentResult::Handled
            }
            KeyCode::Backspace => {
                self.edit.backspace();
                ComponentResult::Handled
            }
            KeyCode::Delete => {
                self.edit.delete();
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
            KeyCode::Home => {
                self.edit.move_home();
                ComponentResult::Handled
            }
            KeyCode::End => {
                self.edit.move_end();
                ComponentResult::Handled
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit.clear();
                ComponentResult::Handled
            }
            _ => ComponentResult::NotHandled,
        }
    }

    fn focus_state(&self) -> FocusState {
        if !self.focused {
            FocusState::Unfocused
        } else if self.value.is_none() {
            FocusState::Editing
        } else {
            FocusState::Focused
        }
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.value.is_some() {
            vec![("Backspace", "Remove file")]
        } else {
            vec![("Type", "Path"), ("Enter", "Attach")]
        }
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        if self.value.is_none() {
            self.edit.insert_str(text.trim());
        }
        true
    }

    fn desired_height(&self, _width: u16) -> u16 {
        let control = if self.value.is_none() { 2 } else { 1 };
        self.chrome.height(control)
    }
}
