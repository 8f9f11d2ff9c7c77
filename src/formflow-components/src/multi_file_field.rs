//! Multi-file intake field.
//!
//! A batch of candidates is first truncated to the remaining capacity
//! (excess files at the tail are dropped silently), then each file is
//! validated independently: files that fail validation stay in the
//! list with their error inline, unlike the single-file path which
//! rejects outright. Accepted files whose name collides with a file
//! already in the set are dropped as duplicates - note the caveat:
//! uniqueness is keyed by name only, so two distinct files with the
//! same name collide. Each accepted image carries its own preview
//! handle, released when that entry is removed.

use std::path::Path;

use crate::chrome::FieldChrome;
use crate::component::{Component, ComponentResult, FocusState};
use crate::line_edit::LineEdit;
use crate::style::{ACCENT, ERROR, SURFACE_1, TEXT, TEXT_DIM, TEXT_MUTED};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formflow_common::{FileDescriptor, IntakeError, IntakePolicy, PreviewHandle, format_size};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// One listed file: accepted, or displayed with its validation error.
#[derive(Debug)]
pub struct FileEntry {
    /// The file's descriptor
    pub descriptor: FileDescriptor,
    /// The validation error, when the file failed intake
    pub error: Option<IntakeError>,
    /// Preview handle for accepted images
    preview: Option<PreviewHandle>,
}

impl FileEntry {
    /// Whether this entry counts toward the accepted set.
    pub fn is_accepted(&self) -> bool {
        self.error.is_none()
    }

    /// The entry's preview handle, if one was derived.
    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }
}

/// Where input goes inside the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// A listed entry (for removal)
    Entry(usize),
    /// The path input
    Input,
}

/// A multi-file upload control.
pub struct MultiFileField {
    chrome: FieldChrome,
    policy: IntakePolicy,
    max_files: usize,
    entries: Vec<FileEntry>,
    edit: LineEdit,
    slot: Slot,
    focused: bool,
}

impl MultiFileField {
    /// Default maximum number of files.
    pub const DEFAULT_MAX_FILES: usize = 5;

    /// Create a multi-file field with the default policy.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            chrome: FieldChrome::new(label),
            policy: IntakePolicy::default(),
            max_files: Self::DEFAULT_MAX_FILES,
            entries: Vec::new(),
            edit: LineEdit::new().with_placeholder("Enter a file path and press Enter"),
            slot: Slot::Input,
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

    /// Set the maximum size per file in megabytes.
    pub fn with_max_size_mb(mut self, max_size_mb: u32) -> Self {
        self.policy = IntakePolicy::from_parts(self.policy.accept().to_vec(), max_size_mb);
        self
    }

    /// Set the maximum number of files.
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files.max(1);
        self
    }

    /// Set or clear the externally supplied error.
    pub fn set_external_error(&mut self, error: Option<String>) {
        self.chrome.set_external_error(error);
    }

    /// Every listed entry, accepted or failed.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Descriptors of the accepted files only.
    pub fn accepted(&self) -> Vec<&FileDescriptor> {
        self.entries
            .iter()
            .filter(|e| e.is_accepted())
            .map(|e| &e.descriptor)
            .collect()
    }

    /// The field's label.
    pub fn label(&self) -> &str {
        self.chrome.label()
    }

    /// Remaining capacity for accepted files.
    pub fn remaining(&self) -> usize {
        self.max_files
            .saturating_sub(self.entries.iter().filter(|e| e.is_accepted()).count())
    }

    /// Offer a batch of candidate files.
    ///
    /// The batch is truncated to the remaining capacity before any
    /// validation runs, so a too-long batch loses its tail silently.
    pub fn offer_batch(&mut self, mut batch: Vec<FileDescriptor>) {
        let remaining = self.remaining();
        if batch.len() > remaining {
            tracing::debug!(
                dropped = batch.len() - remaining,
                "truncating file batch to remaining capacity"
            );
            batch.truncate(remaining);
        }

        for file in batch {
            // Name-keyed duplicate check against the accepted set.
            let duplicate = self
                .entries
                .iter()
                .any(|e| e.is_accepted() && e.descriptor.name == file.name);
            if duplicate {
                continue;
            }

            // A re-offer replaces a previously failed entry of the
            // same name instead of listing it twice.
            self.entries
                .retain(|e| e.is_accepted() || e.descriptor.name != file.name);

            match self.policy.evaluate(&file) {
                Err(err) => {
                    self.entries.push(FileEntry {
                        descriptor: file,
                        error: Some(err),
                        preview: None,
                    });
                }
                Ok(()) => {
                    let preview = if file.is_image() {
                        file.path.as_deref().and_then(|p| {
                            PreviewHandle::load(p)
                                .map_err(|err| {
                                    tracing::warn!(%err, "preview load failed");
                                })
                                .ok()
                        })
                    } else {
                        None
                    };
                    self.entries.push(FileEntry {
                        descriptor: file,
                        error: None,
                        preview,
                    });
                }
            }
        }
    }

    /// Offer the files at the given paths.
    pub fn offer_paths(&mut self, paths: &[&Path]) {
        let mut batch = Vec::new();
        for path in paths {
            match FileDescriptor::from_path(path) {
                Ok(file) => batch.push(file),
                Err(err) => {
                    self.chrome
                        .set_local_error(Some(format!("Could not read file: {err}")));
                }
            }
        }
        self.offer_batch(batch);
    }

    /// Remove one listed entry; its preview handle is released with it.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
            self.clamp_slot();
        }
    }

    fn clamp_slot(&mut self) {
        if let Slot::Entry(i) = self.slot
            && i >= self.entries.len()
        {
            self.slot = if self.entries.is_empty() {
                Slot::Input
            } else {
                Slot::Entry(self.entries.len() - 1)
            };
        }
    }

    fn slot_up(&mut self) {
        self.slot = match self.slot {
            Slot::Input if !self.entries.is_empty() => Slot::Entry(self.entries.len() - 1),
            Slot::Entry(i) if i > 0 => Slot::Entry(i - 1),
            other => other,
        };
    }

    fn slot_down(&mut self) {
        self.slot = match self.slot {
            Slot::Entry(i) if i + 1 < self.entries.len() => Slot::Entry(i + 1),
            Slot::Entry(_) => Slot::Input,
            Slot::Input => Slot::Input,
        };
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> ComponentResult<()> {
        match key.code {
            KeyCode::Enter if !self.edit.is_empty() => {
                let raw = self.edit.value().trim().to_string();
                self.chrome.set_local_error(None);
                self.offer_paths(&[Path::new(&raw)]);
                self.edit.clear();
                ComponentResult::Handled
            }
            KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
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
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit.clear();
                ComponentResult::Handled
            }
            _ => ComponentResult::NotHandled,
        }
    }
}

impl Component for MultiFileField {
    type Output = ();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let control = self.chrome.render(area, buf, self.focused);
        if control.height == 0 {
            return;
        }

        let mut y = control.y;
        for (i, entry) in self.entries.iter().enumerate() {
            if y >= control.bottom() {
                return;
            }
            for x in control.x..control.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_bg(SURFACE_1);
                }
            }

            let on_cursor = self.focused && self.slot == Slot::Entry(i);
            let marker = if on_cursor { ">" } else { " " };
            buf.set_string(control.x, y, marker, Style::default().fg(ACCENT).bg(SURFACE_1));

            let glyph = if entry.descriptor.is_image() { "▣" } else { "▢" };
            buf.set_string(
                control.x + 2,
                y,
                glyph,
                Style::default().fg(TEXT_DIM).bg(SURFACE_1),
            );

            let name_style = if entry.is_accepted() {
                Style::default().fg(TEXT).bg(SURFACE_1)
            } else {
                Style::default().fg(ERROR).bg(SURFACE_1)
            };
            buf.set_string(control.x + 4, y, &entry.descriptor.name, name_style);

            let mut detail = format_size(entry.descriptor.size_bytes);
            if let Some(err) = &entry.error {
                detail = format!("{detail}  {err}");
            }
            let detail_style = if entry.is_accepted() {
                Style::default().fg(TEXT_DIM).bg(SURFACE_1)
            } else {
                Style::default().fg(ERROR).bg(SURFACE_1)
            };
            let x = control
                .right()
                .saturating_sub(detail.chars().count() as u16 + 1);
            buf.set_string(x, y, &detail, detail_style);
            y += 1;
        }

        if self.remaining() > 0 && y < control.bottom() {
            self.edit.render(
                Rect::new(control.x, y, control.width, 1),
                buf,
                self.focused && self.slot == Slot::Input,
            );
            y += 1;
        }

        if y < control.bottom() {
            let caption = format!(
                "Up to {}MB each ({}/{} files)",
                self.policy.max_size_mb(),
                self.accepted().len(),
                self.max_files
            );
            buf.set_string(control.x, y, &caption, Style::default().fg(TEXT_MUTED));
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<()> {
        // Up/Down walk the listed entries and the input row.
        match key.code {
            KeyCode::Up if !self.entries.is_empty() => {
                self.slot_up();
                return ComponentResult::Handled;
            }
            KeyCode::Down if !self.entries.is_empty() => {
                self.slot_down();
                return ComponentResult::Handled;
            }
            _ => {}
        }

        match self.slot {
            Slot::Entry(i) => match key.code {
                KeyCode::Backspace | KeyCode::Delete => {
                    self.remove_at(i);
                    ComponentResult::Handled
                }
                _ => ComponentResult::NotHandled,
            },
            Slot::Input => self.handle_input_key(key),
        }
    }

    fn focus_state(&self) -> FocusState {
        if !self.focused {
            FocusState::Unfocused
        } else if self.slot == Slot::Input {
            FocusState::Editing
        } else {
            FocusState::Focused
        }
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        match self.slot {
            Slot::Input => vec![
                ("Type", "Path"),
                ("Enter", "Attach"),
                ("↑/↓", "Files"),
            ],
            Slot::Entry(_) => vec![("Backspace", "Remove"), ("↑/↓", "Files")],
        }
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        if self.slot == Slot::Input {
            self.edit.insert_str(text.trim());
        }
        true
    }

    fn desired_height(&self, _width: u16) -> u16 {
        let rows = self.entries.len() as u16
            + u16::from(self.remaining() > 0) // path input
            + 1; // count caption
        self.chrome.height(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file(name: &str, media: &str, size: u64) -> FileDescriptor {
        FileDescriptor::new(name, media, size)
    }

    fn gallery(max_files: usize, max_mb: u32) -> MultiFileField {
        MultiFileField::new("Gallery")
            .with_accept("any")
            .with_max_files(max_files)
            .with_max_size_mb(max_mb)
    }

    #[test]
    fn batch_is_truncated_before_validation() {
        // max_files=2, max 1MB, batch of 3 where file 2 is oversize:
        // file1 accepted, file2 listed with a size error, file3
        // silently dropped by the truncation.
        let mut field = gallery(2, 1);
        field.offer_batch(vec![
            file("one.txt", "text/plain", 100),
            file("two.txt", "text/plain", 2 * 1024 * 1024),
            file("three.txt", "text/plain", 100),
        ]);

        let names: Vec<_> = field
            .entries()
            .iter()
            .map(|e| e.descriptor.name.as_str())
            .collect();
        assert_eq!(names, vec!["one.txt", "two.txt"]);

        let accepted: Vec<_> = field.accepted().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(accepted, vec!["one.txt"]);

        assert_eq!(
            field.entries()[1].error,
            Some(IntakeError::TooLarge { max_mb: 1 })
        );
    }

    #[test]
    fn duplicate_names_are_dropped() {
        let mut field = gallery(5, 5);
        field.offer_batch(vec![file("a.txt", "text/plain", 10)]);
        field.offer_batch(vec![
            file("a.txt", "text/plain", 999),
            file("b.txt", "text/plain", 10),
        ]);

        let accepted: Vec<_> = field.accepted().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(accepted, vec!["a.txt", "b.txt"]);
        // The original a.txt is untouched.
        assert_eq!(field.accepted()[0].size_bytes, 10);
    }

    #[test]
    fn accepted_count_never_exceeds_max() {
        let mut field = gallery(2, 5);
        field.offer_batch(vec![
            file("a.txt", "text/plain", 1),
            file("b.txt", "text/plain", 1),
        ]);
        field.offer_batch(vec![file("c.txt", "text/plain", 1)]);
        assert_eq!(field.accepted().len(), 2);
        assert_eq!(field.remaining(), 0);
    }

    #[test]
    fn failed_entries_do_not_consume_capacity() {
        let mut field = gallery(2, 1);
        field.offer_batch(vec![file("big.bin", "application/zip", 5 * 1024 * 1024)]);
        assert_eq!(field.accepted().len(), 0);
        assert_eq!(field.remaining(), 2);

        field.offer_batch(vec![
            file("a.txt", "text/plain", 1),
            file("b.txt", "text/plain", 1),
        ]);
        assert_eq!(field.accepted().len(), 2);
    }

    #[test]
    fn reoffering_a_failed_name_replaces_the_entry() {
        let mut field = gallery(3, 1);
        field.offer_batch(vec![file("pic.png", "image/png", 5 * 1024 * 1024)]);
        assert!(!field.entries()[0].is_accepted());

        field.offer_batch(vec![file("pic.png", "image/png", 100)]);
        assert_eq!(field.entries().len(), 1);
        assert!(field.entries()[0].is_accepted());
    }

    #[test]
    fn removing_one_entry_touches_only_that_entry() {
        let mut field = gallery(5, 5);
        field.offer_batch(vec![
            file("a.txt", "text/plain", 1),
            file("b.txt", "text/plain", 1),
            file("c.txt", "text/plain", 1),
        ]);
        field.remove_at(1);

        let names: Vec<_> = field.accepted().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "c.txt"]);
    }

    #[test]
    fn per_entry_previews_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let img = dir.path().join("shot.png");
        std::fs::write(&img, b"png-bytes").expect("write");
        let doc = dir.path().join("note.txt");
        std::fs::write(&doc, b"text").expect("write");

        let mut field = gallery(5, 5);
        field.offer_paths(&[&img, &doc]);

        assert_eq!(field.entries().len(), 2);
        assert!(field.entries()[0].preview().is_some());
        assert!(field.entries()[1].preview().is_none());

        // Removal releases the preview with the entry.
        field.remove_at(0);
        assert_eq!(field.entries().len(), 1);
        assert!(field.entries()[0].preview().is_none());
    }

    #[test]
    fn entry_cursor_removal_via_keys() {
        let mut field = gallery(5, 5);
        field.offer_batch(vec![
            file("a.txt", "text/plain", 1),
            file("b.txt", "text/plain", 1),
        ]);

        field.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        field.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        let names: Vec<_> = field.accepted().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt"]);
    }
}
