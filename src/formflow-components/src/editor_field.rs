//! Rich-text editor field.
//!
//! A thin adapter over the external editing engine (`tui-textarea`):
//! the toolbar maps formatting commands onto Markdown markers or the
//! engine's own commands (alignment, undo, redo), and the engine's
//! buffer is re-serialized after every change. Link and image insertion
//! are two-step: a modal captures the URL, then the command applies it
//! at the cursor. The editing model itself - cursor, history, text
//! storage - belongs entirely to the engine.

use crate::borders::FieldBorder;
use crate::chrome::FieldChrome;
use crate::component::{Component, ComponentResult, FocusState};
use crate::style::{ACCENT, SURFACE_1, TEXT, TEXT_DIM, TEXT_MUTED, VOID};
use crate::url_modal::{UrlModal, UrlModalResult};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::Widget;
use tui_textarea::{CursorMove, TextArea};

/// Editor rows inside the border.
const EDITOR_ROWS: u16 = 8;

/// Formatting commands the toolbar can invoke on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Bold marker pair
    Bold,
    /// Italic marker pair
    Italic,
    /// Underline marker pair
    Underline,
    /// Heading of the given level (1-3)
    Heading(u8),
    /// Bulleted list item
    BulletList,
    /// Ordered list item
    OrderedList,
    /// Left alignment
    AlignLeft,
    /// Centered alignment
    AlignCenter,
    /// Right alignment
    AlignRight,
    /// Two-step link insertion
    Link,
    /// Two-step image insertion
    Image,
    /// Fenced code block
    CodeBlock,
    /// Block quote
    Quote,
    /// Engine undo
    Undo,
    /// Engine redo
    Redo,
}

/// Which two-step insertion the open modal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingInsert {
    Link,
    Image,
}

/// A rich-text input wrapping the external editing engine.
pub struct EditorField {
    chrome: FieldChrome,
    engine: TextArea<'static>,
    modal: Option<(PendingInsert, UrlModal)>,
    focused: bool,
}

impl EditorField {
    /// Create an editor field.
    pub fn new(label: impl Into<String>) -> Self {
        let mut engine = TextArea::default();
        engine.set_cursor_line_style(Style::default());
        let mut field = Self {
            chrome: FieldChrome::new(label),
            engine,
            modal: None,
            focused: false,
        };
        field.apply_theme();
        field
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

    /// Set the placeholder shown while the editor is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.engine.set_placeholder_text(placeholder);
        self.engine
            .set_placeholder_style(Style::default().fg(TEXT_MUTED));
        self
    }

    /// Set the initial content.
    pub fn with_value(mut self, value: &str) -> Self {
        self.engine.insert_str(value);
        self
    }

    /// Set or clear the externally supplied error.
    pub fn set_external_error(&mut self, error: Option<String>) {
        self.chrome.set_external_error(error);
    }

    /// The engine's serialized output.
    pub fn serialized(&self) -> String {
        self.engine.lines().join("\n")
    }

    /// The field's label.
    pub fn label(&self) -> &str {
        self.chrome.label()
    }

    /// Whether a URL modal is open.
    pub fn modal_open(&self) -> bool {
        self.modal.is_some()
    }

    /// Invoke a toolbar command on the engine.
    pub fn apply(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::Bold => self.wrap_cursor("**", "**"),
            EditorCommand::Italic => self.wrap_cursor("*", "*"),
            EditorCommand::Underline => self.wrap_cursor("<u>", "</u>"),
            EditorCommand::Heading(level) => {
                let level = level.clamp(1, 3) as usize;
                self.prefix_line(&format!("{} ", "#".repeat(level)));
            }
            EditorCommand::BulletList => self.prefix_line("- "),
            EditorCommand::OrderedList => self.prefix_line("1. "),
            EditorCommand::Quote => self.prefix_line("> "),
            EditorCommand::CodeBlock => {
                self.engine.insert_str("```\n\n```");
                self.engine.move_cursor(CursorMove::Up);
            }
            EditorCommand::AlignLeft => self.engine.set_alignment(Alignment::Left),
            EditorCommand::AlignCenter => self.engine.set_alignment(Alignment::Center),
            EditorCommand::AlignRight => self.engine.set_alignment(Alignment::Right),
            EditorCommand::Link => {
                self.modal = Some((PendingInsert::Link, UrlModal::new("Insert Link")));
            }
            EditorCommand::Image => {
                self.modal = Some((PendingInsert::Image, UrlModal::new("Insert Image")));
            }
            EditorCommand::Undo => {
                self.engine.undo();
            }
            EditorCommand::Redo => {
                self.engine.redo();
            }
        }
    }

    /// Insert marker pairs and leave the cursor between them.
    fn wrap_cursor(&mut self, open: &str, close: &str) {
        self.engine.insert_str(format!("{open}{close}"));
        for _ in 0..close.chars().count() {
            self.engine.move_cursor(CursorMove::Back);
        }
    }

    /// Put a marker at the head of the current line.
    fn prefix_line(&mut self, prefix: &str) {
        let (_, col) = self.engine.cursor();
        self.engine.move_cursor(CursorMove::Head);
        self.engine.insert_str(prefix);
        // Restore the cursor past the inserted prefix.
        for _ in 0..col {
            self.engine.move_cursor(CursorMove::Forward);
        }
    }

    /// Apply a captured URL from the modal.
    fn finish_insert(&mut self, pending: PendingInsert, url: String) {
        let snippet = match pending {
            PendingInsert::Link => format!("[]({url})"),
            PendingInsert::Image => format!("![]({url})"),
        };
        self.engine.insert_str(&snippet);
        // Land inside the brackets so the user can type the text.
        for _ in 0..url.chars().count() + 3 {
            self.engine.move_cursor(CursorMove::Back);
        }
    }

    fn apply_theme(&mut self) {
        self.engine.set_style(Style::default().fg(TEXT).bg(VOID));
        self.engine
            .set_cursor_style(Style::default().fg(VOID).bg(ACCENT));
        self.engine.set_cursor_line_style(Style::default());
        self.engine
            .set_block(FieldBorder::new().focused(self.focused).to_block());
    }

    fn command_for_key(key: KeyEvent) -> Option<EditorCommand> {
        if !key.modifiers.contains(KeyModifiers::ALT) {
            return None;
        }
        match key.code {
            KeyCode::Char('b') => Some(EditorCommand::Bold),
            KeyCode::Char('i') => Some(EditorCommand::Italic),
            KeyCode::Char('u') => Some(EditorCommand::Underline),
            KeyCode::Char('1') => Some(EditorCommand::Heading(1)),
            KeyCode::Char('2') => Some(EditorCommand::Heading(2)),
            KeyCode::Char('3') => Some(EditorCommand::Heading(3)),
            KeyCode::Char('l') => Some(EditorCommand::BulletList),
            KeyCode::Char('o') => Some(EditorCommand::OrderedList),
            KeyCode::Char('q') => Some(EditorCommand::Quote),
            KeyCode::Char('c') => Some(EditorCommand::CodeBlock),
            KeyCode::Char('k') => Some(EditorCommand::Link),
            KeyCode::Char('g') => Some(EditorCommand::Image),
            KeyCode::Char('z') => Some(EditorCommand::Undo),
            KeyCode::Char('y') => Some(EditorCommand::Redo),
            KeyCode::Char(',') => Some(EditorCommand::AlignLeft),
            KeyCode::Char('.') => Some(EditorCommand::AlignCenter),
            KeyCode::Char('/') => Some(EditorCommand::AlignRight),
            _ => None,
        }
    }

    fn render_toolbar(&self, area: Rect, buf: &mut Buffer) {
        for x in area.x..area.right() {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_bg(SURFACE_1);
            }
        }

        const GROUPS: [&str; 6] = [
            "M-b/i/u b·i·u",
            "M-1..3 heading",
            "M-l/o list",
            "M-k/g link·img",
            "M-c/q code·quote",
            "M-z/y undo·redo",
        ];
        let mut x = area.x + 1;
        for (i, group) in GROUPS.iter().enumerate() {
            if i > 0 {
                buf.set_string(
                    x,
                    area.y,
                    "│",
                    Style::default().fg(TEXT_MUTED).bg(SURFACE_1),
                );
                x += 2;
            }
            if x + group.len() as u16 >= area.right() {
                break;
            }
            buf.set_string(
                x,
                area.y,
                *group,
                Style::default().fg(TEXT_DIM).bg(SURFACE_1),
            );
            x += group.len() as u16 + 1;
        }
    }
}

impl Component for EditorField {
    type Output = ();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let control = self.chrome.render(area, buf, self.focused);
        if control.height < 2 {
            return;
        }

        self.render_toolbar(Rect::new(control.x, control.y, control.width, 1), buf);

        let editor_area = Rect::new(
            control.x,
            control.y + 1,
            control.width,
            control.height.saturating_sub(1),
        );
        (&self.engine).render(editor_area, buf);

        if let Some((_, modal)) = &self.modal {
            modal.render(editor_area, buf);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<()> {
        // The modal captures everything while open.
        if let Some((pending, mut modal)) = self.modal.take() {
            match modal.handle_key(key) {
                UrlModalResult::Pending => self.modal = Some((pending, modal)),
                UrlModalResult::Cancel => {}
                UrlModalResult::Submit(url) => self.finish_insert(pending, url),
            }
            return ComponentResult::Handled;
        }

        if let Some(command) = Self::command_for_key(key) {
            self.apply(command);
            return ComponentResult::Handled;
        }

        // Tab and Esc belong to the page (focus movement).
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc) {
            return ComponentResult::NotHandled;
        }

        // Everything else is the engine's business.
        self.engine.input(tui_textarea::Input::from(key));
        ComponentResult::Handled
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
        if !focused {
            self.modal = None;
        }
        self.apply_theme();
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.modal.is_some() {
            vec![("Enter", "Insert"), ("Esc", "Cancel")]
        } else {
            vec![("Type", "Edit"), ("M-b/i/u", "Format"), ("Tab", "Next field")]
        }
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        if let Some((_, modal)) = &mut self.modal {
            modal.handle_paste(text);
        } else {
            self.engine.insert_str(text);
        }
        true
    }

    fn desired_height(&self, _width: u16) -> u16 {
        self.chrome.height(1 + EDITOR_ROWS)
    }
}
