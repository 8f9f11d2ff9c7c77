//! Frame layout and the event loop.
//!
//! Single-threaded and synchronous: draw a frame, block on the next
//! terminal event, dispatch it to the page, repeat. All state
//! transitions happen inside the handlers; nothing runs in the
//! background.

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use formflow_components::key_hints::KeyHintsBar;
use formflow_components::style::{ACCENT, TEXT_DIM};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};
use serde_json::Value;

use crate::page::{FormPage, PageEvent};
use crate::terminal::init_terminal;

/// Rows used by the page header.
const HEADER_ROWS: u16 = 3;

/// Run the form until the user quits; returns the submitted payload,
/// if any.
pub fn run(page: &mut FormPage) -> Result<Option<Value>> {
    let (mut terminal, _guard) = init_terminal()?;

    loop {
        terminal.draw(|frame| render(frame, page))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match page.handle_key(key) {
                    PageEvent::Quit => break,
                    PageEvent::Submitted => {
                        tracing::debug!("submission recorded, staying in the form");
                    }
                    PageEvent::Continue => {}
                }
            }
            Event::Paste(text) => page.handle_paste(&text),
            _ => {}
        }
    }

    Ok(page.last_payload().cloned())
}

fn render(frame: &mut Frame, page: &mut FormPage) {
    let area = frame.area();
    if area.height < HEADER_ROWS + 2 {
        return;
    }

    let buf = frame.buffer_mut();

    let title = Line::from("Form Flow").style(
        Style::default()
            .fg(ACCENT)
            .add_modifier(Modifier::BOLD),
    );
    let subtitle =
        Line::from("A form with multiple input types").style(Style::default().fg(TEXT_DIM));
    Paragraph::new(vec![title, subtitle])
        .centered()
        .render(Rect::new(area.x, area.y, area.width, 2), buf);

    let body = Rect::new(
        area.x + 2,
        area.y + HEADER_ROWS,
        area.width.saturating_sub(4),
        area.height.saturating_sub(HEADER_ROWS + 1),
    );
    page.render_body(body, buf);

    let hints = page.hints();
    let hints_area = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
    KeyHintsBar::new(&hints).render(hints_area, buf);
}
