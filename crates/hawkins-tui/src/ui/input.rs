//! Message line
//!
//! Displays the message being composed with a cursor. While a transmission
//! is on air the line is locked and the cursor hidden.

use hawkins_app::Session;
use hawkins_core::Timestamp;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

const PROMPT_WIDTH: u16 = 2; // "> "
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const BORDER: u16 = 1;

/// Render the message line.
pub fn render<I: Timestamp>(frame: &mut Frame, session: &Session<I>, area: Rect) {
    let (title, color) = if session.is_encoding() {
        (" SENDING... [ESC] ABORT ", Color::Yellow)
    } else {
        (" TRANSMIT [ENTER] ", Color::Green)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color));

    let message = session.message();
    let paragraph = Paragraph::new(format!("> {message}"))
        .style(Style::default().fg(Color::White))
        .block(block);
    frame.render_widget(paragraph, area);

    if session.is_encoding() {
        return;
    }

    let available_width = area.width.saturating_sub(PROMPT_WIDTH + 2 * BORDER);
    let cursor_offset = (message.chars().count() as u16).min(available_width);

    let cursor_x = area.x.saturating_add(BORDER + PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);
    let max_x = area.x.saturating_add(area.width).saturating_sub(BORDER);
    let cursor_x = cursor_x.min(max_x);

    frame.set_cursor_position((cursor_x, cursor_y));
}
