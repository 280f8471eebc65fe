//! Laboratory header
//!
//! Title block plus the barely visible logo in the corner.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Render the header and the logo.
pub fn render(frame: &mut Frame, logo: Rect, area: Rect) {
    let lines = vec![
        Line::styled(
            "HAWKINS NATIONAL LABORATORY",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Line::styled("CLASSIFIED // LEVEL 5 CLEARANCE REQUIRED", Style::default().fg(Color::Red)),
        Line::styled(
            "PROJECT: RAINBOW ROOM // MK-ULTRA PHASE II",
            Style::default().fg(Color::Red).add_modifier(Modifier::DIM),
        ),
    ];

    let block =
        Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(Color::Green));
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(block);
    frame.render_widget(paragraph, area);

    let logo_mark = Paragraph::new("HL").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(logo_mark, logo.intersection(area));
}
