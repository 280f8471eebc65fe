//! Full-screen states
//!
//! The possession screen: pitch black, then the reveal with a countdown and
//! whatever the user is typing blind. And the banner after a recovery.

use hawkins_app::{Session, view};
use hawkins_core::Timestamp;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered;

/// Render the possession screen over everything.
pub fn render_possessed<I: Timestamp>(frame: &mut Frame, session: &Session<I>, now: I, area: Rect) {
    frame.render_widget(Block::default().style(Style::default().bg(Color::Black)), area);

    if !view::possession_revealed(session, now) {
        return;
    }

    let red = Style::default().fg(Color::Red);
    let sequence: Vec<String> = session.konami_sequence().iter().map(|code| code.label()).collect();

    let mut lines = vec![
        Line::styled("YOU HAVE BEEN POSSESSED", red.add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::styled(sequence.join(" "), red.add_modifier(Modifier::DIM)),
    ];
    if let Some(hint) = view::sequence_hint(session) {
        lines.push(Line::styled(hint, red));
    }
    if let Some(seconds) = view::seconds_remaining(session, now) {
        lines.push(Line::raw(""));
        lines.push(Line::styled(format!("RELEASE IN {seconds}s"), red.add_modifier(Modifier::DIM)));
    }
    let echo = session.message();
    if !echo.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(echo.to_string(), Style::default().fg(Color::DarkGray)));
    }

    let height = lines.len() as u16;
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, centered(area, area.width, height));
}

/// Render the recovery banner centered in `area`.
pub fn render_recovery(frame: &mut Frame, area: Rect) {
    const TEXT: &str = "GATE CLOSED. HAWKINS IS SAFE.";

    let banner = centered(area, TEXT.len() as u16 + 4, 3);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .style(Style::default().bg(Color::White));
    let paragraph = Paragraph::new(TEXT)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Black).add_modifier(Modifier::BOLD))
        .block(block);

    frame.render_widget(Clear, banner);
    frame.render_widget(paragraph, banner);
}
