//! The wall of lights
//!
//! One bulb per letter, strung in three rows. The letter being transmitted
//! lights up in its bulb's color.

use hawkins_app::{
    Session,
    view::{BulbColor, WALL_ROWS},
};
use hawkins_core::Timestamp;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const BULB: &str = "●";

/// Render the wall.
pub fn render<I: Timestamp>(frame: &mut Frame, session: &Session<I>, area: Rect) {
    let lit = session.current_letter();

    let mut lines = Vec::with_capacity(WALL_ROWS.len() * 2);
    for row in WALL_ROWS {
        let mut bulbs = Vec::new();
        let mut letters = Vec::new();
        for (i, letter) in row.chars().enumerate() {
            if i > 0 {
                bulbs.push(Span::raw(" "));
                letters.push(Span::raw(" "));
            }
            let color = BulbColor::of(letter).map_or(Color::White, tint);
            let (bulb, label) = if lit == Some(letter) {
                (
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD),
                )
            } else {
                (
                    Style::default().fg(color).add_modifier(Modifier::DIM),
                    Style::default().fg(Color::Gray),
                )
            };
            bulbs.push(Span::styled(BULB, bulb));
            letters.push(Span::styled(letter.to_string(), label));
        }
        lines.push(Line::from(bulbs));
        lines.push(Line::from(letters));
    }

    let block = Block::default().borders(Borders::ALL).title(" CHANNEL: JOYCE'S LIVING ROOM ");
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(block);
    frame.render_widget(paragraph, area);
}

fn tint(color: BulbColor) -> Color {
    match color {
        BulbColor::Red => Color::Red,
        BulbColor::Orange => Color::LightRed,
        BulbColor::Yellow => Color::Yellow,
        BulbColor::Green => Color::Green,
        BulbColor::Blue => Color::Blue,
        BulbColor::Pink => Color::Magenta,
    }
}
