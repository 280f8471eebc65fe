//! Status bar
//!
//! Displays the key bindings and the soundtrack mix for the current sanity.
//! Playing the soundtrack itself is left to whatever is listening.

use hawkins_app::{Session, view::AmbienceMix};
use hawkins_core::Timestamp;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render<I: Timestamp>(frame: &mut Frame, session: &Session<I>, area: Rect) {
    let escape = if session.is_encoding() { "ESC abort" } else { "ESC quit" };
    let mix = AmbienceMix::for_sanity(session.sanity(), session.is_possessed());

    let status_line = Line::from(vec![
        Span::raw(" "),
        Span::styled(format!("ENTER transmit | {escape}"), Style::default().fg(Color::Gray)),
        Span::styled(
            format!(" | anthem {} | upside down {}", bar(mix.anthem), bar(mix.ambience)),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

/// Level in `[0, 1]` as a ten-cell bar.
fn bar(level: f32) -> String {
    const CELLS: usize = 10;
    let filled = ((level.clamp(0.0, 1.0) * CELLS as f32).round() as usize).min(CELLS);
    format!("{}{}", "█".repeat(filled), "░".repeat(CELLS - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_rounds_to_cells() {
        assert_eq!(bar(0.0), "░░░░░░░░░░");
        assert_eq!(bar(0.4), "████░░░░░░");
        assert_eq!(bar(0.8), "████████░░");
        assert_eq!(bar(1.5), "██████████");
    }
}
