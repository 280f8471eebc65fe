//! Sanity meter and code hint

use hawkins_app::{
    Session,
    view::{self, SanityBand},
};
use hawkins_core::Timestamp;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};

/// Render the meter: title row, gauge, and the rift warning when due.
pub fn render<I: Timestamp>(frame: &mut Frame, session: &Session<I>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(2), Constraint::Length(1)])
        .split(area);

    let [title_area, gauge_area, warning_area] = chunks.as_ref() else {
        return;
    };

    let sanity = session.sanity();
    let band = SanityBand::of(sanity);
    let color = band_color(band);

    let title = Line::from(vec![
        Span::styled("[DIMENSIONAL STABILITY] ", Style::default().fg(Color::Green)),
        Span::styled(band.label(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(title), *title_area);

    let percent = (sanity * 100 / session.max_sanity().max(1)).min(100) as u16;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .percent(percent)
        .label(format!("{sanity}%"));
    frame.render_widget(gauge, *gauge_area);

    if view::rift_warning(session) {
        let warning = Paragraph::new("⚠ DIMENSIONAL RIFT DETECTED")
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::SLOW_BLINK));
        frame.render_widget(warning, *warning_area);
    }
}

/// Render the secret sequence hint, if any.
pub fn render_hint<I: Timestamp>(frame: &mut Frame, session: &Session<I>, area: Rect) {
    if let Some(hint) = view::sequence_hint(session) {
        frame.render_widget(Paragraph::new(hint).style(Style::default().fg(Color::Green)), area);
    }
}

fn band_color(band: SanityBand) -> Color {
    match band {
        SanityBand::Stable => Color::Green,
        SanityBand::Unstable => Color::Yellow,
        SanityBand::Critical | SanityBand::Possessed => Color::Red,
    }
}
