//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and the
//! current instant and drawing into a frame.

mod header;
mod input;
mod meter;
mod overlay;
mod status;
mod wall;

use hawkins_app::{App, view};
use hawkins_core::{Beeper, Timestamp};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Block,
};

/// Size of the hidden logo click target in the top-left corner.
const LOGO_WIDTH: u16 = 4;
const LOGO_HEIGHT: u16 = 2;

/// Background of the whole screen while the walls bleed.
const BLOOD: Color = Color::Rgb(48, 0, 0);

/// Area of the hidden logo inside a screen of `screen` size.
///
/// The logo keeps its place whether or not the possession screen covers it.
pub fn logo_area(screen: Rect) -> Rect {
    Rect {
        x: screen.x,
        y: screen.y,
        width: LOGO_WIDTH.min(screen.width),
        height: LOGO_HEIGHT.min(screen.height),
    }
}

/// Render the entire UI.
pub fn render<I: Timestamp, B: Beeper>(frame: &mut Frame, app: &App<I, B>, now: I) {
    const HEADER_HEIGHT: u16 = 4;
    const WALL_MIN_HEIGHT: u16 = 8;
    const METER_HEIGHT: u16 = 4;
    const HINT_HEIGHT: u16 = 1;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let session = app.session();
    let area = frame.area();

    if session.is_possessed() {
        overlay::render_possessed(frame, session, now, area);
        return;
    }

    if view::blood_overlay(session) {
        frame.render_widget(Block::default().style(Style::default().bg(BLOOD)), area);
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(WALL_MIN_HEIGHT),
            Constraint::Length(METER_HEIGHT),
            Constraint::Length(HINT_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    let [header_area, wall_area, meter_area, hint_area, input_area, status_area] =
        chunks.as_ref()
    else {
        return;
    };

    header::render(frame, logo_area(area), *header_area);
    wall::render(frame, session, *wall_area);
    meter::render(frame, session, *meter_area);
    meter::render_hint(frame, session, *hint_area);
    input::render(frame, session, *input_area);
    status::render(frame, session, *status_area);

    if session.just_recovered() {
        overlay::render_recovery(frame, *wall_area);
    }
}

/// Rectangle of at most `width` x `height` centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
