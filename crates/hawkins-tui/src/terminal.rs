//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard and mouse events and ratatui for rendering. Time comes from
//! [`SystemEnv`].

use std::{
    io::{self, Stdout, stdout},
    time::Instant,
};

use crossterm::{
    ExecutableCommand,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use hawkins_app::{App, AppEvent, Driver, KeyInput};
use hawkins_core::{Beeper, Environment};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use thiserror::Error;

use crate::{SystemEnv, ui};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the terminal for its whole lifetime: raw mode, the alternate screen
/// and mouse capture are switched on in [`TerminalDriver::new`] and restored
/// on drop.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    env: SystemEnv,
    /// Logo click target as of the last frame.
    logo: Rect,
}

impl TerminalDriver {
    /// Take over the terminal.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();
        let size = terminal.size()?;
        let logo = ui::logo_area(Rect::new(0, 0, size.width, size.height));

        Ok(Self { terminal, event_stream, env: SystemEnv::new(), logo })
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            _ => None,
        }
    }

    /// Translate a terminal event. `None` for events the App does not see.
    fn convert_event(event: Event, logo: Rect) -> Option<AppEvent> {
        match event {
            Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) => {
                if modifiers.contains(KeyModifiers::CONTROL) {
                    return matches!(code, KeyCode::Char('c')).then_some(AppEvent::Shutdown);
                }
                Self::convert_key(code).map(AppEvent::Key)
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left), column, row, ..
            }) => logo.contains((column, row).into()).then_some(AppEvent::LogoClick),
            Event::Resize(cols, rows) => Some(AppEvent::Resize(cols, rows)),
            _ => None,
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;
    type Instant = Instant;

    async fn poll_event(
        &mut self,
        deadline: Option<Instant>,
    ) -> Result<Option<AppEvent>, Self::Error> {
        let env = self.env;
        let timeout = async move {
            match deadline {
                Some(deadline) => env.sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(timeout);

        loop {
            tokio::select! {
                biased;

                // Terminal events
                maybe_event = self.event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if let Some(event) = Self::convert_event(event, self.logo) {
                                return Ok(Some(event));
                            }
                        },
                        Some(Err(e)) => return Err(TerminalError::Io(e)),
                        None => return Ok(Some(AppEvent::Shutdown)),
                    }
                }

                // Next deadline
                () = &mut timeout => return Ok(None),
            }
        }
    }

    fn now(&self) -> Self::Instant {
        self.env.now()
    }

    fn render<B: Beeper>(&mut self, app: &App<Instant, B>) -> Result<(), Self::Error> {
        let now = self.env.now();
        let completed = self.terminal.draw(|frame| {
            ui::render(frame, app, now);
        })?;
        self.logo = ui::logo_area(completed.area);
        Ok(())
    }

    fn stop(&mut self) {
        tracing::debug!("terminal released");
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        let _ = stdout().execute(DisableMouseCapture);
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    const LOGO: Rect = Rect { x: 0, y: 0, width: 4, height: 2 };

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys_map_to_input() {
        assert_eq!(
            TerminalDriver::convert_event(press(KeyCode::Up, KeyModifiers::NONE), LOGO),
            Some(AppEvent::Key(KeyInput::Up))
        );
        assert_eq!(
            TerminalDriver::convert_event(press(KeyCode::Char('B'), KeyModifiers::SHIFT), LOGO),
            Some(AppEvent::Key(KeyInput::Char('B')))
        );
        let tab = press(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(TerminalDriver::convert_event(tab, LOGO), None);
    }

    #[test]
    fn ctrl_c_shuts_down() {
        assert_eq!(
            TerminalDriver::convert_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL), LOGO),
            Some(AppEvent::Shutdown)
        );
        assert_eq!(
            TerminalDriver::convert_event(press(KeyCode::Char('x'), KeyModifiers::CONTROL), LOGO),
            None
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(TerminalDriver::convert_event(release, LOGO), None);
    }

    #[test]
    fn only_logo_clicks_count() {
        assert_eq!(TerminalDriver::convert_event(click(1, 1), LOGO), Some(AppEvent::LogoClick));
        assert_eq!(TerminalDriver::convert_event(click(4, 0), LOGO), None);
        assert_eq!(TerminalDriver::convert_event(click(0, 2), LOGO), None);
    }

    #[test]
    fn resize_passes_through() {
        assert_eq!(
            TerminalDriver::convert_event(Event::Resize(120, 40), LOGO),
            Some(AppEvent::Resize(120, 40))
        );
    }
}
