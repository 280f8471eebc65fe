//! Application state machine.
//!
//! This module defines the [`App`] state machine, which owns the session and
//! everything that acts on it over time, completely decoupled from terminal
//! I/O and the system clock.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//! Time is passed in with every call.
//!
//! # Responsibilities
//!
//! - Routes keys and clicks to the session and its gesture detectors.
//! - Edits the message and starts or aborts transmissions.
//! - Drives the encoder, the sanity watch and the alarm from ticks.
//! - Chimes when a recovery gesture lands.
//! - Reports the next instant it needs to be ticked.

use hawkins_core::{Beeper, ConfigError, SessionConfig, Timestamp, time::earliest};

use crate::{
    Alarm, AppAction, AppEvent, KeyInput, MorseEncoder, SanityWatch, Session,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug)]
pub struct App<I, B> {
    session: Session<I>,
    encoder: MorseEncoder<I, B>,
    watch: SanityWatch<I>,
    alarm: Alarm<I, B>,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Session revision at the last render request.
    rendered_revision: u64,
}

impl<I: Timestamp, B: Beeper> App<I, B> {
    /// Create an App whose session starts at `now`.
    ///
    /// `signal` carries the Morse pulses. `alarm` carries the low-sanity tone
    /// and the recovery chime.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: SessionConfig, signal: B, alarm: B, now: I) -> Result<Self, ConfigError> {
        config.validate()?;

        let encoder = MorseEncoder::new(config.morse, signal);
        let watch = SanityWatch::new(&config, now);
        let alarm = Alarm::new(&config, alarm);
        let session = Session::new(config, now);
        let rendered_revision = session.revision();

        Ok(Self { session, encoder, watch, alarm, terminal_size: (80, 24), rendered_revision })
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent, now: I) -> Vec<AppAction> {
        let mut actions = match event {
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::LogoClick => {
                self.session.handle_logo_click(now);
                vec![]
            },
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Shutdown => {
                self.encoder.stop_encoding();
                vec![AppAction::Quit]
            },
        };

        self.watch.sync(now, &self.session);
        self.alarm.celebrate(&self.session);
        self.request_render(&mut actions);
        actions
    }

    /// Run everything that is due at `now`.
    pub fn tick(&mut self, now: I) -> Vec<AppAction> {
        let fired = self.watch.tick(now, &mut self.session);
        self.encoder.poll(now, &mut self.session);
        self.alarm.tick(now, &self.session);
        self.alarm.celebrate(&self.session);

        let mut actions = Vec::new();
        // The possession screen counts down with the watchdog.
        if fired && self.session.is_possessed() {
            actions.push(AppAction::Render);
        }
        self.request_render(&mut actions);
        actions
    }

    /// Earliest instant at which [`Self::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<I> {
        let watch = self.watch.next_deadline(&self.session);
        let deadline = earliest(watch, self.encoder.next_deadline());
        earliest(deadline, self.alarm.next_deadline())
    }

    fn handle_key(&mut self, key: KeyInput, now: I) -> Vec<AppAction> {
        let was_possessed = self.session.is_possessed();

        self.session.handle_key_down(key, now);
        if let Some(c) = key.printable() {
            self.session.handle_key_press(c, now);
        }

        // Everything typed while possessed is swallowed by the gestures.
        if was_possessed {
            return vec![];
        }

        match key {
            KeyInput::Char(c) if !self.session.is_encoding() && !c.is_control() => {
                let mut message = self.session.message().to_string();
                message.push(c);
                self.session.set_message(&message);
                vec![]
            },
            KeyInput::Backspace if !self.session.is_encoding() => {
                let mut message = self.session.message().to_string();
                message.pop();
                self.session.set_message(&message);
                vec![]
            },
            KeyInput::Enter => {
                let message = self.session.message().to_string();
                self.encoder.encode_message(&message, &mut self.session, now);
                vec![]
            },
            KeyInput::Esc if self.session.is_encoding() => {
                self.encoder.stop_encoding();
                vec![]
            },
            KeyInput::Esc => vec![AppAction::Quit],
            _ => vec![],
        }
    }

    fn request_render(&mut self, actions: &mut Vec<AppAction>) {
        let revision = self.session.revision();
        if revision != self.rendered_revision {
            self.rendered_revision = revision;
            if !actions.contains(&AppAction::Render) {
                actions.push(AppAction::Render);
            }
        }
    }

    /// The session.
    pub fn session(&self) -> &Session<I> {
        &self.session
    }

    /// Mutable access to the session, for subscribing.
    pub fn session_mut(&mut self) -> &mut Session<I> {
        &mut self.session
    }

    /// The Morse encoder.
    pub fn encoder(&self) -> &MorseEncoder<I, B> {
        &self.encoder
    }

    /// The low-sanity alarm.
    pub fn alarm(&self) -> &Alarm<I, B> {
        &self.alarm
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }
}
