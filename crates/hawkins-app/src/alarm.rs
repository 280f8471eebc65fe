//! Low-sanity warning tone and the recovery chime.

use std::time::Duration;

use hawkins_core::{Beeper, Periodic, SessionConfig, Timestamp};

use crate::Session;

/// Repeats a short tone while sanity sits in the warning band.
///
/// The band is `0 < sanity < threshold` while lucid. Entering it sounds the
/// tone at once; staying in it repeats the tone every interval.
///
/// The same beeper sounds one long chime when a recovery gesture opens the
/// celebration window. A recovery inside an open window does not chime again.
#[derive(Debug)]
pub struct Alarm<I, B> {
    threshold: u32,
    tone: Duration,
    chime: Duration,
    timer: Periodic<I>,
    celebrating: bool,
    beeper: B,
}

impl<I: Timestamp, B: Beeper> Alarm<I, B> {
    /// Create a silent alarm.
    pub fn new(config: &SessionConfig, beeper: B) -> Self {
        Self {
            threshold: config.alarm_threshold,
            tone: config.alarm_tone,
            chime: config.recovery_chime,
            timer: Periodic::new(config.alarm_interval),
            celebrating: false,
            beeper,
        }
    }

    /// Chime once when the session's celebration window opens.
    pub fn celebrate(&mut self, session: &Session<I>) {
        let open = session.just_recovered();
        if open && !self.celebrating {
            tracing::debug!("recovery chime");
            self.beeper.emit(self.chime);
        }
        self.celebrating = open;
    }

    /// Sound the tone if due.
    pub fn tick(&mut self, now: I, session: &Session<I>) {
        if !self.in_band(session) {
            if self.timer.is_armed() {
                tracing::debug!(sanity = session.sanity(), "alarm silenced");
            }
            self.timer.disarm();
            return;
        }

        if !self.timer.is_armed() {
            tracing::debug!(sanity = session.sanity(), "alarm raised");
            self.timer.arm_immediately(now);
        }
        if self.timer.poll(now) {
            self.beeper.emit(self.tone);
        }
    }

    /// Whether `session` is in the warning band.
    pub fn in_band(&self, session: &Session<I>) -> bool {
        let sanity = session.sanity();
        !session.is_possessed() && sanity > 0 && sanity < self.threshold
    }

    /// When the tone next sounds. `None` while silent.
    pub fn next_deadline(&self) -> Option<I> {
        self.timer.next_due()
    }

    /// The tone sink.
    pub fn beeper(&self) -> &B {
        &self.beeper
    }
}
