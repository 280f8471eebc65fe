//! Time-driven sanity drain and the possession watchdog.
//!
//! Three [`Periodic`] timers run against one clock:
//!
//! - ambient decay, every second while lucid
//! - rift check, every second while lucid
//! - watchdog, every 100ms while possessed
//!
//! When several are due in the same tick they run in a fixed order: watchdog,
//! decay, rift, then the recovery flash deadline. Decay and rift are disarmed
//! for the whole possession and restart one interval after recovery.

use hawkins_core::{Periodic, SessionConfig, Timestamp, time::earliest};

use crate::Session;

/// Periodic timers acting on a [`Session`].
#[derive(Debug, Clone)]
pub struct SanityWatch<I> {
    decay: Periodic<I>,
    decay_amount: u32,
    rift: Periodic<I>,
    watchdog: Periodic<I>,
}

impl<I: Timestamp> SanityWatch<I> {
    /// Create a watch for a lucid session, with decay and rift armed at `now`.
    pub fn new(config: &SessionConfig, now: I) -> Self {
        Self {
            decay: Periodic::armed(config.decay_interval, now),
            decay_amount: config.decay_amount,
            rift: Periodic::armed(config.rift_check_interval, now),
            watchdog: Periodic::new(config.watchdog_interval),
        }
    }

    /// Arm and disarm timers to match the possession state.
    pub fn sync(&mut self, now: I, session: &Session<I>) {
        if session.is_possessed() {
            self.decay.disarm();
            self.rift.disarm();
            self.watchdog.ensure_armed(now);
        } else {
            self.watchdog.disarm();
            self.decay.ensure_armed(now);
            self.rift.ensure_armed(now);
        }
    }

    /// Run every timer that is due. Returns `true` if any timer fired.
    pub fn tick(&mut self, now: I, session: &mut Session<I>) -> bool {
        self.sync(now, session);
        let mut fired = false;

        if self.watchdog.poll(now) {
            fired = true;
            session.check_possession_timeout(now);
        }
        if self.decay.poll(now) {
            fired = true;
            tracing::trace!(amount = self.decay_amount, "ambient decay");
            session.drain_sanity(self.decay_amount, now);
        }
        if self.rift.poll(now) {
            fired = true;
            session.check_rift(now);
        }
        session.expire_recovery_flash(now);

        self.sync(now, session);
        fired
    }

    /// Earliest instant at which [`Self::tick`] has work to do.
    pub fn next_deadline(&self, session: &Session<I>) -> Option<I> {
        [self.decay.next_due(), self.rift.next_due(), session.recovery_flash_until()]
            .into_iter()
            .fold(self.watchdog.next_due(), earliest)
    }

    /// Whether the watchdog is running.
    pub fn watchdog_armed(&self) -> bool {
        self.watchdog.is_armed()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn setup() -> (SanityWatch<Instant>, Session<Instant>, Instant) {
        let now = Instant::now();
        let config = SessionConfig::default();
        (SanityWatch::new(&config, now), Session::new(config, now), now)
    }

    #[test]
    fn decays_one_per_second() {
        let (mut watch, mut session, t0) = setup();

        for n in 1..=5 {
            watch.tick(t0 + secs(n), &mut session);
        }
        assert_eq!(session.sanity(), 95);
    }

    #[test]
    fn rift_fires_with_decay_at_twenty_seconds() {
        let (mut watch, mut session, t0) = setup();

        for n in 1..=20 {
            watch.tick(t0 + secs(n), &mut session);
        }
        // Twenty decays plus one rift.
        assert_eq!(session.sanity(), 75);
        assert_eq!(session.last_rift_time(), t0 + secs(20));
    }

    #[test]
    fn timers_pause_while_possessed() {
        let (mut watch, mut session, t0) = setup();
        session.start_possession(t0);
        watch.sync(t0, &session);

        assert!(watch.watchdog_armed());
        assert_eq!(watch.next_deadline(&session), Some(t0 + Duration::from_millis(100)));

        watch.tick(t0 + secs(1), &mut session);
        assert_eq!(session.sanity(), 0);
    }

    #[test]
    fn watchdog_ends_possession_at_deadline() {
        let (mut watch, mut session, t0) = setup();
        session.start_possession(t0);
        watch.sync(t0, &session);

        let mut now = t0;
        while session.is_possessed() {
            now += Duration::from_millis(100);
            watch.tick(now, &mut session);
        }

        assert_eq!(now, t0 + secs(30));
        assert_eq!(session.sanity(), 100);
        assert!(!watch.watchdog_armed());
        // Decay restarts one interval after recovery.
        assert_eq!(watch.next_deadline(&session), Some(now + secs(1)));
    }
}
