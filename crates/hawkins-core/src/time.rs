//! Instants and periodic timers.
//!
//! Session logic is generic over [`Timestamp`] so it never reads a clock on
//! its own. Time is always passed in, which keeps every state machine pure.
//!
//! [`Periodic`] is the one scheduling primitive. It does not count ticks: each
//! poll compares `now` against a stored due time and re-arms relative to the
//! poll that fired. A late poll delays the next firing by the same amount but
//! never fires twice.

use std::{
    fmt::Debug,
    ops::{Add, Sub},
    time::Duration,
};

/// A monotonic point in time, real or virtual.
pub trait Timestamp:
    Copy + Ord + Debug + Send + Sync + Sub<Output = Duration> + Add<Duration, Output = Self>
{
    /// Time elapsed since `earlier`, or zero if `earlier` is in the future.
    fn saturating_since(self, earlier: Self) -> Duration {
        if self > earlier { self - earlier } else { Duration::ZERO }
    }
}

impl<T> Timestamp for T where
    T: Copy + Ord + Debug + Send + Sync + Sub<Output = Duration> + Add<Duration, Output = T>
{
}

/// Earliest of two optional deadlines.
pub fn earliest<I: Timestamp>(a: Option<I>, b: Option<I>) -> Option<I> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// A self resynchronising periodic timer.
///
/// Disarmed timers never fire. Arming schedules the first firing one full
/// interval after the arming instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periodic<I> {
    interval: Duration,
    next_due: Option<I>,
}

impl<I: Timestamp> Periodic<I> {
    /// Create a disarmed timer.
    pub fn new(interval: Duration) -> Self {
        Self { interval, next_due: None }
    }

    /// Create a timer armed at `now`.
    pub fn armed(interval: Duration, now: I) -> Self {
        Self { interval, next_due: Some(now + interval) }
    }

    /// Arm the timer so it first fires at `now + interval`.
    ///
    /// Re-arming an armed timer restarts its period.
    pub fn arm(&mut self, now: I) {
        self.next_due = Some(now + self.interval);
    }

    /// Arm the timer to fire on the next poll.
    pub fn arm_immediately(&mut self, now: I) {
        self.next_due = Some(now);
    }

    /// Arm only if currently disarmed.
    pub fn ensure_armed(&mut self, now: I) {
        if self.next_due.is_none() {
            self.arm(now);
        }
    }

    /// Stop the timer.
    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    /// Whether the timer is armed.
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Period between firings.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the timer next fires. `None` if disarmed.
    pub fn next_due(&self) -> Option<I> {
        self.next_due
    }

    /// Returns `true` if the timer is due, re-arming it at `now + interval`.
    pub fn poll(&mut self, now: I) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn disarmed_timer_never_fires() {
        let start = Instant::now();
        let mut timer: Periodic<Instant> = Periodic::new(SECOND);

        assert!(!timer.poll(start + SECOND * 10));
        assert_eq!(timer.next_due(), None);
    }

    #[test]
    fn fires_once_per_interval() {
        let start = Instant::now();
        let mut timer = Periodic::armed(SECOND, start);

        assert!(!timer.poll(start + Duration::from_millis(999)));
        assert!(timer.poll(start + SECOND));
        assert!(!timer.poll(start + SECOND));
        assert!(timer.poll(start + SECOND * 2));
    }

    #[test]
    fn late_poll_delays_instead_of_double_firing() {
        let start = Instant::now();
        let mut timer = Periodic::armed(SECOND, start);

        // Three intervals were missed, but only one firing happens.
        let late = start + SECOND * 3 + Duration::from_millis(500);
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert_eq!(timer.next_due(), Some(late + SECOND));
    }

    #[test]
    fn arm_immediately_fires_on_next_poll() {
        let start = Instant::now();
        let mut timer = Periodic::new(SECOND);
        timer.arm_immediately(start);

        assert!(timer.poll(start));
        assert_eq!(timer.next_due(), Some(start + SECOND));
    }

    #[test]
    fn ensure_armed_keeps_existing_schedule() {
        let start = Instant::now();
        let mut timer = Periodic::armed(SECOND, start);
        timer.ensure_armed(start + Duration::from_millis(600));

        assert_eq!(timer.next_due(), Some(start + SECOND));
    }

    #[test]
    fn earliest_picks_minimum() {
        let start = Instant::now();
        let later = start + SECOND;

        assert_eq!(earliest(Some(start), Some(later)), Some(start));
        assert_eq!(earliest(None, Some(later)), Some(later));
        assert_eq!(earliest::<Instant>(None, None), None);
    }

    #[test]
    fn saturating_since_clamps_to_zero() {
        let start = Instant::now();
        let later = start + SECOND;

        assert_eq!(later.saturating_since(start), SECOND);
        assert_eq!(start.saturating_since(later), Duration::ZERO);
    }
}
