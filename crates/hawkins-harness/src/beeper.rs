//! Beeper that records pulses on the virtual timeline.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use hawkins_core::{Beeper, Environment};

use crate::{SimEnv, SimInstant};

/// One recorded pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    /// When the pulse started.
    pub at: SimInstant,
    /// How long it was held.
    pub duration: Duration,
}

impl Pulse {
    /// Pulse starting `at_ms` into the run, held for `duration_ms`.
    pub fn at_millis(at_ms: u64, duration_ms: u64) -> Self {
        Self { at: SimInstant::from_millis(at_ms), duration: Duration::from_millis(duration_ms) }
    }
}

/// Records every pulse with the virtual time it was emitted at.
///
/// Clones share the log, so a test can keep one handle while the App owns
/// another.
#[derive(Debug, Clone)]
pub struct RecordingBeeper {
    env: SimEnv,
    log: Arc<Mutex<Vec<Pulse>>>,
}

impl RecordingBeeper {
    /// Create an empty recorder reading time from `env`.
    pub fn new(env: SimEnv) -> Self {
        Self { env, log: Arc::default() }
    }

    /// Every pulse so far, in emission order.
    pub fn pulses(&self) -> Vec<Pulse> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of pulses so far.
    pub fn count(&self) -> usize {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Beeper for RecordingBeeper {
    fn emit(&mut self, duration: Duration) {
        let pulse = Pulse { at: self.env.now(), duration };
        tracing::trace!(at = %pulse.at, ?duration, "pulse");
        self.log.lock().unwrap_or_else(PoisonError::into_inner).push(pulse);
    }
}
