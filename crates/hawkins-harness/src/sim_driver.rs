//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as `TerminalDriver` but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`hawkins_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Input comes from a script of events at fixed virtual instants. Waiting for
//! input advances the [`SimEnv`] clock straight to whichever comes first: the
//! next scripted event or the App's deadline. Once the clock would pass the
//! end of the run the driver reports [`AppEvent::Shutdown`].

use std::collections::VecDeque;

use hawkins_app::{App, AppEvent, Driver, SessionSnapshot};
use hawkins_core::{Beeper, Environment};

use crate::{SimEnv, SimInstant, invariants::InvariantRegistry};

/// Error type for simulation driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimDriverError {
    /// A rendered state broke an invariant.
    #[error("invariant violated at {at}: {details}")]
    Invariant {
        /// When the broken state was rendered.
        at: SimInstant,
        /// Every violation found.
        details: String,
    },
}

/// A rendered frame: the virtual time and the state on screen.
pub type Frame = (SimInstant, SessionSnapshot<SimInstant>);

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] trait so the same [`hawkins_app::Runtime`]
/// orchestration code runs in both production TUI and simulation tests.
#[derive(Debug)]
pub struct SimDriver {
    env: SimEnv,
    script: VecDeque<(SimInstant, AppEvent)>,
    until: SimInstant,
    frames: Vec<Frame>,
    invariants: Option<InvariantRegistry>,
    stopped: bool,
}

impl SimDriver {
    /// Create a driver that ends the run at `until`.
    pub fn new(env: SimEnv, until: SimInstant) -> Self {
        Self {
            env,
            script: VecDeque::new(),
            until,
            frames: Vec::new(),
            invariants: None,
            stopped: false,
        }
    }

    /// Enable invariant checking on every rendered frame.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Schedule `event` at `at`.
    ///
    /// Events at the same instant are delivered in scheduling order.
    pub fn schedule(&mut self, at: SimInstant, event: AppEvent) {
        let index = self.script.partition_point(|(queued, _)| *queued <= at);
        self.script.insert(index, (at, event));
    }

    /// Check if there are scripted events left.
    pub fn has_pending(&self) -> bool {
        !self.script.is_empty()
    }

    /// Every rendered frame, in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Whether the runtime released the driver.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// The virtual environment.
    pub fn env(&self) -> &SimEnv {
        &self.env
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;
    type Instant = SimInstant;

    async fn poll_event(
        &mut self,
        deadline: Option<SimInstant>,
    ) -> Result<Option<AppEvent>, Self::Error> {
        let next_event = self.script.front().map(|(at, _)| *at);
        let wake = match (next_event, deadline) {
            (Some(event), Some(deadline)) => event.min(deadline),
            (Some(at), None) | (None, Some(at)) => at,
            (None, None) => self.until,
        };

        if wake > self.until {
            self.env.sleep_until(self.until).await;
            return Ok(Some(AppEvent::Shutdown));
        }

        self.env.sleep_until(wake).await;
        if next_event == Some(wake) {
            return Ok(self.script.pop_front().map(|(_, event)| event));
        }
        if deadline.is_none() {
            return Ok(Some(AppEvent::Shutdown));
        }
        Ok(None)
    }

    fn now(&self) -> SimInstant {
        self.env.now()
    }

    fn render<B: Beeper>(&mut self, app: &App<SimInstant, B>) -> Result<(), Self::Error> {
        let at = self.env.now();
        let snapshot = app.session().snapshot();

        if let Some(registry) = &self.invariants
            && let Err(violations) = registry.check_all(&snapshot)
        {
            let details: Vec<_> = violations.iter().map(ToString::to_string).collect();
            return Err(SimDriverError::Invariant { at, details: details.join("; ") });
        }

        self.frames.push((at, snapshot));
        Ok(())
    }

    fn stop(&mut self) {
        tracing::debug!(at = %self.env.now(), frames = self.frames.len(), "simulation stopped");
        self.stopped = true;
    }
}
