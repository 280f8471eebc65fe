//! Scripted end-to-end runs.
//!
//! A [`Scenario`] wires an [`App`] with recording beepers to a [`SimDriver`]
//! and runs it through the production [`Runtime`] until the script ends.

use std::time::Duration;

use hawkins_app::{App, AppEvent, KeyInput, Runtime};
use hawkins_core::{ConfigError, Environment, SessionConfig};

use crate::{
    Pulse, RecordingBeeper, SimDriver, SimDriverError, SimEnv, SimInstant,
    invariants::InvariantRegistry, sim_driver::Frame,
};

/// Why a scenario could not run to completion.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// The session configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The driver stopped the run.
    #[error(transparent)]
    Driver(#[from] SimDriverError),
}

/// Builder for a scripted run.
#[derive(Debug, Clone)]
pub struct Scenario {
    config: SessionConfig,
    script: Vec<(SimInstant, AppEvent)>,
    until: SimInstant,
    check_invariants: bool,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    /// Default configuration, invariants on, running for one second.
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            script: Vec::new(),
            until: SimInstant::from_millis(1000),
            check_invariants: true,
        }
    }

    /// Use `config` for the session.
    #[must_use]
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// End the run at `ms` milliseconds.
    #[must_use]
    pub fn until(mut self, ms: u64) -> Self {
        self.until = SimInstant::from_millis(ms);
        self
    }

    /// Disable invariant checks.
    #[must_use]
    pub fn unchecked(mut self) -> Self {
        self.check_invariants = false;
        self
    }

    /// Deliver `event` at `ms` milliseconds.
    #[must_use]
    pub fn event(mut self, ms: u64, event: AppEvent) -> Self {
        self.script.push((SimInstant::from_millis(ms), event));
        self
    }

    /// Press `key` at `ms` milliseconds.
    #[must_use]
    pub fn key(self, ms: u64, key: KeyInput) -> Self {
        self.event(ms, AppEvent::Key(key))
    }

    /// Type every character of `text` at `ms` milliseconds.
    #[must_use]
    pub fn type_text(self, ms: u64, text: &str) -> Self {
        text.chars().fold(self, |scenario, c| scenario.key(ms, KeyInput::Char(c)))
    }

    /// Click the logo at `ms` milliseconds.
    #[must_use]
    pub fn click(self, ms: u64) -> Self {
        self.event(ms, AppEvent::LogoClick)
    }

    /// Run the scenario to its end.
    pub async fn run(self) -> Result<Outcome, ScenarioError> {
        let env = SimEnv::new();
        let signal = RecordingBeeper::new(env.clone());
        let alarm = RecordingBeeper::new(env.clone());
        let word_len = self.config.secret_word.chars().count();

        let app = App::new(self.config, signal.clone(), alarm.clone(), env.now())?;

        let mut driver = SimDriver::new(env.clone(), self.until);
        if self.check_invariants {
            driver = driver.with_invariants(InvariantRegistry::standard(word_len));
        }
        for (at, event) in self.script {
            driver.schedule(at, event);
        }

        let mut runtime = Runtime::new(driver, app);
        runtime.run().await?;
        let (driver, app) = runtime.into_parts();

        Ok(Outcome {
            ended_at: env.now(),
            frames: driver.frames().to_vec(),
            signal: signal.pulses(),
            alarm: alarm.pulses(),
            app,
        })
    }
}

/// Everything observable after a run.
#[derive(Debug)]
pub struct Outcome {
    /// The App as the run left it.
    pub app: App<SimInstant, RecordingBeeper>,
    /// Rendered frames in order.
    pub frames: Vec<Frame>,
    /// Morse pulses.
    pub signal: Vec<Pulse>,
    /// Warning tones and recovery chimes.
    pub alarm: Vec<Pulse>,
    /// Virtual time at the end.
    pub ended_at: SimInstant,
}

impl Outcome {
    /// Sanity on screen at or before `ms` milliseconds.
    pub fn sanity_at(&self, ms: u64) -> Option<u32> {
        let at = SimInstant::from_millis(ms);
        self.frames.iter().rev().find(|(frame_at, _)| *frame_at <= at).map(|(_, s)| s.sanity)
    }

    /// First rendered instant at which `predicate` held.
    pub fn first_frame_where(
        &self,
        predicate: impl Fn(&hawkins_app::SessionSnapshot<SimInstant>) -> bool,
    ) -> Option<SimInstant> {
        self.frames.iter().find(|(_, snapshot)| predicate(snapshot)).map(|(at, _)| *at)
    }

    /// Gaps between consecutive signal pulses.
    pub fn signal_spacing(&self) -> Vec<Duration> {
        self.signal.windows(2).map(|pair| pair[1].at - pair[0].at).collect()
    }
}
