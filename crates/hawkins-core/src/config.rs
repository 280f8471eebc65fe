//! Session configuration.
//!
//! Every tunable constant of a session lives in [`SessionConfig`]. The
//! defaults reproduce the canonical experience: 100 sanity, 30 second
//! possession, the classic ten-key cheat sequence and the word `ELEVEN`.
//!
//! A config can also be read from TOML with [`SessionConfig::from_toml`].
//! Durations are written as whole milliseconds and key codes as names
//! (`"ArrowUp"`) or single characters (`"B"`). Missing fields keep their
//! defaults:
//!
//! ```toml
//! possession_duration = 10000
//! secret_word = "NANCY"
//!
//! [morse]
//! dot = 100
//! ```

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, morse::MorseTiming};

/// Default upper bound of sanity.
pub const DEFAULT_MAX_SANITY: u32 = 100;

/// Default length of a possession before the watchdog forces recovery.
pub const DEFAULT_POSSESSION_DURATION: Duration = Duration::from_secs(30);

/// Default sanity cost of transmitting a message.
pub const DEFAULT_TRANSMIT_COST: u32 = 10;

/// Default length of the post-recovery celebration window.
pub const DEFAULT_RECOVERY_FLASH: Duration = Duration::from_millis(4000);

/// Default length of the chime sounded on a gesture recovery.
pub const DEFAULT_RECOVERY_CHIME: Duration = Duration::from_millis(1500);

/// Longest duration any field may hold.
pub const MAX_DURATION: Duration = Duration::from_secs(3600);

/// Physical key identity, independent of modifiers and keyboard layout case.
///
/// Letter codes are stored upper-case so `b` and `B` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyCode {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// A character key, upper-cased.
    Key(char),
}

impl KeyCode {
    /// Physical code of a character key.
    pub fn from_char(c: char) -> Self {
        Self::Key(c.to_ascii_uppercase())
    }

    /// Short glyph for hints (`↑`, `B`, ...).
    pub fn label(&self) -> String {
        match self {
            Self::ArrowUp => "↑".to_string(),
            Self::ArrowDown => "↓".to_string(),
            Self::ArrowLeft => "←".to_string(),
            Self::ArrowRight => "→".to_string(),
            Self::Key(c) => c.to_string(),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArrowUp => f.write_str("ArrowUp"),
            Self::ArrowDown => f.write_str("ArrowDown"),
            Self::ArrowLeft => f.write_str("ArrowLeft"),
            Self::ArrowRight => f.write_str("ArrowRight"),
            Self::Key(c) => write!(f, "{c}"),
        }
    }
}

impl From<KeyCode> for String {
    fn from(code: KeyCode) -> Self {
        code.to_string()
    }
}

impl TryFrom<String> for KeyCode {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        match name.as_str() {
            "ArrowUp" => Ok(Self::ArrowUp),
            "ArrowDown" => Ok(Self::ArrowDown),
            "ArrowLeft" => Ok(Self::ArrowLeft),
            "ArrowRight" => Ok(Self::ArrowRight),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Ok(Self::from_char(c)),
                    _ => Err(format!("unknown key {name:?}")),
                }
            },
        }
    }
}

/// Serde adapter writing a [`Duration`] as whole milliseconds.
pub(crate) mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// The classic up-up-down-down sequence.
pub fn konami_sequence() -> Vec<KeyCode> {
    vec![
        KeyCode::ArrowUp,
        KeyCode::ArrowUp,
        KeyCode::ArrowDown,
        KeyCode::ArrowDown,
        KeyCode::ArrowLeft,
        KeyCode::ArrowRight,
        KeyCode::ArrowLeft,
        KeyCode::ArrowRight,
        KeyCode::Key('B'),
        KeyCode::Key('A'),
    ]
}

/// All tunable constants of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Sanity at start and after every recovery.
    pub max_sanity: u32,
    /// How long a possession lasts before the watchdog ends it.
    #[serde(with = "duration_millis")]
    pub possession_duration: Duration,
    /// Sanity charged per transmission.
    pub transmit_cost: u32,
    /// How long `just_recovered` stays raised.
    #[serde(with = "duration_millis")]
    pub recovery_flash: Duration,
    /// Length of the chime sounded when a gesture ends a possession.
    #[serde(with = "duration_millis")]
    pub recovery_chime: Duration,

    /// Period of the ambient decay.
    #[serde(with = "duration_millis")]
    pub decay_interval: Duration,
    /// Sanity lost per ambient decay tick.
    pub decay_amount: u32,
    /// How often the rift condition is checked.
    #[serde(with = "duration_millis")]
    pub rift_check_interval: Duration,
    /// Minimum time between two rifts.
    #[serde(with = "duration_millis")]
    pub rift_interval: Duration,
    /// Sanity lost per rift.
    pub rift_amount: u32,
    /// How often the possession deadline is checked.
    #[serde(with = "duration_millis")]
    pub watchdog_interval: Duration,

    /// Sanity strictly below this (and above zero) sounds the alarm.
    pub alarm_threshold: u32,
    /// Period of the low sanity alarm.
    #[serde(with = "duration_millis")]
    pub alarm_interval: Duration,
    /// Length of one alarm tone.
    #[serde(with = "duration_millis")]
    pub alarm_tone: Duration,

    /// Maximum spacing between two clicks of one burst.
    #[serde(with = "duration_millis")]
    pub click_window: Duration,
    /// Clicks needed to complete a burst.
    pub clicks_required: u32,
    /// Ordered physical keys of the secret sequence.
    pub secret_sequence: Vec<KeyCode>,
    /// Word typed blind to recover.
    pub secret_word: String,

    /// Transmission timing.
    pub morse: MorseTiming,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sanity: DEFAULT_MAX_SANITY,
            possession_duration: DEFAULT_POSSESSION_DURATION,
            transmit_cost: DEFAULT_TRANSMIT_COST,
            recovery_flash: DEFAULT_RECOVERY_FLASH,
            recovery_chime: DEFAULT_RECOVERY_CHIME,
            decay_interval: Duration::from_secs(1),
            decay_amount: 1,
            rift_check_interval: Duration::from_secs(1),
            rift_interval: Duration::from_secs(20),
            rift_amount: 5,
            watchdog_interval: Duration::from_millis(100),
            alarm_threshold: 30,
            alarm_interval: Duration::from_millis(1500),
            alarm_tone: Duration::from_millis(150),
            click_window: Duration::from_millis(500),
            clicks_required: 3,
            secret_sequence: konami_sequence(),
            secret_word: "ELEVEN".to_string(),
            morse: MorseTiming::default(),
        }
    }
}

impl SessionConfig {
    /// Parse a TOML document and validate the result.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a playable session.
    ///
    /// Every duration must be at most [`MAX_DURATION`] so that deadlines
    /// computed from it stay representable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_sanity == 0 {
            return Err(ConfigError::InvalidMaxSanity(self.max_sanity));
        }

        let periods = [
            ("possession_duration", self.possession_duration),
            ("decay_interval", self.decay_interval),
            ("rift_check_interval", self.rift_check_interval),
            ("watchdog_interval", self.watchdog_interval),
            ("alarm_interval", self.alarm_interval),
            ("click_window", self.click_window),
            ("morse.dot", self.morse.dot),
            ("morse.dash", self.morse.dash),
        ];
        if let Some(&(field, _)) = periods.iter().find(|(_, d)| d.is_zero()) {
            return Err(ConfigError::ZeroDuration { field });
        }

        let others = [
            ("recovery_flash", self.recovery_flash),
            ("recovery_chime", self.recovery_chime),
            ("rift_interval", self.rift_interval),
            ("alarm_tone", self.alarm_tone),
            ("morse.symbol_gap", self.morse.symbol_gap),
            ("morse.letter_gap", self.morse.letter_gap),
            ("morse.word_gap", self.morse.word_gap),
        ];
        let too_long = periods.iter().chain(&others).find(|(_, d)| *d > MAX_DURATION);
        if let Some(&(field, _)) = too_long {
            return Err(ConfigError::DurationTooLong { field, max: MAX_DURATION });
        }

        if self.secret_sequence.is_empty() {
            return Err(ConfigError::EmptySequence);
        }

        if self.secret_word.is_empty() || self.secret_word.chars().any(char::is_control) {
            return Err(ConfigError::InvalidSecretWord(self.secret_word.clone()));
        }

        if self.clicks_required < 2 {
            return Err(ConfigError::InvalidClickCount(self.clicks_required));
        }

        Ok(())
    }

    /// Override the possession length.
    #[must_use]
    pub fn with_possession_duration(mut self, duration: Duration) -> Self {
        self.possession_duration = duration;
        self
    }
}
