//! Error types for the Hawkins core.
//!
//! Session operations never fail: precondition violations are ignored and
//! logged. The only fallible surface in this crate is configuration
//! loading and validation.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by [`crate::SessionConfig::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A timer period or duration was zero.
    #[error("{field} must be greater than zero")]
    ZeroDuration {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A duration exceeded the longest supported value.
    #[error("{field} must be at most {max:?}")]
    DurationTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// The bound it exceeded.
        max: Duration,
    },

    /// A configuration document could not be parsed.
    #[error("invalid config: {0}")]
    Parse(String),

    /// The recovery key sequence is empty.
    #[error("secret key sequence is empty")]
    EmptySequence,

    /// The blind-typed secret word is empty or contains non-printable
    /// characters.
    #[error("secret word must be non-empty printable text, got {0:?}")]
    InvalidSecretWord(String),

    /// Sanity bounds are inconsistent.
    #[error("max sanity must be at least 1, got {0}")]
    InvalidMaxSanity(u32),

    /// The click burst needs at least two clicks to be a burst.
    #[error("click burst needs at least 2 clicks, got {0}")]
    InvalidClickCount(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = ConfigError::ZeroDuration { field: "decay_interval" };
        assert_eq!(err.to_string(), "decay_interval must be greater than zero");
    }

    #[test]
    fn too_long_names_the_bound() {
        let err =
            ConfigError::DurationTooLong { field: "morse.dash", max: Duration::from_secs(3600) };
        assert_eq!(err.to_string(), "morse.dash must be at most 3600s");
    }

    #[test]
    fn secret_word_error_quotes_input() {
        let err = ConfigError::InvalidSecretWord(String::new());
        assert_eq!(err.to_string(), "secret word must be non-empty printable text, got \"\"");
    }
}
