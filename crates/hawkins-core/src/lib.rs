//! Core primitives for the Hawkins signal terminal.
//!
//! Everything here is free of I/O: a clock abstraction that lets the same
//! session logic run against real time and virtual time, the Morse symbol
//! table and its timing, the session configuration, and the audio side
//! channel contract.
//!
//! # Components
//!
//! - [`env::Environment`]: time source and async sleep
//! - [`time::Timestamp`] and [`time::Periodic`]: instants and self
//!   resynchronising periodic timers
//! - [`morse`]: symbol table and transmission timing
//! - [`config::SessionConfig`]: every tunable constant of a session
//! - [`beeper::Beeper`]: fire-and-forget audio pulses

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod beeper;
pub mod config;
pub mod env;
pub mod error;
pub mod morse;
pub mod time;

pub use beeper::{Beeper, Silent};
pub use config::{KeyCode, SessionConfig};
pub use env::Environment;
pub use error::ConfigError;
pub use morse::{MorseTiming, Symbol};
pub use time::{Periodic, Timestamp};
