//! Terminal UI for the Hawkins signal terminal
//!
//! A thin shell over [`hawkins_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`hawkins_app::Runtime`].
//!
//! This crate only handles the terminal, the system clock and audio.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod beeper;
pub mod system_env;
pub mod terminal;
pub mod ui;

#[cfg(feature = "audio")]
pub use beeper::ToneBeeper;
pub use beeper::TerminalBell;
pub use hawkins_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use system_env::SystemEnv;
pub use terminal::{TerminalDriver, TerminalError};
