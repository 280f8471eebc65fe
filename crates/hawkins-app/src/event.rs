//! Application input events.
//!
//! This module defines [`AppEvent`], the complete set of inputs that drive
//! the [`crate::App`] state machine. Events come from the user (keyboard,
//! mouse, resize) and from the runtime (ticks, shutdown).

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Click on the hidden logo target.
    LogoClick,

    /// A deadline passed with no input.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// The frontend is going away (Ctrl-C, closed terminal).
    Shutdown,
}
