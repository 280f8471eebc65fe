//! Terminal-agnostic keyboard input.

use hawkins_core::KeyCode;

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key (transmit).
    Enter,
    /// Backspace key.
    Backspace,
    /// Escape key (abort transmission, or quit when idle).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
}

impl KeyInput {
    /// Physical key code used by the secret sequence matcher.
    ///
    /// `None` for keys that can never be part of a sequence.
    pub fn code(self) -> Option<KeyCode> {
        match self {
            Self::Up => Some(KeyCode::ArrowUp),
            Self::Down => Some(KeyCode::ArrowDown),
            Self::Left => Some(KeyCode::ArrowLeft),
            Self::Right => Some(KeyCode::ArrowRight),
            Self::Char(c) => Some(KeyCode::from_char(c)),
            Self::Enter | Self::Backspace | Self::Esc => None,
        }
    }

    /// Printable character carried by this key, if any.
    pub fn printable(self) -> Option<char> {
        match self {
            Self::Char(c) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}
