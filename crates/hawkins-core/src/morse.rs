//! International Morse symbol table and transmission timing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::duration_millis;

/// A single Morse symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Short pulse.
    Dot,
    /// Long pulse.
    Dash,
}

impl Symbol {
    /// Parse a pattern character (`.` or `-`).
    fn from_pattern(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Dot),
            '-' => Some(Self::Dash),
            _ => None,
        }
    }
}

/// Letters and digits with their dot/dash patterns.
const TABLE: [(char, &str); 36] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
];

/// Dot/dash pattern for an upper-case letter or digit.
///
/// Returns `None` for anything outside the table, including space and
/// lower-case letters.
pub fn pattern(c: char) -> Option<&'static str> {
    TABLE.iter().find(|(letter, _)| *letter == c).map(|(_, pattern)| *pattern)
}

/// Symbols for an upper-case letter or digit. Empty if unsupported.
pub fn symbols(c: char) -> impl Iterator<Item = Symbol> {
    pattern(c).unwrap_or("").chars().filter_map(Symbol::from_pattern)
}

/// Whether `c` can be transmitted.
pub fn is_supported(c: char) -> bool {
    pattern(c).is_some()
}

/// Delays of a transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorseTiming {
    /// How long a dot is held.
    #[serde(with = "duration_millis")]
    pub dot: Duration,
    /// How long a dash is held.
    #[serde(with = "duration_millis")]
    pub dash: Duration,
    /// Silence after every symbol.
    #[serde(with = "duration_millis")]
    pub symbol_gap: Duration,
    /// Silence after the last symbol of a letter.
    #[serde(with = "duration_millis")]
    pub letter_gap: Duration,
    /// Pause for a space character.
    #[serde(with = "duration_millis")]
    pub word_gap: Duration,
}

impl MorseTiming {
    /// Hold time of a symbol.
    pub fn hold(&self, symbol: Symbol) -> Duration {
        match symbol {
            Symbol::Dot => self.dot,
            Symbol::Dash => self.dash,
        }
    }

    /// Total airtime of one letter including its trailing letter gap.
    pub fn letter_duration(&self, c: char) -> Duration {
        symbols(c).map(|s| self.hold(s) + self.symbol_gap).sum::<Duration>() + self.letter_gap
    }
}

impl Default for MorseTiming {
    fn default() -> Self {
        Self {
            dot: Duration::from_millis(200),
            dash: Duration::from_millis(600),
            symbol_gap: Duration::from_millis(200),
            letter_gap: Duration::from_millis(300),
            word_gap: Duration::from_millis(700),
        }
    }
}
