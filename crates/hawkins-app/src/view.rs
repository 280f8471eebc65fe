//! Presentation-level derivations of session state.
//!
//! Frontends render from these instead of re-deriving thresholds, so the
//! terminal UI and the simulation harness agree on what the screen shows.

use std::time::Duration;

use hawkins_core::Timestamp;

use crate::Session;

/// Letters on the wall, one string per row.
pub const WALL_ROWS: [&str; 3] = ["ABCDEFGH", "IJKLMNOPQ", "RSTUVWXYZ"];

/// Sanity below which the rift warning shows.
pub const RIFT_WARNING_BELOW: u32 = 30;

/// Sanity at or below which the screen bleeds.
pub const BLOOD_AT_OR_BELOW: u32 = 15;

/// How long the possession screen stays pitch black before the reveal.
pub const BLACKOUT: Duration = Duration::from_secs(3);

/// Coarse sanity classification shown next to the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanityBand {
    /// 70 and above.
    Stable,
    /// 40 to 69.
    Unstable,
    /// 1 to 39.
    Critical,
    /// Zero.
    Possessed,
}

impl SanityBand {
    /// Classify a sanity value.
    pub fn of(sanity: u32) -> Self {
        match sanity {
            70.. => Self::Stable,
            40..=69 => Self::Unstable,
            1..=39 => Self::Critical,
            0 => Self::Possessed,
        }
    }

    /// Label shown next to the meter.
    pub fn label(self) -> &'static str {
        match self {
            Self::Stable => "STABLE",
            Self::Unstable => "UNSTABLE",
            Self::Critical => "CRITICAL - DEMOGORGON PROXIMITY",
            Self::Possessed => "POSSESSED",
        }
    }
}

/// Soundtrack volumes in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbienceMix {
    /// Theme music volume.
    pub anthem: f32,
    /// Upside-down ambience volume.
    pub ambience: f32,
}

impl AmbienceMix {
    /// Crossfade toward the ambience as sanity falls under 30.
    pub fn for_sanity(sanity: u32, possessed: bool) -> Self {
        if possessed {
            return Self { anthem: 0.0, ambience: 0.8 };
        }
        if sanity <= 30 {
            let ratio = (30 - sanity) as f32 / 30.0;
            return Self { anthem: 0.4 * (1.0 - ratio), ambience: (0.6 * ratio).min(1.0) };
        }
        Self { anthem: 0.4, ambience: 0.0 }
    }
}

/// Bulb tint, cycling along the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulbColor {
    /// Red.
    Red,
    /// Orange.
    Orange,
    /// Yellow.
    Yellow,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Pink.
    Pink,
}

impl BulbColor {
    const CYCLE: [Self; 6] =
        [Self::Red, Self::Orange, Self::Yellow, Self::Green, Self::Blue, Self::Pink];

    /// Tint of the bulb for `letter`. `None` if the wall has no such bulb.
    pub fn of(letter: char) -> Option<Self> {
        let index = wall_index(letter)?;
        Some(Self::CYCLE[index % Self::CYCLE.len()])
    }
}

/// Position of `letter` along the wall, row by row.
pub fn wall_index(letter: char) -> Option<usize> {
    WALL_ROWS.iter().flat_map(|row| row.chars()).position(|c| c == letter)
}

/// Whether the rift warning shows.
pub fn rift_warning<I: Timestamp>(session: &Session<I>) -> bool {
    let sanity = session.sanity();
    !session.is_possessed() && sanity > 0 && sanity < RIFT_WARNING_BELOW
}

/// Whether the screen bleeds.
pub fn blood_overlay<I: Timestamp>(session: &Session<I>) -> bool {
    !session.is_possessed() && session.sanity() <= BLOOD_AT_OR_BELOW
}

/// Whether the possession screen has passed its blackout.
pub fn possession_revealed<I: Timestamp>(session: &Session<I>, now: I) -> bool {
    session.possession_elapsed(now).is_some_and(|elapsed| elapsed >= BLACKOUT)
}

/// Whole seconds left in the possession, rounded up.
pub fn seconds_remaining<I: Timestamp>(session: &Session<I>, now: I) -> Option<u64> {
    session.possession_remaining(now).map(|left| left.as_millis().div_ceil(1000) as u64)
}

/// Hint line for the secret sequence.
///
/// While lucid, the matched prefix (`CODE: ↑ ↑`) or nothing. While possessed,
/// `GATE CLOSING: [n/10]`.
pub fn sequence_hint<I: Timestamp>(session: &Session<I>) -> Option<String> {
    let progress = session.konami_progress();
    if session.is_possessed() {
        let total = session.konami_sequence().len();
        return Some(format!("GATE CLOSING: [{progress}/{total}]"));
    }
    if progress == 0 {
        return None;
    }
    let keys: Vec<String> =
        session.konami_sequence().iter().take(progress).map(|code| code.label()).collect();
    Some(format!("CODE: {}", keys.join(" ")))
}
