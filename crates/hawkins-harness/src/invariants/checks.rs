//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use super::{Invariant, InvariantResult, Snapshot};

/// Sanity never exceeds its maximum.
///
/// The lower bound is the type's; this guards the upper clamp.
pub struct SanityInRange;

impl Invariant for SanityInRange {
    fn name(&self) -> &'static str {
        "sanity_in_range"
    }

    fn check(&self, state: &Snapshot) -> InvariantResult {
        if state.sanity > state.max_sanity {
            return Err(self.violation(format!(
                "sanity {} above maximum {}",
                state.sanity, state.max_sanity
            )));
        }
        Ok(())
    }
}

/// A possession deadline exists exactly while possessed.
///
/// Possession also pins sanity at zero: nothing drains it further and
/// nothing but recovery raises it.
pub struct PossessionDeadlineIffPossessed;

impl Invariant for PossessionDeadlineIffPossessed {
    fn name(&self) -> &'static str {
        "possession_deadline_iff_possessed"
    }

    fn check(&self, state: &Snapshot) -> InvariantResult {
        if state.possession_ends_at.is_some() != state.is_possessed {
            return Err(self.violation(format!(
                "is_possessed {} but possession_ends_at {:?}",
                state.is_possessed, state.possession_ends_at
            )));
        }
        if state.is_possessed && state.sanity != 0 {
            return Err(self.violation(format!("possessed with sanity {}", state.sanity)));
        }
        Ok(())
    }
}

/// A bulb is lit only while a transmission is in flight.
pub struct LetterOnlyWhileEncoding;

impl Invariant for LetterOnlyWhileEncoding {
    fn name(&self) -> &'static str {
        "letter_only_while_encoding"
    }

    fn check(&self, state: &Snapshot) -> InvariantResult {
        if let Some(letter) = state.current_letter
            && !state.is_encoding
        {
            return Err(self.violation(format!("letter {letter:?} lit while idle")));
        }
        Ok(())
    }
}

/// Secret sequence progress stays within the sequence.
pub struct KonamiProgressBounded;

impl Invariant for KonamiProgressBounded {
    fn name(&self) -> &'static str {
        "konami_progress_bounded"
    }

    fn check(&self, state: &Snapshot) -> InvariantResult {
        if state.konami_progress > state.konami_len {
            return Err(self.violation(format!(
                "progress {} beyond sequence length {}",
                state.konami_progress, state.konami_len
            )));
        }
        Ok(())
    }
}

/// The blind-typed buffer never holds more characters than the secret word.
pub struct BlindBufferBounded {
    /// Length of the secret word in characters.
    pub max_len: usize,
}

impl Invariant for BlindBufferBounded {
    fn name(&self) -> &'static str {
        "blind_buffer_bounded"
    }

    fn check(&self, state: &Snapshot) -> InvariantResult {
        let len = state.eleven_typed.chars().count();
        if len > self.max_len {
            return Err(self.violation(format!(
                "typed buffer {:?} holds {len} characters, limit {}",
                state.eleven_typed, self.max_len
            )));
        }
        Ok(())
    }
}
