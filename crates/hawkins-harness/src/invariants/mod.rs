//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during a session.
//! Unlike example-based tests that check specific scenarios, invariants
//! verify behavioral properties across all possible execution paths.
//!
//! # Architecture
//!
//! Checks run against a [`Snapshot`] of the session, taken after every step
//! of a simulation. Violations are collected with context for debugging.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! registry.check_all(&session.snapshot())?;
//! ```

mod checks;

pub use checks::{
    BlindBufferBounded, KonamiProgressBounded, LetterOnlyWhileEncoding,
    PossessionDeadlineIffPossessed, SanityInRange,
};
use hawkins_app::SessionSnapshot;

use crate::SimInstant;

/// Session state as seen by invariant checks.
pub type Snapshot = SessionSnapshot<SimInstant>;

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// An invariant that can be checked against session state.
///
/// Invariants are behavioral properties that must always hold.
/// They capture WHAT must be true, not specific test scenarios.
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant against the current state.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, state: &Snapshot) -> InvariantResult;

    /// Build a violation of this invariant.
    fn violation(&self, message: String) -> Violation {
        Violation { invariant: self.name(), message }
    }
}

/// Registry of invariants to check.
///
/// Collects multiple invariants and runs them all against session state.
/// Use [`InvariantRegistry::standard()`] for the session invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InvariantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.invariants.iter().map(|inv| inv.name())).finish()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the standard session invariants.
    ///
    /// Includes:
    /// - [`SanityInRange`]: `sanity <= max_sanity`
    /// - [`PossessionDeadlineIffPossessed`]: deadline present exactly while
    ///   possessed, and possession pins sanity at zero
    /// - [`LetterOnlyWhileEncoding`]: no lit bulb while idle
    /// - [`KonamiProgressBounded`]: progress never exceeds the sequence
    /// - [`BlindBufferBounded`]: the typed buffer never outgrows the word
    pub fn standard(secret_word_len: usize) -> Self {
        let mut registry = Self::new();
        registry.add(SanityInRange);
        registry.add(PossessionDeadlineIffPossessed);
        registry.add(LetterOnlyWhileEncoding);
        registry.add(KonamiProgressBounded);
        registry.add(BlindBufferBounded { max_len: secret_word_len });
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given state.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, state: &Snapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking on first violation.
    ///
    /// Use this in tests where you want immediate failure with context.
    pub fn assert_all(&self, state: &Snapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use hawkins_app::Session;
    use hawkins_core::SessionConfig;

    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        let registry = InvariantRegistry::standard(6);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn fresh_session_passes_invariants() {
        let registry = InvariantRegistry::standard(6);
        let session = Session::new(SessionConfig::default(), SimInstant::EPOCH);
        assert!(registry.check_all(&session.snapshot()).is_ok());
    }

    #[test]
    fn corrupted_snapshot_reports_every_violation() {
        let registry = InvariantRegistry::standard(6);
        let mut snapshot = Session::new(SessionConfig::default(), SimInstant::EPOCH).snapshot();
        snapshot.sanity = 150;
        snapshot.current_letter = Some('A');

        let violations = registry.check_all(&snapshot).unwrap_err();
        let names: Vec<_> = violations.iter().map(|v| v.invariant).collect();
        assert_eq!(names, vec!["sanity_in_range", "letter_only_while_encoding"]);
    }
}
