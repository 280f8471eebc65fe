//! Deterministic simulation harness for the Hawkins signal terminal.
//!
//! A virtual-clock implementation of the Environment and Driver traits for
//! deterministic, reproducible testing of timing-heavy session behavior.
//! Thirty seconds of possession run in microseconds and land on the same
//! millisecond every time.
//!
//! # Scenarios
//!
//! [`Scenario`] scripts input at fixed virtual instants and runs the
//! production [`hawkins_app::Runtime`] against a [`SimDriver`], collecting
//! every rendered frame and every beep.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the session
//! invariants.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod beeper;
pub mod invariants;
pub mod scenario;
pub mod sim_driver;
pub mod sim_env;

pub use beeper::{Pulse, RecordingBeeper};
pub use invariants::{
    BlindBufferBounded, Invariant, InvariantRegistry, InvariantResult, KonamiProgressBounded,
    LetterOnlyWhileEncoding, PossessionDeadlineIffPossessed, SanityInRange, Snapshot, Violation,
};
pub use scenario::{Outcome, Scenario, ScenarioError};
pub use sim_driver::{SimDriver, SimDriverError};
pub use sim_env::{SimEnv, SimInstant};
