//! Environment abstraction for deterministic testing.
//!
//! Decouples session logic from the system clock. Enables deterministic
//! simulation with a virtual clock and production use with real time.

use std::time::Duration;

use crate::time::Timestamp;

/// Abstract environment providing time and async sleeping.
///
/// # Invariants
///
/// Implementations MUST guarantee that `now()` never goes backwards.
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    ///
    /// Production environments use `std::time::Instant`, while simulation
    /// environments use a virtual instant that only moves when told to.
    type Instant: Timestamp;

    /// Current time (monotonic).
    ///
    /// Subsequent calls must return times >= previous calls.
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// Only driver code sleeps. Session logic takes `now` as a parameter and
    /// reports deadlines instead.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;

    /// Sleeps until `deadline`, returning immediately if it already passed.
    fn sleep_until(
        &self,
        deadline: Self::Instant,
    ) -> impl std::future::Future<Output = ()> + Send {
        let remaining = deadline.saturating_since(self.now());
        self.sleep(remaining)
    }
}
