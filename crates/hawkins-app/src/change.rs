//! Session change notifications.
//!
//! Every public [`crate::Session`] operation collects the changes it makes and
//! publishes them to subscribers once the operation has fully completed, so a
//! subscriber never observes a half-applied update.

use crate::recovery::Gesture;

/// Why a possession ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCause {
    /// A recovery gesture matched.
    Recovered(Gesture),
    /// The possession deadline passed.
    TimedOut,
}

/// A state change published by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange<I> {
    /// Sanity moved.
    SanityChanged {
        /// Value before the change.
        from: u32,
        /// Value after the change.
        to: u32,
    },
    /// Sanity hit zero.
    PossessionStarted {
        /// When the watchdog will force recovery.
        ends_at: I,
    },
    /// Possession is over and sanity is full again.
    PossessionEnded {
        /// What ended it.
        cause: EndCause,
    },
    /// The post-recovery celebration window opened or closed.
    RecoveryFlash {
        /// Whether the window is open.
        active: bool,
    },
    /// The message text changed.
    MessageChanged,
    /// A transmission began.
    EncodingStarted,
    /// A transmission ended.
    EncodingFinished {
        /// Whether it was cancelled.
        aborted: bool,
    },
    /// The lit letter changed. `None` turns every bulb off.
    LetterChanged(Option<char>),
    /// Secret sequence progress changed.
    KonamiProgress(usize),
    /// A rift drained sanity.
    RiftOpened,
}
