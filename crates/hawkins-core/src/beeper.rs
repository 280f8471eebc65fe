//! Audio side channel.
//!
//! A [`Beeper`] is a fire-and-forget pulse generator. It has no error
//! contract: an implementation that cannot reach an audio device degrades to
//! silence instead of reporting a failure.

use std::time::Duration;

/// Emits audible pulses of a given length.
pub trait Beeper {
    /// Emit one pulse lasting `duration`. Must not block for the pulse length
    /// and must not fail.
    fn emit(&mut self, duration: Duration);
}

/// A beeper that never makes a sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Beeper for Silent {
    fn emit(&mut self, _duration: Duration) {}
}

impl<B: Beeper + ?Sized> Beeper for Box<B> {
    fn emit(&mut self, duration: Duration) {
        (**self).emit(duration);
    }
}
