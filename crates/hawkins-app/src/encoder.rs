//! Morse transmission.
//!
//! A transmission is a chain of timed waits. Instead of sleeping, the encoder
//! records when it must next wake up; the runtime polls it at or after that
//! instant and each poll performs every step that has become due.
//!
//! # State Machine
//!
//! ```text
//! ┌──────┐ encode_message ┌──────────┐ text exhausted ┌──────┐
//! │ Idle │ ─────────────> │ Encoding │ ─────────────> │ Idle │
//! └──────┘                └──────────┘                └──────┘
//!                              │ cancelled, next checkpoint ↑
//!                              └────────────────────────────┘
//! ```
//!
//! Cancellation is checked before every character and before every symbol.
//! A wait that is already running always runs to its end.

use std::time::Duration;

use hawkins_core::{Beeper, MorseTiming, Symbol, Timestamp, morse};
use tokio_util::sync::CancellationToken;

use crate::Session;

/// Converts messages into timed beeps and lit letters.
#[derive(Debug)]
pub struct MorseEncoder<I, B> {
    timing: MorseTiming,
    beeper: B,
    transmission: Option<Transmission<I>>,
}

/// The single in-flight transmission.
#[derive(Debug)]
struct Transmission<I> {
    text: Vec<char>,
    next_char: usize,
    symbols: Vec<Symbol>,
    next_symbol: usize,
    wake_at: I,
    cancel: CancellationToken,
}

impl<I: Timestamp, B: Beeper> MorseEncoder<I, B> {
    /// Create an idle encoder emitting pulses through `beeper`.
    pub fn new(timing: MorseTiming, beeper: B) -> Self {
        Self { timing, beeper, transmission: None }
    }

    /// Start transmitting `text`.
    ///
    /// Charges the transmission cost through [`Session::send_message`] and
    /// marks the session as encoding. Returns `false` without touching
    /// anything if the text is blank or a transmission is already in flight.
    pub fn encode_message(&mut self, text: &str, session: &mut Session<I>, now: I) -> bool {
        if self.transmission.is_some() || session.is_encoding() {
            tracing::debug!("encode_message rejected: transmission in flight");
            return false;
        }
        if text.trim().is_empty() {
            tracing::debug!("encode_message rejected: blank text");
            return false;
        }

        session.send_message(now);
        if !session.begin_encoding() {
            return false;
        }

        let text: Vec<char> = text.to_uppercase().chars().collect();
        tracing::info!(chars = text.len(), "transmission started");
        self.transmission = Some(Transmission {
            text,
            next_char: 0,
            symbols: Vec::new(),
            next_symbol: 0,
            wake_at: now,
            cancel: CancellationToken::new(),
        });
        self.poll(now, session);
        true
    }

    /// Request cancellation. Takes effect at the next checkpoint.
    pub fn stop_encoding(&mut self) {
        if let Some(transmission) = &self.transmission {
            tracing::debug!("transmission cancellation requested");
            transmission.cancel.cancel();
        }
    }

    /// Token cancelling the in-flight transmission, if any.
    pub fn cancel_token(&self) -> Option<CancellationToken> {
        self.transmission.as_ref().map(|t| t.cancel.clone())
    }

    /// Whether a transmission is in flight.
    pub fn is_active(&self) -> bool {
        self.transmission.is_some()
    }

    /// When the encoder must next be polled. `None` when idle.
    pub fn next_deadline(&self) -> Option<I> {
        self.transmission.as_ref().map(|t| t.wake_at)
    }

    /// The pulse sink.
    pub fn beeper(&self) -> &B {
        &self.beeper
    }

    /// Run every step that is due at `now`.
    pub fn poll(&mut self, now: I, session: &mut Session<I>) {
        loop {
            let Some(transmission) = self.transmission.as_mut() else {
                return;
            };
            if now < transmission.wake_at {
                return;
            }

            if transmission.cancel.is_cancelled() {
                self.finish(session, true);
                return;
            }

            if let Some(&symbol) = transmission.symbols.get(transmission.next_symbol) {
                transmission.next_symbol += 1;
                let hold = self.timing.hold(symbol);
                self.beeper.emit(hold);

                let mut wait = hold + self.timing.symbol_gap;
                if transmission.next_symbol == transmission.symbols.len() {
                    wait += self.timing.letter_gap;
                }
                transmission.wake_at = now + wait;
                continue;
            }

            let Some(&c) = transmission.text.get(transmission.next_char) else {
                self.finish(session, false);
                return;
            };
            transmission.next_char += 1;

            if c == ' ' {
                session.set_current_letter(None);
                transmission.wake_at = now + self.timing.word_gap;
            } else if morse::is_supported(c) {
                session.set_current_letter(Some(c));
                transmission.symbols = morse::symbols(c).collect();
                transmission.next_symbol = 0;
                transmission.wake_at = now;
            } else {
                tracing::debug!(?c, "skipping untransmittable character");
                transmission.wake_at = now;
            }
        }
    }

    fn finish(&mut self, session: &mut Session<I>, aborted: bool) {
        self.transmission = None;
        session.set_current_letter(None);
        session.finish_encoding(aborted);
        tracing::info!(aborted, "transmission finished");
    }

    /// Airtime of `text` with no cancellation.
    pub fn airtime(&self, text: &str) -> Duration {
        text.to_uppercase()
            .chars()
            .map(|c| {
                if c == ' ' {
                    self.timing.word_gap
                } else if morse::is_supported(c) {
                    self.timing.letter_duration(c)
                } else {
                    Duration::ZERO
                }
            })
            .sum()
    }
}
