//! Session state store.
//!
//! [`Session`] is the single source of truth of a run: sanity, possession,
//! the message being transmitted and the progress of every recovery gesture.
//! All mutation goes through the named operations below. Like every state
//! machine in this workspace it performs no I/O and never reads a clock; time
//! is passed in.
//!
//! # State Machine
//!
//! ```text
//!              drain to 0                     gesture / deadline
//! ┌────────┐ ───────────> ┌───────────┐ ─────────────────────> ┌────────┐
//! │ Lucid  │              │ Possessed │                        │ Lucid  │
//! │ 0<s≤100│ <─────────── │   s = 0   │                        │ s = max│
//! └────────┘              └───────────┘                        └────────┘
//! ```
//!
//! # Invariants
//!
//! - `0 <= sanity <= max_sanity`
//! - `possession_ends_at.is_some() == is_possessed()`
//! - possessed implies `sanity == 0`
//! - `current_letter.is_some()` implies `is_encoding()`
//!
//! Precondition violations (ending a possession that never started, lighting
//! a letter while idle, overlapping transmissions) are ignored and logged at
//! debug level. No operation fails.

use std::time::Duration;

use hawkins_core::{SessionConfig, Timestamp};

use crate::{
    KeyInput,
    change::{EndCause, SessionChange},
    recovery::{BlindWord, ClickBurst, Gesture, SequenceMatcher, SequenceStep},
};

/// Handle returned by [`Session::subscribe`].
pub type SubscriptionId = u64;

type Subscriber<I> = Box<dyn FnMut(&SessionChange<I>) + Send>;

/// Plain copy of every session field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot<I> {
    /// Current sanity.
    pub sanity: u32,
    /// Upper bound of sanity.
    pub max_sanity: u32,
    /// Whether the session is possessed.
    pub is_possessed: bool,
    /// Possession deadline. `None` when lucid.
    pub possession_ends_at: Option<I>,
    /// Message text (upper-case).
    pub message: String,
    /// Whether a transmission is in flight.
    pub is_encoding: bool,
    /// Lit letter. `None` when dark.
    pub current_letter: Option<char>,
    /// When the last rift fired.
    pub last_rift_time: I,
    /// Matched prefix length of the secret sequence.
    pub konami_progress: usize,
    /// Length of the secret sequence.
    pub konami_len: usize,
    /// Trailing typed characters.
    pub eleven_typed: String,
    /// Clicks in the current burst.
    pub logo_click_count: u32,
    /// Time of the last counted click.
    pub last_logo_click: Option<I>,
    /// Whether the recovery celebration is showing.
    pub just_recovered: bool,
}

/// Session state store.
pub struct Session<I> {
    config: SessionConfig,
    sanity: u32,
    /// Possession deadline. Present exactly while possessed.
    possession_ends_at: Option<I>,
    message: String,
    is_encoding: bool,
    current_letter: Option<char>,
    /// Reference for the rift interval. Starts at creation, not at the
    /// epoch, so the first rift check never opens a rift.
    last_rift_time: I,
    konami: SequenceMatcher,
    eleven: BlindWord,
    logo: ClickBurst<I>,
    /// `just_recovered` is raised while this deadline is pending.
    recovery_flash_until: Option<I>,
    revision: u64,
    pending: Vec<SessionChange<I>>,
    subscribers: Vec<(SubscriptionId, Subscriber<I>)>,
    next_subscription: SubscriptionId,
}

impl<I: Timestamp> Session<I> {
    /// Create a lucid session at full sanity.
    ///
    /// The rift reference starts at `now`, so the first rift comes one full
    /// rift interval into the session rather than on the first check.
    pub fn new(config: SessionConfig, now: I) -> Self {
        let konami = SequenceMatcher::new(config.secret_sequence.clone());
        let eleven = BlindWord::new(&config.secret_word);
        let logo = ClickBurst::new(config.click_window, config.clicks_required);

        Self {
            sanity: config.max_sanity,
            possession_ends_at: None,
            message: String::new(),
            is_encoding: false,
            current_letter: None,
            last_rift_time: now,
            konami,
            eleven,
            logo,
            recovery_flash_until: None,
            revision: 0,
            pending: Vec::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
            config,
        }
    }

    /// Register a callback invoked once per published change.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&SessionChange<I>) + Send + 'static,
    ) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns `false` if the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Subtract `amount` from sanity, entering possession at zero.
    ///
    /// No-op while possessed.
    pub fn drain_sanity(&mut self, amount: u32, now: I) {
        self.drain(amount, now);
        self.publish();
    }

    /// Enter possession until `now + possession_duration`.
    ///
    /// Ignored if already possessed. Sanity is forced to zero.
    pub fn start_possession(&mut self, now: I) {
        self.possess(now);
        self.publish();
    }

    /// Leave possession and restore full sanity.
    ///
    /// This is the only path back to full sanity.
    pub fn end_possession(&mut self, cause: EndCause) {
        self.release(cause);
        self.publish();
    }

    /// Charge the transmission cost.
    ///
    /// No-op if the message is blank or a transmission is in flight.
    pub fn send_message(&mut self, now: I) {
        if self.message.trim().is_empty() {
            tracing::debug!("send_message ignored: blank message");
            return;
        }
        if self.is_encoding {
            tracing::debug!("send_message ignored: transmission in flight");
            return;
        }
        self.drain(self.config.transmit_cost, now);
        self.publish();
    }

    /// Replace the message. Stored upper-case.
    pub fn set_message(&mut self, text: &str) {
        let upper = text.to_uppercase();
        if upper != self.message {
            self.message = upper;
            self.pending.push(SessionChange::MessageChanged);
        }
        self.publish();
    }

    /// Feed a key-down event to the secret sequence matcher.
    ///
    /// A full match while possessed recovers and holds progress at full until
    /// the celebration window closes. A full match while lucid silently
    /// resets.
    pub fn handle_key_down(&mut self, key: KeyInput, now: I) {
        let step = match key.code() {
            Some(code) => self.konami.feed(code),
            None => self.konami.interrupt(),
        };

        match step {
            SequenceStep::Ignored => {},
            SequenceStep::Advanced(progress) => {
                self.pending.push(SessionChange::KonamiProgress(progress));
            },
            SequenceStep::Reset => self.pending.push(SessionChange::KonamiProgress(0)),
            SequenceStep::Completed => {
                self.pending.push(SessionChange::KonamiProgress(self.konami.progress()));
                if !self.recover(Gesture::KeySequence, now) {
                    tracing::debug!("secret sequence entered while lucid");
                    self.konami.reset();
                    self.pending.push(SessionChange::KonamiProgress(0));
                }
            },
        }
        self.publish();
    }

    /// Feed a typed character to the blind word matcher.
    pub fn handle_key_press(&mut self, c: char, now: I) {
        if self.eleven.push(c) {
            self.recover(Gesture::SecretWord, now);
        }
        self.publish();
    }

    /// Feed a click on the hidden logo to the burst detector.
    pub fn handle_logo_click(&mut self, now: I) {
        if self.logo.click(now) && !self.recover(Gesture::ClickBurst, now) {
            tracing::debug!("click burst while lucid");
        }
        self.publish();
    }

    /// Mark a transmission as started. Returns `false` if one is in flight.
    pub fn begin_encoding(&mut self) -> bool {
        if self.is_encoding {
            tracing::debug!("begin_encoding ignored: transmission in flight");
            return false;
        }
        self.is_encoding = true;
        self.pending.push(SessionChange::EncodingStarted);
        self.publish();
        true
    }

    /// Light `letter`, or turn all bulbs off with `None`.
    ///
    /// Lighting a letter while no transmission is in flight is ignored.
    pub fn set_current_letter(&mut self, letter: Option<char>) {
        if letter.is_some() && !self.is_encoding {
            tracing::debug!(?letter, "set_current_letter ignored: not encoding");
            return;
        }
        self.light(letter);
        self.publish();
    }

    /// Mark the transmission as over and turn the bulbs off.
    pub fn finish_encoding(&mut self, aborted: bool) {
        if !self.is_encoding {
            tracing::debug!("finish_encoding ignored: not encoding");
            return;
        }
        self.light(None);
        self.is_encoding = false;
        self.pending.push(SessionChange::EncodingFinished { aborted });
        self.publish();
    }

    /// Open a rift if one rift interval has passed since the last.
    ///
    /// The reference moves to `now` on firing, so a late check delays every
    /// later rift by the same amount.
    pub fn check_rift(&mut self, now: I) {
        if self.is_possessed() {
            return;
        }
        if now.saturating_since(self.last_rift_time) >= self.config.rift_interval {
            tracing::debug!(amount = self.config.rift_amount, "rift opened");
            self.pending.push(SessionChange::RiftOpened);
            self.drain(self.config.rift_amount, now);
            self.last_rift_time = now;
        }
        self.publish();
    }

    /// End the possession if its deadline has passed.
    pub fn check_possession_timeout(&mut self, now: I) {
        if self.possession_ends_at.is_some_and(|ends_at| now >= ends_at) {
            self.release(EndCause::TimedOut);
        }
        self.publish();
    }

    /// Close the celebration window once its deadline has passed.
    pub fn expire_recovery_flash(&mut self, now: I) {
        if self.recovery_flash_until.is_some_and(|until| now >= until) {
            self.recovery_flash_until = None;
            self.pending.push(SessionChange::RecoveryFlash { active: false });
            if self.konami.is_complete() {
                self.konami.reset();
                self.pending.push(SessionChange::KonamiProgress(0));
            }
        }
        self.publish();
    }

    fn drain(&mut self, amount: u32, now: I) {
        if self.is_possessed() {
            tracing::debug!(amount, "drain ignored: possessed");
            return;
        }
        let to = self.sanity.saturating_sub(amount);
        self.set_sanity(to);
        if to == 0 {
            self.possess(now);
        }
    }

    fn possess(&mut self, now: I) {
        if self.is_possessed() {
            tracing::debug!("start_possession ignored: already possessed");
            return;
        }
        let ends_at = now + self.config.possession_duration;
        self.possession_ends_at = Some(ends_at);
        self.set_sanity(0);
        tracing::info!(duration = ?self.config.possession_duration, "possession started");
        self.pending.push(SessionChange::PossessionStarted { ends_at });
    }

    fn release(&mut self, cause: EndCause) {
        let was_possessed = self.possession_ends_at.take().is_some();
        self.set_sanity(self.config.max_sanity);
        if was_possessed {
            tracing::info!(?cause, "possession ended");
            self.pending.push(SessionChange::PossessionEnded { cause });
        } else {
            tracing::debug!(?cause, "end_possession while lucid");
        }
    }

    /// Recover through `gesture` if possessed. Returns whether it did.
    fn recover(&mut self, gesture: Gesture, now: I) -> bool {
        if !self.is_possessed() {
            return false;
        }
        self.release(EndCause::Recovered(gesture));
        if self.recovery_flash_until.is_none() {
            self.pending.push(SessionChange::RecoveryFlash { active: true });
        }
        self.recovery_flash_until = Some(now + self.config.recovery_flash);
        true
    }

    fn set_sanity(&mut self, value: u32) {
        let to = value.min(self.config.max_sanity);
        if to != self.sanity {
            self.pending.push(SessionChange::SanityChanged { from: self.sanity, to });
            self.sanity = to;
        }
    }

    fn light(&mut self, letter: Option<char>) {
        if letter != self.current_letter {
            self.current_letter = letter;
            self.pending.push(SessionChange::LetterChanged(letter));
        }
    }

    /// Deliver collected changes to subscribers.
    fn publish(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        self.revision += 1;
        let changes = std::mem::take(&mut self.pending);
        for change in &changes {
            for (_, subscriber) in &mut self.subscribers {
                subscriber(change);
            }
        }
    }

    /// Configuration this session runs with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current sanity.
    pub fn sanity(&self) -> u32 {
        self.sanity
    }

    /// Upper bound of sanity.
    pub fn max_sanity(&self) -> u32 {
        self.config.max_sanity
    }

    /// Whether the session is possessed.
    pub fn is_possessed(&self) -> bool {
        self.possession_ends_at.is_some()
    }

    /// Possession deadline. `None` when lucid.
    pub fn possession_ends_at(&self) -> Option<I> {
        self.possession_ends_at
    }

    /// Time left in the possession. `None` when lucid.
    pub fn possession_remaining(&self, now: I) -> Option<Duration> {
        self.possession_ends_at.map(|ends_at| ends_at.saturating_since(now))
    }

    /// Time spent possessed so far. `None` when lucid.
    pub fn possession_elapsed(&self, now: I) -> Option<Duration> {
        self.possession_remaining(now)
            .map(|remaining| self.config.possession_duration.saturating_sub(remaining))
    }

    /// Message text (upper-case).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether a transmission is in flight.
    pub fn is_encoding(&self) -> bool {
        self.is_encoding
    }

    /// Lit letter. `None` when dark.
    pub fn current_letter(&self) -> Option<char> {
        self.current_letter
    }

    /// When the last rift fired (session start before the first).
    pub fn last_rift_time(&self) -> I {
        self.last_rift_time
    }

    /// Matched prefix length of the secret sequence.
    pub fn konami_progress(&self) -> usize {
        self.konami.progress()
    }

    /// The secret sequence.
    pub fn konami_sequence(&self) -> &[hawkins_core::KeyCode] {
        self.konami.sequence()
    }

    /// Trailing typed characters (upper-case).
    pub fn eleven_typed(&self) -> &str {
        self.eleven.typed()
    }

    /// Clicks in the current burst.
    pub fn logo_click_count(&self) -> u32 {
        self.logo.count()
    }

    /// Time of the last counted click.
    pub fn last_logo_click(&self) -> Option<I> {
        self.logo.last_click()
    }

    /// Whether the recovery celebration is showing.
    pub fn just_recovered(&self) -> bool {
        self.recovery_flash_until.is_some()
    }

    /// When the celebration window closes. `None` if not showing.
    pub fn recovery_flash_until(&self) -> Option<I> {
        self.recovery_flash_until
    }

    /// Counter bumped after every operation that changed state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Copy every field.
    pub fn snapshot(&self) -> SessionSnapshot<I> {
        SessionSnapshot {
            sanity: self.sanity,
            max_sanity: self.config.max_sanity,
            is_possessed: self.is_possessed(),
            possession_ends_at: self.possession_ends_at,
            message: self.message.clone(),
            is_encoding: self.is_encoding,
            current_letter: self.current_letter,
            last_rift_time: self.last_rift_time,
            konami_progress: self.konami.progress(),
            konami_len: self.konami.sequence().len(),
            eleven_typed: self.eleven.typed().to_string(),
            logo_click_count: self.logo.count(),
            last_logo_click: self.logo.last_click(),
            just_recovered: self.just_recovered(),
        }
    }
}

impl<I: std::fmt::Debug> std::fmt::Debug for Session<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("sanity", &self.sanity)
            .field("possession_ends_at", &self.possession_ends_at)
            .field("message", &self.message)
            .field("is_encoding", &self.is_encoding)
            .field("current_letter", &self.current_letter)
            .field("konami", &self.konami)
            .field("eleven", &self.eleven)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}
