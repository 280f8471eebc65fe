//! Recovery gesture detectors.
//!
//! Three independent matchers watch raw input. None of them touches the
//! session: each reports a match and the [`crate::Session`] decides whether
//! the match recovers anything. They never share progress, so feeding one
//! never resets another.

use std::time::Duration;

use hawkins_core::{KeyCode, Timestamp};

/// Which gesture ended a possession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// The secret key sequence.
    KeySequence,
    /// A burst of clicks on the hidden logo.
    ClickBurst,
    /// The secret word typed blind.
    SecretWord,
}

/// Outcome of feeding one key to a [`SequenceMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStep {
    /// Mismatch while already at zero progress.
    Ignored,
    /// Key matched; progress is now this many keys.
    Advanced(usize),
    /// Mismatch after partial progress; progress is back to zero.
    Reset,
    /// The final key matched.
    Completed,
}

/// Prefix matcher for an ordered sequence of physical keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceMatcher {
    sequence: Vec<KeyCode>,
    progress: usize,
}

impl SequenceMatcher {
    /// Create a matcher for `sequence`.
    pub fn new(sequence: Vec<KeyCode>) -> Self {
        Self { sequence, progress: 0 }
    }

    /// Feed one physical key.
    ///
    /// After [`SequenceStep::Completed`] progress stays at the full length
    /// until [`Self::reset`] or the next mismatch.
    pub fn feed(&mut self, code: KeyCode) -> SequenceStep {
        if self.sequence.get(self.progress) == Some(&code) {
            self.progress += 1;
            if self.progress == self.sequence.len() {
                SequenceStep::Completed
            } else {
                SequenceStep::Advanced(self.progress)
            }
        } else {
            self.interrupt()
        }
    }

    /// Feed a key that has no physical code (Enter, Esc, ...).
    pub fn interrupt(&mut self) -> SequenceStep {
        if self.progress > 0 {
            self.progress = 0;
            SequenceStep::Reset
        } else {
            SequenceStep::Ignored
        }
    }

    /// Forget all progress.
    pub fn reset(&mut self) {
        self.progress = 0;
    }

    /// Number of keys matched so far.
    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Whether the whole sequence is currently matched.
    pub fn is_complete(&self) -> bool {
        self.progress == self.sequence.len()
    }

    /// The sequence being matched.
    pub fn sequence(&self) -> &[KeyCode] {
        &self.sequence
    }
}

/// Counts clicks that arrive within a rolling window of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickBurst<I> {
    window: Duration,
    required: u32,
    count: u32,
    last: Option<I>,
}

impl<I: Timestamp> ClickBurst<I> {
    /// Create a detector that fires after `required` clicks each less than
    /// `window` after the previous one.
    pub fn new(window: Duration, required: u32) -> Self {
        Self { window, required, count: 0, last: None }
    }

    /// Register a click. Returns `true` when it completes a burst.
    ///
    /// A completed burst resets the count. A click at or beyond the window
    /// starts a new burst at one.
    pub fn click(&mut self, now: I) -> bool {
        let within = self.last.is_some_and(|last| now.saturating_since(last) < self.window);
        if !within {
            self.count = 1;
            self.last = Some(now);
            return false;
        }

        if self.count + 1 >= self.required {
            self.count = 0;
            return true;
        }

        self.count += 1;
        self.last = Some(now);
        false
    }

    /// Clicks counted in the current burst.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Time of the last counted click. `None` before the first click.
    pub fn last_click(&self) -> Option<I> {
        self.last
    }
}

/// Rolling buffer matching the most recent characters against a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlindWord {
    word: String,
    len: usize,
    typed: String,
}

impl BlindWord {
    /// Create a matcher for `word`, compared case-insensitively.
    pub fn new(word: &str) -> Self {
        let word = word.to_uppercase();
        let len = word.chars().count();
        Self { word, len, typed: String::new() }
    }

    /// Append a typed character. Returns `true` if the trailing characters now
    /// spell the word.
    pub fn push(&mut self, c: char) -> bool {
        self.typed.extend(c.to_uppercase());

        let excess = self.typed.chars().count().saturating_sub(self.len);
        if excess > 0 {
            let cut = self.typed.char_indices().nth(excess).map_or(self.typed.len(), |(i, _)| i);
            self.typed.drain(..cut);
        }

        self.typed == self.word
    }

    /// The most recent characters, upper-cased.
    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// The word being matched, upper-cased.
    pub fn word(&self) -> &str {
        &self.word
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use hawkins_core::config::konami_sequence;

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn sequence_advances_and_completes() {
        let mut matcher = SequenceMatcher::new(konami_sequence());
        let keys = konami_sequence();

        for (i, key) in keys.iter().take(9).enumerate() {
            assert_eq!(matcher.feed(*key), SequenceStep::Advanced(i + 1));
        }
        assert_eq!(matcher.feed(KeyCode::Key('A')), SequenceStep::Completed);
        assert!(matcher.is_complete());
    }

    #[test]
    fn sequence_mismatch_resets_to_zero() {
        let mut matcher = SequenceMatcher::new(konami_sequence());
        matcher.feed(KeyCode::ArrowUp);
        matcher.feed(KeyCode::ArrowUp);

        // A third Up is a mismatch, not a fresh start at one.
        assert_eq!(matcher.feed(KeyCode::ArrowUp), SequenceStep::Reset);
        assert_eq!(matcher.progress(), 0);
    }

    #[test]
    fn sequence_mismatch_at_zero_is_ignored() {
        let mut matcher = SequenceMatcher::new(konami_sequence());
        assert_eq!(matcher.feed(KeyCode::Key('X')), SequenceStep::Ignored);
        assert_eq!(matcher.interrupt(), SequenceStep::Ignored);
    }

    #[test]
    fn burst_of_three_fast_clicks_fires() {
        let t0 = Instant::now();
        let mut burst = ClickBurst::new(ms(500), 3);

        assert!(!burst.click(t0));
        assert!(!burst.click(t0 + ms(200)));
        assert!(burst.click(t0 + ms(400)));
        assert_eq!(burst.count(), 0);
    }

    #[test]
    fn slow_click_restarts_burst() {
        let t0 = Instant::now();
        let mut burst = ClickBurst::new(ms(500), 3);

        assert!(!burst.click(t0));
        assert!(!burst.click(t0 + ms(600)));
        assert_eq!(burst.count(), 1);
        assert!(!burst.click(t0 + ms(800)));
        assert_eq!(burst.count(), 2);
    }

    #[test]
    fn click_exactly_at_window_restarts() {
        let t0 = Instant::now();
        let mut burst = ClickBurst::new(ms(500), 3);

        burst.click(t0);
        burst.click(t0 + ms(500));
        assert_eq!(burst.count(), 1);
    }

    #[test]
    fn blind_word_keeps_trailing_characters() {
        let mut word = BlindWord::new("ELEVEN");
        for c in "xxelev".chars() {
            assert!(!word.push(c));
        }
        assert_eq!(word.typed(), "XXELEV");
        assert!(!word.push('e'));
        assert!(word.push('N'));
        assert_eq!(word.typed(), "ELEVEN");
    }

    #[test]
    fn blind_word_buffer_is_bounded() {
        let mut word = BlindWord::new("ELEVEN");
        for c in "the quick brown fox".chars() {
            word.push(c);
            assert!(word.typed().chars().count() <= 6);
        }
    }
}
