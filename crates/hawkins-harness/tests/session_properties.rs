//! Property-based tests for the session store.
//!
//! Tests verify that invariants hold under arbitrary operation sequences.
//! This ensures behavioral correctness across all possible execution paths.

use std::time::Duration;

use hawkins_app::{EndCause, KeyInput, Session};
use hawkins_core::SessionConfig;
use hawkins_harness::{InvariantRegistry, SimInstant};
use proptest::prelude::*;

/// One step applied to the session.
#[derive(Debug, Clone)]
enum Op {
    Advance(u64),
    Drain(u32),
    StartPossession,
    EndPossession,
    SetMessage(String),
    Send,
    KeyDown(KeyInput),
    KeyPress(char),
    LogoClick,
    BeginEncoding,
    Letter(Option<char>),
    FinishEncoding(bool),
    CheckRift,
    CheckTimeout,
    ExpireFlash,
}

fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        Just(KeyInput::Up),
        Just(KeyInput::Down),
        Just(KeyInput::Left),
        Just(KeyInput::Right),
        Just(KeyInput::Enter),
        Just(KeyInput::Esc),
        prop::sample::select(vec!['a', 'b', 'B', 'x']).prop_map(KeyInput::Char),
    ]
}

/// Generate random session operations.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u64..3000).prop_map(Op::Advance),
        3 => (0u32..40).prop_map(Op::Drain),
        1 => Just(Op::StartPossession),
        1 => Just(Op::EndPossession),
        1 => "[a-z ]{0,6}".prop_map(Op::SetMessage),
        2 => Just(Op::Send),
        3 => key_strategy().prop_map(Op::KeyDown),
        2 => prop::sample::select(vec!['e', 'l', 'v', 'n', 'E', 'q']).prop_map(Op::KeyPress),
        2 => Just(Op::LogoClick),
        1 => Just(Op::BeginEncoding),
        1 => prop::option::of(prop::sample::select(vec!['A', 'S', 'O'])).prop_map(Op::Letter),
        1 => any::<bool>().prop_map(Op::FinishEncoding),
        2 => Just(Op::CheckRift),
        2 => Just(Op::CheckTimeout),
        1 => Just(Op::ExpireFlash),
    ]
}

fn apply(session: &mut Session<SimInstant>, now: &mut SimInstant, op: &Op) {
    match op {
        Op::Advance(ms) => *now += Duration::from_millis(*ms),
        Op::Drain(amount) => session.drain_sanity(*amount, *now),
        Op::StartPossession => session.start_possession(*now),
        Op::EndPossession => session.end_possession(EndCause::TimedOut),
        Op::SetMessage(text) => session.set_message(text),
        Op::Send => session.send_message(*now),
        Op::KeyDown(key) => session.handle_key_down(*key, *now),
        Op::KeyPress(c) => session.handle_key_press(*c, *now),
        Op::LogoClick => session.handle_logo_click(*now),
        Op::BeginEncoding => {
            session.begin_encoding();
        },
        Op::Letter(letter) => session.set_current_letter(*letter),
        Op::FinishEncoding(aborted) => session.finish_encoding(*aborted),
        Op::CheckRift => session.check_rift(*now),
        Op::CheckTimeout => session.check_possession_timeout(*now),
        Op::ExpireFlash => session.expire_recovery_flash(*now),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Invariants hold after every operation.
    #[test]
    fn invariants_hold(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let registry = InvariantRegistry::standard(6);
        let mut now = SimInstant::EPOCH;
        let mut session = Session::new(SessionConfig::default(), now);

        for (i, op) in ops.iter().enumerate() {
            apply(&mut session, &mut now, op);
            registry.assert_all(&session.snapshot(), &format!("after op {i}: {op:?}"));
        }
    }

    /// Sanity only rises by leaving possession.
    #[test]
    fn sanity_falls_until_possession(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut now = SimInstant::EPOCH;
        let mut session = Session::new(SessionConfig::default(), now);

        for op in &ops {
            let before = session.snapshot();
            apply(&mut session, &mut now, op);
            let after = session.snapshot();

            if matches!(op, Op::EndPossession) || before.is_possessed {
                continue;
            }
            prop_assert!(
                after.sanity <= before.sanity,
                "{op:?} raised sanity {} -> {}", before.sanity, after.sanity
            );
        }
    }

    /// Draining sanity to zero possesses with a deadline thirty seconds out.
    #[test]
    fn zero_sanity_possesses(
        drains in prop::collection::vec(1u32..30, 1..20),
        offset in 0u64..100_000,
    ) {
        let now = SimInstant::from_millis(offset);
        let mut session = Session::new(SessionConfig::default(), SimInstant::EPOCH);

        for amount in drains {
            let was_possessed = session.is_possessed();
            session.drain_sanity(amount, now);
            if was_possessed {
                prop_assert_eq!(session.sanity(), 0);
            }
        }

        prop_assert_eq!(session.is_possessed(), session.sanity() == 0);
        if session.is_possessed() {
            prop_assert_eq!(session.possession_ends_at(), Some(now + Duration::from_secs(30)));
        }
    }

    /// Ending a possession always restores full sanity.
    #[test]
    fn end_possession_restores_full(drain in 0u32..150) {
        let mut session = Session::new(SessionConfig::default(), SimInstant::EPOCH);
        session.drain_sanity(drain, SimInstant::EPOCH);
        session.end_possession(EndCause::TimedOut);

        prop_assert_eq!(session.sanity(), 100);
        prop_assert!(!session.is_possessed());
        prop_assert_eq!(session.possession_ends_at(), None);
    }
}
