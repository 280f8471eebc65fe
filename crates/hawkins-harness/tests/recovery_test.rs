//! Recovery gesture tests.
//!
//! Each gesture is exercised against the session store on the virtual
//! timeline: it must recover exactly when possessed, and the three detectors
//! must never interfere with each other.

use std::sync::{Arc, Mutex};

use hawkins_app::{EndCause, Gesture, KeyInput, Session, SessionChange};
use hawkins_core::SessionConfig;
use hawkins_harness::SimInstant;

const KONAMI: [KeyInput; 10] = [
    KeyInput::Up,
    KeyInput::Up,
    KeyInput::Down,
    KeyInput::Down,
    KeyInput::Left,
    KeyInput::Right,
    KeyInput::Left,
    KeyInput::Right,
    KeyInput::Char('b'),
    KeyInput::Char('a'),
];

fn at(ms: u64) -> SimInstant {
    SimInstant::from_millis(ms)
}

fn possessed_session() -> Session<SimInstant> {
    let mut session = Session::new(SessionConfig::default(), at(0));
    session.drain_sanity(100, at(0));
    assert!(session.is_possessed());
    session
}

fn enter_konami(session: &mut Session<SimInstant>, now: SimInstant) {
    for key in KONAMI {
        session.handle_key_down(key, now);
    }
}

/// Collect every published change.
fn record(session: &mut Session<SimInstant>) -> Arc<Mutex<Vec<SessionChange<SimInstant>>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    session.subscribe(move |change| sink.lock().unwrap().push(change.clone()));
    log
}

#[test]
fn konami_recovers_when_possessed() {
    let mut session = possessed_session();
    let log = record(&mut session);

    enter_konami(&mut session, at(1000));

    assert!(!session.is_possessed());
    assert_eq!(session.sanity(), 100);
    assert!(session.just_recovered());
    assert!(log.lock().unwrap().contains(&SessionChange::PossessionEnded {
        cause: EndCause::Recovered(Gesture::KeySequence)
    }));
}

#[test]
fn konami_while_lucid_only_resets() {
    let mut session = Session::new(SessionConfig::default(), at(0));
    session.drain_sanity(20, at(0));

    enter_konami(&mut session, at(0));

    assert_eq!(session.sanity(), 80);
    assert_eq!(session.konami_progress(), 0);
    assert!(!session.just_recovered());
}

#[test]
fn wrong_key_resets_progress() {
    let mut session = possessed_session();
    for key in &KONAMI[..6] {
        session.handle_key_down(*key, at(0));
    }
    assert_eq!(session.konami_progress(), 6);

    session.handle_key_down(KeyInput::Char('z'), at(0));
    assert_eq!(session.konami_progress(), 0);
    assert!(session.is_possessed());
}

#[test]
fn konami_letters_ignore_case() {
    let mut session = possessed_session();
    for key in &KONAMI[..8] {
        session.handle_key_down(*key, at(0));
    }
    session.handle_key_down(KeyInput::Char('B'), at(0));
    session.handle_key_down(KeyInput::Char('A'), at(0));

    assert!(!session.is_possessed());
}

#[test]
fn consecutive_konami_sequences_both_recover() {
    let mut session = possessed_session();
    enter_konami(&mut session, at(0));
    assert!(!session.is_possessed());

    session.drain_sanity(100, at(500));
    assert!(session.is_possessed());

    // Progress was left at full by the first recovery; the next Up is a
    // mismatch that resets it, so the second run starts from scratch.
    enter_konami(&mut session, at(600));
    assert!(session.is_possessed());
    enter_konami(&mut session, at(700));
    assert!(!session.is_possessed());

    session.expire_recovery_flash(at(700 + 4000));
    assert_eq!(session.konami_progress(), 0);
    session.drain_sanity(100, at(5000));
    enter_konami(&mut session, at(5100));
    assert!(!session.is_possessed());
}

#[test]
fn flash_expiry_releases_progress() {
    let mut session = possessed_session();
    enter_konami(&mut session, at(0));
    assert_eq!(session.konami_progress(), 10);

    session.expire_recovery_flash(at(4000));
    assert!(!session.just_recovered());
    assert_eq!(session.konami_progress(), 0);
}

#[test]
fn blind_word_any_case_recovers() {
    let mut session = possessed_session();
    for c in "xqElEvEn".chars() {
        session.handle_key_press(c, at(0));
    }

    assert!(!session.is_possessed());
    assert_eq!(session.eleven_typed(), "ELEVEN");
}

#[test]
fn blind_word_while_lucid_does_nothing() {
    let mut session = Session::new(SessionConfig::default(), at(0));
    session.drain_sanity(30, at(0));
    for c in "eleven".chars() {
        session.handle_key_press(c, at(0));
    }

    assert_eq!(session.sanity(), 70);
    assert!(!session.just_recovered());
}

#[test]
fn fast_clicks_recover() {
    let mut session = possessed_session();
    session.handle_logo_click(at(0));
    session.handle_logo_click(at(200));
    assert!(session.is_possessed());
    session.handle_logo_click(at(400));

    assert!(!session.is_possessed());
    assert_eq!(session.logo_click_count(), 0);
}

#[test]
fn slow_clicks_do_not_recover() {
    let mut session = possessed_session();
    session.handle_logo_click(at(0));
    session.handle_logo_click(at(600));
    session.handle_logo_click(at(800));

    assert!(session.is_possessed());
    assert_eq!(session.logo_click_count(), 2);
}

#[test]
fn click_burst_while_lucid_resets_counter() {
    let mut session = Session::new(SessionConfig::default(), at(0));
    for ms in [0, 100, 200] {
        session.handle_logo_click(at(ms));
    }

    assert_eq!(session.logo_click_count(), 0);
    assert_eq!(session.sanity(), 100);
}

#[test]
fn detectors_do_not_reset_each_other() {
    let mut session = possessed_session();
    for key in &KONAMI[..4] {
        session.handle_key_down(*key, at(0));
    }
    session.handle_logo_click(at(0));
    for c in "elev".chars() {
        session.handle_key_press(c, at(0));
    }
    session.handle_logo_click(at(100));

    assert_eq!(session.konami_progress(), 4);
    assert_eq!(session.eleven_typed(), "ELEV");
    assert_eq!(session.logo_click_count(), 2);
}

#[test]
fn later_recovery_extends_flash() {
    let mut session = possessed_session();
    session.handle_logo_click(at(0));
    session.handle_logo_click(at(100));
    session.handle_logo_click(at(200));
    assert_eq!(session.recovery_flash_until(), Some(at(4200)));

    session.drain_sanity(100, at(1000));
    for c in "eleven".chars() {
        session.handle_key_press(c, at(3000));
    }

    session.expire_recovery_flash(at(4200));
    assert!(session.just_recovered(), "second recovery owns the window");
    session.expire_recovery_flash(at(7000));
    assert!(!session.just_recovered());
}

#[test]
fn possession_times_out() {
    let mut session = possessed_session();
    session.check_possession_timeout(at(29_999));
    assert!(session.is_possessed());

    session.check_possession_timeout(at(30_000));
    assert!(!session.is_possessed());
    assert_eq!(session.sanity(), 100);
    assert!(!session.just_recovered());
}
