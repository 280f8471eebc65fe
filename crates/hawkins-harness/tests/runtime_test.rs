//! End-to-end session behavior through the production runtime.
//!
//! # Test Strategy
//!
//! Each test scripts what a user does at the terminal (typing, clicking the
//! logo, doing nothing at all) on the virtual clock, then checks the rendered
//! frames and recorded tones. Invariants are checked on every frame.

use std::time::Duration;

use hawkins_app::{AppEvent, KeyInput};
use hawkins_core::SessionConfig;
use hawkins_harness::{Scenario, SimInstant};

fn at(ms: u64) -> SimInstant {
    SimInstant::from_millis(ms)
}

/// A config whose decay reaches possession two seconds in.
fn fast_decay() -> SessionConfig {
    SessionConfig { decay_amount: 50, ..SessionConfig::default() }
}

#[tokio::test(flavor = "current_thread")]
async fn idle_session_decays_into_possession_and_times_out() {
    let outcome = Scenario::new().until(115_000).run().await.unwrap();

    assert_eq!(outcome.sanity_at(1000), Some(99));
    // Rift and decay together at twenty seconds.
    assert_eq!(outcome.sanity_at(20_000), Some(75));

    let possessed = outcome.first_frame_where(|s| s.is_possessed);
    assert_eq!(possessed, Some(at(80_000)));

    let recovered = outcome.frames.iter().find(|(t, s)| *t > at(80_000) && !s.is_possessed);
    let (when, snapshot) = recovered.unwrap();
    assert_eq!(*when, at(110_000));
    assert_eq!(snapshot.sanity, 100);
    assert!(!snapshot.just_recovered, "timeouts get no celebration");

    // Decay resumes one interval after recovery. The rift reference is still
    // the pre-possession rift, so the first check after recovery opens one.
    assert_eq!(outcome.sanity_at(111_000), Some(94));
}

#[tokio::test(flavor = "current_thread")]
async fn alarm_repeats_while_critical() {
    let outcome = Scenario::new().until(85_000).run().await.unwrap();

    // Sanity first drops below thirty at sixty seconds and hits zero at eighty.
    assert_eq!(outcome.alarm.first().map(|p| p.at), Some(at(60_000)));
    assert_eq!(outcome.alarm.len(), 14);
    assert!(outcome.alarm.iter().all(|p| p.duration == Duration::from_millis(150)));
    assert!(outcome.alarm.windows(2).all(|w| w[1].at - w[0].at == Duration::from_millis(1500)));
}

#[tokio::test(flavor = "current_thread")]
async fn possession_screen_counts_down() {
    let outcome = Scenario::new().config(fast_decay()).until(4000).run().await.unwrap();

    let possessed_frames =
        outcome.frames.iter().filter(|(t, s)| *t >= at(2000) && s.is_possessed).count();
    // One frame per watchdog tick.
    assert!(possessed_frames >= 20, "only {possessed_frames} frames while possessed");
}

#[tokio::test(flavor = "current_thread")]
async fn logo_clicks_recover() {
    let outcome = Scenario::new()
        .config(fast_decay())
        .click(2500)
        .click(2700)
        .click(2900)
        .until(4000)
        .run()
        .await
        .unwrap();

    let recovered = outcome.first_frame_where(|s| s.just_recovered);
    assert_eq!(recovered, Some(at(2900)));

    let session = outcome.app.session();
    assert!(!session.is_possessed());
    // Decay restarted one interval after recovery.
    assert_eq!(session.sanity(), 50);
}

#[tokio::test(flavor = "current_thread")]
async fn gesture_recovery_chimes_once() {
    let outcome = Scenario::new()
        .config(fast_decay())
        .click(2500)
        .click(2700)
        .click(2900)
        .type_text(3000, "eleven")
        .until(4000)
        .run()
        .await
        .unwrap();

    // Sanity never sat in the warning band, so the chime is the only tone.
    assert_eq!(outcome.alarm.len(), 1);
    assert_eq!(outcome.alarm[0].at, at(2900));
    assert_eq!(outcome.alarm[0].duration, SessionConfig::default().recovery_chime);
}

#[tokio::test(flavor = "current_thread")]
async fn slow_logo_clicks_do_not_recover() {
    let outcome = Scenario::new()
        .config(fast_decay())
        .click(2500)
        .click(3100)
        .click(3300)
        .until(4000)
        .run()
        .await
        .unwrap();

    assert!(outcome.app.session().is_possessed());
}

#[tokio::test(flavor = "current_thread")]
async fn konami_recovers_through_the_terminal() {
    let keys = [
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
    let scenario = keys
        .into_iter()
        .fold(Scenario::new().config(fast_decay()), |scenario, key| scenario.key(3000, key));
    let outcome = scenario.until(3500).run().await.unwrap();

    let session = outcome.app.session();
    assert!(!session.is_possessed());
    assert!(session.just_recovered());
    assert_eq!(session.konami_progress(), 10);
    // Gesture keys typed while possessed never reach the message.
    assert_eq!(session.message(), "");
}

#[tokio::test(flavor = "current_thread")]
async fn eleven_recovers_and_stays_off_the_message() {
    let outcome = Scenario::new()
        .config(fast_decay())
        .type_text(500, "hi")
        .type_text(2500, "eleven")
        .until(3000)
        .run()
        .await
        .unwrap();

    let session = outcome.app.session();
    assert!(!session.is_possessed());
    assert_eq!(session.message(), "HI");
}

#[tokio::test(flavor = "current_thread")]
async fn custom_possession_length() {
    let config = fast_decay().with_possession_duration(Duration::from_secs(5));
    let outcome = Scenario::new().config(config).until(8000).run().await.unwrap();

    let recovered = outcome.frames.iter().find(|(t, s)| *t > at(2000) && !s.is_possessed);
    assert_eq!(recovered.map(|(t, _)| *t), Some(at(7000)));
}

#[tokio::test(flavor = "current_thread")]
async fn esc_when_idle_quits() {
    let outcome = Scenario::new().key(500, KeyInput::Esc).until(10_000).run().await.unwrap();
    assert_eq!(outcome.ended_at, at(500));
}

#[tokio::test(flavor = "current_thread")]
async fn shutdown_stops_transmission() {
    let outcome = Scenario::new()
        .type_text(0, "sos")
        .key(0, KeyInput::Enter)
        .event(300, AppEvent::Shutdown)
        .until(10_000)
        .run()
        .await
        .unwrap();

    assert_eq!(outcome.ended_at, at(300));
    assert_eq!(outcome.signal.len(), 1);
}
