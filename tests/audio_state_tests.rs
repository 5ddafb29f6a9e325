// Host-side tests for the background-music state machine.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod audio_state {
    include!("../src/core/audio_state.rs");
}

use audio_state::*;

fn blocked() -> PlaybackError {
    PlaybackError::NotAllowed("user didn't interact with the document first".into())
}

/// Controller after autoplay was refused and the gesture listener armed.
fn blocked_controller() -> AudioController {
    let mut c = AudioController::new();
    c.mount();
    let cmds = c.playback_resolved(PlayOrigin::Autoplay, Err(blocked()));
    assert_eq!(cmds.as_slice(), &[AudioCommand::ArmGestureListener]);
    c
}

#[test]
fn autoplay_success_goes_straight_to_playing() {
    let mut c = AudioController::new();
    c.mount();
    let cmds = c.playback_resolved(PlayOrigin::Autoplay, Ok(()));
    assert!(cmds.is_empty());
    assert_eq!(c.state(), AudioState::Playing);
    assert!(!c.gesture_armed());
}

#[test]
fn gestures_after_successful_autoplay_issue_no_play() {
    let mut c = AudioController::new();
    c.mount();
    c.playback_resolved(PlayOrigin::Autoplay, Ok(()));
    assert!(c.user_gesture().is_empty());
    assert!(c.user_gesture().is_empty());
    assert!(!c.gesture_armed());
    assert_eq!(c.state(), AudioState::Playing);
}

#[test]
fn autoplay_rejection_waits_for_interaction() {
    let c = blocked_controller();
    assert_eq!(c.state(), AudioState::BlockedPendingInteraction);
    assert!(c.gesture_armed());
    assert!(c.autoplay_attempted());
}

#[test]
fn first_gesture_retries_and_disarms_the_listener() {
    let mut c = blocked_controller();
    assert_eq!(
        c.user_gesture().as_slice(),
        &[AudioCommand::Play(PlayOrigin::Gesture)]
    );
    // a second gesture while the retry is pending does nothing
    assert!(c.user_gesture().is_empty());

    let cmds = c.playback_resolved(PlayOrigin::Gesture, Ok(()));
    assert_eq!(cmds.as_slice(), &[AudioCommand::DisarmGestureListener]);
    assert_eq!(c.state(), AudioState::Playing);
    assert!(!c.gesture_armed());

    assert!(c.user_gesture().is_empty());
}

#[test]
fn failed_gesture_retry_is_not_rearmed() {
    let mut c = blocked_controller();
    c.user_gesture();
    let cmds = c.playback_resolved(PlayOrigin::Gesture, Err(blocked()));
    assert_eq!(cmds.as_slice(), &[AudioCommand::DisarmGestureListener]);
    assert_eq!(c.state(), AudioState::BlockedPendingInteraction);
    assert!(c.user_gesture().is_empty());
}

#[test]
fn manual_toggle_pauses_and_resumes() {
    let mut c = AudioController::new();
    c.mount();
    c.playback_resolved(PlayOrigin::Autoplay, Ok(()));

    assert_eq!(c.toggle().as_slice(), &[AudioCommand::Pause]);
    assert_eq!(c.state(), AudioState::Paused);

    assert_eq!(c.toggle().as_slice(), &[AudioCommand::Play(PlayOrigin::Manual)]);
    assert!(c.playback_resolved(PlayOrigin::Manual, Ok(())).is_empty());
    assert_eq!(c.state(), AudioState::Playing);
}

#[test]
fn manual_play_from_blocked_state_disarms_gesture_listener() {
    let mut c = blocked_controller();
    assert_eq!(c.toggle().as_slice(), &[AudioCommand::Play(PlayOrigin::Manual)]);
    let cmds = c.playback_resolved(PlayOrigin::Manual, Ok(()));
    assert_eq!(cmds.as_slice(), &[AudioCommand::DisarmGestureListener]);
    assert!(c.is_playing());
}

#[test]
fn manual_failure_leaves_state_unchanged() {
    let mut c = AudioController::new();
    c.mount();
    c.playback_resolved(PlayOrigin::Autoplay, Ok(()));
    c.toggle();
    assert_eq!(c.state(), AudioState::Paused);

    c.toggle();
    let cmds = c.playback_resolved(
        PlayOrigin::Manual,
        Err(PlaybackError::Source("404".into())),
    );
    assert!(cmds.is_empty());
    assert_eq!(c.state(), AudioState::Paused);
}

#[test]
fn toggle_is_ignored_while_playback_is_pending() {
    let mut c = AudioController::new();
    c.mount();
    assert!(c.toggle().is_empty());
    assert_eq!(c.state(), AudioState::AutoplayAttempted);
}

#[test]
fn stale_results_are_ignored() {
    let mut c = AudioController::new();
    c.mount();
    assert!(c.playback_resolved(PlayOrigin::Manual, Ok(())).is_empty());
    assert_eq!(c.state(), AudioState::AutoplayAttempted);
}

#[test]
fn teardown_disarms_once() {
    let mut c = blocked_controller();
    assert_eq!(c.teardown().as_slice(), &[AudioCommand::DisarmGestureListener]);
    assert!(c.teardown().is_empty());
}

#[test]
fn teardown_pauses_a_playing_track() {
    let mut c = AudioController::new();
    c.mount();
    c.playback_resolved(PlayOrigin::Autoplay, Ok(()));

    assert_eq!(c.teardown().as_slice(), &[AudioCommand::Pause]);
    assert_eq!(c.state(), AudioState::Paused);
    assert!(!c.is_playing());

    // a single press resumes afterwards
    assert_eq!(c.toggle().as_slice(), &[AudioCommand::Play(PlayOrigin::Manual)]);
}

#[test]
fn teardown_abandons_a_pending_play() {
    let mut c = AudioController::new();
    c.mount();
    assert_eq!(c.teardown().as_slice(), &[AudioCommand::Pause]);
    assert!(c.playback_resolved(PlayOrigin::Autoplay, Ok(())).is_empty());
    assert_eq!(c.state(), AudioState::Paused);
}

#[test]
fn teardown_during_gesture_retry_disarms_and_pauses() {
    let mut c = blocked_controller();
    c.user_gesture();
    assert_eq!(
        c.teardown().as_slice(),
        &[AudioCommand::DisarmGestureListener, AudioCommand::Pause]
    );
    assert!(c.playback_resolved(PlayOrigin::Gesture, Ok(())).is_empty());
    assert!(!c.is_playing());
}
