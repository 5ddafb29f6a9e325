// Background-music state machine.
//
// The controller performs no I/O. Each operation returns the commands the
// browser glue must run (start playback, pause, arm or disarm the gesture
// listener), and the outcome of every playback promise is fed back through
// `playback_resolved`.

use smallvec::{smallvec, SmallVec};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioState {
    Idle,
    AutoplayAttempted,
    BlockedPendingInteraction,
    Playing,
    Paused,
}

/// Who asked for playback; decides which fallback applies on rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOrigin {
    Autoplay,
    Gesture,
    Manual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCommand {
    Play(PlayOrigin),
    Pause,
    ArmGestureListener,
    DisarmGestureListener,
}

pub type Commands = SmallVec<[AudioCommand; 2]>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("playback blocked by autoplay policy: {0}")]
    NotAllowed(String),
    #[error("audio source unavailable: {0}")]
    Source(String),
    #[error("playback failed: {0}")]
    Other(String),
}

impl PlaybackError {
    /// Classify a DOMException name as reported by `HTMLMediaElement.play()`.
    pub fn from_dom_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => PlaybackError::NotAllowed(message.to_string()),
            "NotSupportedError" | "AbortError" => PlaybackError::Source(message.to_string()),
            _ => PlaybackError::Other(message.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct AudioController {
    state: AudioState,
    autoplay_attempted: bool,
    gesture_armed: bool,
    in_flight: Option<PlayOrigin>,
}

impl Default for AudioController {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioController {
    pub fn new() -> Self {
        Self {
            state: AudioState::Idle,
            autoplay_attempted: false,
            gesture_armed: false,
            in_flight: None,
        }
    }

    pub fn state(&self) -> AudioState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == AudioState::Playing
    }

    pub fn autoplay_attempted(&self) -> bool {
        self.autoplay_attempted
    }

    pub fn gesture_armed(&self) -> bool {
        self.gesture_armed
    }

    /// First call attempts autoplay; later calls do nothing.
    pub fn mount(&mut self) -> Commands {
        if self.autoplay_attempted {
            return Commands::new();
        }
        self.autoplay_attempted = true;
        self.state = AudioState::AutoplayAttempted;
        self.in_flight = Some(PlayOrigin::Autoplay);
        smallvec![AudioCommand::Play(PlayOrigin::Autoplay)]
    }

    /// A pointer-down or key-down anywhere on the page.
    pub fn user_gesture(&mut self) -> Commands {
        if !self.gesture_armed
            || self.in_flight.is_some()
            || self.state != AudioState::BlockedPendingInteraction
        {
            return Commands::new();
        }
        self.in_flight = Some(PlayOrigin::Gesture);
        smallvec![AudioCommand::Play(PlayOrigin::Gesture)]
    }

    /// The play/pause button (or `m`).
    pub fn toggle(&mut self) -> Commands {
        if self.in_flight.is_some() {
            return Commands::new();
        }
        if self.state == AudioState::Playing {
            self.state = AudioState::Paused;
            return smallvec![AudioCommand::Pause];
        }
        self.in_flight = Some(PlayOrigin::Manual);
        smallvec![AudioCommand::Play(PlayOrigin::Manual)]
    }

    /// Feed back the outcome of a `Play` command.
    pub fn playback_resolved(
        &mut self,
        origin: PlayOrigin,
        result: Result<(), PlaybackError>,
    ) -> Commands {
        if self.in_flight != Some(origin) {
            log::debug!("[audio] ignoring stale {:?} playback result", origin);
            return Commands::new();
        }
        self.in_flight = None;
        let mut out = Commands::new();
        match (origin, result) {
            (PlayOrigin::Autoplay, Ok(())) => {
                self.state = AudioState::Playing;
                log::info!("[audio] autoplay started");
            }
            (PlayOrigin::Autoplay, Err(e)) => {
                log::warn!("[audio] autoplay rejected, waiting for interaction: {}", e);
                self.state = AudioState::BlockedPendingInteraction;
                self.gesture_armed = true;
                out.push(AudioCommand::ArmGestureListener);
            }
            (PlayOrigin::Gesture, result) => {
                // one shot: the listener never fires twice
                self.disarm_into(&mut out);
                match result {
                    Ok(()) => {
                        self.state = AudioState::Playing;
                        log::info!("[audio] playback started after interaction");
                    }
                    Err(e) => {
                        log::warn!("[audio] playback still blocked after interaction: {}", e);
                    }
                }
            }
            (PlayOrigin::Manual, Ok(())) => {
                self.disarm_into(&mut out);
                self.state = AudioState::Playing;
            }
            (PlayOrigin::Manual, Err(e)) => {
                log::error!("[audio] manual playback failed: {}", e);
            }
        }
        out
    }

    /// Scene teardown: silence the track and make sure no listener
    /// outlives the scene. A pending play is abandoned, so its result is
    /// ignored when it arrives.
    pub fn teardown(&mut self) -> Commands {
        let mut out = Commands::new();
        self.disarm_into(&mut out);
        if self.state == AudioState::Playing || self.in_flight.take().is_some() {
            self.state = AudioState::Paused;
            out.push(AudioCommand::Pause);
        }
        out
    }

    fn disarm_into(&mut self, out: &mut Commands) {
        if self.gesture_armed {
            self.gesture_armed = false;
            out.push(AudioCommand::DisarmGestureListener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_only_attempts_autoplay_once() {
        let mut c = AudioController::new();
        assert_eq!(c.mount().as_slice(), &[AudioCommand::Play(PlayOrigin::Autoplay)]);
        assert!(c.mount().is_empty());
        assert_eq!(c.state(), AudioState::AutoplayAttempted);
    }

    #[test]
    fn dom_error_names_are_classified() {
        assert!(matches!(
            PlaybackError::from_dom_name("NotAllowedError", "x"),
            PlaybackError::NotAllowed(_)
        ));
        assert!(matches!(
            PlaybackError::from_dom_name("AbortError", "x"),
            PlaybackError::Source(_)
        ));
        assert!(matches!(
            PlaybackError::from_dom_name("Weird", "x"),
            PlaybackError::Other(_)
        ));
    }
}
