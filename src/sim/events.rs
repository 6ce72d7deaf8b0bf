//! Events the simulation hands to its collaborators
//!
//! The core only decides *when* something should be heard or shown. The
//! platform shell drains these after each frame and forwards them to the
//! audio manager and the DOM overlay.

use serde::{Deserialize, Serialize};

use crate::input::Direction;

/// Sound requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    /// Start (or resume) the looping background track
    MusicStart,
    /// Pause the background track, keeping its position
    MusicPause,
    /// Stop the background track and rewind it
    MusicStopRewind,
    /// Play the death cue; it cuts itself after `DEATH_CUE_DURATION_MS`
    DeathCuePlay,
    /// Cut the death cue early and rewind it (player restarted quickly)
    DeathCueStopRewind,
}

/// HUD and overlay requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    ScoreChanged(u64),
    LivesChanged(u8),
    HighScoreChanged(u64),
    ShowPaused,
    ShowLifeLost,
    ShowGameOver { final_score: u64, high_score: u64 },
    HideOverlay,
    /// On-screen control button feedback for a held movement key
    ControlHighlighted { direction: Direction, active: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Audio(AudioCue),
    Ui(UiEvent),
}

impl From<AudioCue> for GameEvent {
    fn from(cue: AudioCue) -> Self {
        GameEvent::Audio(cue)
    }
}

impl From<UiEvent> for GameEvent {
    fn from(event: UiEvent) -> Self {
        GameEvent::Ui(event)
    }
}
