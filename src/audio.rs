//! Audio playback for the two game tracks
//!
//! The simulation only raises [`AudioCue`]s. `AudioManager` turns them into
//! playback state for the looping background music and the one-shot death
//! cue, and drives `<audio>` elements when running in the browser. Natively
//! the state is tracked and logged but nothing is heard.

use crate::consts::DEATH_CUE_DURATION_MS;
use crate::settings::Settings;
use crate::sim::events::AudioCue;

/// Background loop
pub const MUSIC_SRC: &str = "./bit.mp3";
/// Played once when a life is lost
pub const DEATH_CUE_SRC: &str = "./Dead.mp3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Playback {
    /// Not playing, position at the start
    #[default]
    Stopped,
    Playing,
    /// Not playing, position kept
    Paused,
}

/// Audio manager for the game
pub struct AudioManager {
    music: Playback,
    death_cue: Playback,
    /// When the death cue started, for the automatic cut
    death_started_ms: Option<f64>,
    music_volume: f32,
    sfx_volume: f32,
    #[cfg(target_arch = "wasm32")]
    elements: Option<web::Elements>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        #[cfg(target_arch = "wasm32")]
        let elements = web::Elements::create(settings);

        Self {
            music: Playback::Stopped,
            death_cue: Playback::Stopped,
            death_started_ms: None,
            music_volume: settings.effective_music_volume(),
            sfx_volume: settings.effective_sfx_volume(),
            #[cfg(target_arch = "wasm32")]
            elements,
        }
    }

    pub fn music(&self) -> Playback {
        self.music
    }

    pub fn death_cue(&self) -> Playback {
        self.death_cue
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    /// React to a cue raised at `now_ms`
    pub fn handle(&mut self, cue: AudioCue, now_ms: f64) {
        log::debug!("Audio cue {:?}", cue);
        match cue {
            AudioCue::MusicStart => {
                self.music = Playback::Playing;
                self.apply(Track::Music, Op::Play);
            }
            AudioCue::MusicPause => {
                if self.music == Playback::Playing {
                    self.music = Playback::Paused;
                }
                self.apply(Track::Music, Op::Pause);
            }
            AudioCue::MusicStopRewind => {
                self.music = Playback::Stopped;
                self.apply(Track::Music, Op::StopRewind);
            }
            AudioCue::DeathCuePlay => {
                self.death_cue = Playback::Playing;
                self.death_started_ms = Some(now_ms);
                self.apply(Track::DeathCue, Op::Play);
            }
            AudioCue::DeathCueStopRewind => self.stop_death_cue(),
        }
    }

    /// Cut the death cue once it has played long enough
    pub fn update(&mut self, now_ms: f64) {
        if let Some(started) = self.death_started_ms {
            if now_ms - started >= f64::from(DEATH_CUE_DURATION_MS) {
                self.stop_death_cue();
            }
        }
    }

    fn stop_death_cue(&mut self) {
        self.death_cue = Playback::Stopped;
        self.death_started_ms = None;
        self.apply(Track::DeathCue, Op::StopRewind);
    }

    #[cfg(target_arch = "wasm32")]
    fn apply(&self, track: Track, op: Op) {
        let Some(elements) = &self.elements else {
            return;
        };
        let el = match track {
            Track::Music => &elements.music,
            Track::DeathCue => &elements.death_cue,
        };
        match op {
            Op::Play => web::play(el),
            Op::Pause => web::pause(el),
            Op::StopRewind => web::stop_rewind(el),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn apply(&self, track: Track, op: Op) {
        log::trace!("{:?}: {:?}", track, op);
    }
}

#[derive(Debug, Clone, Copy)]
enum Track {
    Music,
    DeathCue,
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Play,
    Pause,
    StopRewind,
}

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::HtmlAudioElement;

    use super::{DEATH_CUE_SRC, MUSIC_SRC};
    use crate::settings::Settings;

    pub(super) struct Elements {
        pub music: HtmlAudioElement,
        pub death_cue: HtmlAudioElement,
    }

    impl Elements {
        pub fn create(settings: &Settings) -> Option<Self> {
            let music = HtmlAudioElement::new_with_src(MUSIC_SRC).ok();
            let death_cue = HtmlAudioElement::new_with_src(DEATH_CUE_SRC).ok();
            let (Some(music), Some(death_cue)) = (music, death_cue) else {
                log::warn!("Failed to create audio elements - audio disabled");
                return None;
            };

            music.set_loop(true);
            music.set_volume(f64::from(settings.effective_music_volume()));
            death_cue.set_volume(f64::from(settings.effective_sfx_volume()));
            Some(Self { music, death_cue })
        }
    }

    pub fn play(el: &HtmlAudioElement) {
        // Autoplay may be refused before the first user gesture
        if let Err(e) = el.play() {
            log::warn!("Audio play failed: {:?}", e);
        }
    }

    pub fn pause(el: &HtmlAudioElement) {
        if let Err(e) = el.pause() {
            log::warn!("Audio pause failed: {:?}", e);
        }
    }

    pub fn stop_rewind(el: &HtmlAudioElement) {
        pause(el);
        el.set_current_time(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_pause_resume_and_rewind() {
        let mut audio = AudioManager::new(&Settings::default());
        assert_eq!(audio.music(), Playback::Stopped);

        audio.handle(AudioCue::MusicPause, 0.0);
        assert_eq!(audio.music(), Playback::Stopped);

        audio.handle(AudioCue::MusicStart, 0.0);
        audio.handle(AudioCue::MusicPause, 10.0);
        assert_eq!(audio.music(), Playback::Paused);

        audio.handle(AudioCue::MusicStart, 20.0);
        audio.handle(AudioCue::MusicStopRewind, 30.0);
        assert_eq!(audio.music(), Playback::Stopped);
    }

    #[test]
    fn test_death_cue_cut_after_two_seconds() {
        let mut audio = AudioManager::new(&Settings::default());
        audio.handle(AudioCue::DeathCuePlay, 1000.0);
        audio.update(2999.0);
        assert_eq!(audio.death_cue(), Playback::Playing);
        audio.update(3000.0);
        assert_eq!(audio.death_cue(), Playback::Stopped);
    }

    #[test]
    fn test_restart_cuts_death_cue_early() {
        let mut audio = AudioManager::new(&Settings::default());
        audio.handle(AudioCue::DeathCuePlay, 0.0);
        audio.handle(AudioCue::DeathCueStopRewind, 500.0);
        assert_eq!(audio.death_cue(), Playback::Stopped);
        // A later timer tick is harmless
        audio.update(5000.0);
        assert_eq!(audio.death_cue(), Playback::Stopped);
    }

    #[test]
    fn test_volumes_follow_settings() {
        let muted = Settings {
            muted: true,
            ..Default::default()
        };
        let audio = AudioManager::new(&muted);
        assert_eq!(audio.music_volume(), 0.0);
        assert_eq!(AudioManager::new(&Settings::default()).music_volume(), 0.12);
    }
}
