//! Lifecycle controller and frame loop
//!
//! `Game` owns the simulation state and is the only thing that changes the
//! lifecycle phase. The platform shell forwards input, focus and resize
//! notifications to it and calls [`Game::frame`] once per display refresh,
//! rescheduling only while it answers [`LoopControl::Continue`].

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScore;
use crate::input::{Intents, KeyAction, KeyPhase, apply_key, autopilot, map_key};
use crate::persistence::Storage;
use crate::sim::events::{AudioCue, GameEvent, UiEvent};
use crate::sim::layout::{LayoutEngine, apply_layout};
use crate::sim::state::{GamePhase, GameState};
use crate::sim::tick::{StepOutcome, step};
use crate::tuning::Tuning;

/// Whether the frame scheduler should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Turns wall-clock frame deltas into whole simulation steps
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    accumulator: f32,
}

impl FixedClock {
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Bank `dt` seconds and return how many steps are due
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }
}

/// A game session bound to a storage backend for the best score
pub struct Game<S: Storage> {
    state: GameState,
    layout_engine: LayoutEngine,
    intents: Intents,
    clock: FixedClock,
    high_score: HighScore,
    storage: S,
    autopilot: bool,
}

impl<S: Storage> Game<S> {
    /// Set up a session on a `width` x `height` surface.
    /// Tuning that fails validation is replaced by the defaults.
    pub fn new(tuning: Tuning, storage: S, seed: u64, width: f32, height: f32) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning ({}), using defaults", e);
                Tuning::default()
            }
        };
        let high_score = HighScore::load(&storage);
        let mut layout_engine = LayoutEngine::new();
        let layout = layout_engine.measure(&tuning, width, height);
        let mut state = GameState::new(tuning, layout, seed, high_score.best());

        state.emit(UiEvent::ScoreChanged(state.board.score));
        state.emit(UiEvent::LivesChanged(state.board.lives));
        state.emit(UiEvent::HighScoreChanged(state.board.high_score));

        log::info!("Game initialized with seed: {}", seed);
        Self {
            state,
            layout_engine,
            intents: Intents::default(),
            clock: FixedClock::default(),
            high_score,
            storage,
            autopilot: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == GamePhase::Running
    }

    pub fn intents(&self) -> Intents {
        self.intents
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Let the paddle chase the ball on its own (demo mode)
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// The drawing surface changed size
    pub fn resize(&mut self, width: f32, height: f32) {
        let layout = self.layout_engine.measure(&self.state.tuning, width, height);
        apply_layout(&mut self.state, layout);
    }

    pub fn key_down(&mut self, code: &str) {
        self.intents = apply_key(self.intents, code, KeyPhase::Down);
        match map_key(code) {
            Some(KeyAction::Move(direction)) => self.state.emit(UiEvent::ControlHighlighted {
                direction,
                active: true,
            }),
            Some(KeyAction::Confirm) => self.start(),
            Some(KeyAction::Pause) => self.pause(),
            None => {}
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.intents = apply_key(self.intents, code, KeyPhase::Up);
        if let Some(KeyAction::Move(direction)) = map_key(code) {
            self.state.emit(UiEvent::ControlHighlighted {
                direction,
                active: false,
            });
        }
    }

    /// Start, resume or restart, depending on where the session is
    pub fn start(&mut self) {
        match self.state.phase {
            GamePhase::Running => return,
            GamePhase::NotStarted => {
                self.state.reset_ball_and_paddle();
                self.state.regenerate_bricks();
            }
            GamePhase::PausedBetweenLives => {
                self.state.reset_ball_and_paddle();
            }
            GamePhase::PausedManually => {}
            GamePhase::GameOver => self.reset_session(),
        }

        log::info!("Running (from {:?})", self.state.phase);
        self.state.phase = GamePhase::Running;
        self.clock.reset();
        self.state.emit(UiEvent::HideOverlay);
        self.state.emit(AudioCue::MusicStart);
        // A quick restart cuts the death cue short
        self.state.emit(AudioCue::DeathCueStopRewind);
    }

    /// Pause a running game
    pub fn pause(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        log::info!("Paused");
        self.state.phase = GamePhase::PausedManually;
        self.state.emit(UiEvent::ShowPaused);
        self.state.emit(AudioCue::MusicPause);
    }

    /// The window lost input focus
    pub fn focus_lost(&mut self) {
        if self.is_running() {
            log::info!("Auto-paused (window blur)");
        }
        self.pause();
    }

    /// Run the steps due for `dt` seconds of wall time
    pub fn frame(&mut self, dt: f32) -> LoopControl {
        if !self.is_running() {
            return LoopControl::Stop;
        }

        for _ in 0..self.clock.advance(dt) {
            let intents = if self.autopilot {
                autopilot(&self.state)
            } else {
                self.intents
            };

            if let StepOutcome::LifeLost { lives_left } = step(&mut self.state, &intents.to_tick_input()) {
                self.life_lost(lives_left);
                break;
            }
        }

        self.persist_high_score();

        if self.is_running() {
            LoopControl::Continue
        } else {
            LoopControl::Stop
        }
    }

    fn life_lost(&mut self, lives_left: u8) {
        self.state.emit(AudioCue::MusicStopRewind);
        self.state.emit(AudioCue::DeathCuePlay);

        if lives_left == 0 {
            self.state.phase = GamePhase::GameOver;
            let final_score = self.state.board.score;
            let high_score = self.state.board.high_score;
            log::info!("Game over: score {}, best {}", final_score, high_score);
            self.state.emit(UiEvent::ShowGameOver {
                final_score,
                high_score,
            });
        } else {
            self.state.phase = GamePhase::PausedBetweenLives;
            self.state.emit(UiEvent::ShowLifeLost);
        }
    }

    /// Fresh score, lives and grid after a game over
    fn reset_session(&mut self) {
        self.state.board.score = 0;
        self.state.board.lives = self.state.tuning.starting_lives;
        self.state.level = 0;
        self.state.steps = 0;
        self.state.reset_ball_and_paddle();
        self.state.regenerate_bricks();
        self.state.emit(UiEvent::ScoreChanged(0));
        self.state.emit(UiEvent::LivesChanged(self.state.board.lives));
    }

    fn persist_high_score(&mut self) {
        if self.high_score.submit(self.state.board.high_score) {
            if let Err(e) = self.high_score.save(&mut self.storage) {
                log::warn!("Could not save high score: {e}");
            }
        }
    }
}
