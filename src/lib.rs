//! Neon Breakout - a brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (layout, physics, scoring, game state)
//! - `game`: Lifecycle controller and fixed-step frame loop
//! - `input`: Keyboard intents
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform helpers
//! - `persistence`: Key-value storage for the high score
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, PersistenceError, RenderError};
pub use game::{Game, LoopControl};
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; ball and paddle speeds are per step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta accepted from the platform (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Launch angle at the paddle edges, in degrees from vertical
    pub const PADDLE_MAX_BOUNCE_DEG: f32 = 60.0;

    /// How long the death cue plays before it is cut (milliseconds)
    pub const DEATH_CUE_DURATION_MS: u32 = 2000;
}
