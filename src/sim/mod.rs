//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (column-major bricks)
//! - No rendering or platform dependencies

pub mod bricks;
pub mod collision;
pub mod events;
pub mod layout;
pub mod palette;
pub mod scoring;
pub mod state;
pub mod tick;

pub use bricks::generate_grid;
pub use collision::{bounce_angle, paddle_bounce_velocity, paddle_contact};
pub use events::{AudioCue, GameEvent, UiEvent};
pub use layout::{Layout, LayoutEngine, ReferenceLayout, apply_layout};
pub use palette::{Color, Palette, PaletteEntry};
pub use scoring::{BrickPass, accelerate_ball, award, level_up, recolor_bricks, resolve_bricks};
pub use state::{Ball, Brick, BrickGrid, BrickStatus, GamePhase, GameState, Paddle, ScoreBoard};
pub use tick::{StepOutcome, TickInput, move_paddle, step};
