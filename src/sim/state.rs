//! Game state and core simulation types
//!
//! One owned aggregate holds every mutable piece of the game. Subsystems take
//! it by reference; there are no globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bricks::generate_grid;
use super::events::GameEvent;
use super::layout::Layout;
use super::palette::Color;
use crate::tuning::Tuning;

/// Lifecycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh session, waiting for the start key
    NotStarted,
    /// Frames are being simulated
    Running,
    /// A life was lost; the next one starts on resume
    PausedBetweenLives,
    /// Paused by the player or by focus loss
    PausedManually,
    /// No lives left
    GameOver,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal pixels per step while a movement key is held
    pub speed: f32,
}

impl Paddle {
    pub fn at_start(layout: &Layout) -> Self {
        Self {
            pos: layout.paddle_start(),
            width: layout.paddle_width,
            height: layout.paddle_height,
            speed: layout.paddle_speed,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Slide horizontally, staying within [0, surface_width - width]
    pub fn slide(&mut self, dx: f32, surface_width: f32) {
        let max_x = (surface_width - self.width).max(0.0);
        self.pos.x = (self.pos.x + dx).clamp(0.0, max_x);
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Pixels per step
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at its launch spot with the base launch velocity
    pub fn at_start(layout: &Layout) -> Self {
        Self {
            pos: layout.ball_start(),
            vel: layout.ball_launch_velocity(),
            radius: layout.ball_radius,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Alive,
    Destroyed,
}

/// A single brick. Destroyed bricks stay in the grid until it is regenerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub status: BrickStatus,
    pub color: Color,
    /// Zero means "unset"; scoring falls back to the default value
    pub points: u32,
    pub is_coin: bool,
    /// Highlight color of the coin; also the recolor target when collected
    pub coin_color: Option<Color>,
}

impl Brick {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }

    /// Strict point containment (edges excluded)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x
            && point.x < self.pos.x + self.size.x
            && point.y > self.pos.y
            && point.y < self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Fixed-size columns x rows collection of bricks, stored column-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    columns: usize,
    rows: usize,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// `bricks` must hold exactly `columns * rows` entries, column-major
    pub fn from_bricks(columns: usize, rows: usize, bricks: Vec<Brick>) -> Self {
        assert_eq!(bricks.len(), columns * rows, "brick grid size mismatch");
        Self {
            columns,
            rows,
            bricks,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Brick> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.bricks.get(column * self.rows + row)
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Brick> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.bricks.get_mut(column * self.rows + row)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    pub fn alive(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn is_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_alive())
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Brick] {
        &mut self.bricks
    }
}

/// Score, best score and remaining lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub layout: Layout,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    pub board: ScoreBoard,
    /// Levels cleared this game
    pub level: u32,
    /// Simulation steps run this game
    pub steps: u64,
    /// Brick-grid randomness, seeded per session
    pub rng: Pcg32,
    /// Pending notifications for the audio/UI collaborators
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build a session with entities laid out for `layout`
    pub fn new(tuning: Tuning, layout: Layout, seed: u64, high_score: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bricks = generate_grid(&tuning, &layout, &mut rng);
        let lives = tuning.starting_lives;

        Self {
            paddle: Paddle::at_start(&layout),
            ball: Ball::at_start(&layout),
            bricks,
            board: ScoreBoard {
                score: 0,
                high_score,
                lives,
            },
            phase: GamePhase::NotStarted,
            level: 0,
            steps: 0,
            rng,
            events: Vec::new(),
            tuning,
            layout,
        }
    }

    pub fn emit(&mut self, event: impl Into<GameEvent>) {
        self.events.push(event.into());
    }

    /// Put paddle and ball back on their canonical spots. The ball keeps its
    /// velocity.
    pub fn reposition(&mut self) {
        self.paddle = Paddle::at_start(&self.layout);
        self.ball.pos = self.layout.ball_start();
        self.ball.radius = self.layout.ball_radius;
    }

    /// Start a new life: canonical spots and base launch velocity
    pub fn reset_ball_and_paddle(&mut self) {
        self.paddle = Paddle::at_start(&self.layout);
        self.ball = Ball::at_start(&self.layout);
    }

    /// Replace the brick grid with a fresh one
    pub fn regenerate_bricks(&mut self) {
        self.bricks = generate_grid(&self.tuning, &self.layout, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::LayoutEngine;

    fn layout() -> Layout {
        LayoutEngine::new().measure(&Tuning::default(), 600.0, 450.0)
    }

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(Tuning::default(), layout(), 7, 120);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.board.lives, 3);
        assert_eq!(state.board.score, 0);
        assert_eq!(state.board.high_score, 120);
        assert_eq!(state.bricks.len(), 45);
        assert_eq!(state.bricks.alive_count(), 45);
        assert_eq!(state.ball.vel, Vec2::new(4.0, -4.0));
    }

    #[test]
    fn test_paddle_slide_clamps() {
        let mut paddle = Paddle::at_start(&layout());
        paddle.slide(-10_000.0, 600.0);
        assert_eq!(paddle.pos.x, 0.0);
        paddle.slide(10_000.0, 600.0);
        assert_eq!(paddle.pos.x, 600.0 - 125.0);
    }

    #[test]
    fn test_brick_containment_is_strict() {
        let brick = Brick {
            pos: Vec2::new(10.0, 10.0),
            size: Vec2::new(60.0, 20.0),
            status: BrickStatus::Alive,
            color: Color::WHITE,
            points: 10,
            is_coin: false,
            coin_color: None,
        };
        assert!(brick.contains(Vec2::new(40.0, 20.0)));
        assert!(!brick.contains(Vec2::new(10.0, 20.0)));
        assert!(!brick.contains(Vec2::new(40.0, 30.0)));
    }

    #[test]
    fn test_grid_indexing_is_column_major() {
        let state = GameState::new(Tuning::default(), layout(), 1, 0);
        let first = state.bricks.get(0, 0).unwrap();
        let below = state.bricks.get(0, 1).unwrap();
        let right = state.bricks.get(1, 0).unwrap();
        assert!(below.pos.y > first.pos.y);
        assert!(right.pos.x > first.pos.x);
        assert!(state.bricks.get(9, 0).is_none());
    }
}
