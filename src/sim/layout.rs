//! Responsive layout
//!
//! Entity dimensions are authored against a reference surface. On every
//! surface-size change the reference is scaled to the new size and the whole
//! entity model is rebuilt from it: paddle and ball go back to their canonical
//! spots and the brick grid is regenerated. Nothing is patched in place, so a
//! resize between frames can never leave half-scaled state behind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bricks::generate_grid;
use super::state::{Ball, GameState, Paddle};
use crate::tuning::Tuning;

/// Dimension snapshot taken once, at first measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLayout {
    pub surface_width: f32,
    pub surface_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_bottom_offset: f32,
    pub ball_radius: f32,
    pub ball_speed: f32,
    pub ball_bottom_offset: f32,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
}

impl ReferenceLayout {
    pub fn capture(tuning: &Tuning) -> Self {
        Self {
            surface_width: tuning.reference_width,
            surface_height: tuning.reference_height,
            paddle_width: tuning.paddle_width,
            paddle_height: tuning.paddle_height,
            paddle_speed: tuning.paddle_speed,
            paddle_bottom_offset: tuning.paddle_bottom_offset,
            ball_radius: tuning.ball_radius,
            ball_speed: tuning.ball_base_speed,
            ball_bottom_offset: tuning.ball_bottom_offset,
            brick_width: tuning.brick_width,
            brick_height: tuning.brick_height,
            brick_padding: tuning.brick_padding,
        }
    }
}

/// Reference dimensions scaled to the current surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub surface_width: f32,
    pub surface_height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    /// Per-axis base speed of a fresh ball
    pub ball_speed: f32,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    paddle_bottom_offset: f32,
    ball_bottom_offset: f32,
}

impl Layout {
    pub fn scaled(reference: &ReferenceLayout, width: f32, height: f32) -> Self {
        // A collapsed container still yields a drawable 1x1 surface
        let width = width.max(1.0);
        let height = height.max(1.0);

        let scale_x = width / reference.surface_width;
        let scale_y = height / reference.surface_height;
        let scale_min = scale_x.min(scale_y);

        Self {
            surface_width: width,
            surface_height: height,
            scale_x,
            scale_y,
            paddle_width: reference.paddle_width * scale_x,
            paddle_height: reference.paddle_height * scale_y,
            paddle_speed: reference.paddle_speed * scale_x,
            ball_radius: reference.ball_radius * scale_min,
            ball_speed: reference.ball_speed * scale_min,
            brick_width: reference.brick_width * scale_x,
            brick_height: reference.brick_height * scale_y,
            brick_padding: reference.brick_padding * scale_min,
            paddle_bottom_offset: reference.paddle_bottom_offset * scale_y,
            ball_bottom_offset: reference.ball_bottom_offset * scale_y,
        }
    }

    /// Top-left corner of a horizontally centered paddle
    pub fn paddle_start(&self) -> Vec2 {
        Vec2::new(
            self.surface_width / 2.0 - self.paddle_width / 2.0,
            self.surface_height - self.paddle_bottom_offset,
        )
    }

    /// Ball center at launch
    pub fn ball_start(&self) -> Vec2 {
        Vec2::new(
            self.surface_width / 2.0,
            self.surface_height - self.ball_bottom_offset,
        )
    }

    /// Launch velocity: up and to the right at the base speed
    pub fn ball_launch_velocity(&self) -> Vec2 {
        Vec2::new(self.ball_speed, -self.ball_speed)
    }
}

/// Remembers the reference layout and measures surfaces against it
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    reference: Option<ReferenceLayout>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self { reference: None }
    }

    pub fn reference(&self) -> Option<&ReferenceLayout> {
        self.reference.as_ref()
    }

    /// Scale the reference to a `width` x `height` surface.
    /// The reference is captured from `tuning` on the first call only.
    pub fn measure(&mut self, tuning: &Tuning, width: f32, height: f32) -> Layout {
        let reference = *self
            .reference
            .get_or_insert_with(|| ReferenceLayout::capture(tuning));
        Layout::scaled(&reference, width, height)
    }
}

/// Rebuild every entity for a new layout.
///
/// The ball keeps the sign of each velocity axis but its magnitude is replaced
/// by the scaled base speed. Score, lives and phase are untouched.
pub fn apply_layout(state: &mut GameState, layout: Layout) {
    log::info!(
        "Layout {}x{} (scale {:.3} x {:.3})",
        layout.surface_width,
        layout.surface_height,
        layout.scale_x,
        layout.scale_y
    );

    let old_vel = state.ball.vel;
    let sign = |v: f32| if v > 0.0 { 1.0 } else { -1.0 };

    state.layout = layout;
    state.paddle = Paddle::at_start(&layout);
    state.ball = Ball::at_start(&layout);
    state.ball.vel = Vec2::new(
        sign(old_vel.x) * layout.ball_speed,
        sign(old_vel.y) * layout.ball_speed,
    );
    state.bricks = generate_grid(&state.tuning, &layout, &mut state.rng);
}
