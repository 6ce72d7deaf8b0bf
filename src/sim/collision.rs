//! Collision detection for the rectangular playfield
//!
//! Pure geometry: nothing here mutates the game. `tick` and `scoring` decide
//! what a contact means.

use glam::Vec2;

use super::state::{Ball, Paddle};
use crate::consts::PADDLE_MAX_BOUNCE_DEG;

/// Ball edge crossed the left or right surface boundary
pub fn hits_side_wall(pos: Vec2, radius: f32, surface_width: f32) -> bool {
    pos.x + radius > surface_width || pos.x - radius < 0.0
}

/// Ball top crossed the surface top
pub fn hits_ceiling(pos: Vec2, radius: f32) -> bool {
    pos.y - radius < 0.0
}

/// Ball bottom passed the surface bottom (a lost life)
pub fn fell_through_floor(pos: Vec2, radius: f32, surface_height: f32) -> bool {
    pos.y + radius > surface_height
}

/// Where along the paddle the ball struck, 0.0 (left edge) to 1.0 (right edge).
///
/// A contact needs the ball's vertical extent to overlap the paddle band and
/// the ball's center to lie strictly inside the paddle's horizontal extent.
pub fn paddle_contact(ball: &Ball, paddle: &Paddle) -> Option<f32> {
    let overlaps_band =
        ball.pos.y + ball.radius > paddle.pos.y && ball.pos.y - ball.radius < paddle.bottom();
    let within_width = ball.pos.x > paddle.pos.x && ball.pos.x < paddle.right();

    if overlaps_band && within_width {
        let hit = (ball.pos.x - paddle.pos.x) / paddle.width;
        Some(hit.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Launch angle from vertical for a hit position: -60° at the left edge,
/// straight up at the center, +60° at the right edge
pub fn bounce_angle(hit_position: f32) -> f32 {
    let max = PADDLE_MAX_BOUNCE_DEG;
    (hit_position * 2.0 * max - max).to_radians()
}

/// Velocity leaving the paddle: same speed, steered by hit position
pub fn paddle_bounce_velocity(speed: f32, hit_position: f32) -> Vec2 {
    let angle = bounce_angle(hit_position);
    Vec2::new(speed * angle.sin(), -speed * angle.cos())
}
