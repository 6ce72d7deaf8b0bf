//! Scene tessellation
//!
//! Draw order is paddle, live bricks (with coin markers), then the ball. The
//! neon look is a translucent halo drawn under each outline.

use glam::Vec2;

use super::shapes::{circle, ring, rounded_rect_outline};
use super::vertex::{Vertex, colors};
use crate::sim::state::{Brick, GameState};

const PADDLE_LINE_WIDTH: f32 = 6.0;
const PADDLE_CORNER_RADIUS: f32 = 5.0;
const BRICK_LINE_WIDTH: f32 = 6.0;
const BRICK_CORNER_RADIUS: f32 = 3.0;
const COIN_RADIUS: f32 = 7.0;
const COIN_RING_WIDTH: f32 = 3.0;
const GLOW_WIDTH: f32 = 10.0;
const GLOW_ALPHA: f32 = 0.25;

fn with_alpha(mut color: [f32; 4], alpha: f32) -> [f32; 4] {
    color[3] = alpha;
    color
}

fn outline(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, radius: f32, width: f32, color: [f32; 4], glow: bool) {
    if glow {
        out.extend(rounded_rect_outline(
            min,
            size,
            radius,
            width + GLOW_WIDTH,
            with_alpha(color, GLOW_ALPHA),
        ));
    }
    out.extend(rounded_rect_outline(min, size, radius, width, color));
}

fn brick(out: &mut Vec<Vertex>, brick: &Brick, glow: bool) {
    let color = brick.color.to_rgba(1.0);
    outline(out, brick.pos, brick.size, BRICK_CORNER_RADIUS, BRICK_LINE_WIDTH, color, glow);

    if let Some(coin) = brick.coin_color.filter(|_| brick.is_coin) {
        let center = brick.center();
        out.extend(circle(center, COIN_RADIUS, coin.to_rgba(1.0), 20));
        out.extend(ring(
            center,
            COIN_RADIUS,
            COIN_RADIUS + COIN_RING_WIDTH,
            colors::COIN_RING,
            20,
        ));
    }
}

/// Tessellate one frame of `state`
pub fn build_frame(state: &GameState, glow: bool) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(16 * 1024);

    let paddle = &state.paddle;
    outline(
        &mut out,
        paddle.pos,
        Vec2::new(paddle.width, paddle.height),
        PADDLE_CORNER_RADIUS,
        PADDLE_LINE_WIDTH,
        colors::PADDLE,
        glow,
    );

    for b in state.bricks.alive() {
        brick(&mut out, b, glow);
    }

    let ball = &state.ball;
    if glow {
        out.extend(circle(ball.pos, ball.radius * 2.0, with_alpha(colors::BALL, GLOW_ALPHA), 24));
    }
    out.extend(circle(ball.pos, ball.radius, colors::BALL, 24));

    out
}
