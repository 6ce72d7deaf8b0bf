//! Fixed timestep simulation step
//!
//! One step runs, in order: ball integration, surface-edge collisions, paddle
//! collision, the brick pass, then paddle movement from the held intents.

use super::collision::{fell_through_floor, hits_ceiling, hits_side_wall, paddle_bounce_velocity, paddle_contact};
use super::events::UiEvent;
use super::scoring::{BrickPass, resolve_bricks};
use super::state::{GamePhase, GameState};

/// Input for a single step (held movement intents)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
}

/// What the step means for the lifecycle controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing to do; keep stepping
    Continue(BrickPass),
    /// The ball left through the bottom edge
    LifeLost { lives_left: u8 },
    /// Not running; the step was skipped
    Idle,
}

/// Advance the game by one fixed step
pub fn step(state: &mut GameState, input: &TickInput) -> StepOutcome {
    if state.phase != GamePhase::Running {
        return StepOutcome::Idle;
    }
    state.steps += 1;

    let surface_w = state.layout.surface_width;
    let surface_h = state.layout.surface_height;

    // Integrate
    let ball = &mut state.ball;
    ball.pos += ball.vel;

    // Surface edges
    if hits_side_wall(ball.pos, ball.radius, surface_w) {
        ball.vel.x = -ball.vel.x;
    }
    if hits_ceiling(ball.pos, ball.radius) {
        ball.vel.y = -ball.vel.y;
    }
    if fell_through_floor(ball.pos, ball.radius, surface_h) {
        state.board.lives = state.board.lives.saturating_sub(1);
        let lives_left = state.board.lives;
        state.emit(UiEvent::LivesChanged(lives_left));
        log::info!("Life lost, {} remaining", lives_left);
        return StepOutcome::LifeLost { lives_left };
    }

    // Paddle steers the ball; speed is preserved across the bounce
    if let Some(hit) = paddle_contact(&state.ball, &state.paddle) {
        let speed = state.ball.speed();
        state.ball.vel = paddle_bounce_velocity(speed, hit);
    }

    let pass = resolve_bricks(state);

    move_paddle(state, input);

    StepOutcome::Continue(pass)
}

/// Apply held intents. Right wins when both are held.
pub fn move_paddle(state: &mut GameState, input: &TickInput) {
    let surface_w = state.layout.surface_width;
    let paddle = &mut state.paddle;
    if input.move_right {
        paddle.slide(paddle.speed, surface_w);
    } else if input.move_left {
        paddle.slide(-paddle.speed, surface_w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::LayoutEngine;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn running_state() -> GameState {
        let tuning = Tuning::default();
        let layout = LayoutEngine::new().measure(&tuning, 600.0, 450.0);
        let mut state = GameState::new(tuning, layout, 12345, 0);
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_idle_when_not_running() {
        let mut state = running_state();
        state.phase = GamePhase::PausedManually;
        let before = state.ball.pos;
        assert_eq!(step(&mut state, &TickInput::default()), StepOutcome::Idle);
        assert_eq!(state.ball.pos, before);
    }

    #[test]
    fn test_ball_integrates_velocity() {
        let mut state = running_state();
        let start = state.ball.pos;
        step(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, start + Vec2::new(4.0, -4.0));
    }

    #[test]
    fn test_side_and_top_walls_reflect() {
        let mut state = running_state();
        state.ball.pos = Vec2::new(590.0, 300.0);
        state.ball.vel = Vec2::new(4.0, 1.0);
        step(&mut state, &TickInput::default());
        assert_eq!(state.ball.vel.x, -4.0);

        state.ball.pos = Vec2::new(300.0, 10.0);
        state.ball.vel = Vec2::new(1.0, -4.0);
        step(&mut state, &TickInput::default());
        assert_eq!(state.ball.vel.y, 4.0);
    }

    #[test]
    fn test_floor_costs_a_life() {
        let mut state = running_state();
        state.ball.pos = Vec2::new(50.0, 440.0);
        state.ball.vel = Vec2::new(0.0, 4.0);
        let outcome = step(&mut state, &TickInput::default());
        assert_eq!(outcome, StepOutcome::LifeLost { lives_left: 2 });
        assert_eq!(state.board.lives, 2);
    }

    #[test]
    fn test_paddle_bounce_steers_ball() {
        let mut state = running_state();
        let paddle = state.paddle.clone();
        // Ball lands a quarter of the way along the paddle
        state.ball.pos = Vec2::new(paddle.pos.x + paddle.width * 0.25, paddle.pos.y - 6.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        step(&mut state, &TickInput::default());

        assert!(state.ball.vel.y < 0.0);
        assert!(state.ball.vel.x < 0.0);
        assert!((state.ball.speed() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_right_intent_wins() {
        let mut state = running_state();
        let x = state.paddle.pos.x;
        let both = TickInput {
            move_left: true,
            move_right: true,
        };
        move_paddle(&mut state, &both);
        assert_eq!(state.paddle.pos.x, x + 8.0);

        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        move_paddle(&mut state, &left);
        assert_eq!(state.paddle.pos.x, x);
    }

    #[test]
    fn test_determinism() {
        let mut a = running_state();
        let mut b = running_state();
        let inputs = [
            TickInput { move_left: true, move_right: false },
            TickInput::default(),
            TickInput { move_left: false, move_right: true },
        ];
        for i in 0..600 {
            let input = inputs[i % inputs.len()];
            let oa = step(&mut a, &input);
            let ob = step(&mut b, &input);
            assert_eq!(oa, ob);
            if matches!(oa, StepOutcome::LifeLost { .. }) {
                break;
            }
        }
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.board, b.board);
    }
}
