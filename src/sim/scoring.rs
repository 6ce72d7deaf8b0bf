//! Brick collisions, scoring and level progression

use glam::Vec2;

use super::events::UiEvent;
use super::palette::{Color, Palette};
use super::state::{Ball, BrickGrid, BrickStatus, GameState};

/// What a brick pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrickPass {
    /// Bricks destroyed this pass
    pub destroyed: u32,
    /// Points added this pass
    pub points: u64,
    /// The grid ran out and was regenerated
    pub level_up: bool,
}

/// Test the ball center against every alive brick and score the hits.
///
/// Each hit flips the vertical velocity, destroys the brick and awards its
/// points (doubled for a coin, which also recolors the rest of the field).
/// When no brick is left alive afterwards, the level is rebuilt.
pub fn resolve_bricks(state: &mut GameState) -> BrickPass {
    let mut pass = BrickPass::default();
    let center = state.ball.pos;

    for i in 0..state.bricks.len() {
        let brick = &mut state.bricks.as_mut_slice()[i];
        if !brick.is_alive() || !brick.contains(center) {
            continue;
        }

        brick.status = BrickStatus::Destroyed;
        let base = if brick.points == 0 {
            state.tuning.default_brick_points
        } else {
            brick.points
        };
        let coin = brick.is_coin.then_some(brick.coin_color).flatten();
        let is_coin = brick.is_coin;

        log::debug!("Brick {} hit ({} pts, coin: {})", brick.color, base, is_coin);
        state.ball.vel.y = -state.ball.vel.y;

        if let Some(color) = coin {
            recolor_bricks(&mut state.bricks, &state.tuning.palette, color);
        }
        let earned = if is_coin {
            base * state.tuning.coin_multiplier
        } else {
            base
        };

        award(state, earned as u64);
        pass.destroyed += 1;
        pass.points += earned as u64;
    }

    if state.bricks.is_cleared() {
        level_up(state);
        pass.level_up = true;
    }

    pass
}

/// Add points, speed the ball up per threshold crossed, track the best score.
/// Returns how many speed-ups happened.
pub fn award(state: &mut GameState, points: u64) -> u32 {
    let previous = state.board.score;
    state.board.score += points;
    let score = state.board.score;
    state.emit(UiEvent::ScoreChanged(score));

    let every = state.tuning.speedup_every;
    let crossed = (score / every - previous / every) as u32;
    for _ in 0..crossed {
        accelerate_ball(&mut state.ball, state.tuning.speedup_factor);
    }

    if score > state.board.high_score {
        state.board.high_score = score;
        state.emit(UiEvent::HighScoreChanged(score));
    }

    crossed
}

/// Scale the ball's speed by `factor`, keeping its heading
pub fn accelerate_ball(ball: &mut Ball, factor: f32) {
    let speed = ball.speed() * factor;
    let angle = ball.vel.y.atan2(ball.vel.x);
    ball.vel = Vec2::from_angle(angle) * speed;
    log::info!("Ball accelerated to speed: {:.2}", speed);
}

/// Paint every alive brick `color` and revalue it from the palette.
/// A color outside the palette is ignored and the grid stays as it was.
pub fn recolor_bricks(grid: &mut BrickGrid, palette: &Palette, color: Color) -> bool {
    let Some(entry) = palette.find(color) else {
        log::warn!("Recolor target {} is not in the palette, ignoring", color);
        return false;
    };

    for brick in grid.iter_mut().filter(|b| b.is_alive()) {
        brick.color = entry.color;
        brick.points = entry.points;
    }
    true
}

/// Field cleared: back to the canonical spots on a fresh grid. Score, lives
/// and ball speed carry over.
pub fn level_up(state: &mut GameState) {
    state.level += 1;
    state.reposition();
    state.regenerate_bricks();
    log::info!(
        "Level {} cleared (score {}, speed {:.2})",
        state.level,
        state.board.score,
        state.ball.speed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::LayoutEngine;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        let tuning = Tuning::default();
        let layout = LayoutEngine::new().measure(&tuning, 600.0, 450.0);
        GameState::new(tuning, layout, 11, 0)
    }

    fn clear_coins(state: &mut GameState) {
        for brick in state.bricks.iter_mut() {
            brick.is_coin = false;
            brick.coin_color = None;
        }
    }

    #[test]
    fn test_plain_hit_scores_and_reflects() {
        let mut s = state();
        clear_coins(&mut s);
        let target = s.bricks.get(0, 1).unwrap().clone();
        s.ball.pos = target.center();
        s.ball.vel = Vec2::new(3.0, -4.0);

        let pass = resolve_bricks(&mut s);
        assert_eq!(pass.destroyed, 1);
        assert_eq!(s.board.score, target.points as u64);
        assert_eq!(s.ball.vel, Vec2::new(3.0, 4.0));
        assert!(!s.bricks.get(0, 1).unwrap().is_alive());
    }

    #[test]
    fn test_destroyed_brick_never_scores_again() {
        let mut s = state();
        clear_coins(&mut s);
        s.ball.pos = s.bricks.get(2, 2).unwrap().center();

        resolve_bricks(&mut s);
        let after_first = s.board.score;
        let pass = resolve_bricks(&mut s);
        assert_eq!(pass.destroyed, 0);
        assert_eq!(s.board.score, after_first);
        assert_eq!(s.bricks.len(), 45);
    }

    #[test]
    fn test_unset_points_fall_back_to_default() {
        let mut s = state();
        clear_coins(&mut s);
        s.bricks.get_mut(0, 0).unwrap().points = 0;
        s.ball.pos = s.bricks.get(0, 0).unwrap().center();
        resolve_bricks(&mut s);
        assert_eq!(s.board.score, 10);
    }

    #[test]
    fn test_recolor_unknown_color_is_noop() {
        let mut s = state();
        let before: Vec<_> = s.bricks.iter().map(|b| (b.color, b.points)).collect();
        let palette = s.tuning.palette.clone();
        assert!(!recolor_bricks(&mut s.bricks, &palette, Color::WHITE));
        let after: Vec<_> = s.bricks.iter().map(|b| (b.color, b.points)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_recolor_skips_destroyed_bricks() {
        let mut s = state();
        let original = s.bricks.get(0, 0).unwrap().color;
        s.bricks.get_mut(0, 0).unwrap().status = BrickStatus::Destroyed;
        let palette = s.tuning.palette.clone();
        let tether = Color::from_hex("#26A17B").unwrap();
        assert!(recolor_bricks(&mut s.bricks, &palette, tether));
        assert_eq!(s.bricks.get(0, 0).unwrap().color, original);
        assert!(s.bricks.alive().all(|b| b.color == tether && b.points == 5));
    }

    #[test]
    fn test_each_threshold_accelerates_once() {
        let mut s = state();
        s.board.score = 95;
        s.ball.vel = Vec2::new(0.0, -4.0);

        let crossed = award(&mut s, 120);
        assert_eq!(crossed, 2);
        assert_eq!(s.board.score, 215);
        assert!((s.ball.speed() - 4.0 * 1.05 * 1.05).abs() < 1e-4);

        // No threshold: no speed change
        let crossed = award(&mut s, 10);
        assert_eq!(crossed, 0);
        assert!((s.ball.speed() - 4.0 * 1.05 * 1.05).abs() < 1e-4);
    }

    #[test]
    fn test_acceleration_keeps_heading() {
        let mut ball = Ball {
            pos: Vec2::ZERO,
            vel: Vec2::new(-3.0, 4.0),
            radius: 8.0,
        };
        accelerate_ball(&mut ball, 1.05);
        assert!((ball.speed() - 5.25).abs() < 1e-4);
        assert!((ball.vel.x - (-3.15)).abs() < 1e-4);
        assert!((ball.vel.y - 4.2).abs() < 1e-4);
    }

    #[test]
    fn test_high_score_tracks_score() {
        let mut s = state();
        s.board.high_score = 30;
        award(&mut s, 20);
        assert_eq!(s.board.high_score, 30);
        award(&mut s, 20);
        assert_eq!(s.board.high_score, 40);
        assert!(s.events.contains(&UiEvent::HighScoreChanged(40).into()));
    }
}
