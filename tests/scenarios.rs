//! End-to-end gameplay scenarios and simulation properties

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use neon_breakout::consts::{PADDLE_MAX_BOUNCE_DEG, SIM_DT};
use neon_breakout::persistence::MemoryStorage;
use neon_breakout::sim::{
    AudioCue, BrickStatus, Color, GameEvent, GamePhase, GameState, LayoutEngine, StepOutcome, TickInput, UiEvent,
    award, generate_grid, move_paddle, paddle_bounce_velocity, recolor_bricks, resolve_bricks, step,
};
use neon_breakout::{Game, LoopControl, Tuning};

fn running_state(seed: u64) -> GameState {
    let tuning = Tuning::default();
    let layout = LayoutEngine::new().measure(&tuning, 600.0, 450.0);
    let mut state = GameState::new(tuning, layout, seed, 0);
    state.phase = GamePhase::Running;
    state
}

fn clear_coins(state: &mut GameState) {
    for brick in state.bricks.iter_mut() {
        brick.is_coin = false;
        brick.coin_color = None;
    }
}

#[test]
fn last_life_lost_ends_the_game() {
    let mut game = Game::new(Tuning::default(), MemoryStorage::new(), 9, 600.0, 450.0);
    game.start();
    game.drain_events();

    let state = game.state_mut();
    state.board.lives = 1;
    state.ball.pos = Vec2::new(40.0, 450.0 - state.ball.radius);
    state.ball.vel = Vec2::new(0.0, 4.0);

    assert_eq!(game.frame(SIM_DT), LoopControl::Stop);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.state().board.lives, 0);

    let events = game.drain_events();
    assert!(events.contains(&GameEvent::Ui(UiEvent::LivesChanged(0))));
    assert!(events.contains(&GameEvent::Audio(AudioCue::DeathCuePlay)));
    assert!(events.iter().any(|e| matches!(e, GameEvent::Ui(UiEvent::ShowGameOver { .. }))));

    // Stays stopped until the player restarts
    assert_eq!(game.frame(SIM_DT), LoopControl::Stop);
}

#[test]
fn coin_brick_doubles_points_and_recolors_field() {
    let gold = Color::from_hex("#F0B90B").unwrap();
    let mut state = running_state(21);
    clear_coins(&mut state);

    // Row 4 is the 25 point row
    let target = state.bricks.get_mut(3, 4).unwrap();
    assert_eq!(target.points, 25);
    target.is_coin = true;
    target.coin_color = Some(gold);
    let center = target.center();

    state.ball.pos = center;
    let before = state.board.score;
    let pass = resolve_bricks(&mut state);

    assert_eq!(pass.destroyed, 1);
    assert_eq!(state.board.score - before, 50);
    assert_eq!(state.bricks.get(3, 4).unwrap().status, BrickStatus::Destroyed);
    for brick in state.bricks.alive() {
        assert_eq!(brick.color, gold);
        assert_eq!(brick.points, 25);
    }
}

#[test]
fn paddle_left_edge_launches_at_minus_sixty_degrees() {
    let speed = 4.0 * 2f32.sqrt();
    let vel = paddle_bounce_velocity(speed, 0.0);
    let angle = (-PADDLE_MAX_BOUNCE_DEG).to_radians();
    assert!((vel.x - speed * angle.sin()).abs() < 1e-5);
    assert!((vel.y + speed * angle.cos()).abs() < 1e-5);
    assert!(vel.x < 0.0 && vel.y < 0.0);
}

#[test]
fn clearing_the_field_levels_up() {
    let mut state = running_state(5);
    clear_coins(&mut state);
    state.board.score = 40;
    state.board.lives = 2;

    for brick in state.bricks.iter_mut() {
        brick.status = BrickStatus::Destroyed;
    }
    let last = state.bricks.get_mut(8, 2).unwrap();
    last.status = BrickStatus::Alive;
    let points = u64::from(last.points);
    state.ball.pos = last.center();
    state.paddle.pos.x = 0.0;
    let speed = state.ball.speed();

    let pass = resolve_bricks(&mut state);

    assert!(pass.level_up);
    assert_eq!(state.level, 1);
    assert_eq!(state.bricks.alive_count(), 45);
    assert_eq!(state.board.score, 40 + points);
    assert_eq!(state.board.lives, 2);
    assert_eq!(state.paddle.pos, state.layout.paddle_start());
    assert_eq!(state.ball.pos, state.layout.ball_start());
    assert!((state.ball.speed() - speed).abs() < 1e-4);
}

#[test]
fn crossing_two_thresholds_accelerates_twice() {
    let mut state = running_state(1);
    let base = state.ball.speed();

    assert_eq!(award(&mut state, 95), 0);
    assert_eq!(award(&mut state, 120), 2);
    assert_eq!(state.board.score, 215);
    assert!((state.ball.speed() - base * 1.05 * 1.05).abs() < 1e-4);
}

#[test]
fn destroyed_bricks_never_score_twice() {
    let mut state = running_state(8);
    clear_coins(&mut state);
    let center = state.bricks.get(4, 1).unwrap().center();

    state.ball.pos = center;
    resolve_bricks(&mut state);
    let score = state.board.score;

    state.ball.pos = center;
    let pass = resolve_bricks(&mut state);
    assert_eq!(pass.destroyed, 0);
    assert_eq!(state.board.score, score);
}

#[test]
fn resume_after_life_lost_restores_base_speed() {
    let mut game = Game::new(Tuning::default(), MemoryStorage::new(), 77, 600.0, 450.0);
    game.start();
    neon_breakout::sim::accelerate_ball(&mut game.state_mut().ball, 1.5);

    let state = game.state_mut();
    state.ball.pos = Vec2::new(40.0, 445.0);
    state.ball.vel = Vec2::new(0.0, 6.0);
    game.frame(SIM_DT);
    assert_eq!(game.phase(), GamePhase::PausedBetweenLives);

    game.start();
    assert_eq!(game.state().ball.vel, Vec2::new(4.0, -4.0));
}

fn tick_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>()).prop_map(|(move_left, move_right)| TickInput { move_left, move_right })
}

proptest! {
    #[test]
    fn paddle_stays_on_surface(
        width in 50.0f32..2000.0,
        height in 50.0f32..1500.0,
        inputs in prop::collection::vec(tick_input(), 1..400),
    ) {
        let tuning = Tuning::default();
        let layout = LayoutEngine::new().measure(&tuning, width, height);
        let mut state = GameState::new(tuning, layout, 3, 0);
        state.phase = GamePhase::Running;

        for input in &inputs {
            move_paddle(&mut state, input);
            let max_x = (width - state.paddle.width).max(0.0);
            prop_assert!(state.paddle.pos.x >= 0.0);
            prop_assert!(state.paddle.pos.x <= max_x + 1e-3);
        }
    }

    #[test]
    fn ball_speed_never_drops_within_a_life(
        seed in any::<u64>(),
        inputs in prop::collection::vec(tick_input(), 1..600),
    ) {
        let mut state = running_state(seed);
        let mut speed = state.ball.speed();

        for input in &inputs {
            if let StepOutcome::LifeLost { .. } = step(&mut state, input) {
                break;
            }
            let now = state.ball.speed();
            prop_assert!(now >= speed - speed * 1e-4, "speed fell from {} to {}", speed, now);
            speed = speed.max(now);
        }
    }

    #[test]
    fn grid_always_full_size(
        seed in any::<u64>(),
        width in 1.0f32..3000.0,
        height in 1.0f32..3000.0,
    ) {
        let tuning = Tuning::default();
        let layout = LayoutEngine::new().measure(&tuning, width, height);
        let grid = generate_grid(&tuning, &layout, &mut Pcg32::seed_from_u64(seed));
        prop_assert_eq!(grid.len(), tuning.brick_columns * tuning.brick_rows);
        prop_assert_eq!(grid.alive_count(), grid.len());
        for brick in grid.iter() {
            prop_assert!(brick.pos.y >= tuning.brick_offset_top - 1e-3);
        }
    }

    #[test]
    fn recolor_sets_exact_palette_points(seed in any::<u64>(), pick in 0usize..5) {
        let mut state = running_state(seed);
        let entry = state.tuning.palette.entries()[pick];
        prop_assert!(recolor_bricks(&mut state.bricks, &state.tuning.palette, entry.color));
        let once: Vec<_> = state.bricks.iter().map(|b| (b.color, b.points)).collect();
        recolor_bricks(&mut state.bricks, &state.tuning.palette, entry.color);
        let twice: Vec<_> = state.bricks.iter().map(|b| (b.color, b.points)).collect();

        prop_assert_eq!(&once, &twice);
        for brick in state.bricks.alive() {
            prop_assert_eq!(brick.points, entry.points);
        }
    }
}
