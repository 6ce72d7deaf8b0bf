//! Keyboard intents
//!
//! Plain data plus pure functions: the platform's event dispatcher feeds key
//! codes in and gets the new intent state out.

use serde::{Deserialize, Serialize};

use crate::sim::state::GameState;
use crate::sim::tick::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// What a physical key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    /// Start, restart or resume
    Confirm,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

/// Map a `KeyboardEvent.code` to an action
pub fn map_key(code: &str) -> Option<KeyAction> {
    match code {
        "KeyA" | "ArrowLeft" => Some(KeyAction::Move(Direction::Left)),
        "KeyD" | "ArrowRight" => Some(KeyAction::Move(Direction::Right)),
        "Space" => Some(KeyAction::Confirm),
        "Escape" | "KeyP" => Some(KeyAction::Pause),
        _ => None,
    }
}

/// Held movement intents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub left: bool,
    pub right: bool,
}

impl Intents {
    pub fn to_tick_input(self) -> TickInput {
        TickInput {
            move_left: self.left,
            move_right: self.right,
        }
    }
}

/// New intents after a key event. Keys that are not movement keys leave the
/// intents unchanged.
pub fn apply_key(intents: Intents, code: &str, phase: KeyPhase) -> Intents {
    let Some(KeyAction::Move(direction)) = map_key(code) else {
        return intents;
    };
    let held = phase == KeyPhase::Down;
    match direction {
        Direction::Left => Intents { left: held, ..intents },
        Direction::Right => Intents { right: held, ..intents },
    }
}

/// Demo-mode intents: chase the ball's x with the paddle center
pub fn autopilot(state: &GameState) -> Intents {
    let paddle = &state.paddle;
    let target = state.ball.pos.x + state.ball.vel.x;
    let center = paddle.pos.x + paddle.width / 2.0;
    // Dead zone keeps the paddle from jittering around the target
    let dead_zone = paddle.speed.max(paddle.width * 0.1);

    Intents {
        left: target < center - dead_zone,
        right: target > center + dead_zone,
    }
}
