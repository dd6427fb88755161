//! Paddle module - the player-controlled racket

use crate::types::{FIELD_WIDTH, PADDLE_SPEED, PADDLE_START_X, PADDLE_WIDTH, PADDLE_Y};

/// How far the racket may travel horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddleBounds {
    /// Keep the racket fully inside `[0, FIELD_WIDTH]`.
    #[default]
    Clamped,
    /// No limits; repeated holds can push the racket off the field.
    Free,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Paddle {
    /// Left edge.
    pub x: i32,
    /// Top edge, fixed for the session.
    pub y: i32,
    pub speed: i32,
}

impl Paddle {
    /// Racket centred at its starting position.
    pub fn new() -> Self {
        Self {
            x: PADDLE_START_X,
            y: PADDLE_Y,
            speed: PADDLE_SPEED,
        }
    }

    /// Move `direction` (-1, 0 or 1) steps of `speed`.
    pub fn shift(&mut self, direction: i32, bounds: PaddleBounds) {
        self.x += direction * self.speed;
        if bounds == PaddleBounds::Clamped {
            self.x = self.x.clamp(0, FIELD_WIDTH - PADDLE_WIDTH);
        }
    }

    /// Whether column `x` lies on the racket, both edges included.
    pub fn covers(&self, x: i32) -> bool {
        x >= self.x && x <= self.x + PADDLE_WIDTH
    }
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new()
    }
}
