//! Ball module - one falling/bouncing projectile
//!
//! Balls integrate their velocity once per tick and reflect off the side
//! walls and the ceiling while they are above the paddle line. Velocity only
//! ever changes sign, never magnitude.

use crate::types::{Rgba, BALL_LINE_MARGIN, FIELD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ball {
    pub radius: i32,
    pub color: Rgba,
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
}

impl Ball {
    /// Create a ball at the top of the field (`y == radius`).
    pub fn new(radius: i32, color: Rgba, x: i32, vx: i32, vy: i32) -> Self {
        Self {
            radius,
            color,
            x,
            y: radius,
            vx,
            vy,
        }
    }

    /// Move by one frame of velocity.
    pub fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
    }

    /// Whether the ball has not yet reached the paddle line at `line_y`.
    pub fn above_line(&self, line_y: i32) -> bool {
        self.y + BALL_LINE_MARGIN < line_y
    }

    /// Reflect off the side walls and the ceiling.
    ///
    /// Tested against the already-integrated position; a ball that overshot a
    /// wall keeps its position and only has its velocity flipped.
    pub fn reflect_off_walls(&mut self) {
        if self.x - self.radius <= 0 || self.x + self.radius >= FIELD_WIDTH - 1 {
            self.vx = -self.vx;
        }
        if self.y - self.radius <= 0 {
            self.vy = -self.vy;
        }
    }

    /// Send the ball back to the top at column `x`, keeping radius, colour and velocity.
    pub fn reset(&mut self, x: i32) {
        self.x = x;
        self.y = self.radius;
    }
}
