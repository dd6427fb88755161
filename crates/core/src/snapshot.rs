use crate::ball::Ball;
use crate::paddle::Paddle;
use crate::types::{Phase, Rgba, Winner, PADDLE_HEIGHT, PADDLE_START_X, PADDLE_WIDTH, PADDLE_Y};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BallSnapshot {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub color: Rgba,
}

impl From<&Ball> for BallSnapshot {
    fn from(value: &Ball) -> Self {
        Self {
            x: value.x,
            y: value.y,
            radius: value.radius,
            color: value.color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaddleRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<&Paddle> for PaddleRect {
    fn from(value: &Paddle) -> Self {
        Self {
            x: value.x,
            y: value.y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }
}

impl Default for PaddleRect {
    fn default() -> Self {
        Self {
            x: PADDLE_START_X,
            y: PADDLE_Y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }
}

/// Read-only view of a match for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MatchSnapshot {
    pub phase: Phase,
    pub player_score: u32,
    pub cpu_score: u32,
    pub winner: Option<Winner>,
    pub paddle: PaddleRect,
    pub balls: Vec<BallSnapshot>,
}

impl MatchSnapshot {
    /// Reset to a fresh, not-started view while keeping the ball allocation.
    pub fn clear(&mut self) {
        self.phase = Phase::NotStarted;
        self.player_score = 0;
        self.cpu_score = 0;
        self.winner = None;
        self.paddle = PaddleRect::default();
        self.balls.clear();
    }

    pub fn playing(&self) -> bool {
        self.phase == Phase::Playing
    }
}
