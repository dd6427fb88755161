//! Scoring module - win detection and difficulty escalation
//!
//! The match ends as soon as either side reaches [`WIN_SCORE`]. Otherwise a
//! new ball joins whenever the player score is exactly
//! [`ESCALATION_STEP`] × the current ball count. Because the ball count grows
//! with each spawn, the threshold ratchets upward and the same score can
//! never spawn twice.
//!
//! | Balls | Next spawn at player score |
//! |-------|----------------------------|
//! | 1 | 3 |
//! | 2 | 6 |
//! | 3 | 9 |
//! | n | 3n |

use crate::rng::FieldRng;
use crate::types::{Rgba, Winner, ESCALATION_RADIUS, ESCALATION_SPEED, ESCALATION_STEP, WIN_SCORE};

/// Which side, if any, reached the win threshold.
///
/// The player takes precedence when both reach it on the same tick.
pub fn winner(player_score: u32, cpu_score: u32) -> Option<Winner> {
    if player_score == WIN_SCORE {
        Some(Winner::Player)
    } else if cpu_score == WIN_SCORE {
        Some(Winner::Cpu)
    } else {
        None
    }
}

/// Whether another ball should join.
///
/// Strict equality: a score that jumps past the threshold does not spawn.
pub fn escalation_due(player_score: u32, ball_count: usize) -> bool {
    player_score as u64 == ball_count as u64 * ESCALATION_STEP as u64
}

/// Parameters of a freshly escalated ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallParams {
    pub radius: i32,
    pub color: Rgba,
    /// Applied to both axes.
    pub speed: i32,
}

/// Roll a random escalation ball.
pub fn escalation_ball(rng: &mut FieldRng) -> BallParams {
    let speed = rng.between(ESCALATION_SPEED.0, ESCALATION_SPEED.1);
    let radius = rng.between(ESCALATION_RADIUS.0, ESCALATION_RADIUS.1);
    let color = Rgba::new(rng.channel(), rng.channel(), rng.channel(), 0);
    BallParams {
        radius,
        color,
        speed,
    }
}
