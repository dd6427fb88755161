//! Match engine - pure, deterministic, and testable
//!
//! This crate owns every piece of gameplay state and advances it one frame
//! at a time. It has no dependencies on terminals, audio devices or clocks:
//!
//! - **Deterministic**: the same seed and inputs replay the same match
//! - **Side-effect free**: sound cues go to a caller-supplied [`types::CueSink`]
//! - **Frame-driven**: call [`MatchState::step`] once per frame (see [`types::TICK_MS`])
//!
//! # Module Structure
//!
//! - [`ball`]: projectile motion and wall/ceiling reflection
//! - [`paddle`]: the player's racket and its horizontal bounds
//! - [`match_state`]: the phase machine and the per-frame tick
//! - [`rng`]: seeded randomness for spawn columns and escalation balls
//! - [`scoring`]: win detection and the ball escalation ratchet
//! - [`snapshot`]: read-only render data
//!
//! # Example
//!
//! ```
//! use tui_fronton_core::MatchState;
//! use tui_fronton_types::{FrameInput, Phase, SoundCue};
//!
//! let mut game = MatchState::new(12345);
//! game.spawn_default_ball();
//!
//! let mut cues: Vec<SoundCue> = Vec::new();
//! game.step(FrameInput::confirm(), &mut cues);
//! assert_eq!(game.phase(), Phase::Playing);
//! assert_eq!(cues, vec![SoundCue::Start]);
//!
//! game.step(FrameInput::right(), &mut cues);
//! assert_eq!(game.balls().len(), 1);
//! ```

pub mod ball;
pub mod match_state;
pub mod paddle;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_fronton_types as types;

pub use ball::Ball;
pub use match_state::{MatchConfig, MatchState, StepOutcome};
pub use paddle::{Paddle, PaddleBounds};
pub use rng::FieldRng;
pub use scoring::{escalation_ball, escalation_due, winner, BallParams};
pub use snapshot::{BallSnapshot, MatchSnapshot, PaddleRect};
