//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto racket controls and turns the stream of
//! press/repeat/release events into one [`types::FrameInput`] per tick.

pub mod handler;
pub mod map;

pub use tui_fronton_types as types;

pub use handler::KeyTracker;
pub use map::{binding_for, should_quit, Binding};
