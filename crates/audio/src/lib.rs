//! Sound cues for the match.
//!
//! The engine reports cues through [`types::CueSink`]; [`AudioOutput`] forwards
//! them over a channel to a worker task that restarts the matching sound
//! with an external player. Nothing here blocks the frame loop.

pub mod bank;
pub mod config;
pub mod error;
pub mod output;
pub mod worker;

pub use tui_fronton_types as types;

pub use bank::CueBank;
pub use config::{flag_or_warn, parse_flag, AudioConfig, DEFAULT_PLAYER};
pub use error::AudioError;
pub use output::AudioOutput;
pub use worker::{run_worker, CommandBackend, CueBackend};
