//! Terminal renderer for the match.
//!
//! Renders a [`core::MatchSnapshot`] into a plain framebuffer, then flushes
//! that framebuffer to the terminal with crossterm. No widget toolkit is
//! involved:
//! - `game_view` is pure and unit-tested
//! - `renderer` owns the terminal and only sends changed cells

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_fronton_core as core;
pub use tui_fronton_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, FieldLayout, GameView, Viewport};
pub use renderer::{encode_changes_into, encode_full_into, for_each_changed_run, Run, TerminalRenderer};
