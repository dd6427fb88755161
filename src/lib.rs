//! Terminal Fronton (workspace facade crate).
//!
//! Re-exports the member crates under one name and adds the start-up glue
//! shared by the binary and the integration tests: environment
//! configuration and log setup.

pub mod config;
pub mod logging;

pub use tui_fronton_audio as audio;
pub use tui_fronton_core as core;
pub use tui_fronton_input as input;
pub use tui_fronton_term as term;
pub use tui_fronton_types as types;

pub use config::AppConfig;
