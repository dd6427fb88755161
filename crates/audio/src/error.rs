use std::path::PathBuf;

use thiserror::Error;

/// Failures while bringing up sound output.
///
/// All of them happen at start-up; once the worker runs, playback problems
/// are logged and otherwise ignored.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("sound cue `{cue}` not found at {}", path.display())]
    MissingCue { cue: &'static str, path: PathBuf },

    #[error("sound player command is empty")]
    EmptyPlayer,

    #[error("failed to start audio runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
