//! Audio settings read from the environment.

use std::path::PathBuf;

use tracing::warn;

use crate::error::AudioError;

pub const DEFAULT_PLAYER: &str = "mpg123 -q";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioConfig {
    /// Directory holding one file per cue. `None` means no sound.
    pub sound_dir: Option<PathBuf>,
    /// Command line used to play a cue; the file path is appended.
    pub player: String,
    pub muted: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sound_dir: None,
            player: DEFAULT_PLAYER.to_string(),
            muted: false,
        }
    }
}

impl AudioConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; `from_env` uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let sound_dir = lookup("FRONTON_SOUND_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let player = lookup("FRONTON_SOUND_PLAYER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYER.to_string());

        let muted = lookup("FRONTON_MUTE")
            .map(|raw| flag_or_warn("FRONTON_MUTE", &raw))
            .unwrap_or(false);

        Self {
            sound_dir,
            player,
            muted,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.muted || self.sound_dir.is_none()
    }

    /// Split the player command into program and leading arguments.
    pub fn player_command(&self) -> Result<(String, Vec<String>), AudioError> {
        let mut parts = self.player.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(AudioError::EmptyPlayer)?;
        Ok((program, parts.collect()))
    }
}

/// Parse a boolean switch such as `1`, `true`, `off`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Like [`parse_flag`], but unknown values are logged and read as `false`.
pub fn flag_or_warn(key: &str, raw: &str) -> bool {
    parse_flag(raw).unwrap_or_else(|| {
        warn!(key, value = raw, "ignoring unrecognised flag value");
        false
    })
}
