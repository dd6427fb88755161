//! Start-up configuration from `FRONTON_*` environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::audio::{flag_or_warn, AudioConfig};
use crate::core::{MatchConfig, PaddleBounds};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Fixed seed, or `None` to derive one from the clock.
    pub seed: Option<u64>,
    pub paddle_bounds: PaddleBounds,
    pub audio: AudioConfig,
    /// Log file; logging is off when unset.
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            paddle_bounds: PaddleBounds::Clamped,
            audio: AudioConfig::default(),
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("FRONTON_SEED")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .and_then(|raw| match raw.parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    warn!(value = %raw, "FRONTON_SEED is not a number, using a random seed");
                    None
                }
            });

        let free = lookup("FRONTON_FREE_PADDLE")
            .map(|raw| flag_or_warn("FRONTON_FREE_PADDLE", &raw))
            .unwrap_or(false);
        let paddle_bounds = if free {
            PaddleBounds::Free
        } else {
            PaddleBounds::Clamped
        };

        let log_path = lookup("FRONTON_LOG")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            seed,
            paddle_bounds,
            audio: AudioConfig::from_lookup(&lookup),
            log_path,
        }
    }

    /// Match options, resolving a missing seed from the clock.
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            seed: self.seed.unwrap_or_else(clock_seed),
            paddle_bounds: self.paddle_bounds,
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
