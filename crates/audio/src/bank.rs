//! Cue files, located once per process.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::info;

use crate::error::AudioError;
use crate::types::SoundCue;

static BANK: OnceLock<CueBank> = OnceLock::new();

/// Paths of every cue file, indexed by [`SoundCue::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueBank {
    paths: [PathBuf; 4],
}

impl CueBank {
    /// Resolve and verify every cue file under `dir`.
    pub fn load(dir: &Path) -> Result<Self, AudioError> {
        let mut paths: [PathBuf; 4] = Default::default();
        for cue in SoundCue::ALL {
            let path = dir.join(cue.file_name());
            if !path.is_file() {
                return Err(AudioError::MissingCue {
                    cue: cue.as_str(),
                    path,
                });
            }
            paths[cue.index()] = path;
        }
        Ok(Self { paths })
    }

    /// The process-wide bank, loaded from `dir` on first use.
    ///
    /// Later calls return the bank loaded first, whatever `dir` they pass.
    pub fn acquire(dir: &Path) -> Result<&'static CueBank, AudioError> {
        if let Some(bank) = BANK.get() {
            return Ok(bank);
        }
        let bank = Self::load(dir)?;
        info!(dir = %dir.display(), "sound cues loaded");
        Ok(BANK.get_or_init(|| bank))
    }

    pub fn path(&self, cue: SoundCue) -> &Path {
        &self.paths[cue.index()]
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::cue_dir;
    use super::*;

    #[test]
    fn load_finds_every_cue() {
        let dir = cue_dir("bank-full", &SoundCue::ALL);
        let bank = CueBank::load(&dir).unwrap();
        assert_eq!(bank.path(SoundCue::Miss), dir.join("miss.mp3"));
        assert_eq!(bank.path(SoundCue::Over), dir.join("over.mp3"));
    }

    #[test]
    fn load_reports_first_missing_cue() {
        let dir = cue_dir("bank-partial", &[SoundCue::Start, SoundCue::Hit]);
        match CueBank::load(&dir) {
            Err(AudioError::MissingCue { cue, path }) => {
                assert_eq!(cue, "miss");
                assert_eq!(path, dir.join("miss.mp3"));
            }
            other => panic!("expected missing cue, got {other:?}"),
        }
    }

    #[test]
    fn acquire_is_idempotent() {
        let dir = cue_dir("bank-acquire", &SoundCue::ALL);
        let a = CueBank::acquire(&dir).unwrap();
        let b = CueBank::acquire(Path::new("/nonexistent")).unwrap();
        assert!(std::ptr::eq(a, b));
    }
}
