//! Bridges the synchronous frame loop to the audio task.

use std::time::Duration;

use tokio::runtime::{self, Runtime};
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use crate::bank::CueBank;
use crate::config::AudioConfig;
use crate::error::AudioError;
use crate::types::{CueSink, SoundCue};
use crate::worker::{run_worker, CommandBackend};

/// Handle the game loop plays cues through.
///
/// Holds its own single-worker runtime; sending a cue never blocks.
pub struct AudioOutput {
    tx: Option<mpsc::UnboundedSender<SoundCue>>,
    rt: Option<Runtime>,
}

impl AudioOutput {
    /// Start sound output as configured.
    ///
    /// A muted config, or one without a sound directory, yields a silent
    /// output. Missing cue files are an error.
    pub fn start(config: &AudioConfig) -> Result<Self, AudioError> {
        let Some(dir) = config.sound_dir.as_deref().filter(|_| !config.muted) else {
            info!(muted = config.muted, "sound disabled");
            return Ok(Self::silent());
        };

        let bank = CueBank::acquire(dir)?;
        let (program, args) = config.player_command()?;

        let rt = runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("fronton-audio")
            .enable_all()
            .build()?;
        let (tx, rx) = mpsc::unbounded_channel();
        rt.spawn(run_worker(rx, CommandBackend::new(bank, program, args)));

        Ok(Self {
            tx: Some(tx),
            rt: Some(rt),
        })
    }

    pub fn silent() -> Self {
        Self { tx: None, rt: None }
    }

    pub fn is_silent(&self) -> bool {
        self.tx.is_none()
    }

    /// Close the channel and give the worker a moment to stop its players.
    pub fn shutdown(mut self) {
        self.tx = None;
        if let Some(rt) = self.rt.take() {
            rt.shutdown_timeout(Duration::from_millis(100));
        }
    }
}

impl CueSink for AudioOutput {
    fn play(&mut self, cue: SoundCue) {
        match &self.tx {
            Some(tx) => {
                if tx.send(cue).is_err() {
                    debug!(cue = cue.as_str(), "audio worker gone, cue dropped");
                }
            }
            None => trace!(cue = cue.as_str(), "muted cue"),
        }
    }
}
