//! The audio task: receives cues and drives a playback backend.

use std::process::Stdio;

use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::bank::CueBank;
use crate::types::SoundCue;

/// Something that can play cues. Triggers must not block.
pub trait CueBackend: Send + 'static {
    fn trigger(&mut self, cue: SoundCue);

    /// Stop anything still playing.
    fn shutdown(&mut self) {}
}

/// Plays each cue by running an external player on its file.
///
/// One child process is kept per cue. Re-triggering a cue that is still
/// playing kills it first, so the sound restarts from the beginning.
pub struct CommandBackend {
    bank: &'static CueBank,
    program: String,
    args: Vec<String>,
    playing: [Option<Child>; 4],
}

impl CommandBackend {
    pub fn new(bank: &'static CueBank, program: String, args: Vec<String>) -> Self {
        Self {
            bank,
            program,
            args,
            playing: Default::default(),
        }
    }

    fn stop(slot: &mut Option<Child>) {
        if let Some(mut child) = slot.take() {
            // Already-exited children report an error here; nothing to do.
            let _ = child.start_kill();
        }
    }
}

impl CueBackend for CommandBackend {
    fn trigger(&mut self, cue: SoundCue) {
        let slot = &mut self.playing[cue.index()];
        Self::stop(slot);

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(self.bank.path(cue))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();
        match spawned {
            Ok(child) => {
                debug!(cue = cue.as_str(), "playing cue");
                *slot = Some(child);
            }
            Err(err) => warn!(cue = cue.as_str(), program = %self.program, %err, "cue playback failed"),
        }
    }

    fn shutdown(&mut self) {
        for slot in self.playing.iter_mut() {
            Self::stop(slot);
        }
    }
}

/// Drain `rx` into `backend` until every sender is gone.
pub async fn run_worker<B: CueBackend>(mut rx: mpsc::UnboundedReceiver<SoundCue>, mut backend: B) {
    info!("audio worker started");
    while let Some(cue) = rx.recv().await {
        backend.trigger(cue);
    }
    backend.shutdown();
    info!("audio worker stopped");
}
