//! Held-key tracking for terminal environments.
//!
//! The match engine wants level-triggered key states ("is left held this
//! frame?"), but most terminals only deliver press and auto-repeat events.
//! Keys are therefore treated as held until either a release event arrives
//! or no press/repeat was seen for the release timeout.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{binding_for, Binding};
use crate::types::FrameInput;

// Long enough to bridge the gap between terminal auto-repeat events, short
// enough that a tap does not drag the racket across the field.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Tracks which controls are currently held.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    /// Last press/repeat per binding, `None` when released.
    held: [Option<Instant>; 4],
    release_timeout: Duration,
    /// Set once the terminal proved it reports releases; disables the timeout.
    releases_reported: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            held: [None; 4],
            release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
            releases_reported: false,
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn release_timeout(&self) -> Duration {
        self.release_timeout
    }

    pub fn releases_reported(&self) -> bool {
        self.releases_reported
    }

    /// Feed one terminal key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        self.handle_key_event_at(key, Instant::now());
    }

    pub fn handle_key_event_at(&mut self, key: KeyEvent, now: Instant) {
        let Some(binding) = binding_for(key) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press_at(binding, now),
            KeyEventKind::Release => {
                self.releases_reported = true;
                self.release(binding);
            }
        }
    }

    pub fn press_at(&mut self, binding: Binding, now: Instant) {
        self.held[binding.index()] = Some(now);
    }

    pub fn release(&mut self, binding: Binding) {
        self.held[binding.index()] = None;
    }

    /// Sample key states for the current frame.
    pub fn frame_input(&mut self) -> FrameInput {
        self.frame_input_at(Instant::now())
    }

    pub fn frame_input_at(&mut self, now: Instant) -> FrameInput {
        if !self.releases_reported {
            for slot in self.held.iter_mut() {
                if let Some(at) = *slot {
                    if now.saturating_duration_since(at) > self.release_timeout {
                        *slot = None;
                    }
                }
            }
        }

        FrameInput {
            left: self.is_held(Binding::Left),
            right: self.is_held(Binding::Right),
            confirm: self.is_held(Binding::Confirm),
            quit: self.is_held(Binding::Quit),
        }
    }

    pub fn is_held(&self, binding: Binding) -> bool {
        self.held[binding.index()].is_some()
    }

    pub fn reset(&mut self) {
        self.held = [None; 4];
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}
