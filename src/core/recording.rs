//! Simulated voice capture.
//!
//! The input box is either editing text or recording, never both. While
//! recording, the elapsed counter advances one step per whole second since
//! the last tick; the event loop calls [`Recorder::tick`] on every pass.

use std::time::{Duration, Instant};

/// Text that replaces the input buffer when a recording stops.
pub const PLACEHOLDER_TRANSCRIPT: &str = "This is a simulated voice transcription.";

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording { next_tick: Instant },
}

#[derive(Debug, Clone)]
pub struct Recorder {
    state: RecorderState,
    elapsed_secs: u32,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            state: RecorderState::Idle,
            elapsed_secs: 0,
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn start(&mut self, now: Instant) {
        self.elapsed_secs = 0;
        self.state = RecorderState::Recording {
            next_tick: now + TICK,
        };
    }

    /// Advance the counter for every tick deadline passed. Returns true if
    /// the counter changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let RecorderState::Recording { mut next_tick } = self.state else {
            return false;
        };
        let before = self.elapsed_secs;
        while now >= next_tick {
            self.elapsed_secs += 1;
            next_tick += TICK;
        }
        self.state = RecorderState::Recording { next_tick };
        self.elapsed_secs != before
    }

    /// Stop recording and return the transcript. Returns None if idle.
    pub fn stop(&mut self) -> Option<&'static str> {
        if !self.is_recording() {
            return None;
        }
        self.state = RecorderState::Idle;
        self.elapsed_secs = 0;
        Some(PLACEHOLDER_TRANSCRIPT)
    }
}

/// Render seconds as `M:SS`.
pub fn format_elapsed(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
