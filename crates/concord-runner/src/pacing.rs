//! Inter-iteration pacing.
//!
//! The orchestrator computes how long to wait; a pacer decides how. Tests
//! record the requested pauses instead of sleeping.

use std::sync::{Arc, Mutex};
use std::time::Duration;

pub trait IPacer {
    fn pause(&mut self, wait: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl IPacer for ThreadSleeper {
    fn pause(&mut self, wait: Duration) {
        std::thread::sleep(wait);
    }
}

/// Records pauses without sleeping. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingPacer {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl IPacer for RecordingPacer {
    fn pause(&mut self, wait: Duration) {
        if let Ok(mut pauses) = self.pauses.lock() {
            pauses.push(wait);
        }
    }
}
