//! # Cumulative active-time clock.
//!
//! [`ActiveClock`] accumulates the total duration during which a stream
//! connection was open. The polling task brackets each connection attempt
//! with [`ActiveClock::start`] / [`ActiveClock::stop`]; statistics readers
//! call [`ActiveClock::elapsed`] concurrently.
//!
//! `start` and `stop` are idempotent: starting a running clock and stopping
//! a stopped clock are no-ops. `elapsed` includes the currently running
//! segment, so readers see time advance while a connection is open.

use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct ClockState {
    accumulated: Duration,
    started_at: Option<Instant>,
}

/// Monotonic, thread-safe elapsed-active-time counter.
#[derive(Debug, Default)]
pub struct ActiveClock {
    inner: Mutex<ClockState>,
}

impl ActiveClock {
    /// Creates a stopped clock with zero accumulated time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or resumes) the clock; a no-op if already running.
    pub fn start(&self) {
        let mut state = self.inner.lock().expect("clock lock poisoned");
        if state.started_at.is_none() {
            state.started_at = Some(Instant::now());
        }
    }

    /// Stops the clock, folding the running segment into the total; a no-op
    /// if already stopped.
    pub fn stop(&self) {
        let mut state = self.inner.lock().expect("clock lock poisoned");
        if let Some(started) = state.started_at.take() {
            state.accumulated += started.elapsed();
        }
    }

    /// Total active time, including the currently running segment.
    pub fn elapsed(&self) -> Duration {
        let state = self.inner.lock().expect("clock lock poisoned");
        match state.started_at {
            Some(started) => state.accumulated + started.elapsed(),
            None => state.accumulated,
        }
    }
}
