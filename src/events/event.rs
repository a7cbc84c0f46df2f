//! # Lifecycle events emitted by the polling supervisor and stream consumer.
//!
//! [`EventKind`] classifies the moments a subscriber can observe: connection
//! attempts starting, the stream opening and ending, failures, scheduled
//! backoff waits, and the two terminal outcomes (authorization loss and
//! graceful shutdown).
//!
//! [`Event`] carries the metadata for the kind: attempt counters, backoff
//! delay, HTTP status, and a human-readable reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically; use it to restore publication order when events are
//! processed out of order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A connection attempt is starting; the active clock has been resumed.
    ///
    /// Sets: `attempt` (lifetime attempt number), `at`, `seq`.
    PollStarting,

    /// The server answered 2xx and the body is being consumed incrementally.
    ///
    /// Sets: `status`, `at`, `seq`.
    StreamOpened,

    /// The server closed the stream without an error ("no more data for
    /// now"); the supervisor reconnects immediately.
    ///
    /// Sets: `at`, `seq`.
    StreamEnded,

    /// A connection attempt failed with a recoverable error.
    ///
    /// Sets: `attempt` (consecutive same-class failures), `reason`,
    /// `status` (when transport-level), `at`, `seq`.
    AttemptFailed,

    /// A backoff wait is scheduled before the next attempt.
    ///
    /// Sets: `attempt`, `delay_ms`, `reason`, `at`, `seq`.
    BackoffScheduled,

    /// A bounded backoff policy ran out of attempts; the failure surfaced to
    /// the supervisor loop, which reconnects with a fresh policy window.
    ///
    /// Sets: `attempt`, `reason`, `at`, `seq`.
    RetriesExhausted,

    /// The supervisor stopped permanently because authorization was lost.
    ///
    /// Sets: `reason`, `at`, `seq`.
    Terminated,

    /// The external cancellation signal was observed; no further reconnect
    /// attempts will be made.
    ///
    /// Sets: `at`, `seq`.
    ShutdownRequested,
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - remaining fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Attempt counter; lifetime attempts for `PollStarting`, consecutive
    /// same-class failures for failure-driven kinds.
    pub attempt: Option<u32>,
    /// Backoff delay before the next attempt, in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// HTTP status code, when the event is transport-related.
    pub status: Option<u16>,
    /// Human-readable reason (failure messages).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates an event of the given kind with the current timestamp and the
    /// next global sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            attempt: None,
            delay_ms: None,
            status: None,
            reason: None,
        }
    }

    /// Attaches an attempt count.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a backoff delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        self.delay_ms = Some(d.as_millis().min(u128::from(u32::MAX)) as u32);
        self
    }

    /// Attaches an HTTP status code.
    #[inline]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_increase() {
        let a = Event::new(EventKind::PollStarting);
        let b = Event::new(EventKind::StreamEnded);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_attach_metadata() {
        let ev = Event::new(EventKind::BackoffScheduled)
            .with_attempt(3)
            .with_delay(Duration::from_secs(45))
            .with_reason("transport error: 503");
        assert_eq!(ev.attempt, Some(3));
        assert_eq!(ev.delay_ms, Some(45_000));
        assert_eq!(ev.reason.as_deref(), Some("transport error: 503"));
    }

    #[test]
    fn test_delay_saturates_at_u32_millis() {
        let ev = Event::new(EventKind::BackoffScheduled).with_delay(Duration::from_secs(u64::MAX));
        assert_eq!(ev.delay_ms, Some(u32::MAX));
    }
}
