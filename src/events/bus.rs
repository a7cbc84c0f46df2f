//! # Event bus for broadcasting lifecycle events.
//!
//! [`Bus`] wraps [`tokio::sync::broadcast`] so that the supervisor and the
//! consumer can publish without blocking and without knowing who listens.
//!
//! ## Rules
//! - `publish()` never blocks and never fails; with no receivers the event is
//!   simply dropped.
//! - Capacity is a shared ring buffer; receivers that lag observe
//!   `RecvError::Lagged(n)` and skip the `n` oldest events.
//! - Events are not persisted.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for lifecycle events.
///
/// Cheap to clone (the sender is `Arc`-backed); multiple publishers may
/// publish concurrently and each subscriber receives its own clone of every
/// event sent after it subscribed.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus with the given ring-buffer capacity (clamped to >= 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active subscribers; fire-and-forget.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates an independent receiver observing subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
