//! # PollingSupervisor: reconnect loop with failure classification.
//!
//! The supervisor runs one [`Consume`] implementation until cancelled,
//! restarting the stream on every recoverable failure and on clean
//! end-of-stream. It is the single point where failures are classified and
//! recovery is decided; the decoder and consumer only propagate.
//!
//! ## State machine
//! ```text
//! Idle ──► Connecting ──► Streaming ──► (BackingOff │ Terminated)
//!              ▲                              │
//!              └──────────────────────────────┘
//!
//! loop {
//!   ├─► clock.start()                      (resume active time)
//!   ├─► publish PollStarting{ attempt }
//!   ├─► consumer.consume(store, ctx)
//!   ├─► clock.stop()                       (on every exit from Streaming)
//!   │
//!   ├─ Ok (clean end)    ─► publish StreamEnded, reset streak, reconnect
//!   ├─ Err(Canceled)     ─► publish ShutdownRequested, return Ok
//!   ├─ Err(Unauthorized) ─► publish Terminated, return Err  (propagates)
//!   └─ Err(other)        ─► publish AttemptFailed
//!        ├─ class has a policy:
//!        │    ├─ exhausted ─► publish RetriesExhausted, reset streak,
//!        │    │               reconnect immediately
//!        │    └─ else      ─► publish BackoffScheduled, sleep(delay)
//!        │                    (sleep races the token)
//!        └─ no policy (Protocol/Other) ─► reconnect immediately
//! }
//! ```
//!
//! ## Retry composition
//! Backoff lives **only** here. There is no second retry layer inside the
//! HTTP client: one visible loop, one policy per failure class, selected by
//! [`BackoffPolicy::for_class`]. The streak counts consecutive failures of
//! the same class and resets on success, on a class change, and on policy
//! exhaustion.
//!
//! ## Rules
//! - The active clock starts and stops in lockstep with each attempt.
//! - Cancellation is observed before each attempt, inside the consumer, and
//!   during the backoff sleep; it always ends the loop gracefully.
//! - Authorization loss is the one failure that propagates to the host.

use std::sync::Arc;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::error::{FailureClass, StreamError};
use crate::events::{Bus, Event, EventKind};
use crate::policies::BackoffPolicy;
use crate::store::RecordStore;
use crate::stream::Consume;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Drives reconnect/backoff decisions for one stream consumer.
pub struct PollingSupervisor {
    consumer: Arc<dyn Consume>,
    store: Arc<RecordStore>,
    bus: Bus,
    subs: Arc<SubscriberSet>,
}

impl PollingSupervisor {
    /// Creates a supervisor over the given consumer and shared store.
    ///
    /// `bus` must be the same instance handed to the consumer so that its
    /// events reach the same subscribers.
    pub fn new(
        consumer: Arc<dyn Consume>,
        store: Arc<RecordStore>,
        bus: Bus,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Self {
        Self {
            consumer,
            store,
            bus,
            subs: Arc::new(SubscriberSet::new(subscribers)),
        }
    }

    /// Runs the polling loop until cancellation or authorization loss.
    ///
    /// Returns `Ok(())` on graceful shutdown; the only `Err` is the
    /// propagated [`StreamError::Unauthorized`].
    pub async fn run(&self, ctx: CancellationToken) -> Result<(), StreamError> {
        self.subscriber_listener();

        let mut attempt: u32 = 0;
        // Consecutive failures of the same class; drives the backoff policy.
        let mut streak: u32 = 0;
        let mut last_class: Option<FailureClass> = None;

        loop {
            if ctx.is_cancelled() {
                self.bus.publish(Event::new(EventKind::ShutdownRequested));
                return Ok(());
            }

            attempt += 1;
            self.store.clock().start();
            self.bus
                .publish(Event::new(EventKind::PollStarting).with_attempt(attempt));

            let outcome = self.consumer.consume(&self.store, ctx.clone()).await;
            self.store.clock().stop();

            let err = match outcome {
                Ok(()) => {
                    self.bus.publish(Event::new(EventKind::StreamEnded));
                    streak = 0;
                    last_class = None;
                    continue;
                }
                Err(err) => err,
            };

            match err.class() {
                FailureClass::Canceled => {
                    self.bus.publish(Event::new(EventKind::ShutdownRequested));
                    return Ok(());
                }
                FailureClass::Unauthorized => {
                    self.bus
                        .publish(Event::new(EventKind::Terminated).with_reason(err.to_string()));
                    return Err(err);
                }
                class => {
                    streak = if last_class == Some(class) { streak + 1 } else { 1 };
                    last_class = Some(class);

                    let mut failed = Event::new(EventKind::AttemptFailed)
                        .with_attempt(streak)
                        .with_reason(err.to_string());
                    if let StreamError::Transport {
                        status: Some(code), ..
                    } = &err
                    {
                        failed = failed.with_status(*code);
                    }
                    self.bus.publish(failed);

                    let Some(policy) = BackoffPolicy::for_class(class) else {
                        // Protocol and misconfiguration failures reconnect
                        // immediately; there is no wait that would help.
                        continue;
                    };

                    if policy.is_exhausted(streak) {
                        self.bus.publish(
                            Event::new(EventKind::RetriesExhausted)
                                .with_attempt(streak)
                                .with_reason(err.to_string()),
                        );
                        streak = 0;
                        last_class = None;
                        continue;
                    }

                    let delay = policy.delay(streak);
                    self.bus.publish(
                        Event::new(EventKind::BackoffScheduled)
                            .with_attempt(streak)
                            .with_delay(delay)
                            .with_reason(err.to_string()),
                    );

                    let sleep = time::sleep(delay);
                    tokio::pin!(sleep);
                    select! {
                        _ = &mut sleep => {}
                        _ = ctx.cancelled() => {
                            self.bus.publish(Event::new(EventKind::ShutdownRequested));
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// (fire-and-forget).
    fn subscriber_listener(&self) {
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                set.emit(&ev);
            }
        });
    }
}
