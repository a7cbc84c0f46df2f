//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait and the fan-out machinery for
//! delivering lifecycle events published on the
//! [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Supervisor/Consumer ── publish(Event) ──► Bus ──► supervisor listener
//!                                                        │
//!                                                  SubscriberSet::emit
//!                                             ┌──────────┼──────────┐
//!                                             ▼          ▼          ▼
//!                                        [queue S1] [queue S2] [queue SN]
//!                                             ▼          ▼          ▼
//!                                       on_event()  on_event()  on_event()
//! ```
//!
//! - **Passive subscribers** observe and react (logging, metrics, alerts).
//! - Subscribers never block the publisher; each one is driven by its own
//!   worker over a bounded queue.

mod log;
mod set;
mod subscribe;

pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
