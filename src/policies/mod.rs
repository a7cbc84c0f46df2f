//! Retry backoff policies.
//!
//! This module holds the knobs that control **how long** the supervisor waits
//! between reconnect attempts after a failure.
//!
//! ## Contents
//! - [`BackoffPolicy`] — quadratic delay schedule, optionally capped
//!
//! ## Quick wiring
//! ```text
//! StreamError::class() ─► BackoffPolicy::for_class(class)
//!      └─► core::supervisor::PollingSupervisor uses:
//!           - policy.delay(streak) to schedule the next attempt
//!           - policy.is_exhausted(streak) to surface the failure upward
//! ```
//!
//! Only `RateLimited` and `TransientHttp` failures carry a policy; every
//! other class is handled directly by the supervisor's own loop.

mod backoff;

pub use backoff::BackoffPolicy;
