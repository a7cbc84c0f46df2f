//! Runtime core: the polling loop that keeps the stream alive.
//!
//! The only public API from this module is [`PollingSupervisor`], which
//! drives a [`Consume`](crate::stream::Consume) implementation in a loop,
//! classifies failures, applies backoff, brackets the active-time clock,
//! and publishes lifecycle events.

mod supervisor;

pub use supervisor::PollingSupervisor;
