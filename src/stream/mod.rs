//! Streaming ingestion: HTTP consumer and incremental JSON decoder.
//!
//! ## Contents
//! - [`Consume`] — the seam between the supervisor and one connection
//!   attempt; implemented by [`StreamConsumer`] and by test doubles
//! - [`StreamConsumer`] — owns the HTTP client, validates configuration,
//!   opens the streaming GET, and forwards decoded records to the store
//! - [`StreamDecoder`] — turns an unbounded chunked byte stream into a lazy
//!   sequence of [`Record`](crate::record::Record)s
//!
//! Data flow: `PollingSupervisor → StreamConsumer → StreamDecoder →
//! RecordStore`. Errors flow the other way, unmodified: neither the decoder
//! nor the consumer absorbs a failure.

mod consumer;
mod decoder;

pub use consumer::StreamConsumer;
pub use decoder::{ByteStream, StreamDecoder};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::StreamError;
use crate::store::RecordStore;

/// One streaming connection attempt.
///
/// The supervisor drives implementations in a loop; each call covers exactly
/// one attempt from configuration validation to stream close. A clean
/// server-side close is `Ok(())` — "no more data for now", not a failure.
///
/// Implementations must observe `ctx` at every suspension point and return
/// [`StreamError::Canceled`] promptly once it fires.
#[async_trait]
pub trait Consume: Send + Sync + 'static {
    /// Runs one connection attempt, appending each decoded record to `store`.
    async fn consume(&self, store: &RecordStore, ctx: CancellationToken)
        -> Result<(), StreamError>;
}
