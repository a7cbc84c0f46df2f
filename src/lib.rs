//! # firetap
//!
//! **Firetap** is a streaming ingestion and resilience library for Rust.
//!
//! It consumes a long-lived chunked HTTP response carrying concatenated
//! JSON objects (a sampled firehose), decodes records incrementally as
//! bytes arrive, accumulates them in a thread-safe in-memory store, and
//! exposes throughput statistics over the time the stream was actually
//! active. A supervision loop keeps the connection alive across transient
//! faults and rate limiting with class-specific quadratic backoff.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!              ┌────────────────────────────────────────────┐
//!              │  PollingSupervisor (reconnect loop)        │
//!              │  - classifies failures (FailureClass)      │
//!              │  - applies BackoffPolicy per class         │
//!              │  - brackets the ActiveClock per attempt    │
//!              │  - SubscriberSet (fans out to subscribers) │
//!              └──────┬─────────────────────────────┬───────┘
//!                     ▼                             │
//!              ┌──────────────┐                     │
//!              │StreamConsumer│  one streaming GET  │
//!              │ (Consume)    │  per attempt        │
//!              └──────┬───────┘                     │
//!                     ▼                             │ Publishes Events:
//!              ┌──────────────┐                     │ - PollStarting
//!              │StreamDecoder │  chunked bytes ──►  │ - StreamOpened
//!              │ (incremental)│  Records            │ - AttemptFailed
//!              └──────┬───────┘                     │ - BackoffScheduled
//!                     ▼                             │ - ...
//!              ┌──────────────┐                     ▼
//!              │ RecordStore  │      ┌───────────────────────────┐
//!              │ + ActiveClock│      │   Bus (broadcast channel) │
//!              └──────┬───────┘      └─────────────┬─────────────┘
//!                     ▼                            ▼
//!           StatisticsComputer            subscriber_listener
//!           (total, avg/minute)         ──► SubscriberSet workers
//!                                           ──► sub.on_event()
//! ```
//!
//! ### Lifecycle
//! ```text
//! StreamConfig ──► StreamConsumer ──► PollingSupervisor::run(ctx)
//!
//! loop {
//!   ├─► clock.start(), publish PollStarting{ attempt }
//!   ├─► consume(store, ctx): GET ─► decode ─► append, until close
//!   ├─► clock.stop()
//!   │
//!   ├─ Ok (clean close)  ─► StreamEnded, reconnect
//!   ├─ Err(Canceled)     ─► ShutdownRequested, exit Ok
//!   ├─ Err(Unauthorized) ─► Terminated, exit Err
//!   └─ Err(other)        ─► AttemptFailed
//!        ├─ RateLimited   ─► wait 60·(n−1)² s, unbounded
//!        ├─ TransientHttp ─► wait 5·(n−1)² s, 7 attempts per window
//!        └─ Protocol/Other ─► reconnect immediately
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                       | Key types / traits                      |
//! |-------------------|-------------------------------------------------------------------|-----------------------------------------|
//! | **Ingestion**     | Streaming GET and incremental JSON-object decoding.               | [`StreamConsumer`], [`StreamDecoder`]   |
//! | **Supervision**   | Reconnect loop with failure classification and backoff.           | [`PollingSupervisor`], [`Consume`]      |
//! | **Policies**      | Quadratic backoff schedules per failure class.                    | [`BackoffPolicy`], [`FailureClass`]     |
//! | **Storage**       | Thread-safe record store with an active-time clock.               | [`RecordStore`], [`ActiveClock`]        |
//! | **Statistics**    | Total and per-minute throughput over active time.                 | [`StatisticsComputer`], [`Statistics`]  |
//! | **Subscriber API**| Hook into stream lifecycle events (logging, custom subscribers).  | [`Subscribe`], [`LogWriter`]            |
//! | **Errors**        | Typed errors for transport, protocol, and configuration.          | [`StreamError`]                         |
//! | **Configuration** | Endpoint, credential, and timing settings with validation.        | [`StreamConfig`]                        |
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use firetap::{
//!     Bus, LogWriter, PollingSupervisor, RecordStore, StatisticsComputer, StreamConfig,
//!     StreamConsumer, Subscribe,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StreamConfig {
//!         base_url: "https://api.example.com".into(),
//!         api_token: std::env::var("API_TOKEN")?,
//!         stream_path: "/2/posts/sample/stream".into(),
//!         ..StreamConfig::default()
//!     };
//!
//!     let bus = Bus::new(256);
//!     let store = Arc::new(RecordStore::new());
//!     let consumer = Arc::new(StreamConsumer::new(config, bus.clone())?);
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::default())];
//!
//!     let sup = PollingSupervisor::new(consumer, Arc::clone(&store), bus, subs);
//!     let ctx = CancellationToken::new();
//!
//!     tokio::spawn({
//!         let ctx = ctx.clone();
//!         async move {
//!             let _ = tokio::signal::ctrl_c().await;
//!             ctx.cancel();
//!         }
//!     });
//!
//!     sup.run(ctx.clone()).await?;
//!
//!     let stats = StatisticsComputer::new(store).compute(&ctx);
//!     println!("{}", serde_json::to_string(&stats)?);
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod policies;
mod record;
mod store;
mod stream;
mod subscribers;

// ---- Public re-exports ----

pub use config::StreamConfig;
pub use core::PollingSupervisor;
pub use error::{FailureClass, StreamError};
pub use events::{Bus, Event, EventKind};
pub use policies::BackoffPolicy;
pub use record::{Payload, Record};
pub use store::{ActiveClock, RecordStore, Statistics, StatisticsComputer};
pub use stream::{ByteStream, Consume, StreamConsumer, StreamDecoder};
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
