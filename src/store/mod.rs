//! In-memory aggregation state and derived statistics.
//!
//! ## Contents
//! - [`RecordStore`] — thread-safe, append-only collection of decoded
//!   records plus the cumulative active-time clock
//! - [`ActiveClock`] — elapsed time while a stream connection was open
//! - [`Statistics`], [`StatisticsComputer`] — derived throughput numbers
//!
//! The store is an explicitly owned, injectable object (shared via `Arc`)
//! rather than process-global state: tests create as many independent
//! instances as they need, and the supervisor and the statistics reader are
//! coupled only through the instance they are both handed.
//!
//! ## Concurrency
//! One writer (the polling task) appends concurrently with arbitrarily many
//! statistics readers. All state sits behind `std::sync` primitives and no
//! lock is ever held across an `await`.

mod clock;
mod records;
mod stats;

pub use clock::ActiveClock;
pub use records::RecordStore;
pub use stats::{Statistics, StatisticsComputer};
