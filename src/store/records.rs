//! # Thread-safe record store.
//!
//! [`RecordStore`] is an append-only, unordered collection of decoded
//! [`Record`]s plus the [`ActiveClock`] that measures how long a stream
//! connection has been open. The record count is monotonically
//! non-decreasing for the lifetime of the process; nothing in the engine
//! removes records.
//!
//! One writer (the polling task) appends while any number of statistics
//! readers call [`RecordStore::len`] and [`RecordStore::elapsed_active`]
//! concurrently. Each append and each count read is atomic; strict ordering
//! across readers is not required and not provided.

use std::sync::RwLock;
use std::time::Duration;

use crate::record::Record;
use crate::store::ActiveClock;

/// Shared in-memory aggregation state for one ingestion pipeline.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: RwLock<Vec<Record>>,
    clock: ActiveClock,
}

impl RecordStore {
    /// Creates an empty store with a stopped clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one decoded record. Never held across a suspension point.
    pub fn append(&self, record: Record) {
        self.records.write().expect("record lock poisoned").push(record);
    }

    /// Current record count (consistent snapshot).
    pub fn len(&self) -> usize {
        self.records.read().expect("record lock poisoned").len()
    }

    /// True if no record has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cumulative active-time clock bracketing connection attempts.
    pub fn clock(&self) -> &ActiveClock {
        &self.clock
    }

    /// Cumulative duration during which a stream connection was open.
    pub fn elapsed_active(&self) -> Duration {
        self.clock.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Payload;
    use std::sync::Arc;

    fn record(id: &str) -> Record {
        Record {
            payload: Payload {
                id: id.into(),
                text: "body".into(),
            },
        }
    }

    #[test]
    fn test_append_increments_count_by_one() {
        let store = RecordStore::new();
        assert!(store.is_empty());
        store.append(record("1"));
        assert_eq!(store.len(), 1);
        store.append(record("2"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_appends_and_reads() {
        let store = Arc::new(RecordStore::new());
        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..1000 {
                    store.append(record(&i.to_string()));
                }
            })
        };

        // Reads must observe consistent, never-decreasing counts.
        let mut last = 0;
        while !writer.is_finished() {
            let now = store.len();
            assert!(now >= last);
            last = now;
        }
        writer.join().expect("writer thread");
        assert_eq!(store.len(), 1000);
    }
}
