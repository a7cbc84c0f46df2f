//! # Derived throughput statistics.
//!
//! [`StatisticsComputer`] reads a [`RecordStore`] snapshot and produces
//! [`Statistics`] on demand: the total record count and the average number
//! of records per minute of active streaming time. Nothing is cached;
//! every call recomputes from the current snapshot.
//!
//! The rate is `round(total / max(elapsed_ms, ε) × 60000)` with
//! `ε = 0.0001` guarding the division before any active time has elapsed.
//! Rounding is half-away-from-zero (`f64::round`).

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::store::RecordStore;

/// Guard against division by zero when no active time has elapsed yet.
const MIN_ELAPSED_MS: f64 = 0.0001;

/// Milliseconds per minute, the rate conversion factor.
const MS_PER_MINUTE: f64 = 60_000.0;

/// Derived throughput numbers; recomputed on demand, never stored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Total records decoded since process start.
    pub total_records: u64,
    /// Average records per minute of active streaming time, rounded to the
    /// nearest integer.
    pub average_per_minute: u64,
}

/// Read-only statistics view over a shared [`RecordStore`].
pub struct StatisticsComputer {
    store: Arc<RecordStore>,
}

impl StatisticsComputer {
    /// Creates a computer over the given store.
    #[must_use]
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Computes current statistics from a store snapshot.
    ///
    /// If `ctx` is already cancelled the zero-value statistics are returned
    /// immediately, without consulting the store. The result is always
    /// finite and non-negative, including at zero elapsed time.
    pub fn compute(&self, ctx: &CancellationToken) -> Statistics {
        if ctx.is_cancelled() {
            return Statistics::default();
        }

        let total = self.store.len() as u64;
        let elapsed_ms = self.store.elapsed_active().as_millis() as f64;
        let elapsed_ms = if elapsed_ms == 0.0 { MIN_ELAPSED_MS } else { elapsed_ms };

        let rate = (total as f64 / elapsed_ms * MS_PER_MINUTE).round();

        Statistics {
            total_records: total,
            // `as` saturates on overflow, so even an absurd rate stays a
            // valid non-negative integer.
            average_per_minute: rate as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Payload, Record};

    fn record() -> Record {
        Record {
            payload: Payload {
                id: "1".into(),
                text: "body".into(),
            },
        }
    }

    #[test]
    fn test_zero_elapsed_zero_records_is_all_zero() {
        let computer = StatisticsComputer::new(Arc::new(RecordStore::new()));
        let stats = computer.compute(&CancellationToken::new());
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn test_zero_elapsed_with_records_stays_finite() {
        let store = Arc::new(RecordStore::new());
        store.append(record());
        store.append(record());

        let stats = StatisticsComputer::new(store).compute(&CancellationToken::new());
        assert_eq!(stats.total_records, 2);
        // Enormous but finite and non-negative; no division error.
        assert!(stats.average_per_minute > 0);
    }

    #[test]
    fn test_cancelled_token_short_circuits() {
        let store = Arc::new(RecordStore::new());
        store.append(record());
        store.clock().start();

        let token = CancellationToken::new();
        token.cancel();

        let stats = StatisticsComputer::new(store).compute(&token);
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn test_rate_reflects_elapsed_time() {
        let store = Arc::new(RecordStore::new());
        for _ in 0..10 {
            store.append(record());
        }
        store.clock().start();
        std::thread::sleep(std::time::Duration::from_millis(30));
        store.clock().stop();

        let stats = StatisticsComputer::new(Arc::clone(&store)).compute(&CancellationToken::new());
        assert_eq!(stats.total_records, 10);
        // 10 records in a few tens of milliseconds extrapolates to a large
        // per-minute rate; the exact value depends on scheduling.
        assert!(stats.average_per_minute >= 1_000);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&Statistics {
            total_records: 3,
            average_per_minute: 7,
        })
        .expect("serializable");
        assert_eq!(json, r#"{"totalRecords":3,"averagePerMinute":7}"#);
    }
}
