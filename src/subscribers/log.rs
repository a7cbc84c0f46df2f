//! # LogWriter — simple event printer.
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout. Use it for
//! demos or as a reference for writing real logging/metrics subscribers.
//!
//! ## Example output
//! ```text
//! [polling] attempt=1
//! [opened] status=200
//! [failed] err="transport error: 503" attempt=1
//! [backoff] delay_ms=5000 attempt=2 err="transport error: 503"
//! [ended]
//! [terminated] err="unauthorized: the stream credential was rejected"
//! [shutdown-requested]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event printer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Constructs a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders one event as a log line. Absent counters print as `0`,
    /// absent reasons as `""`.
    fn line(e: &Event) -> String {
        let attempt = e.attempt.unwrap_or(0);
        let reason = e.reason.as_deref().unwrap_or("");
        match e.kind {
            EventKind::PollStarting => format!("[polling] attempt={attempt}"),
            EventKind::StreamOpened => format!("[opened] status={}", e.status.unwrap_or(0)),
            EventKind::StreamEnded => "[ended]".to_string(),
            EventKind::AttemptFailed => format!("[failed] err={reason:?} attempt={attempt}"),
            EventKind::BackoffScheduled => format!(
                "[backoff] delay_ms={} attempt={attempt} err={reason:?}",
                e.delay_ms.unwrap_or(0)
            ),
            EventKind::RetriesExhausted => {
                format!("[retries-exhausted] attempt={attempt} err={reason:?}")
            }
            EventKind::Terminated => format!("[terminated] err={reason:?}"),
            EventKind::ShutdownRequested => "[shutdown-requested]".to_string(),
        }
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        println!("{}", Self::line(e));
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_counters_print_bare_values() {
        let line = LogWriter::line(&Event::new(EventKind::PollStarting).with_attempt(1));
        assert_eq!(line, "[polling] attempt=1");

        let line = LogWriter::line(&Event::new(EventKind::StreamOpened).with_status(200));
        assert_eq!(line, "[opened] status=200");
    }

    #[test]
    fn test_backoff_line_matches_documented_shape() {
        let line = LogWriter::line(
            &Event::new(EventKind::BackoffScheduled)
                .with_attempt(2)
                .with_delay(Duration::from_secs(5))
                .with_reason("transport error: 503"),
        );
        assert_eq!(
            line,
            r#"[backoff] delay_ms=5000 attempt=2 err="transport error: 503""#
        );
    }

    #[test]
    fn test_absent_fields_use_defaults() {
        let line = LogWriter::line(&Event::new(EventKind::AttemptFailed));
        assert_eq!(line, r#"[failed] err="" attempt=0"#);
    }
}
