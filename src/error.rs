//! Error types for the firetap ingestion engine.
//!
//! This module defines:
//!
//! - [`StreamError`] — every failure a connection attempt can produce, from
//!   configuration validation through transport and payload decoding.
//! - [`FailureClass`] — the tagged classification the supervisor inspects to
//!   decide retry vs. terminate.
//!
//! The decoder and consumer never absorb errors; everything propagates to the
//! supervisor, which calls [`StreamError::class`] and acts on the result.
//! This keeps every recoverable/terminal path explicit and exhaustively
//! matched instead of relying on error-type downcasting across component
//! boundaries.

use thiserror::Error;

/// Classification of a failed connection attempt.
///
/// Produced by [`StreamError::class`]; consumed by the supervisor loop:
/// - `RateLimited` / `TransientHttp` select a backoff policy,
/// - `Unauthorized` terminates the supervisor,
/// - `Canceled` is graceful shutdown,
/// - `Protocol` / `Other` reconnect immediately with no policy-level wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Server signalled 429; retried without a ceiling.
    RateLimited,
    /// Any other transport-level failure (non-2xx status, network error, timeout).
    TransientHttp,
    /// 401; the credential is assumed permanently invalid for this run.
    Unauthorized,
    /// Malformed, empty, or null stream payload.
    Protocol,
    /// External stop was requested.
    Canceled,
    /// Everything else, including fatal misconfiguration.
    Other,
}

/// # Errors produced by a streaming connection attempt.
///
/// Configuration violations (`MissingConfig`, `InvalidUrl`) are raised before
/// any network I/O. `Unauthorized` is the only terminal failure; `Canceled`
/// is graceful shutdown; everything else is recoverable.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StreamError {
    /// A required configuration value is empty.
    #[error("missing configuration value: {name}")]
    MissingConfig {
        /// Name of the missing field.
        name: &'static str,
    },

    /// The configured base URL + stream path do not form a valid absolute URL.
    #[error("invalid stream url: {url}")]
    InvalidUrl {
        /// The string that failed to parse.
        url: String,
    },

    /// The stream delivered an empty, null, or syntactically broken payload.
    #[error("protocol error: {reason}")]
    Protocol {
        /// What the decoder observed.
        reason: String,
    },

    /// Transport-level failure: non-2xx status, connection drop, or timeout.
    #[error("transport error: {message}")]
    Transport {
        /// HTTP status code, when the failure carries one.
        status: Option<u16>,
        /// Underlying failure message.
        message: String,
    },

    /// The server rejected the bearer credential (401).
    #[error("unauthorized: the stream credential was rejected")]
    Unauthorized,

    /// The external cancellation signal was observed.
    #[error("stream cancelled")]
    Canceled,
}

impl StreamError {
    /// Classifies this error for the supervisor's retry decision.
    pub fn class(&self) -> FailureClass {
        match self {
            StreamError::MissingConfig { .. } | StreamError::InvalidUrl { .. } => {
                FailureClass::Other
            }
            StreamError::Protocol { .. } => FailureClass::Protocol,
            StreamError::Transport { status, .. } => match status {
                Some(429) => FailureClass::RateLimited,
                _ => FailureClass::TransientHttp,
            },
            StreamError::Unauthorized => FailureClass::Unauthorized,
            StreamError::Canceled => FailureClass::Canceled,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            StreamError::MissingConfig { .. } => "config_missing",
            StreamError::InvalidUrl { .. } => "config_invalid_url",
            StreamError::Protocol { .. } => "protocol",
            StreamError::Transport { .. } => "transport",
            StreamError::Unauthorized => "unauthorized",
            StreamError::Canceled => "cancelled",
        }
    }

    /// True for the one failure the supervisor must not retry.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamError::Unauthorized)
    }
}

impl From<reqwest::Error> for StreamError {
    /// Maps a transport failure onto the taxonomy, preserving the HTTP status
    /// when one is attached. A 401 surfacing through `reqwest` classifies the
    /// same as one caught at the response check.
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        if status == Some(401) {
            return StreamError::Unauthorized;
        }
        StreamError::Transport {
            status,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_status_classifies_separately() {
        let err = StreamError::Transport {
            status: Some(429),
            message: "too many requests".into(),
        };
        assert_eq!(err.class(), FailureClass::RateLimited);
    }

    #[test]
    fn test_other_statuses_are_transient() {
        for status in [Some(404), Some(500), Some(503), None] {
            let err = StreamError::Transport {
                status,
                message: "boom".into(),
            };
            assert_eq!(err.class(), FailureClass::TransientHttp, "{status:?}");
        }
    }

    #[test]
    fn test_config_errors_classify_as_other() {
        let missing = StreamError::MissingConfig { name: "base_url" };
        let invalid = StreamError::InvalidUrl { url: "::".into() };
        assert_eq!(missing.class(), FailureClass::Other);
        assert_eq!(invalid.class(), FailureClass::Other);
    }

    #[test]
    fn test_only_unauthorized_is_terminal() {
        assert!(StreamError::Unauthorized.is_terminal());
        assert!(!StreamError::Canceled.is_terminal());
        assert!(
            !StreamError::Protocol {
                reason: "empty payload".into()
            }
            .is_terminal()
        );
    }
}
