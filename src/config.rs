//! # Stream connection configuration.
//!
//! [`StreamConfig`] carries everything one connection attempt needs: where to
//! connect, the bearer credential, and the client timeouts. It is loaded once
//! by the embedding application and treated as immutable afterwards; the
//! engine only reads it.
//!
//! ## Validation
//! Validation runs before every connection attempt via
//! [`StreamConfig::stream_url`] and short-circuits on the first violation:
//! 1. `base_url` must be non-empty,
//! 2. `stream_path` must be non-empty,
//! 3. the concatenation must parse as an absolute URL.
//!
//! Violations surface as [`StreamError::MissingConfig`] /
//! [`StreamError::InvalidUrl`] and are raised before any network I/O.

use std::time::Duration;

use url::Url;

use crate::error::StreamError;

/// Connection settings for the sampled stream.
///
/// ## Field semantics
/// - `base_url`: absolute URL base of the stream host (required)
/// - `api_token`: bearer credential sent on every request
/// - `stream_path`: path of the sampled-stream endpoint, appended to
///   `base_url` (required)
/// - `polling_interval`: advisory cadence for the embedding host; the
///   supervisor loop itself reconnects immediately
/// - `request_timeout`: applied to connection establishment on the underlying
///   HTTP client (the open stream body is unbounded and must not be subject
///   to a whole-request deadline)
#[derive(Clone, Debug)]
pub struct StreamConfig {
    /// Absolute URL base, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Bearer token for the `Authorization` header.
    pub api_token: String,
    /// Endpoint path appended to `base_url`, e.g. `/2/posts/sample/stream`.
    pub stream_path: String,
    /// Advisory polling cadence for the host.
    pub polling_interval: Duration,
    /// Connect timeout for the HTTP client.
    pub request_timeout: Duration,
}

impl StreamConfig {
    /// Validates the configuration and returns the absolute stream URL.
    ///
    /// Short-circuits on the first violation; never performs I/O.
    pub fn stream_url(&self) -> Result<Url, StreamError> {
        if self.base_url.trim().is_empty() {
            return Err(StreamError::MissingConfig { name: "base_url" });
        }
        if self.stream_path.trim().is_empty() {
            return Err(StreamError::MissingConfig { name: "stream_path" });
        }

        let raw = format!("{}{}", self.base_url, self.stream_path);
        Url::parse(&raw).map_err(|_| StreamError::InvalidUrl { url: raw })
    }
}

impl Default for StreamConfig {
    /// Empty endpoint fields (the host must supply them) with a 30 s connect
    /// timeout and a 10 s advisory polling cadence.
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_token: String::new(),
            stream_path: String::new(),
            polling_interval: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> StreamConfig {
        StreamConfig {
            base_url: "https://api.example.com".into(),
            api_token: "token".into(),
            stream_path: "/2/posts/sample/stream".into(),
            ..StreamConfig::default()
        }
    }

    #[test]
    fn test_valid_config_builds_absolute_url() {
        let url = valid().stream_url().expect("valid config");
        assert_eq!(url.as_str(), "https://api.example.com/2/posts/sample/stream");
    }

    #[test]
    fn test_empty_base_url_short_circuits() {
        let cfg = StreamConfig {
            base_url: "".into(),
            // Path is also empty; base_url must be reported first.
            stream_path: "".into(),
            ..valid()
        };
        match cfg.stream_url() {
            Err(StreamError::MissingConfig { name }) => assert_eq!(name, "base_url"),
            other => panic!("expected MissingConfig(base_url), got {other:?}"),
        }
    }

    #[test]
    fn test_empty_stream_path_is_reported() {
        let cfg = StreamConfig {
            stream_path: "  ".into(),
            ..valid()
        };
        match cfg.stream_url() {
            Err(StreamError::MissingConfig { name }) => assert_eq!(name, "stream_path"),
            other => panic!("expected MissingConfig(stream_path), got {other:?}"),
        }
    }

    #[test]
    fn test_relative_base_url_is_invalid() {
        let cfg = StreamConfig {
            base_url: "not-a-url".into(),
            ..valid()
        };
        assert!(matches!(
            cfg.stream_url(),
            Err(StreamError::InvalidUrl { .. })
        ));
    }
}
