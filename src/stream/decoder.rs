//! # Incremental JSON-object decoder over an unbounded byte stream.
//!
//! [`StreamDecoder`] consumes a live, chunked byte stream whose content is a
//! concatenation of JSON objects (separated by arbitrary whitespace or
//! newlines, arriving in arbitrarily sized chunks) and yields one
//! [`Record`] per syntactically complete object.
//!
//! ## Rules
//! - **Partial reads**: an object may span any number of chunks; bytes are
//!   buffered until one complete value parses, and only then consumed.
//! - **Empty payload**: a complete token that is not an object with at least
//!   one field fails the attempt with `Protocol("empty payload")`.
//! - **Null record**: an object that does not carry a usable payload fails
//!   with `Protocol("null record")`.
//! - **Clean end**: the source ending with an empty buffer is a normal end
//!   of sequence (`Ok(None)`), not a failure; ending mid-object is a
//!   protocol error.
//! - **Cancellation**: the token is observed between reads; decoding of an
//!   already-buffered object is not interrupted.

use bytes::{Buf, Bytes, BytesMut};
use futures::{Stream, StreamExt};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::StreamError;
use crate::record::Record;

/// Chunked response body as the decoder expects it. The consumer adapts
/// `reqwest`'s body stream into this shape; tests feed `futures::stream::iter`.
pub type ByteStream = std::pin::Pin<
    Box<dyn Stream<Item = Result<Bytes, StreamError>> + Send>,
>;

/// Lazy record sequence over a chunked byte stream.
///
/// The sequence is unbounded in principle; it ends only when the server
/// closes the connection or the caller cancels.
pub struct StreamDecoder<S> {
    source: S,
    buf: BytesMut,
    source_done: bool,
}

impl<S> StreamDecoder<S>
where
    S: Stream<Item = Result<Bytes, StreamError>> + Unpin,
{
    /// Wraps a chunked byte stream.
    pub fn new(source: S) -> Self {
        Self {
            source,
            buf: BytesMut::new(),
            source_done: false,
        }
    }

    /// Yields the next decoded record, `Ok(None)` on clean end-of-stream.
    ///
    /// Suspends only on the underlying read; the read races `ctx` and
    /// cancellation surfaces as [`StreamError::Canceled`] within one read
    /// cycle.
    pub async fn next_record(
        &mut self,
        ctx: &CancellationToken,
    ) -> Result<Option<Record>, StreamError> {
        loop {
            if let Some(record) = self.decode_buffered()? {
                return Ok(Some(record));
            }

            if self.source_done {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                return Err(StreamError::Protocol {
                    reason: "truncated object at end of stream".into(),
                });
            }

            tokio::select! {
                _ = ctx.cancelled() => return Err(StreamError::Canceled),
                chunk = self.source.next() => match chunk {
                    Some(Ok(bytes)) => self.buf.extend_from_slice(&bytes),
                    Some(Err(err)) => return Err(err),
                    None => self.source_done = true,
                },
            }
        }
    }

    /// Attempts to decode one complete value from the buffer.
    ///
    /// Returns `Ok(None)` when the buffer holds no complete value yet; bytes
    /// are consumed only for parsed values and skipped whitespace, so a
    /// partial object survives until more data arrives.
    fn decode_buffered(&mut self) -> Result<Option<Record>, StreamError> {
        let (item, consumed) = {
            let mut values = serde_json::Deserializer::from_slice(&self.buf).into_iter::<Value>();
            let item = values.next();
            (item, values.byte_offset())
        };

        match item {
            // Only whitespace left; drop it so the buffer never grows
            // unbounded on keep-alive newlines.
            None => {
                self.buf.advance(consumed);
                Ok(None)
            }
            Some(Ok(value)) => {
                self.buf.advance(consumed);
                Self::into_record(value).map(Some)
            }
            Some(Err(err)) if err.is_eof() => Ok(None),
            Some(Err(err)) => Err(StreamError::Protocol {
                reason: format!("invalid json: {err}"),
            }),
        }
    }

    /// Converts a parsed value into a [`Record`], enforcing the payload
    /// contract.
    fn into_record(value: Value) -> Result<Record, StreamError> {
        let has_fields = value.as_object().is_some_and(|obj| !obj.is_empty());
        if !has_fields {
            return Err(StreamError::Protocol {
                reason: "empty payload".into(),
            });
        }

        serde_json::from_value(value).map_err(|_| StreamError::Protocol {
            reason: "null record".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn chunked(parts: &[&str]) -> impl Stream<Item = Result<Bytes, StreamError>> + Unpin {
        let items: Vec<Result<Bytes, StreamError>> = parts
            .iter()
            .map(|p| Ok(Bytes::copy_from_slice(p.as_bytes())))
            .collect();
        stream::iter(items)
    }

    async fn collect_ids(parts: &[&str]) -> Result<Vec<String>, StreamError> {
        let ctx = CancellationToken::new();
        let mut decoder = StreamDecoder::new(chunked(parts));
        let mut ids = Vec::new();
        while let Some(record) = decoder.next_record(&ctx).await? {
            ids.push(record.payload.id);
        }
        Ok(ids)
    }

    #[tokio::test]
    async fn test_two_concatenated_objects_in_order() {
        let ids = collect_ids(&[r#"{"data":{"id":"1","text":"a"}}{"data":{"id":"2","text":"b"}}"#])
            .await
            .expect("two records");
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_object_split_across_chunks() {
        let ids = collect_ids(&[r#"{"data":{"id":"#, r#""7","te"#, r#"xt":"x"}}"#])
            .await
            .expect("one record");
        assert_eq!(ids, vec!["7"]);
    }

    #[tokio::test]
    async fn test_newline_delimited_objects() {
        let ids = collect_ids(&[
            "{\"data\":{\"id\":\"1\",\"text\":\"a\"}}\r\n",
            "\n{\"data\":{\"id\":\"2\",\"text\":\"b\"}}\n",
        ])
        .await
        .expect("two records");
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_empty_body_ends_cleanly() {
        let ids = collect_ids(&[]).await.expect("clean end");
        assert!(ids.is_empty());

        let ids = collect_ids(&["", "  \n"]).await.expect("whitespace only");
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_empty_object_is_a_protocol_error() {
        let err = collect_ids(&["{}"]).await.expect_err("empty payload");
        assert!(matches!(
            err,
            StreamError::Protocol { ref reason } if reason == "empty payload"
        ));
    }

    #[tokio::test]
    async fn test_scalar_token_is_a_protocol_error() {
        let err = collect_ids(&[r#""just a string""#]).await.expect_err("not an object");
        assert!(matches!(
            err,
            StreamError::Protocol { ref reason } if reason == "empty payload"
        ));
    }

    #[tokio::test]
    async fn test_object_without_payload_is_null_record() {
        let err = collect_ids(&[r#"{"meta":{"kind":"heartbeat"}}"#])
            .await
            .expect_err("no data block");
        assert!(matches!(
            err,
            StreamError::Protocol { ref reason } if reason == "null record"
        ));
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_protocol_error() {
        let err = collect_ids(&[r#"{"data":{"id":"1","text":}}"#])
            .await
            .expect_err("syntax error");
        assert!(matches!(err, StreamError::Protocol { .. }));
    }

    #[tokio::test]
    async fn test_truncated_trailing_object_is_an_error() {
        let err = collect_ids(&[r#"{"data":{"id":"1","text":"a"}}{"data":{"id"#])
            .await
            .expect_err("truncated tail");
        assert!(matches!(
            err,
            StreamError::Protocol { ref reason } if reason.contains("truncated")
        ));
    }

    #[tokio::test]
    async fn test_transport_error_mid_stream_propagates() {
        let items: Vec<Result<Bytes, StreamError>> = vec![
            Ok(Bytes::from_static(br#"{"data":{"id":"1","text":"a"}}"#)),
            Err(StreamError::Transport {
                status: None,
                message: "connection reset".into(),
            }),
        ];
        let ctx = CancellationToken::new();
        let mut decoder = StreamDecoder::new(stream::iter(items));

        let first = decoder.next_record(&ctx).await.expect("first record");
        assert!(first.is_some());
        let err = decoder.next_record(&ctx).await.expect_err("reset surfaces");
        assert!(matches!(err, StreamError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_cancellation_between_reads() {
        // A pending source never yields, so the decoder parks on the read
        // and must wake up through the token instead.
        let ctx = CancellationToken::new();
        let mut decoder = StreamDecoder::new(stream::pending::<Result<Bytes, StreamError>>());

        ctx.cancel();
        let err = decoder.next_record(&ctx).await.expect_err("cancelled");
        assert!(matches!(err, StreamError::Canceled));
    }

    #[tokio::test]
    async fn test_buffered_record_decodes_after_cancellation() {
        // Cancellation does not interrupt decoding of data that already
        // arrived; it only gates the next read.
        let ctx = CancellationToken::new();
        let mut decoder = StreamDecoder::new(chunked(&[
            r#"{"data":{"id":"1","text":"a"}}{"data":{"id":"2","text":"b"}}"#,
        ]));

        let first = decoder
            .next_record(&ctx)
            .await
            .expect("first record")
            .expect("present");
        assert_eq!(first.payload.id, "1");

        // The second object is fully buffered; it decodes without another
        // read even though the token has fired.
        ctx.cancel();
        let second = decoder
            .next_record(&ctx)
            .await
            .expect("buffered record still decodes")
            .expect("present");
        assert_eq!(second.payload.id, "2");
    }
}
