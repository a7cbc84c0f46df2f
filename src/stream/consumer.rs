//! # HTTP stream consumer: one connection attempt at a time.
//!
//! [`StreamConsumer`] owns the HTTP client and performs a single streaming
//! attempt per [`Consume::consume`] call:
//!
//! 1. validate configuration (before any network I/O),
//! 2. issue one streaming GET with the bearer credential, headers read
//!    before the body is touched,
//! 3. check the status — `401` is authorization loss, any other non-2xx is a
//!    transport failure carrying the code,
//! 4. hand the body to [`StreamDecoder`] and append every decoded record to
//!    the shared store, synchronously, in network order.
//!
//! The consumer adds no swallowing logic: every decoder, transport, or
//! cancellation failure propagates unchanged to the supervisor.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use tokio_util::sync::CancellationToken;

use crate::config::StreamConfig;
use crate::error::StreamError;
use crate::events::{Bus, Event, EventKind};
use crate::store::RecordStore;
use crate::stream::{ByteStream, Consume, StreamDecoder};

/// Streaming HTTP consumer for the sampled feed.
pub struct StreamConsumer {
    client: Client,
    config: StreamConfig,
    bus: Bus,
}

impl StreamConsumer {
    /// Builds the consumer and its HTTP client.
    ///
    /// The configured `request_timeout` is applied to connection
    /// establishment only: the response body is open-ended by design and
    /// must not run under a whole-request deadline.
    pub fn new(config: StreamConfig, bus: Bus) -> Result<Self, StreamError> {
        let client = Client::builder()
            .connect_timeout(config.request_timeout)
            .build()
            .map_err(StreamError::from)?;

        Ok(Self {
            client,
            config,
            bus,
        })
    }

    /// Opens the streaming GET and returns the body as a byte stream.
    async fn open_stream(&self, ctx: &CancellationToken) -> Result<ByteStream, StreamError> {
        let url = self.config.stream_url()?;

        let request = self
            .client
            .get(url)
            .bearer_auth(&self.config.api_token)
            .send();

        let response = tokio::select! {
            _ = ctx.cancelled() => return Err(StreamError::Canceled),
            res = request => res.map_err(StreamError::from)?,
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(StreamError::Unauthorized);
        }
        if !status.is_success() {
            return Err(StreamError::Transport {
                status: Some(status.as_u16()),
                message: format!("unexpected status {status}"),
            });
        }

        self.bus
            .publish(Event::new(EventKind::StreamOpened).with_status(status.as_u16()));

        Ok(Box::pin(
            response.bytes_stream().map(|item| item.map_err(StreamError::from)),
        ))
    }
}

#[async_trait]
impl Consume for StreamConsumer {
    async fn consume(
        &self,
        store: &RecordStore,
        ctx: CancellationToken,
    ) -> Result<(), StreamError> {
        let body = self.open_stream(&ctx).await?;
        let mut decoder = StreamDecoder::new(body);

        while let Some(record) = decoder.next_record(&ctx).await? {
            store.append(record);
        }

        // Clean end of stream: the server stopped sending for a reason that
        // is not an error. The supervisor reconnects.
        Ok(())
    }
}
