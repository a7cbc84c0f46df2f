//! # Example: polling
//!
//! Runs the full ingestion pipeline against a live sampled stream:
//! [`PollingSupervisor`] drives a [`StreamConsumer`], records accumulate in
//! a shared [`RecordStore`], lifecycle events print through [`LogWriter`],
//! and a background ticker reports throughput statistics.
//!
//! ## Flow
//! ```text
//! PollingSupervisor::run(ctx)
//!   ├─► publish(PollStarting, attempt=1)
//!   ├─► GET {base_url}{stream_path} (bearer auth, streamed body)
//!   ├─► publish(StreamOpened{status=200})
//!   ├─► decode objects as chunks arrive ──► store.append(record)
//!   │     ... ticker: {"totalRecords":N,"averagePerMinute":M} ...
//!   ├─► on transient fault ─► publish(AttemptFailed, BackoffScheduled)
//!   └─► on Ctrl-C ─► publish(ShutdownRequested) ─► final statistics
//! ```
//!
//! ## Run
//! ```bash
//! API_TOKEN=... cargo run --example polling
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use firetap::{
    Bus, LogWriter, PollingSupervisor, RecordStore, StatisticsComputer, StreamConfig,
    StreamConsumer, Subscribe,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Configure the stream endpoint; the credential comes from the
    //    environment.
    let config = StreamConfig {
        base_url: "https://api.x.com".into(),
        api_token: std::env::var("API_TOKEN")?,
        stream_path: "/2/tweets/sample/stream".into(),
        ..StreamConfig::default()
    };
    let interval = config.polling_interval;

    // 2. Shared pieces: one bus, one store, one consumer.
    let bus = Bus::new(256);
    let store = Arc::new(RecordStore::new());
    let consumer = Arc::new(StreamConsumer::new(config, bus.clone())?);

    // 3. Attach the built-in log subscriber.
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::default())];

    let sup = PollingSupervisor::new(consumer, Arc::clone(&store), bus, subs);
    let ctx = CancellationToken::new();

    // 4. Ctrl-C requests a graceful shutdown.
    tokio::spawn({
        let ctx = ctx.clone();
        async move {
            let _ = tokio::signal::ctrl_c().await;
            println!("[main] shutdown requested");
            ctx.cancel();
        }
    });

    // 5. Report throughput on the configured interval until shutdown.
    let ticker = tokio::spawn({
        let stats = StatisticsComputer::new(Arc::clone(&store));
        let ctx = ctx.clone();
        async move {
            loop {
                tokio::select! {
                    _ = ctx.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
                match serde_json::to_string(&stats.compute(&ctx)) {
                    Ok(line) => println!("[stats] {line}"),
                    Err(err) => eprintln!("[stats] serialization failed: {err}"),
                }
            }
        }
    });

    // 6. Run until Ctrl-C or authorization loss.
    let outcome = sup.run(ctx.clone()).await;
    ctx.cancel();
    let _ = ticker.await;

    // 7. Final statistics over a fresh token: the run token is spent.
    let stats = StatisticsComputer::new(store).compute(&CancellationToken::new());
    println!("[main] final: {}", serde_json::to_string(&stats)?);

    // Give the log subscriber a moment to drain.
    tokio::time::sleep(Duration::from_millis(50)).await;

    outcome?;
    println!("[main] done.");
    Ok(())
}
