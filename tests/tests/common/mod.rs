use std::{sync::Arc, time::Duration};

use strand::{
    CacheBackend, WorkerConfig,
    assets::{AssetCache, MemAssetCache},
    events::{Event, EventBus, WorkerEvent},
    fetch::{FetchOptions, ProgressiveFetcher},
    net::{HttpClient, NetOptions},
    worker::WorkerHandle,
};
use strand_engine::testing::ScriptedFactory;
use strand_test_utils::{Blob, BlobServer, pattern_bytes};
use tokio::sync::broadcast;

pub(crate) const WEIGHTS: &str = "weights.bin";
pub(crate) const TOKENIZER: &str = "tokenizer.json";
pub(crate) const CONFIG: &str = "config.json";

/// Weights, tokenizer and config for one model; weights trickle in.
pub(crate) fn model_blobs(chunk_delay: Duration) -> Vec<(&'static str, Blob)> {
    vec![
        (
            WEIGHTS,
            Blob::new(pattern_bytes(256 * 1024, 9)).chunked(16 * 1024, chunk_delay),
        ),
        (TOKENIZER, Blob::new(r#"{"version":"1.0"}"#)),
        (CONFIG, Blob::new(r#"{"n_layer":24}"#)),
    ]
}

pub(crate) fn fetcher(
    cache: Arc<dyn AssetCache>,
    bus: EventBus,
    options: FetchOptions,
) -> ProgressiveFetcher {
    let net = HttpClient::new(NetOptions::default()).unwrap();
    ProgressiveFetcher::new(Arc::new(net), cache, bus, options)
}

pub(crate) fn mem_fetcher(bus: EventBus) -> ProgressiveFetcher {
    fetcher(Arc::new(MemAssetCache::new()), bus, FetchOptions::default())
}

pub(crate) async fn worker(factory: ScriptedFactory) -> WorkerHandle {
    WorkerConfig::default()
        .with_cache(CacheBackend::Memory)
        .with_events_channel_capacity(8192)
        .spawn(factory)
        .await
        .unwrap()
}

pub(crate) fn start_json(
    server: &BlobServer,
    model: &str,
    prompt: &str,
    max_seq_len: Option<usize>,
) -> String {
    serde_json::json!({
        "command": "start",
        "weightsSource": server.url(WEIGHTS),
        "modelIdentifier": model,
        "tokenizerSource": server.url(TOKENIZER),
        "configSource": server.url(CONFIG),
        "quantized": true,
        "prompt": prompt,
        "temp": 0.7,
        "top_p": 0.9,
        "repeatPenalty": 1.1,
        "seed": 299_792_458,
        "maxSeqLen": max_seq_len,
    })
    .to_string()
}

/// Host events up to and including the first terminal one.
pub(crate) async fn until_terminal(handle: &mut WorkerHandle) -> Vec<WorkerEvent> {
    let mut out = Vec::new();
    loop {
        let event = tokio::time::timeout(Duration::from_secs(10), handle.recv())
            .await
            .unwrap()
            .unwrap();
        let terminal = event.is_terminal();
        out.push(event);
        if terminal {
            return out;
        }
    }
}

/// Everything currently buffered in `rx`.
pub(crate) fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        out.push(event);
    }
    out
}
