use std::sync::Arc;

use bytes::Bytes;
use futures::stream;
use strand_assets::MemAssetCache;
use strand_engine::{SessionRegistry, testing::ScriptedFactory};
use strand_events::{Command, EventBus, StartRequest, WorkerEvent};
use strand_fetch::{FetchOptions, ProgressiveFetcher};
use strand_net::{MockNet, NetResponse};
use tokio::sync::mpsc;

/// Bus with a host channel roomy enough that tests never stall on it.
pub(crate) fn host_bus() -> (EventBus, mpsc::Receiver<WorkerEvent>) {
    EventBus::with_host(64, 4096)
}

/// Registry whose network serves each URL path as the body.
pub(crate) fn registry(
    factory: ScriptedFactory,
    bus: &EventBus,
) -> SessionRegistry<ScriptedFactory> {
    let mut net = MockNet::new();
    net.expect_stream().returning(|url, _| {
        let body = Bytes::from(url.path().to_owned());
        Ok(NetResponse {
            content_length: Some(body.len() as u64),
            body: Box::pin(stream::iter([Ok(body)])),
        })
    });
    let fetcher = ProgressiveFetcher::new(
        Arc::new(net),
        Arc::new(MemAssetCache::new()),
        bus.clone(),
        FetchOptions::default(),
    );
    SessionRegistry::new(factory, fetcher, bus.clone())
}

pub(crate) fn start_request(prompt: &str, max_seq_len: Option<usize>) -> StartRequest {
    let raw = serde_json::json!({
        "command": "start",
        "weightsSource": "https://models.example.com/model.gguf",
        "modelIdentifier": "scripted",
        "tokenizerSource": "https://models.example.com/tokenizer.json",
        "configSource": "https://models.example.com/config.json",
        "quantized": false,
        "prompt": prompt,
        "temp": 0.8,
        "top_p": 0.9,
        "repeatPenalty": 1.1,
        "seed": 42,
        "maxSeqLen": max_seq_len,
    });
    match serde_json::from_value(raw).unwrap() {
        Command::Start(request) => request,
        Command::Abort => unreachable!(),
    }
}

/// Receives until the first terminal event (inclusive).
pub(crate) async fn collect_until_terminal(
    rx: &mut mpsc::Receiver<WorkerEvent>,
) -> Vec<WorkerEvent> {
    let mut events = Vec::new();
    loop {
        let event = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        let terminal = event.is_terminal();
        events.push(event);
        if terminal {
            return events;
        }
    }
}
