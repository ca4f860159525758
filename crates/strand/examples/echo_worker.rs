//! Example: drive a worker end to end against a local asset server.
//!
//! Serves fake weights, tokenizer and config over HTTP, then runs a toy
//! engine that echoes the prompt back word by word. Every event the host
//! would receive is printed as JSON.
//!
//! Run with:
//! ```
//! RUST_LOG=strand=debug cargo run -p strand --example echo_worker -- "the quick brown fox"
//! ```

use std::{collections::VecDeque, env::args, error::Error, time::Duration};

use strand::{
    CacheBackend, WorkerConfig,
    prelude::{EngineFactory, EngineInputs, EngineResult, InferenceEngine, SamplingParams},
};
use strand_test_utils::{Blob, BlobServer, pattern_bytes};
use tracing::info;
use tracing_subscriber::EnvFilter;

const EOS: &str = "<|endoftext|>";

struct EchoFactory;

struct EchoEngine {
    words: VecDeque<String>,
}

impl EngineFactory for EchoFactory {
    type Engine = EchoEngine;

    fn construct(&self, inputs: EngineInputs) -> EngineResult<EchoEngine> {
        info!(
            weights = inputs.weights.len(),
            tokenizer = inputs.tokenizer.len(),
            config = inputs.config.len(),
            "echo engine built"
        );
        Ok(EchoEngine {
            words: VecDeque::new(),
        })
    }
}

impl InferenceEngine for EchoEngine {
    fn init_with_prompt(&mut self, prompt: &str, _params: &SamplingParams) -> EngineResult<String> {
        self.words = prompt.split_whitespace().map(|w| format!(" {w}")).collect();
        Ok(" ->".to_owned())
    }

    fn next_token(&mut self) -> EngineResult<String> {
        std::thread::sleep(Duration::from_millis(50));
        Ok(self.words.pop_front().unwrap_or_else(|| EOS.to_owned()))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_line_number(false)
        .with_file(false)
        .init();

    let prompt = args().nth(1).unwrap_or_else(|| "the quick brown fox".to_owned());

    let server = BlobServer::new([
        (
            "model.safetensors",
            Blob::new(pattern_bytes(4 << 20, 1)).chunked(64 << 10, Duration::from_millis(20)),
        ),
        ("tokenizer.json", Blob::new(r#"{"model":"echo"}"#)),
        ("config.json", Blob::new(r#"{"vocab_size":0}"#)),
    ])
    .await;

    let mut handle = WorkerConfig::default()
        .with_cache(CacheBackend::Memory)
        .spawn(EchoFactory)
        .await?;

    let start = serde_json::json!({
        "command": "start",
        "weightsSource": server.url("model.safetensors"),
        "modelIdentifier": "echo",
        "tokenizerSource": server.url("tokenizer.json"),
        "configSource": server.url("config.json"),
        "prompt": prompt,
        "temp": 0.0,
        "top_p": 1.0,
        "repeatPenalty": 1.0,
        "seed": 0,
    });
    handle.post_json(&start.to_string()).await?;

    while let Some(event) = handle.recv().await {
        println!("{}", event.to_json()?);
        if event.is_terminal() {
            break;
        }
    }

    handle.shutdown();
    Ok(())
}
