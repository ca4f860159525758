use std::time::Duration;

use serde_json::Value;
use strand::events::WorkerEvent;
use strand_engine::testing::ScriptedFactory;
use strand_test_utils::BlobServer;

use crate::common::{CONFIG, TOKENIZER, WEIGHTS, model_blobs, until_terminal, worker};

fn to_values(events: &[WorkerEvent]) -> Vec<Value> {
    events
        .iter()
        .map(|e| serde_json::from_str(&e.to_json().unwrap()).unwrap())
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn outbound_messages_have_the_wire_shape() {
    let server = BlobServer::new(model_blobs(Duration::ZERO)).await;
    let mut handle = worker(ScriptedFactory::new(["Hi", " there"])).await;

    let start = serde_json::json!({
        "command": "start",
        "weightsSource": server.url(WEIGHTS),
        "modelIdentifier": "phi",
        "tokenizerSource": server.url(TOKENIZER),
        "configSource": server.url(CONFIG),
        "quantized": false,
        "prompt": "> ",
        "temp": 0.0,
        "top_p": 1.0,
        "repeatPenalty": 1.0,
        "seed": 1
    });
    handle.post_json(&start.to_string()).await.unwrap();
    let values = to_values(&until_terminal(&mut handle).await);

    let loading: Vec<&Value> = values.iter().filter(|v| v["status"] == "loading").collect();
    assert!(loading.iter().all(|v| v["message"].is_string()));
    assert!(loading.iter().any(|v| {
        v["message"]
            .as_str()
            .is_some_and(|m| m.starts_with("Downloading... ") && m.contains("Total size: "))
    }));

    let generating = values
        .iter()
        .find(|v| v["status"] == "generating")
        .unwrap();
    assert_eq!(generating["message"], "Generating token");
    assert_eq!(generating["token"], " there");
    assert_eq!(generating["sentence"], "Hi there");
    assert_eq!(generating["prompt"], "> ");
    assert!(generating["totalTime"].is_number());
    assert!(generating["tokensSec"].is_number());

    assert_eq!(
        values.last().unwrap(),
        &serde_json::json!({"status": "complete", "message": "complete", "output": "> Hi there"})
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn legacy_field_names_are_accepted() {
    let server = BlobServer::new(model_blobs(Duration::ZERO)).await;
    let mut handle = worker(ScriptedFactory::new(["ok"])).await;

    let start = serde_json::json!({
        "command": "start",
        "weightsURL": [server.url(WEIGHTS)],
        "modelID": "phi_legacy",
        "tokenizerURL": server.url(TOKENIZER),
        "configURL": server.url(CONFIG),
        "quantized": true,
        "prompt": "",
        "temp": 0.5,
        "top_p": 0.5,
        "repeatPenalty": 1.3,
        "seed": 7,
        "maxSeqLen": null
    });
    handle.post_json(&start.to_string()).await.unwrap();
    let events = until_terminal(&mut handle).await;
    assert_eq!(events.last(), Some(&WorkerEvent::complete("ok")));
}

#[tokio::test]
async fn malformed_command_becomes_error_message() {
    let mut handle = worker(ScriptedFactory::new(["a"])).await;

    assert!(handle.post_json(r#"{"command":"start"}"#).await.is_err());
    let values = to_values(&until_terminal(&mut handle).await);
    assert_eq!(values.len(), 1);
    let object = values[0].as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object["error"].is_string());
}
