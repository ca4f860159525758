use std::time::Duration;

use strand::events::{Command, StatusEvent, WorkerEvent};
use strand_engine::testing::ScriptedFactory;
use strand_test_utils::{Blob, BlobServer};

use crate::common::{model_blobs, start_json, until_terminal, worker};

fn tokens(events: &[WorkerEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            WorkerEvent::Status(StatusEvent::Generating { token, .. }) => Some(token.clone()),
            _ => None,
        })
        .collect()
}

fn terminal_count(events: &[WorkerEvent]) -> usize {
    events.iter().filter(|e| e.is_terminal()).count()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn generates_until_end_of_sequence() {
    let server = BlobServer::new(model_blobs(Duration::ZERO)).await;
    let mut handle = worker(ScriptedFactory::new(["The", " sky", " is", " blue", "."])).await;

    handle
        .post_json(&start_json(&server, "phi", "Q: color? A: ", None))
        .await
        .unwrap();
    let events = until_terminal(&mut handle).await;

    assert_eq!(tokens(&events), [" sky", " is", " blue", "."]);
    assert_eq!(
        events.last(),
        Some(&WorkerEvent::complete("Q: color? A: The sky is blue."))
    );

    let mut previous = String::new();
    for event in &events {
        if let WorkerEvent::Status(StatusEvent::Generating {
            sentence,
            prompt,
            total_time,
            tokens_sec,
            ..
        }) = event
        {
            assert_eq!(prompt, "Q: color? A: ");
            assert!(sentence.starts_with(&previous));
            assert!(*total_time >= 0.0);
            assert!(*tokens_sec >= 0.0);
            previous.clone_from(sentence);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn explicit_budget_bounds_token_count() {
    let server = BlobServer::new(model_blobs(Duration::ZERO)).await;
    let factory = ScriptedFactory::new(["a"]).endless("b");
    let mut handle = worker(factory).await;

    handle
        .post_json(&start_json(&server, "phi", "p", Some(7)))
        .await
        .unwrap();
    let events = until_terminal(&mut handle).await;

    assert_eq!(tokens(&events).len(), 7);
    assert_eq!(events.last(), Some(&WorkerEvent::complete("pabbbbbbb")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn default_budget_derives_from_prompt_length() {
    let server = BlobServer::new(model_blobs(Duration::ZERO)).await;
    let factory = ScriptedFactory::new(["a"]).endless("b");
    let steps = factory.steps();
    let mut handle = worker(factory).await;
    let prompt = "x".repeat(2040);

    handle
        .post_json(&start_json(&server, "phi", &prompt, Some(0)))
        .await
        .unwrap();
    let events = until_terminal(&mut handle).await;

    // 2048 - 2040 - 1
    assert_eq!(tokens(&events).len(), 7);
    assert_eq!(steps.load(std::sync::atomic::Ordering::SeqCst), 7);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn abort_after_tokens_keeps_partial_output() {
    let server = BlobServer::new(model_blobs(Duration::ZERO)).await;
    let mut handle = worker(
        ScriptedFactory::new(["go"])
            .endless(".")
            .with_step_delay(Duration::from_millis(5)),
    )
    .await;

    handle
        .post_json(&start_json(&server, "phi", "p:", None))
        .await
        .unwrap();
    loop {
        let event = handle.recv().await.unwrap();
        if matches!(event, WorkerEvent::Status(StatusEvent::Generating { .. })) {
            break;
        }
    }
    handle.send(Command::Abort).await.unwrap();
    let events = until_terminal(&mut handle).await;

    let Some(WorkerEvent::Status(StatusEvent::Aborted { output, .. })) = events.last() else {
        panic!("expected aborted, got {:?}", events.last());
    };
    assert!(output.starts_with("p:go."));
    assert!(output.len() < "p:go".len() + 2046);
    assert_eq!(terminal_count(&events), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn abort_during_loading_returns_prompt_only() {
    let server = BlobServer::new(model_blobs(Duration::from_millis(10))).await;
    let factory = ScriptedFactory::new(["never"]);
    let steps = factory.steps();
    let mut handle = worker(factory).await;

    handle
        .post_json(&start_json(&server, "phi", "just the prompt", None))
        .await
        .unwrap();
    handle.post_json(r#"{"command":"abort"}"#).await.unwrap();
    let events = until_terminal(&mut handle).await;

    assert_eq!(
        events.last(),
        Some(&WorkerEvent::aborted("just the prompt"))
    );
    assert!(tokens(&events).is_empty());
    assert_eq!(steps.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_asset_ends_in_one_error_event() {
    let mut blobs = model_blobs(Duration::ZERO);
    blobs.retain(|(path, _)| *path != crate::common::CONFIG);
    blobs.push((crate::common::CONFIG, Blob::new("").with_status(404)));
    let server = BlobServer::new(blobs).await;
    let mut handle = worker(ScriptedFactory::new(["a"])).await;

    handle
        .post_json(&start_json(&server, "phi", "p", None))
        .await
        .unwrap();
    let events = until_terminal(&mut handle).await;

    let Some(WorkerEvent::Error { error }) = events.last() else {
        panic!("expected error, got {:?}", events.last());
    };
    assert!(error.contains("404"));
    assert_eq!(terminal_count(&events), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn every_start_gets_exactly_one_terminal_event() {
    let server = BlobServer::new(model_blobs(Duration::ZERO)).await;
    let mut handle = worker(ScriptedFactory::new(["a", "b", "c"])).await;

    for prompt in ["one", "two", "three"] {
        handle
            .post_json(&start_json(&server, "phi", prompt, None))
            .await
            .unwrap();
        let events = until_terminal(&mut handle).await;
        assert_eq!(terminal_count(&events), 1);
        assert_eq!(
            events.last(),
            Some(&WorkerEvent::complete(format!("{prompt}abc")))
        );
    }
}
