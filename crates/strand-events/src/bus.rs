#![forbid(unsafe_code)]

use tokio::sync::{broadcast, mpsc};

use crate::{Event, WorkerEvent};

/// Fan-out channel for worker events, with an optional lossless host link.
///
/// Every component gets a clone and calls [`emit`](Self::emit). The
/// broadcast side is in-process telemetry: subscribers see events in emit
/// order, events sent with no subscribers are dropped, and a subscriber that
/// falls more than `capacity` events behind gets `RecvError::Lagged`.
///
/// A bus built with [`with_host`](Self::with_host) also forwards the
/// host-facing form of every event ([`Event::to_worker_event`]) into a
/// bounded mpsc channel. That side never drops: `emit` waits for room, so a
/// slow host slows the producer down instead of losing tokens.
#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
    host: Option<mpsc::Sender<WorkerEvent>>,
}

impl EventBus {
    /// Telemetry-only bus.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx, host: None }
    }

    /// Bus plus the receiving end of its host channel.
    #[must_use]
    pub fn with_host(
        capacity: usize,
        host_capacity: usize,
    ) -> (Self, mpsc::Receiver<WorkerEvent>) {
        let (host, rx) = mpsc::channel(host_capacity.max(1));
        let mut bus = Self::new(capacity);
        bus.host = Some(host);
        (bus, rx)
    }

    /// Accepts anything convertible into [`Event`]:
    /// `bus.emit(WorkerEvent::complete(out)).await`, `bus.emit(progress).await`.
    ///
    /// Waits while the host channel is full. A host that hung up is ignored.
    pub async fn emit<E: Into<Event>>(&self, event: E) {
        let event = event.into();
        if let Some(host) = &self.host {
            let _ = host.send(event.to_worker_event()).await;
        }
        let _ = self.tx.send(event);
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
