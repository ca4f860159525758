use std::sync::Arc;

use strand_engine::{EngineFactory, SessionRegistry};
use strand_events::{Command, Event, EventBus, StartRequest, WorkerEvent};
use strand_platform::spawn;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::{GenerationLoop, GenerationOptions, WorkerError, WorkerResult};

/// Command loop owning the in-flight generation's cancellation token.
pub struct Worker<F: EngineFactory> {
    generation: Arc<GenerationLoop<F>>,
    commands: mpsc::Receiver<Command>,
    shutdown: CancellationToken,
    /// Cancelled once the current generation has ended or been aborted.
    current: Option<CancellationToken>,
}

impl<F: EngineFactory> Worker<F> {
    /// Starts the command loop on a background task.
    ///
    /// `host_events` is the receiving end of `bus`'s host channel (see
    /// [`EventBus::with_host`]); the returned handle reads from it.
    pub fn spawn(
        registry: Arc<SessionRegistry<F>>,
        bus: EventBus,
        host_events: mpsc::Receiver<WorkerEvent>,
        options: GenerationOptions,
        command_capacity: usize,
    ) -> WorkerHandle {
        let (tx, rx) = mpsc::channel(command_capacity.max(1));
        let shutdown = CancellationToken::new();
        let worker = Self {
            generation: Arc::new(GenerationLoop::new(registry, bus.clone(), options)),
            commands: rx,
            shutdown: shutdown.clone(),
            current: None,
        };
        spawn(worker.run());
        WorkerHandle {
            commands: tx,
            events: host_events,
            bus,
            shutdown,
        }
    }

    async fn run(mut self) {
        trace!("worker started");
        loop {
            tokio::select! {
                biased;

                () = self.shutdown.cancelled() => break,

                cmd = self.commands.recv() => match cmd {
                    Some(cmd) => self.handle(cmd),
                    None => break,
                },
            }
        }
        if let Some(current) = self.current.take() {
            current.cancel();
        }
        trace!("worker stopped");
    }

    fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Start(request) => self.start(request),
            Command::Abort => match &self.current {
                Some(token) if !token.is_cancelled() => {
                    debug!("abort requested");
                    token.cancel();
                }
                _ => warn!("abort ignored: no generation in flight"),
            },
        }
    }

    fn start(&mut self, request: StartRequest) {
        if let Some(previous) = self.current.take()
            && !previous.is_cancelled()
        {
            debug!("new start supersedes in-flight generation");
            previous.cancel();
        }

        let token = self.shutdown.child_token();
        self.current = Some(token.clone());
        let generation = Arc::clone(&self.generation);
        spawn(async move {
            let _finished = token.clone().drop_guard();
            let state = generation.run(request, token).await;
            debug!(?state, "generation ended");
        });
    }
}

/// Host-side endpoint of a running [`Worker`].
///
/// [`recv`](Self::recv) yields every host-facing event in order; the worker
/// waits for the host when the channel is full. [`subscribe`](Self::subscribe)
/// is a lossy in-process tap that also carries structured download progress.
pub struct WorkerHandle {
    commands: mpsc::Sender<Command>,
    events: mpsc::Receiver<WorkerEvent>,
    bus: EventBus,
    shutdown: CancellationToken,
}

impl WorkerHandle {
    /// # Errors
    ///
    /// [`WorkerError::ChannelClosed`] once the worker has stopped.
    pub async fn send(&self, cmd: Command) -> WorkerResult<()> {
        self.commands
            .send(cmd)
            .await
            .map_err(|_| WorkerError::ChannelClosed)
    }

    /// Parses a JSON command and sends it.
    ///
    /// A malformed message is also reported to the host as an `error`
    /// event.
    ///
    /// # Errors
    ///
    /// [`WorkerError::Protocol`] for malformed input,
    /// [`WorkerError::ChannelClosed`] once the worker has stopped.
    pub async fn post_json(&self, raw: &str) -> WorkerResult<()> {
        match Command::from_json(raw) {
            Ok(cmd) => self.send(cmd).await,
            Err(e) => {
                warn!(error = %e, "rejected malformed command");
                self.bus.emit(WorkerEvent::error(&e)).await;
                Err(WorkerError::Protocol(e))
            }
        }
    }

    /// Next host-facing event.
    pub async fn recv(&mut self) -> Option<WorkerEvent> {
        self.events.recv().await
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Stops the command loop and cancels any in-flight generation.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}
