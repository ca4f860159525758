use std::sync::Arc;

use dashmap::DashMap;
use strand_core::ModelId;
use strand_events::{EventBus, WorkerEvent};
use strand_fetch::ProgressiveFetcher;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::{EngineFactory, EngineInputs, EngineResult, Session, SessionRequest};

type SessionCell<E> = Arc<OnceCell<Session<E>>>;

/// Process-wide map from model identifier to its constructed session.
///
/// Each identifier owns a once-cell: concurrent first requests wait on one
/// construction instead of racing. A failed construction leaves the cell
/// empty so a later request retries it. Existing sessions are returned
/// as-is without re-checking the request's sources.
pub struct SessionRegistry<F: EngineFactory> {
    factory: F,
    fetcher: ProgressiveFetcher,
    bus: EventBus,
    sessions: DashMap<ModelId, SessionCell<F::Engine>>,
}

impl<F: EngineFactory> SessionRegistry<F> {
    pub fn new(factory: F, fetcher: ProgressiveFetcher, bus: EventBus) -> Self {
        Self {
            factory,
            fetcher,
            bus,
            sessions: DashMap::new(),
        }
    }

    /// The session for `request.model_id`, constructing it on first use.
    ///
    /// # Errors
    ///
    /// Fetch, decode or construction failures of the first request for a
    /// model. Nothing is cached on failure.
    pub async fn get_session(&self, request: &SessionRequest) -> EngineResult<Session<F::Engine>> {
        let cell = Arc::clone(&self.sessions.entry(request.model_id.clone()).or_default());
        if let Some(session) = cell.get() {
            debug!(model = %request.model_id, "session reused");
            return Ok(session.clone());
        }
        let session = cell.get_or_try_init(|| self.construct(request)).await?;
        Ok(session.clone())
    }

    #[must_use]
    pub fn contains(&self, model_id: &ModelId) -> bool {
        self.sessions
            .get(model_id)
            .is_some_and(|cell| cell.initialized())
    }

    async fn construct(&self, request: &SessionRequest) -> EngineResult<Session<F::Engine>> {
        debug!(model = %request.model_id, "constructing session");
        self.bus.emit(WorkerEvent::loading("Loading model")).await;

        let (weights, tokenizer, config) = futures::try_join!(
            self.fetcher.fetch_source(&request.weights),
            self.fetcher.fetch(&request.tokenizer),
            self.fetcher.fetch(&request.config),
        )?;
        let weights_len = weights.len();
        let engine = self.factory.construct(EngineInputs {
            weights,
            tokenizer,
            config,
            quantized: request.quantized,
        })?;

        info!(
            model = %request.model_id,
            weights_bytes = weights_len,
            quantized = request.quantized,
            "session constructed"
        );
        Ok(Session::new(request.model_id.clone(), engine))
    }
}
