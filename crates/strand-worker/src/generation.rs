use std::sync::Arc;

use strand_engine::{
    EngineFactory, EngineResult, InferenceEngine, SamplingParams, SessionRegistry, SessionRequest,
};
use strand_events::{EventBus, StartRequest, WorkerEvent};
use strand_platform::yield_now;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use crate::{GenerationOptions, GenerationState, LoopState};

/// Runs one `start` request to a terminal state.
pub struct GenerationLoop<F: EngineFactory> {
    registry: Arc<SessionRegistry<F>>,
    bus: EventBus,
    options: GenerationOptions,
}

impl<F: EngineFactory> GenerationLoop<F> {
    pub fn new(
        registry: Arc<SessionRegistry<F>>,
        bus: EventBus,
        options: GenerationOptions,
    ) -> Self {
        Self {
            registry,
            bus,
            options,
        }
    }

    /// Drives `request` until end-of-sequence, budget exhaustion,
    /// cancellation or failure, emitting every event on the bus.
    ///
    /// `cancel` is polled once the engine is ours and then once per token,
    /// before the engine is asked for the next one. Failures are emitted as
    /// a single `error` event.
    pub async fn run(&self, request: StartRequest, cancel: CancellationToken) -> LoopState {
        match self.drive(&request, &cancel).await {
            Ok(state) => state,
            Err(e) => {
                error!(model = %request.model_identifier, error = %e, "generation failed");
                self.bus.emit(WorkerEvent::error(&e)).await;
                LoopState::Errored
            }
        }
    }

    async fn drive(
        &self,
        request: &StartRequest,
        cancel: &CancellationToken,
    ) -> EngineResult<LoopState> {
        debug!(model = %request.model_identifier, state = ?LoopState::Initializing, "start");
        self.bus.emit(WorkerEvent::loading("Starting model")).await;
        let session = self
            .registry
            .get_session(&SessionRequest::from(request))
            .await?;

        if cancel.is_cancelled() {
            return Ok(self.abort(request.prompt.clone()).await);
        }

        self.bus.emit(WorkerEvent::loading("Initializing model")).await;
        let mut engine = session.lock().await;
        // superseded or aborted while another generation held the engine
        if cancel.is_cancelled() {
            return Ok(self.abort(request.prompt.clone()).await);
        }
        let params = SamplingParams::from_request(request, self.options.repeat_last_n);
        let first = engine.init_with_prompt(&request.prompt, &params)?;

        let budget = self
            .options
            .token_budget(request.max_seq_len, &request.prompt);
        let mut state = GenerationState::new(request.prompt.clone(), first, budget);
        debug!(
            model = %session.model_id(),
            budget,
            state = ?LoopState::Generating,
            "prompt initialized"
        );

        while state.has_budget() {
            if cancel.is_cancelled() {
                return Ok(self.abort(state.output()).await);
            }
            let token = engine.next_token()?;
            if token == self.options.eos_token {
                return Ok(self.complete(&state, "end of sequence").await);
            }
            trace!(token = %token, count = state.token_count() + 1, "token");
            self.bus.emit(state.push(token)).await;
            yield_now().await;
        }
        Ok(self.complete(&state, "token budget exhausted").await)
    }

    async fn complete(&self, state: &GenerationState, reason: &str) -> LoopState {
        info!(tokens = state.token_count(), reason, "generation complete");
        self.bus.emit(WorkerEvent::complete(state.output())).await;
        LoopState::Completed
    }

    async fn abort(&self, output: String) -> LoopState {
        info!("generation aborted");
        self.bus.emit(WorkerEvent::aborted(output)).await;
        LoopState::Aborted
    }
}
