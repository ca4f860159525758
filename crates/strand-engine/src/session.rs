use std::sync::Arc;

use strand_core::{ModelId, WeightsSource};
use strand_events::StartRequest;
use tokio::sync::{Mutex, OwnedMutexGuard};
use url::Url;

/// Everything needed to build a session for one model.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionRequest {
    pub model_id: ModelId,
    pub weights: WeightsSource,
    pub tokenizer: Url,
    pub config: Url,
    pub quantized: bool,
}

impl From<&StartRequest> for SessionRequest {
    fn from(request: &StartRequest) -> Self {
        Self {
            model_id: request.model_identifier.clone(),
            weights: request.weights_source.clone(),
            tokenizer: request.tokenizer_source.clone(),
            config: request.config_source.clone(),
            quantized: request.quantized,
        }
    }
}

/// A constructed engine shared by every request for the same model.
///
/// Only one generation drives the engine at a time; holders take the lock
/// for the whole generation.
pub struct Session<E> {
    model_id: ModelId,
    engine: Arc<Mutex<E>>,
}

impl<E> Session<E> {
    pub fn new(model_id: ModelId, engine: E) -> Self {
        Self {
            model_id,
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    #[must_use]
    pub fn model_id(&self) -> &ModelId {
        &self.model_id
    }

    /// Waits until no other generation holds the engine.
    pub async fn lock(&self) -> OwnedMutexGuard<E> {
        Arc::clone(&self.engine).lock_owned().await
    }

    /// Whether `other` refers to the same engine instance.
    #[must_use]
    pub fn same_engine(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.engine, &other.engine)
    }
}

impl<E> Clone for Session<E> {
    fn clone(&self) -> Self {
        Self {
            model_id: self.model_id.clone(),
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<E> std::fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("model_id", &self.model_id)
            .finish_non_exhaustive()
    }
}
