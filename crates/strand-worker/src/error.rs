#![forbid(unsafe_code)]

use strand_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Inbound message was not a valid command.
    #[error("invalid command: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("worker is shut down")]
    ChannelClosed,
}

pub type WorkerResult<T> = Result<T, WorkerError>;
