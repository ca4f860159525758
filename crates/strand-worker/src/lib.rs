#![forbid(unsafe_code)]

//! Drives generation requests from host commands.
//!
//! [`Worker::spawn`] starts a command loop and returns a [`WorkerHandle`].
//! Each `start` runs a [`GenerationLoop`] on its own task with a fresh
//! cancellation token; `abort` cancels it, observed at the next token
//! boundary. Every `start` ends in exactly one `complete`, `aborted` or
//! `error` event, delivered in order and without loss through
//! [`WorkerHandle::recv`].

mod error;
mod generation;
mod options;
mod state;
#[cfg(test)]
mod test_support;
mod worker;

pub use error::{WorkerError, WorkerResult};
pub use generation::GenerationLoop;
pub use options::GenerationOptions;
pub use state::{GenerationState, LoopState};
pub use worker::{Worker, WorkerHandle};
