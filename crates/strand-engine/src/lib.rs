#![forbid(unsafe_code)]

//! The opaque token-generation capability and the registry that builds one
//! engine per model.
//!
//! An [`EngineFactory`] turns downloaded weights, tokenizer and config bytes
//! into an [`InferenceEngine`]. [`SessionRegistry::get_session`] fetches
//! those inputs and constructs the engine exactly once per [`ModelId`],
//! even when first requests for the same model arrive concurrently.
//!
//! [`ModelId`]: strand_core::ModelId

mod engine;
mod error;
mod registry;
mod session;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

#[cfg(any(test, feature = "test-utils"))]
pub use engine::MockInferenceEngine;
pub use engine::{EngineFactory, EngineInputs, InferenceEngine, SamplingParams};
pub use error::{EngineError, EngineResult};
pub use registry::SessionRegistry;
pub use session::{Session, SessionRequest};
