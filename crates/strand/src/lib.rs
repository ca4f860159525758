#![forbid(unsafe_code)]

//! # Strand
//!
//! Facade over the strand crates: progressive, cached model downloads and a
//! cancellable token-generation worker driven by JSON commands.
//!
//! ## Quick start
//!
//! ```ignore
//! use strand::prelude::*;
//!
//! let mut handle = WorkerConfig::default().spawn(MyFactory).await?;
//! handle.post_json(start_json).await?;
//! while let Some(event) = handle.recv().await {
//!     println!("{}", event.to_json()?);
//!     if event.is_terminal() { break; }
//! }
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod assets {
    pub use strand_assets::*;
}

pub mod core {
    pub use strand_core::*;
}

pub mod engine {
    pub use strand_engine::*;
}

pub mod events {
    pub use strand_events::*;
}

pub mod fetch {
    pub use strand_fetch::*;
}

pub mod net {
    pub use strand_net::*;
}

pub mod platform {
    pub use strand_platform::*;
}

pub mod worker {
    pub use strand_worker::*;
}

// ── Worker wiring ───────────────────────────────────────────────────────

mod config;
mod error;

pub use config::{CacheBackend, WorkerConfig};
pub use error::{SetupError, SetupResult};

// ── Prelude ─────────────────────────────────────────────────────────────

pub mod prelude {
    pub use strand_engine::{
        EngineError, EngineFactory, EngineInputs, EngineResult, InferenceEngine, SamplingParams,
    };
    pub use strand_events::{Command, Event, StartRequest, StatusEvent, WorkerEvent};
    pub use strand_worker::{WorkerError, WorkerHandle};

    pub use crate::{CacheBackend, WorkerConfig};
}
