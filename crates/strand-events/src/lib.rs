#![forbid(unsafe_code)]

//! Message protocol between the host and the worker, plus the in-process
//! event bus everything emits to.
//!
//! Inbound: [`Command`] (`start` / `abort`), tagged by `command`.
//! Outbound: [`WorkerEvent`], either a [`StatusEvent`] tagged by `status`
//! or `{ "error": ... }`.

mod bus;
mod command;
mod event;
mod progress;
mod status;

pub use bus::EventBus;
pub use command::{Command, StartRequest};
pub use event::Event;
pub use progress::DownloadProgress;
pub use status::{StatusEvent, WorkerEvent};
pub use strand_core::{ModelId, WeightsSource};
